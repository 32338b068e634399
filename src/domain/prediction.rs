// Prediction request/result domain models
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The five form controls the prediction page reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Date,
    Temperature,
    Humidity,
    DayType,
    Season,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Date,
        FormField::Temperature,
        FormField::Humidity,
        FormField::DayType,
        FormField::Season,
    ];

    /// Element id on the page, also the JSON key sent to the service
    pub fn element_id(&self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::Temperature => "temperature",
            FormField::Humidity => "humidity",
            FormField::DayType => "daytype",
            FormField::Season => "season",
        }
    }

    pub fn from_element_id(id: &str) -> Option<FormField> {
        Self::ALL.into_iter().find(|f| f.element_id() == id)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Raw form values, forwarded verbatim as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub date: String,
    pub temperature: String,
    pub humidity: String,
    pub daytype: String,
    pub season: String,
}

impl PredictionRequest {
    /// Build a request from whatever the form currently holds.
    /// Absent controls read as empty strings and fail validation.
    pub fn from_form<F>(mut read: F) -> Self
    where
        F: FnMut(FormField) -> Option<String>,
    {
        let mut value = |field| read(field).unwrap_or_default();
        Self {
            date: value(FormField::Date),
            temperature: value(FormField::Temperature),
            humidity: value(FormField::Humidity),
            daytype: value(FormField::DayType),
            season: value(FormField::Season),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Temperature => &self.temperature,
            FormField::Humidity => &self.humidity,
            FormField::DayType => &self.daytype,
            FormField::Season => &self.season,
        }
    }

    /// Fields that are empty. Whitespace is not trimmed.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.field(*f).is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Megawatts
    pub predicted_load: f64,
}

impl PredictionResult {
    /// Extract `predicted_load` from a response body.
    /// Only a finite JSON number counts; null, strings and missing keys do not.
    pub fn from_json(body: &Value) -> Option<Self> {
        body.get("predicted_load")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .map(|predicted_load| Self { predicted_load })
    }
}

/// "1234.50 MW"
pub fn format_load(value: f64) -> String {
    format!("{:.2} MW", value)
}
