// Recording fakes for application-layer tests
use crate::application::page_view::{ChartSurface, Clock, PageView, ScrollTarget};
use crate::application::prediction_service::PredictionService;
use crate::domain::chart::{ChartOptions, ChartSeries};
use crate::domain::error::FlowError;
use crate::domain::prediction::{FormField, PredictionRequest, PredictionResult};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use tokio::sync::oneshot;

#[derive(Default)]
pub struct RecordingSurface {
    frames: Mutex<Vec<Vec<f64>>>,
}

impl RecordingSurface {
    pub fn frames(&self) -> Vec<Vec<f64>> {
        self.frames.lock().unwrap().clone()
    }
}

impl ChartSurface for RecordingSurface {
    fn render(&self, series: &ChartSeries, _options: &ChartOptions) {
        self.frames.lock().unwrap().push(series.values());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Result(String, f32),
    Alert(String),
    Scroll(ScrollTarget),
}

#[derive(Default)]
pub struct RecordingView {
    form: Mutex<HashMap<FormField, String>>,
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn filled() -> Self {
        let view = Self::default();
        view.set_field(FormField::Date, "2024-05-01");
        view.set_field(FormField::Temperature, "31.5");
        view.set_field(FormField::Humidity, "60");
        view.set_field(FormField::DayType, "weekday");
        view.set_field(FormField::Season, "summer");
        view
    }

    pub fn set_field(&self, field: FormField, value: &str) {
        self.form.lock().unwrap().insert(field, value.to_string());
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_result(&self) -> Option<(String, f32)> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Result(text, opacity) => Some((text, opacity)),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Alert(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }
}

impl PageView for RecordingView {
    fn field_value(&self, field: FormField) -> Option<String> {
        self.form.lock().unwrap().get(&field).cloned()
    }

    fn set_result(&self, text: &str, opacity: f32) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Result(text.to_string(), opacity));
    }

    fn alert(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Alert(message.to_string()));
    }

    fn scroll_into_view(&self, target: ScrollTarget) {
        self.events.lock().unwrap().push(ViewEvent::Scroll(target));
    }
}

/// Answers calls in order from a prepared queue
#[derive(Default)]
pub struct ScriptedService {
    responses: Mutex<VecDeque<Result<PredictionResult, FlowError>>>,
    requests: Mutex<Vec<PredictionRequest>>,
}

impl ScriptedService {
    pub fn with_loads(loads: &[f64]) -> Self {
        let service = Self::default();
        for load in loads {
            service.push(Ok(PredictionResult { predicted_load: *load }));
        }
        service
    }

    pub fn push(&self, response: Result<PredictionResult, FlowError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionService for ScriptedService {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, FlowError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FlowError::Transport("no scripted response".to_string())))
    }
}

/// Each call waits until the test resolves its gate
#[derive(Default)]
pub struct GatedService {
    gates: Mutex<VecDeque<oneshot::Receiver<Result<PredictionResult, FlowError>>>>,
    started: AtomicUsize,
}

impl GatedService {
    pub fn gate(&self) -> oneshot::Sender<Result<PredictionResult, FlowError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionService for GatedService {
    async fn predict(&self, _request: &PredictionRequest) -> Result<PredictionResult, FlowError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FlowError::Transport("gate dropped".to_string()))),
            None => Err(FlowError::Transport("no gate".to_string())),
        }
    }
}

/// Starts at 14:05:00 local time and ticks one second per reading
pub struct SteppingClock {
    seconds: AtomicI64,
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self {
            seconds: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Local> {
        let offset = self.seconds.fetch_add(1, Ordering::SeqCst);
        let start = Local.with_ymd_and_hms(2024, 5, 1, 14, 5, 0).unwrap();
        start + chrono::Duration::seconds(offset)
    }
}
