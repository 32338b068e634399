// Capabilities the page exposes to the application layer
use crate::domain::chart::{ChartOptions, ChartSeries};
use crate::domain::prediction::FormField;
use chrono::{DateTime, Local};

pub const FULL_OPACITY: f32 = 1.0;
pub const PENDING_OPACITY: f32 = 0.5;

/// Element a deferred scroll should bring into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Chart,
    Result,
}

/// Form controls, the result display and modal alerts.
pub trait PageView: Send + Sync {
    /// Current value of a control, `None` if the control is absent
    fn field_value(&self, field: FormField) -> Option<String>;

    fn set_result(&self, text: &str, opacity: f32);

    /// Blocking, user-visible message
    fn alert(&self, message: &str);

    /// Smooth-scroll the target to the centre of the viewport
    fn scroll_into_view(&self, target: ScrollTarget);
}

/// Rendering handle for the load chart
pub trait ChartSurface: Send + Sync {
    fn render(&self, series: &ChartSeries, options: &ChartOptions);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}
