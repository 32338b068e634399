// Prediction flow - Validate the form, call the service, update the page
use crate::application::chart_session::ChartSession;
use crate::application::page_view::{Clock, FULL_OPACITY, PENDING_OPACITY, PageView, ScrollTarget};
use crate::application::prediction_service::PredictionService;
use crate::domain::error::{FlowError, ValidationError};
use crate::domain::prediction::{PredictionRequest, format_load};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

pub const VALIDATION_ALERT: &str = "Please fill all fields";
pub const FAILURE_ALERT: &str = "Prediction failed. Try again.";
pub const CALCULATING_TEXT: &str = "Calculating...";
pub const PLACEHOLDER_TEXT: &str = "-- MW";

/// en-US style "02:05:09 PM"
pub const TIME_LABEL_FORMAT: &str = "%I:%M:%S %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    Requesting,
    Succeeded,
    Failed,
}

/// What to do with a response when requests overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Apply every response as it arrives; the last one to land wins
    #[default]
    ArrivalOrder,
    /// Drop responses to requests older than the last applied one
    LatestRequestWins,
}

#[derive(Debug)]
pub enum FlowOutcome {
    Rejected(ValidationError),
    Succeeded {
        value: f64,
        label: String,
        scroll: JoinHandle<()>,
    },
    Failed(FlowError),
    Discarded {
        sequence: u64,
    },
}

impl FlowOutcome {
    /// State the flow ended in before returning to idle
    pub fn state(&self) -> FlowState {
        match self {
            FlowOutcome::Rejected(_) | FlowOutcome::Discarded { .. } => FlowState::Idle,
            FlowOutcome::Succeeded { .. } => FlowState::Succeeded,
            FlowOutcome::Failed(_) => FlowState::Failed,
        }
    }
}

#[derive(Default)]
struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record `sequence` as applied; false if a newer one already was
    fn admit(&self, sequence: u64, ordering: ResponseOrdering) -> bool {
        let newest = self.applied.fetch_max(sequence, Ordering::SeqCst);
        match ordering {
            ResponseOrdering::ArrivalOrder => true,
            ResponseOrdering::LatestRequestWins => newest < sequence,
        }
    }
}

#[derive(Clone)]
pub struct PredictionFlow {
    view: Arc<dyn PageView>,
    service: Arc<dyn PredictionService>,
    chart: Arc<Mutex<ChartSession>>,
    clock: Arc<dyn Clock>,
    ordering: ResponseOrdering,
    sequencer: Arc<RequestSequencer>,
}

impl PredictionFlow {
    pub fn new(
        view: Arc<dyn PageView>,
        service: Arc<dyn PredictionService>,
        chart: Arc<Mutex<ChartSession>>,
        clock: Arc<dyn Clock>,
        ordering: ResponseOrdering,
    ) -> Self {
        Self {
            view,
            service,
            chart,
            clock,
            ordering,
            sequencer: Arc::new(RequestSequencer::default()),
        }
    }

    /// Run one validate → request → resolve cycle.
    ///
    /// Overlapping calls are allowed; each one applies its own result to
    /// the shared chart and result display when it resolves.
    pub async fn submit(&self) -> FlowOutcome {
        self.transition(FlowState::Idle, FlowState::Validating);
        let request = PredictionRequest::from_form(|field| self.view.field_value(field));

        let missing = request.missing_fields();
        if !missing.is_empty() {
            let err = ValidationError { missing };
            tracing::debug!("Submission rejected: {}", FlowError::Validation(err.clone()));
            self.view.alert(VALIDATION_ALERT);
            self.transition(FlowState::Validating, FlowState::Idle);
            return FlowOutcome::Rejected(err);
        }

        self.transition(FlowState::Validating, FlowState::Requesting);
        self.view.set_result(CALCULATING_TEXT, PENDING_OPACITY);
        let sequence = self.sequencer.issue();

        let response = self.service.predict(&request).await;

        if !self.sequencer.admit(sequence, self.ordering) {
            tracing::warn!("Discarding stale response to request #{}", sequence);
            return FlowOutcome::Discarded { sequence };
        }

        match response {
            Ok(result) => self.succeed(result.predicted_load),
            Err(err) => self.fail(err),
        }
    }

    fn succeed(&self, value: f64) -> FlowOutcome {
        self.transition(FlowState::Requesting, FlowState::Succeeded);
        self.view.set_result(&format_load(value), FULL_OPACITY);

        let label = self.clock.now().format(TIME_LABEL_FORMAT).to_string();
        let (target, points) = {
            let mut chart = self.chart.lock().unwrap_or_else(PoisonError::into_inner);
            chart.append_point(label.clone(), value);
            let target = if chart.is_enabled() {
                ScrollTarget::Chart
            } else {
                ScrollTarget::Result
            };
            (target, chart.series().len())
        };
        tracing::info!(
            "Predicted load {} at {} ({} points charted)",
            format_load(value),
            label,
            points
        );

        // Scroll on the next frame, after the chart redraw has landed
        let view = self.view.clone();
        let scroll = tokio::spawn(async move {
            tokio::task::yield_now().await;
            view.scroll_into_view(target);
        });

        FlowOutcome::Succeeded {
            value,
            label,
            scroll,
        }
    }

    fn fail(&self, err: FlowError) -> FlowOutcome {
        self.transition(FlowState::Requesting, FlowState::Failed);
        tracing::error!("Prediction failed: {}", err);
        self.view.set_result(PLACEHOLDER_TEXT, FULL_OPACITY);
        self.view.alert(FAILURE_ALERT);
        FlowOutcome::Failed(err)
    }

    fn transition(&self, from: FlowState, to: FlowState) {
        tracing::debug!("Prediction flow {:?} -> {:?}", from, to);
    }
}
