// Console event loop - Dispatches page events to the prediction flow
use crate::application::prediction_flow::{FlowOutcome, PredictionFlow};
use crate::infrastructure::terminal_view::TerminalView;
use crate::presentation::input::{InputParser, UserAction};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

pub struct Console {
    view: Arc<TerminalView>,
    flow: PredictionFlow,
    in_flight: Vec<JoinHandle<()>>,
}

impl Console {
    pub fn new(view: Arc<TerminalView>, flow: PredictionFlow) -> Self {
        Self {
            view,
            flow,
            in_flight: Vec::new(),
        }
    }

    /// Read lines until EOF or `quit`, then wait for outstanding requests.
    pub async fn run<R>(mut self, reader: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut parser = InputParser::new();
        let mut lines = reader.lines();

        self.view.show_form();

        while let Some(line) = lines.next_line().await? {
            let Some(action) = parser.parse(&line) else {
                continue;
            };

            if action.is_submit_trigger() {
                self.dispatch_submit();
                continue;
            }

            match action {
                UserAction::Edit { field, value } => self.view.set_field(field, value),
                UserAction::Focus(field) => tracing::debug!("Focus on {}", field),
                UserAction::ShowForm => self.view.show_form(),
                UserAction::Quit => break,
                UserAction::Unrecognized(text) => {
                    tracing::warn!("Unrecognized input: {}", text);
                }
                UserAction::Submit | UserAction::KeyPress { .. } => {}
            }
        }

        let pending = self.in_flight.len();
        if pending > 0 {
            tracing::debug!("Waiting for {} outstanding predictions", pending);
        }
        for result in futures::future::join_all(self.in_flight).await {
            if let Err(e) = result {
                tracing::error!("Prediction task panicked: {}", e);
            }
        }

        Ok(())
    }

    /// Each submission runs on its own task; earlier ones are not cancelled.
    fn dispatch_submit(&mut self) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let flow = self.flow.clone();
        self.in_flight.push(tokio::spawn(async move {
            let outcome = flow.submit().await;
            tracing::debug!("Prediction flow idle again after {:?}", outcome.state());
            match outcome {
                FlowOutcome::Succeeded { value, label, scroll } => {
                    tracing::debug!("Chart point {} = {}", label, value);
                    let _ = scroll.await;
                }
                FlowOutcome::Rejected(err) => tracing::debug!("Not submitted: {}", err),
                FlowOutcome::Failed(err) => tracing::debug!("Request failed: {}", err),
                FlowOutcome::Discarded { sequence } => {
                    tracing::debug!("Request #{} superseded", sequence)
                }
            }
        }));
    }
}
