// Service trait for the remote load prediction endpoint
use crate::domain::error::FlowError;
use crate::domain::prediction::{PredictionRequest, PredictionResult};
use async_trait::async_trait;

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Submit one request. Failures are either `FlowError::Transport`
    /// or `FlowError::MalformedResponse`; there is no retry.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, FlowError>;
}
