// Error taxonomy for the prediction page
use super::prediction::FormField;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("missing required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<FormField>,
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(FormField::element_id)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("chart render target not found")]
    MissingRenderTarget,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("prediction request failed: {0}")]
    Transport(String),

    #[error("invalid API response: {0}")]
    MalformedResponse(String),
}
