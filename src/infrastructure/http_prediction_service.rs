// HTTP implementation of the prediction service
use crate::application::prediction_service::PredictionService;
use crate::domain::error::FlowError;
use crate::domain::prediction::{PredictionRequest, PredictionResult};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    client: reqwest::Client,
    url: String,
}

impl HttpPredictionService {
    pub fn new(url: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn describe_rejection(status: StatusCode, body: &Value) -> String {
        match body.get("error").and_then(Value::as_str) {
            Some(error) => format!("status {}: {}", status, error),
            None => format!("status {}: no numeric predicted_load in {}", status, body),
        }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, FlowError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| FlowError::Transport(e.to_string()))?;

        // Status is not checked; the body decides
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FlowError::Transport(e.to_string()))?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            FlowError::Transport(format!("status {}: response is not JSON: {}", status, e))
        })?;
        tracing::debug!("API response: {}", body);

        PredictionResult::from_json(&body)
            .ok_or_else(|| FlowError::MalformedResponse(Self::describe_rejection(status, &body)))
    }
}
