//! Calls the hosted model for a completion.
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub trait CompletionProvider: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<String, GenerationError>>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Posts `{model, prompt}` as JSON to a completion endpoint.
#[derive(Clone, Debug)]
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    retry_count: u32,
}

impl HttpCompletionClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        model: String,
        retry_count: u32,
    ) -> HttpCompletionClient {
        HttpCompletionClient {
            client: Client::new(),
            endpoint,
            api_key,
            model,
            temperature: None,
            max_tokens: None,
            retry_count,
        }
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    async fn attempt(&self, prompt: &str, timeout: Duration) -> Result<String, GenerationError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&self.endpoint).timeout(timeout).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenerationError::from_transport(e, timeout))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::from_transport(e, timeout))?;

        if !status.is_success() {
            return Err(GenerationError::Provider(format!("HTTP {}: {}", status, text)));
        }

        let json: Value = serde_json::from_str(&text)?;
        completion_text(&json)
    }

    async fn complete_with_retry(&self, prompt: &str, timeout: Duration) -> Result<String, GenerationError> {
        let mut attempt = 0;
        loop {
            match self.attempt(prompt, timeout).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.retry_count && e.retryable() => {
                    attempt += 1;
                    debug!("Completion attempt {} failed, retrying: {}", attempt, e);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl CompletionProvider for HttpCompletionClient {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        self.complete_with_retry(prompt, timeout).boxed()
    }
}

/// Pulls the generated text out of a response body, either `{"result": ..}` or
/// `{"choices": [{"text": ..}]}`. An `error_msg` or `error` field wins over both.
pub fn completion_text(body: &Value) -> Result<String, GenerationError> {
    for field in ["error_msg", "error"] {
        match body.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if s.is_empty() => {}
            Some(Value::String(s)) => return Err(GenerationError::Provider(s.clone())),
            Some(other) => return Err(GenerationError::Provider(other.to_string())),
        }
    }

    let text = body
        .get("result")
        .and_then(Value::as_str)
        .or_else(|| {
            body.get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("text"))
                .and_then(Value::as_str)
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResult());
    }
    Ok(text.to_string())
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Request exceeded the {0:.2}s generation timeout")]
    Timeout(f64),
    #[error("{0}")]
    Provider(String),
    #[error("No result")]
    EmptyResult(),
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl GenerationError {
    fn from_transport(e: reqwest::Error, timeout: Duration) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(timeout.as_secs_f64())
        } else {
            GenerationError::ReqwestError(e)
        }
    }

    /// An empty answer will not change on a second ask.
    fn retryable(&self) -> bool {
        !matches!(self, GenerationError::EmptyResult())
    }
}
