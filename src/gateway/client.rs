use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::types::{CompletionClient, CompletionRequest};
use super::GatewayError;
use crate::config::GatewayConfig;
use crate::models::Message;

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: Zeroizing<String>,
    client: reqwest::blocking::Client,
}

impl OpenAiClient {
    /// Create a client from explicit configuration. No request timeout is set:
    /// each call blocks until the endpoint answers or the connection fails.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| GatewayError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Request body for /chat/completions
#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

/// Response body from /chat/completions
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let url = self.url();
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            temperature = request.temperature,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.as_str())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    GatewayError::Connection(self.base_url.clone())
                } else {
                    GatewayError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body: api_error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| GatewayError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GatewayError::EmptyCompletion)
    }
}

/// Prefer the API's own `error.message` over the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

enum MockBehavior {
    Fixed(String),
    Failing(String),
    Scripted(RefCell<VecDeque<Result<String, String>>>),
}

/// Mock completion client for testing. Returns configured responses and
/// records every request it receives.
pub struct MockCompletionClient {
    behavior: MockBehavior,
    requests: RefCell<Vec<CompletionRequest>>,
}

impl MockCompletionClient {
    /// Answer every request with the same text.
    pub fn new(response: &str) -> Self {
        Self::with_behavior(MockBehavior::Fixed(response.to_string()))
    }

    /// Fail every request as if the endpoint were unreachable.
    pub fn failing(detail: &str) -> Self {
        Self::with_behavior(MockBehavior::Failing(detail.to_string()))
    }

    /// Answer requests in order; `Err` entries fail with a connection error.
    /// Requests beyond the script fail with `EmptyCompletion`.
    pub fn scripted(responses: Vec<Result<&str, &str>>) -> Self {
        let queue = responses
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self::with_behavior(MockBehavior::Scripted(RefCell::new(queue)))
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.borrow().clone()
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.requests.borrow_mut().push(request.clone());
        match &self.behavior {
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Failing(detail) => Err(GatewayError::Connection(detail.clone())),
            MockBehavior::Scripted(queue) => match queue.borrow_mut().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(detail)) => Err(GatewayError::Connection(detail)),
                None => Err(GatewayError::EmptyCompletion),
            },
        }
    }
}
