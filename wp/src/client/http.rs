//! HTTP implementation of the planner client
//!
//! Plain JSON request/response against the planner service, with bounded
//! retries and exponential backoff on transient failures. Each logical call
//! gets a correlation id so one user action can be followed through the log
//! across retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::is_retryable_status;
use super::{ChatTurnRequest, ChatTurnResponse, FetchPlanRequest, FetchPlanResponse, PlannerClient, PlannerError};
use crate::config::ServiceConfig;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 500;

/// Planner service client over HTTP
pub struct HttpPlannerClient {
    base_url: String,
    http: Client,
    timeout: Duration,
    max_retries: u32,
}

impl HttpPlannerClient {
    /// Create a new client from configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, PlannerError> {
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(PlannerError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
            max_retries: config.max_retries,
        })
    }

    /// Upstream timeouts surface as an ordinary failure, not a hung session.
    fn map_send_error(&self, error: reqwest::Error) -> PlannerError {
        if error.is_timeout() {
            PlannerError::Timeout(self.timeout)
        } else {
            PlannerError::Network(error)
        }
    }

    /// POST a JSON body and parse a JSON response, retrying transient errors.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, PlannerError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let correlation_id = Uuid::now_v7();

        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                warn!(
                    %correlation_id,
                    attempt,
                    backoff_ms = backoff,
                    "post_json: retrying after transient error"
                );
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            debug!(%correlation_id, %url, attempt, "post_json: sending");

            let response = match self.http.post(&url).json(body).send().await {
                Ok(r) => r,
                Err(e) => {
                    let error = self.map_send_error(e);
                    debug!(%correlation_id, %error, "post_json: send failed");
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    last_error = Some(error);
                    continue;
                }
            };

            let status = response.status().as_u16();
            if !response.status().is_success() {
                let message = response.text().await.unwrap_or_default();
                let error = PlannerError::ApiError { status, message };
                debug!(%correlation_id, status, "post_json: error status");
                if !is_retryable_status(status) {
                    return Err(error);
                }
                last_error = Some(error);
                continue;
            }

            let parsed = response
                .json::<R>()
                .await
                .map_err(|e| PlannerError::InvalidResponse(e.to_string()))?;
            debug!(%correlation_id, status, "post_json: ok");
            return Ok(parsed);
        }

        Err(last_error.unwrap_or_else(|| PlannerError::InvalidResponse("retries exhausted".to_string())))
    }
}

#[async_trait]
impl PlannerClient for HttpPlannerClient {
    async fn fetch_plan(&self, request: FetchPlanRequest) -> Result<FetchPlanResponse, PlannerError> {
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            day_count = request.date_range.day_count,
            "fetch_plan: called"
        );

        let response: FetchPlanResponse = self.post_json("/api/plan", &request).await?;

        if response.session_id.is_empty() {
            return Err(PlannerError::InvalidResponse("plan response has no session id".to_string()));
        }

        Ok(response)
    }

    async fn send_chat_turn(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatTurnResponse, PlannerError> {
        debug!(session_id = ?session_id, message_len = message.len(), "send_chat_turn: called");

        let request = ChatTurnRequest {
            session_id: session_id.map(str::to_string),
            message: message.to_string(),
        };

        let response: ChatTurnResponse = self.post_json("/api/chat", &request).await?;

        if response.session_id.is_empty() {
            return Err(PlannerError::InvalidResponse("chat response has no session id".to_string()));
        }

        Ok(response)
    }

    async fn end_session(&self, session_id: &str) -> Result<(), PlannerError> {
        let url = format!("{}/api/chat/{}", self.base_url, session_id);
        let correlation_id = Uuid::now_v7();
        debug!(%correlation_id, %session_id, "end_session: called");

        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                warn!(%correlation_id, attempt, backoff_ms = backoff, "end_session: retrying");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            let response = match self.http.delete(&url).send().await {
                Ok(r) => r,
                Err(e) => {
                    let error = self.map_send_error(e);
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    last_error = Some(error);
                    continue;
                }
            };

            let status = response.status().as_u16();
            if response.status().is_success() {
                debug!(%correlation_id, status, "end_session: ok");
                return Ok(());
            }

            let message = response.text().await.unwrap_or_default();
            let error = PlannerError::ApiError { status, message };
            if !is_retryable_status(status) {
                return Err(error);
            }
            last_error = Some(error);
        }

        Err(last_error.unwrap_or_else(|| PlannerError::InvalidResponse("retries exhausted".to_string())))
    }
}
