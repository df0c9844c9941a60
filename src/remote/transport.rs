// ABOUTME: A2aTransport - sends one message to a remote agent and returns its reply.
// ABOUTME: JsonRpcTransport implements "message/send" as a JSON-RPC POST over HTTP.

use std::time::Duration;

use async_trait::async_trait;

use super::DEFAULT_REMOTE_TIMEOUT;
use super::protocol::{
    JsonRpcRequest, JsonRpcResponse, Message, SEND_MESSAGE_METHOD, SendMessageResult,
};
use crate::error::RemoteError;

/// Delivers messages to remote agents.
#[async_trait]
pub trait A2aTransport: Send + Sync {
    async fn send_message(
        &self,
        endpoint: &str,
        message: Message,
    ) -> Result<SendMessageResult, RemoteError>;
}

/// Build an HTTP client whose requests give up after `timeout`.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("relay/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to build HTTP client, using defaults");
            reqwest::Client::new()
        })
}

/// JSON-RPC 2.0 over HTTP POST.
#[derive(Debug, Clone)]
pub struct JsonRpcTransport {
    http_client: reqwest::Client,
}

impl JsonRpcTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_REMOTE_TIMEOUT)
    }

    /// Bound every HTTP exchange by `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_client(http_client(timeout))
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, headers).
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Default for JsonRpcTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl A2aTransport for JsonRpcTransport {
    async fn send_message(
        &self,
        endpoint: &str,
        message: Message,
    ) -> Result<SendMessageResult, RemoteError> {
        let request = JsonRpcRequest::new(
            SEND_MESSAGE_METHOD,
            Some(serde_json::json!({ "message": message })),
        );
        let request_id = request.id;

        let response = self
            .http_client
            .post(endpoint)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Protocol(format!(
                "HTTP {} - {}",
                status.as_u16(),
                body
            )));
        }

        let body = response.text().await?;
        let rpc_response: JsonRpcResponse = serde_json::from_str(&body)?;

        if !rpc_response.matches(request_id) {
            return Err(RemoteError::Protocol(format!(
                "Response ID {:?} does not match request ID {}",
                rpc_response.id, request_id
            )));
        }

        SendMessageResult::from_value(rpc_response.into_result()?)
    }
}
