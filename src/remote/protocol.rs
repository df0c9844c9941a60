// ABOUTME: A2A protocol types - JSON-RPC 2.0 envelopes plus the message, task,
// ABOUTME: and artifact shapes exchanged by the "message/send" method.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RemoteError;

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// JSON-RPC method used to send a message to a remote agent.
pub const SEND_MESSAGE_METHOD: &str = "message/send";

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Create a new request with an auto-incrementing ID.
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: REQUEST_ID.fetch_add(1, Ordering::SeqCst),
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response. Remote agents may echo ids as numbers or strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Whether the echoed id matches `request_id`. A missing id is accepted.
    pub fn matches(&self, request_id: u64) -> bool {
        match &self.id {
            None | Some(serde_json::Value::Null) => true,
            Some(serde_json::Value::Number(n)) => n.as_u64() == Some(request_id),
            Some(serde_json::Value::String(s)) => s == &request_id.to_string(),
            Some(_) => false,
        }
    }

    /// The result value, or the RPC error as a `RemoteError`.
    pub fn into_result(self) -> Result<serde_json::Value, RemoteError> {
        if let Some(error) = self.error {
            return Err(RemoteError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or(RemoteError::EmptyResult)
    }
}

/// A JSON-RPC 2.0 error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

/// One piece of message or artifact content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
    File { file: serde_json::Value },
    Data { data: serde_json::Value },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// An A2A message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: MessageRole,
    pub parts: Vec<Part>,
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default = "message_kind")]
    pub kind: String,
}

fn message_kind() -> String {
    "message".to_string()
}

impl Message {
    /// A user message carrying a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            parts: vec![Part::text(text)],
            message_id: Uuid::new_v4().to_string(),
            task_id: None,
            context_id: None,
            kind: message_kind(),
        }
    }

    /// Concatenated text parts.
    pub fn text(&self) -> String {
        concat_text(&self.parts)
    }
}

/// The only task state whose artifacts are a finished answer.
pub const TASK_STATE_COMPLETED: &str = "completed";

/// Status of a remote task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// Output produced by a remote task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A remote task returned from "message/send".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Task {
    /// Concatenated text parts of all artifacts, in order.
    pub fn artifact_text(&self) -> String {
        self.artifacts
            .iter()
            .map(|artifact| concat_text(&artifact.parts))
            .collect()
    }
}

/// The result of "message/send": a task or a direct reply.
#[derive(Debug, Clone, PartialEq)]
pub enum SendMessageResult {
    Task(Task),
    Message(Message),
}

impl SendMessageResult {
    /// Decode a JSON-RPC result by its `kind` field.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RemoteError> {
        match value.get("kind").and_then(|k| k.as_str()) {
            Some("message") => Ok(Self::Message(serde_json::from_value(value)?)),
            Some("task") | None => Ok(Self::Task(serde_json::from_value(value)?)),
            Some(other) => Err(RemoteError::Protocol(format!(
                "unexpected result kind: {other}"
            ))),
        }
    }

    /// The text the remote agent produced.
    pub fn text(&self) -> String {
        match self {
            Self::Task(task) => task.artifact_text(),
            Self::Message(message) => message.text(),
        }
    }

    /// The agent's answer, or an error when the task did not complete.
    pub fn into_text(self) -> Result<String, RemoteError> {
        match self {
            Self::Task(task) if task.status.state != TASK_STATE_COMPLETED => {
                let detail = task
                    .status
                    .message
                    .as_ref()
                    .map(Message::text)
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| "no status message".to_string());
                Err(RemoteError::Protocol(format!(
                    "remote task ended in state {}: {}",
                    task.status.state, detail
                )))
            }
            other => Ok(other.text()),
        }
    }
}

fn concat_text(parts: &[Part]) -> String {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
