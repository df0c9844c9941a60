// ABOUTME: Defines all error types for the relay library using thiserror.
// ABOUTME: Each concern has its own error enum, unified under RelayError.

/// Top-level error type for the relay library.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Errors raised while building a dispatcher. All of these abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("At least one subagent type must be registered")]
    NoSubagentTypes,

    #[error("No resolver found that can resolve subagent reference: {reference}")]
    NoResolver { reference: String },

    #[error("No executor registered for subagent kind: {kind}")]
    NoExecutor { kind: String },

    #[error("Duplicate subagent name '{name}' (from {locator})")]
    DuplicateName { name: String, locator: String },

    #[error("Task description template must contain the {{agents}} placeholder")]
    InvalidTemplate,

    #[error("{var} has an invalid value: {value}")]
    InvalidEnv { var: String, value: String },

    #[error("Failed to discover references under {path}: {message}")]
    Discovery { path: String, message: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Errors from turning a reference into a definition.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Failed to read subagent document {locator}: {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No document found for locator: {0}")]
    UnknownDocument(String),

    #[error("Subagent document {locator} is missing required header '{field}'")]
    MissingField { locator: String, field: &'static str },

    #[error("Failed to fetch agent card from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Agent card request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Resolver for kind {expected} cannot resolve reference of kind {actual}")]
    KindMismatch { expected: String, actual: String },
}

/// Errors from running a subagent. Caught at the executor boundary and
/// reported to the calling agent as text.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Model turn failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Remote agent call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Subagent definition for '{name}' is not of kind {expected}")]
    WrongDefinition { name: String, expected: String },

    #[error("Subagent task panicked: {0}")]
    Panicked(String),
}

/// Errors from the remote agent transport.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Timed out after {0:?} waiting for the remote agent")]
    Timeout(std::time::Duration),

    #[error("Remote agent returned neither a result nor an error")]
    EmptyResult,

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Agent exceeded max iterations ({0})")]
    MaxIterations(usize),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}
