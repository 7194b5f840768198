use thiserror::Error;

pub type PluginResult<T> = Result<T, PluginError>;

/// Failure reported by the host when it refuses a request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Invalid geometry for '{node}': {message}")]
    InvalidGeometry { node: String, message: String },

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Variable '{0}' not found")]
    VariableNotFound(String),

    #[error("Host rejected request: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Unknown message type '{0}'")]
    UnknownMessageType(String),

    #[error("Invalid payload for '{message_type}': {message}")]
    InvalidPayload {
        message_type: String,
        message: String,
    },

    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}
