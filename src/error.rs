/// Error type shared by the host adapters and the panel controller
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    /// A host API promise was rejected
    #[error("{operation} failed: {message}")]
    Host {
        operation: &'static str,
        message: String,
    },

    /// A host payload did not have the expected shape
    #[error("could not decode {what}: {message}")]
    Decode { what: &'static str, message: String },

    #[error("no bookmark with id {0}")]
    NotFound(String),
}

impl PanelError {
    pub fn host(operation: &'static str, message: impl Into<String>) -> Self {
        PanelError::Host {
            operation,
            message: message.into(),
        }
    }
}
