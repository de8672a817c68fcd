use thiserror::Error;

/// Session-fatal error for one polling cycle
///
/// Every variant aborts the current cycle. Results gathered so far are
/// discarded by the orchestrator and the next cycle restarts the handshake
/// from scratch. A field whose marker is missing is not an error; it simply
/// decodes to `None`.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Timeout waiting for controller reply")]
    Timeout,

    #[error("Protocol violation at {step}: {detail}")]
    ProtocolViolation { step: &'static str, detail: String },

    #[error("Device busy: controller already serves another session")]
    DeviceBusy,

    #[error("Field decode error for {key}: cannot parse {text:?}")]
    FieldDecode { key: String, text: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SessionError {
    /// Build a protocol violation for the given step
    pub fn violation(step: &'static str, detail: impl Into<String>) -> Self {
        SessionError::ProtocolViolation {
            step,
            detail: detail.into(),
        }
    }

    /// Build a length mismatch violation
    pub fn unexpected_length(step: &'static str, expected: usize, actual: usize) -> Self {
        Self::violation(
            step,
            format!("expected {} bytes, got {}", expected, actual),
        )
    }

    /// Short machine-friendly name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Connection(_) => "connection",
            SessionError::Timeout => "timeout",
            SessionError::ProtocolViolation { .. } => "protocol-violation",
            SessionError::DeviceBusy => "device-busy",
            SessionError::FieldDecode { .. } => "field-decode",
            SessionError::InvalidConfig(_) => "invalid-config",
        }
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
