use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchedError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    // Rejected before the first tick runs
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Process {0} not found in trace")]
    NotFound(String),

    #[error("Malformed trace: {0}")]
    MalformedTrace(String),
}

impl SchedError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedTrace(msg.into())
    }
}
