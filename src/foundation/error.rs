/// Convenience result type used across westley.
pub type WestleyResult<T> = Result<T, WestleyError>;

/// Top-level error taxonomy used by the serializer and consumer APIs.
#[derive(thiserror::Error, Debug)]
pub enum WestleyError {
    /// Structurally invalid graph data (dangling handles, cycles, bad repeat counts).
    #[error("validation error: {0}")]
    Validation(String),

    /// The markup sink could not allocate another element.
    #[error("markup sink error: {0}")]
    Sink(String),

    /// Errors when reading or writing graph JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while delivering the finished document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WestleyError {
    /// Build a [`WestleyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WestleyError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`WestleyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WestleyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
