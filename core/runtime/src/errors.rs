use thiserror::Error;

/// Raised by completeness checks when a node or container is not well-formed.
///
/// A tree is well-formed when every `One` and `Many` is populated, no sequence
/// holds a null slot, and no error-marker node appears anywhere in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not well-formed: {message}")]
pub struct NotWellFormed {
    message: String,
}

impl NotWellFormed {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
