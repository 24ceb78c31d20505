use thiserror::Error;

/// Errors raised by composition operations and by method bodies.
///
/// Every operation either fully succeeds or leaves the object graph untouched, so
/// an error never implies a half-built node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    /// A method name that is not a usable key, or a capability called with the
    /// wrong kind of argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The value reachable under the name is absent or not callable.
    #[error("`{0}` is not a method")]
    NotAMethod(String),

    /// The props mapping handed to `extend` is not object-like.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Creating the node would make the delegation chain longer than allowed.
    #[error("delegation chain would exceed {limit} nodes")]
    ChainTooDeep { limit: usize },

    #[error("config error: {0}")]
    Config(String),

    /// Raised by user supplied method bodies.
    #[error("{0}")]
    Thrown(String),
}

impl ComposeError {
    pub fn thrown(message: impl Into<String>) -> Self {
        ComposeError::Thrown(message.into())
    }
}
