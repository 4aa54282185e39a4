// Fault taxonomy for a single poll tick.
//
// Every variant is recoverable: the turn controller logs it and waits for
// the next tick.

/// Errors that can occur while fetching, deciding or submitting
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Network, HTTP or GraphQL-level failure talking to the game service
    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// Query response could not be turned into a snapshot
    #[error("Malformed game state: {0}")]
    MalformedState(String),

    /// The blocking search task panicked or was cancelled
    #[error("Search task failed: {0}")]
    SearchTask(String),
}

impl AgentError {
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        AgentError::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AgentError::MalformedState(message.into())
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
