use thiserror::Error;

/// Errors surfaced by the external world/physics engine.
///
/// Rejections are expected in a live simulation (a block vanishes mid-dig, a
/// container closes, an equip races a pickup) and are converted to boolean
/// results at the session boundary. Only `Internal` propagates to routines.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The engine refused the operation.
    #[error("engine rejected {operation}: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
    /// Navigation was abandoned before the goal was reached.
    #[error("navigation aborted: {0}")]
    GoalAborted(String),
    /// Unexpected engine-level failure.
    #[error("engine failure: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }

    /// True for transient world-state races the session swallows into a
    /// false/none result instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::GoalAborted(_))
    }
}

/// Errors surfaced to calling routines.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Caller supplied a nonsensical parameter. Reported immediately, never
    /// retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Result alias for operations delegated to the engine.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
