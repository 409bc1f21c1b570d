//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and rejected actions so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ActionError, ExecuteError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker stopped before the battle finished")]
    ResultChannelClosed,

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a lineup or an initial battle state before building")]
    MissingBattle,

    #[error(transparent)]
    Action(#[from] ExecuteError),
}

impl RuntimeError {
    /// The engine's rejection reason, when the error is a rejected action.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            RuntimeError::Action(error) => Some(error.error()),
            _ => None,
        }
    }
}
