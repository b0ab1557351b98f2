//! Unified error types surfaced by the runtime API.
//!
//! Rejected commands are not errors here: they come back as an
//! [`sparkle_core::ExecutionOutcome`] with an `ERROR` event. These variants
//! cover the plumbing around the engine.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("engine worker command channel closed")]
    CommandChannelClosed,

    #[error("engine worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("engine worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("{name} must be greater than zero")]
    ZeroBufferSize { name: &'static str },
}
