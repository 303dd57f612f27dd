//! Unified error types surfaced by the runtime API.
//!
//! Wraps scheduler failures and worker coordination failures so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{ActorId, BattleError, CarouselError, ErrorSeverity};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Carousel(#[from] CarouselError),

    #[error("turn provider not set")]
    ProviderNotSet,

    #[error("runtime requires a battle to be configured before building")]
    MissingBattle,

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("turn completed by {provided} but the current owner is {expected}")]
    OwnerMismatch {
        expected: ActorId,
        provided: ActorId,
    },
}

impl RuntimeError {
    /// True once no actor is left to schedule; a driving loop stops here.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Carousel(CarouselError::NoSchedulableActor))
    }
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Carousel(err) => err.severity(),
            Self::ProviderNotSet | Self::MissingBattle => ErrorSeverity::Validation,
            Self::OwnerMismatch { .. } => ErrorSeverity::Recoverable,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Carousel(err) => err.error_code(),
            Self::ProviderNotSet => "RUNTIME_PROVIDER_NOT_SET",
            Self::MissingBattle => "RUNTIME_MISSING_BATTLE",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::OwnerMismatch { .. } => "RUNTIME_OWNER_MISMATCH",
        }
    }
}
