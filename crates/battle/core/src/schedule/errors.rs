//! Error types for the turn carousel.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::{ActorId, StatusError};

/// Errors surfaced by [`super::Carousel`] operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CarouselError {
    /// No active actor with a resolvable counter remains.
    #[error("no schedulable actor remains in the battle")]
    NoSchedulableActor,

    /// The queue was read while empty; the driver and carousel are out of step.
    #[error("turn queue is empty (driver and carousel are desynchronized)")]
    EmptyQueue,

    #[error("actor {actor} is not part of this battle ({len} actors)")]
    UnknownActor { actor: ActorId, len: usize },

    /// A turn outcome carried a status the actor cannot hold.
    #[error("rejected status for {actor}: {source}")]
    InvalidStatus { actor: ActorId, source: StatusError },
}

impl BattleError for CarouselError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSchedulableActor => ErrorSeverity::Fatal,
            Self::EmptyQueue => ErrorSeverity::Internal,
            Self::UnknownActor { .. } | Self::InvalidStatus { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSchedulableActor => "CAROUSEL_NO_SCHEDULABLE_ACTOR",
            Self::EmptyQueue => "CAROUSEL_EMPTY_QUEUE",
            Self::UnknownActor { .. } => "CAROUSEL_UNKNOWN_ACTOR",
            Self::InvalidStatus { .. } => "CAROUSEL_INVALID_STATUS",
        }
    }
}
