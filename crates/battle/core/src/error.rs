//! Common error infrastructure for battle-core.
//!
//! Domain errors (`CarouselError`, `ConfigError`) live next to the code that
//! raises them; this module holds the shared severity classification.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry or pick another path
/// - **Validation**: invalid input, reject without retry
/// - **Internal**: scheduler/driver desynchronisation or broken invariants
/// - **Fatal**: the battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// Gives the runtime a uniform way to pick log levels and decide whether a
/// failure ends the battle.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
