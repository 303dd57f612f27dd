//! Battle configuration constants and tunable parameters.

use crate::error::{BattleError, ErrorSeverity};

/// Battle configuration shared by the carousel and the battle context.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of future turns kept in the lookahead queue.
    pub lookahead: usize,

    /// Skill rank assumed when the real choice is unknown (a neutral action).
    pub default_skill_rank: i32,

    /// Turns a freshly applied non-neutral status effect lasts.
    pub status_duration: i32,

    /// When set, a completed turn whose synthesised rank differs from
    /// `default_skill_rank` forces a full queue recompute.
    pub rank_change_invalidates: bool,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of combatants on a battle map.
    pub const MAX_ACTORS: usize = 64;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Upper bound on skills an actor can chain within a single turn.
    pub const MAX_SKILLS_PER_TURN: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LOOKAHEAD: usize = 16;
    pub const DEFAULT_SKILL_RANK: i32 = 3;
    pub const DEFAULT_STATUS_DURATION: i32 = 10;

    pub fn new() -> Self {
        Self {
            lookahead: Self::DEFAULT_LOOKAHEAD,
            default_skill_rank: Self::DEFAULT_SKILL_RANK,
            status_duration: Self::DEFAULT_STATUS_DURATION,
            rank_change_invalidates: false,
        }
    }

    pub fn with_lookahead(lookahead: usize) -> Self {
        Self {
            lookahead,
            ..Self::new()
        }
    }

    /// Rejects values the carousel cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead == 0 {
            return Err(ConfigError::ZeroLookahead);
        }
        if self.default_skill_rank <= 0 {
            return Err(ConfigError::NonPositiveSkillRank(self.default_skill_rank));
        }
        if self.status_duration <= 0 {
            return Err(ConfigError::NonPositiveStatusDuration(self.status_duration));
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors produced by [`BattleConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("lookahead must hold at least one turn")]
    ZeroLookahead,

    #[error("default skill rank must be positive (got {0})")]
    NonPositiveSkillRank(i32),

    #[error("status duration must be positive (got {0})")]
    NonPositiveStatusDuration(i32),
}

impl BattleError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroLookahead => "CONFIG_ZERO_LOOKAHEAD",
            Self::NonPositiveSkillRank(_) => "CONFIG_NON_POSITIVE_SKILL_RANK",
            Self::NonPositiveStatusDuration(_) => "CONFIG_NON_POSITIVE_STATUS_DURATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_carousel_constants() {
        let config = BattleConfig::default();
        assert_eq!(config.lookahead, 16);
        assert_eq!(config.default_skill_rank, 3);
        assert_eq!(config.status_duration, 10);
        assert!(!config.rank_change_invalidates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_lookahead() {
        let config = BattleConfig::with_lookahead(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroLookahead));
    }

    #[test]
    fn rejects_non_positive_rank() {
        let config = BattleConfig {
            default_skill_rank: 0,
            ..BattleConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveSkillRank(0))
        );
    }
}
