//! Status effect system for actors.
//!
//! Every effect is a `(multiplier, remaining)` pair. A multiplier of 1.0 is
//! neutral; an absent entry reads as neutral. `remaining` counts completed
//! turns of the affected actor, not ticks.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};

/// Kinds of status effects an actor can carry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Scales physical impact.
    Bravery,
    /// Scales magical impact.
    Faith,
    /// Scales physical resistance.
    Armor,
    /// Scales magical resistance.
    Shield,
    /// Periodic healing.
    Regen,
    /// Scales counter computation; below 1.0 the actor acts sooner.
    Haste,
}

/// A multiplier together with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub multiplier: f32,
    pub remaining: i32,
}

impl StatusEffect {
    pub const NEUTRAL: Self = Self {
        multiplier: 1.0,
        remaining: 0,
    };

    pub const fn new(multiplier: f32, remaining: i32) -> Self {
        Self {
            multiplier,
            remaining,
        }
    }

    /// Multipliers must be finite and strictly positive.
    #[inline]
    pub fn is_valid_multiplier(multiplier: f32) -> bool {
        multiplier.is_finite() && multiplier > 0.0
    }

    /// Returns true if the multiplier has no effect.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.multiplier == 1.0
    }

    /// Consumes one turn of duration.
    ///
    /// Neutral effects are left untouched. When the duration runs out the
    /// effect snaps back to neutral. Returns true if the effect expired.
    pub fn decay(&mut self) -> bool {
        if self.is_neutral() {
            return false;
        }

        self.remaining -= 1;
        if self.remaining <= 0 {
            *self = Self::NEUTRAL;
            return true;
        }
        false
    }
}

impl Default for StatusEffect {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct StatusEntry {
    kind: StatusKind,
    effect: StatusEffect,
}

/// Active (non-neutral) status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    entries: ArrayVec<StatusEntry, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty (all neutral) status effect set.
    pub fn empty() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    /// Reads an effect; absent kinds are neutral.
    pub fn get(&self, kind: StatusKind) -> StatusEffect {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| entry.effect)
            .unwrap_or(StatusEffect::NEUTRAL)
    }

    /// Haste pair consumed by the carousel.
    pub fn haste(&self) -> StatusEffect {
        self.get(StatusKind::Haste)
    }

    /// Sets an effect, replacing any existing one of the same kind.
    ///
    /// A neutral multiplier clears the entry regardless of `duration`.
    /// Non-finite or non-positive multipliers are rejected and leave the set
    /// unchanged.
    pub fn apply(
        &mut self,
        kind: StatusKind,
        multiplier: f32,
        duration: i32,
    ) -> Result<(), StatusError> {
        if !StatusEffect::is_valid_multiplier(multiplier) {
            return Err(StatusError::InvalidMultiplier { kind, multiplier });
        }

        let effect = StatusEffect::new(multiplier, duration);
        if effect.is_neutral() || duration <= 0 {
            self.remove(kind);
            return Ok(());
        }

        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.kind == kind) {
            existing.effect = effect;
            return Ok(());
        }

        // StatusKind has fewer variants than the capacity, so a missing kind
        // always fits.
        self.entries.push(StatusEntry { kind, effect });
        Ok(())
    }

    /// Removes an effect immediately.
    pub fn remove(&mut self, kind: StatusKind) {
        self.entries.retain(|entry| entry.kind != kind);
    }

    /// Real once-per-completed-turn countdown.
    ///
    /// Returns the kinds that expired during this tick.
    pub fn tick(&mut self) -> ArrayVec<StatusKind, { BattleConfig::MAX_STATUS_EFFECTS }> {
        let mut expired = ArrayVec::new();
        for entry in self.entries.iter_mut() {
            if entry.effect.decay() {
                expired.push(entry.kind);
            }
        }
        self.entries.retain(|entry| !entry.effect.is_neutral());
        expired
    }

    /// Iterates over active effects.
    pub fn iter(&self) -> impl Iterator<Item = (StatusKind, StatusEffect)> + '_ {
        self.entries.iter().map(|entry| (entry.kind, entry.effect))
    }

    /// Returns true if every effect is neutral.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors produced by [`StatusEffects::apply`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum StatusError {
    #[error("{kind} multiplier must be finite and positive (got {multiplier})")]
    InvalidMultiplier { kind: StatusKind, multiplier: f32 },
}

impl BattleError for StatusError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMultiplier { .. } => "STATUS_INVALID_MULTIPLIER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn absent_effect_reads_neutral() {
        let effects = StatusEffects::empty();
        assert_eq!(effects.haste(), StatusEffect::NEUTRAL);
        assert!(effects.is_empty());
    }

    #[test]
    fn haste_expires_after_its_duration() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::Haste, 0.5, 2).unwrap();

        assert!(effects.tick().is_empty());
        assert_eq!(effects.haste(), StatusEffect::new(0.5, 1));

        let expired = effects.tick();
        assert_eq!(expired.as_slice(), &[StatusKind::Haste]);
        assert_eq!(effects.haste(), StatusEffect::NEUTRAL);
        assert!(effects.is_empty());
    }

    #[test]
    fn neutral_application_clears_effect() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::Bravery, 1.5, 10).unwrap();
        effects.apply(StatusKind::Bravery, 1.0, 10).unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn reapplication_replaces_pair() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::Haste, 0.5, 3).unwrap();
        effects.apply(StatusKind::Haste, 2.0, 10).unwrap();
        assert_eq!(effects.haste(), StatusEffect::new(2.0, 10));
        assert_eq!(effects.iter().count(), 1);
    }

    #[test]
    fn rejects_non_finite_and_non_positive_multipliers() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::Haste, 0.5, 3).unwrap();

        for multiplier in [0.0, -1.0e9, f32::NAN, f32::INFINITY] {
            let result = effects.apply(StatusKind::Haste, multiplier, 10);
            assert!(matches!(
                result,
                Err(StatusError::InvalidMultiplier {
                    kind: StatusKind::Haste,
                    ..
                })
            ));
        }
        assert_eq!(effects.haste(), StatusEffect::new(0.5, 3));
    }

    #[test]
    fn parses_legacy_upper_case_names() {
        assert_eq!(StatusKind::from_str("HASTE"), Ok(StatusKind::Haste));
        assert_eq!(StatusKind::from_str("regen"), Ok(StatusKind::Regen));
        assert_eq!(StatusKind::Shield.as_ref(), "shield");
    }
}
