//! Actor state consumed by the carousel.

use arrayvec::ArrayVec;

use super::status::{StatusEffect, StatusEffects, StatusKind};
use crate::config::BattleConfig;
use crate::stats::resolve_tick_speed;

/// Stable identifier of an actor: its position in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Roster slot of this actor.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Species of a combatant. Only used for naming and content lookup.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Species {
    #[default]
    Human,
    /// Wolf-like predator.
    Lupus,
    RedNosedHare,
    MatriarchHare,
}

/// Content-defined spawn data for an actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub species: Species,
    /// Raw speed attribute (expected 0–255).
    pub agility: i32,
    /// Haste multiplier active at spawn, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub haste: Option<f32>,
}

impl ActorTemplate {
    pub fn new(name: impl Into<String>, species: Species, agility: i32) -> Self {
        Self {
            name: name.into(),
            species,
            agility,
            haste: None,
        }
    }

    pub fn with_haste(mut self, multiplier: f32) -> Self {
        self.haste = Some(multiplier);
        self
    }
}

/// A combatant as seen by the battle rules.
///
/// # Invariants
///
/// - `tick_speed` is resolved once from `agility` at spawn; `None` means the
///   attribute fell outside every band and the actor is never scheduled.
/// - `used_ranks` only holds ranks of the turn in progress.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: ActorId,
    pub name: String,
    pub species: Species,
    pub agility: i32,
    pub tick_speed: Option<i32>,
    /// Rank of the heaviest skill used during the actor's last real turn.
    pub last_skill_rank: i32,
    /// False once defeated or incapacitated.
    pub active: bool,
    pub status_effects: StatusEffects,
    used_ranks: ArrayVec<i32, { BattleConfig::MAX_SKILLS_PER_TURN }>,
}

impl ActorState {
    pub fn new(id: ActorId, name: impl Into<String>, species: Species, agility: i32) -> Self {
        Self {
            id,
            name: name.into(),
            species,
            agility,
            tick_speed: resolve_tick_speed(agility),
            last_skill_rank: BattleConfig::DEFAULT_SKILL_RANK,
            active: true,
            status_effects: StatusEffects::empty(),
            used_ranks: ArrayVec::new(),
        }
    }

    /// Spawns an actor from a template. The status duration for a spawn-time
    /// haste comes from `config`.
    pub fn from_template(id: ActorId, template: &ActorTemplate, config: &BattleConfig) -> Self {
        let mut actor = Self::new(id, template.name.clone(), template.species, template.agility);
        actor.last_skill_rank = config.default_skill_rank;
        if let Some(multiplier) = template.haste {
            actor = actor.with_haste(multiplier, config.status_duration);
        }
        actor
    }

    /// Starts the actor with a haste effect. An invalid multiplier is logged
    /// and the actor spawns without haste.
    pub fn with_haste(mut self, multiplier: f32, remaining: i32) -> Self {
        if let Err(err) = self
            .status_effects
            .apply(StatusKind::Haste, multiplier, remaining)
        {
            tracing::warn!(
                target: "battle::status",
                actor = %self.id,
                name = %self.name,
                "ignoring spawn haste: {err}"
            );
        }
        self
    }

    pub fn with_last_skill_rank(mut self, rank: i32) -> Self {
        self.last_skill_rank = rank;
        self
    }

    /// Current haste pair.
    #[inline]
    pub fn haste(&self) -> StatusEffect {
        self.status_effects.haste()
    }

    /// Remembers the rank of a skill used during the current turn.
    ///
    /// Ranks beyond the per-turn capacity are dropped; only the maximum
    /// matters, so the largest one is kept.
    pub fn record_skill_rank(&mut self, rank: i32) {
        if self.used_ranks.try_push(rank).is_err() {
            if let Some(min) = self.used_ranks.iter_mut().min() {
                if rank > *min {
                    *min = rank;
                }
            }
        }
    }

    /// Collapses the ranks used this turn into `last_skill_rank`.
    ///
    /// The heaviest skill dictates the follow-up delay; a turn with no skill
    /// falls back to `default_rank`. Returns the new rank.
    pub fn synthesise_skill_rank(&mut self, default_rank: i32) -> i32 {
        self.last_skill_rank = self
            .used_ranks
            .iter()
            .copied()
            .max()
            .unwrap_or(default_rank);
        self.used_ranks.clear();
        self.last_skill_rank
    }

    /// Removes the actor from scheduling.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.used_ranks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_tick_speed_at_spawn() {
        let actor = ActorState::new(ActorId(0), "Lupus", Species::Lupus, 100);
        assert_eq!(actor.tick_speed, Some(4));
        assert_eq!(actor.last_skill_rank, 3);
        assert!(actor.active);
    }

    #[test]
    fn invalid_template_haste_spawns_neutral() {
        let config = BattleConfig::default();
        let template = ActorTemplate::new("Lupus", Species::Lupus, 20).with_haste(-1.0e9);

        let actor = ActorState::from_template(ActorId(0), &template, &config);
        assert_eq!(actor.haste(), StatusEffect::NEUTRAL);
    }

    #[test]
    fn out_of_range_agility_leaves_tick_speed_unresolved() {
        let actor = ActorState::new(ActorId(0), "Broken", Species::Human, 300);
        assert_eq!(actor.tick_speed, None);
    }

    #[test]
    fn synthesises_heaviest_rank() {
        let mut actor = ActorState::new(ActorId(0), "Hare", Species::RedNosedHare, 50);
        actor.record_skill_rank(2);
        actor.record_skill_rank(5);
        actor.record_skill_rank(4);

        assert_eq!(actor.synthesise_skill_rank(3), 5);
        assert_eq!(actor.last_skill_rank, 5);

        // Next turn without skills falls back to the default
        assert_eq!(actor.synthesise_skill_rank(3), 3);
    }

    #[test]
    fn overflowing_ranks_keep_the_maximum() {
        let mut actor = ActorState::new(ActorId(0), "Hare", Species::RedNosedHare, 50);
        for _ in 0..BattleConfig::MAX_SKILLS_PER_TURN {
            actor.record_skill_rank(1);
        }
        actor.record_skill_rank(7);
        assert_eq!(actor.synthesise_skill_rank(3), 7);
    }

    #[test]
    fn template_haste_uses_configured_duration() {
        let template = ActorTemplate::new("Lupus", Species::Lupus, 80).with_haste(0.5);
        let actor = ActorState::from_template(ActorId(2), &template, &BattleConfig::default());
        assert_eq!(actor.haste(), StatusEffect::new(0.5, 10));
        assert_eq!(actor.id, ActorId(2));
    }
}
