//! Battle context tying the roster to the carousel.
//!
//! [`Battle`] is the object a driving loop owns. It applies the outcome of
//! each completed turn to ground truth (ranks, deaths, status effects), fills
//! in the carousel's [`TurnReport`](crate::schedule::TurnReport), and advances
//! the queue.

use crate::config::BattleConfig;
use crate::schedule::{Carousel, CarouselError, Refill, TurnEntry};
use crate::state::{ActorId, ActorState, Roster, StatusEffect, StatusError, StatusKind};

/// A status effect applied during a turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub target: ActorId,
    pub kind: StatusKind,
    pub multiplier: f32,
}

impl StatusApplication {
    pub fn new(target: ActorId, kind: StatusKind, multiplier: f32) -> Self {
        Self {
            target,
            kind,
            multiplier,
        }
    }

    /// Whether this application perturbs future turn order.
    pub fn affects_ordering(&self) -> bool {
        self.kind == StatusKind::Haste
    }
}

/// Everything the combat layer reports back once an actor's turn is over.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    /// Ranks of the skills used this turn, in order.
    pub skill_ranks: Vec<i32>,
    /// Actors defeated or incapacitated during this turn.
    pub defeated: Vec<ActorId>,
    pub statuses: Vec<StatusApplication>,
}

impl TurnOutcome {
    /// A turn with no skill, no casualty and no status change.
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn with_skill_rank(mut self, rank: i32) -> Self {
        self.skill_ranks.push(rank);
        self
    }

    pub fn with_defeated(mut self, actor: ActorId) -> Self {
        self.defeated.push(actor);
        self
    }

    pub fn with_status(mut self, application: StatusApplication) -> Self {
        self.statuses.push(application);
        self
    }
}

/// Result of [`Battle::complete_turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSummary {
    pub owner: ActorId,
    /// Skill rank synthesised for the owner.
    pub rank: i32,
    pub refill: Refill,
}

/// Read-only view handed to turn providers and presentation layers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub turn: u64,
    pub actors: Vec<ActorState>,
    pub queue: Vec<TurnEntry>,
}

/// A single battle: its configuration, combatants and turn carousel.
#[derive(Clone, Debug)]
pub struct Battle {
    config: BattleConfig,
    roster: Roster,
    carousel: Carousel,
    /// Completed turns since [`Battle::init`].
    turn: u64,
}

impl Battle {
    pub fn new(config: BattleConfig, roster: Roster) -> Self {
        let carousel = Carousel::new(&config);
        Self {
            config,
            roster,
            carousel,
            turn: 0,
        }
    }

    /// Computes initial counters and the first lookahead queue.
    pub fn init(&mut self) -> Result<(), CarouselError> {
        self.turn = 0;
        self.carousel.init(self.roster.as_slice())?;

        tracing::info!(
            target: "battle::engine",
            actors = self.roster.len(),
            lookahead = self.carousel.lookahead(),
            "battle initialized"
        );
        Ok(())
    }

    /// Next actor to dispatch. Queued turns of actors that are no longer
    /// active are skipped.
    pub fn peek_next_owner(&mut self) -> Result<ActorId, CarouselError> {
        self.carousel
            .next_dispatchable_owner(self.roster.as_mut_slice())
    }

    /// Applies the outcome of the head turn and advances the carousel.
    ///
    /// The outcome is checked before anything changes, so a rejected outcome
    /// leaves the battle untouched. A turn that defeats the last schedulable
    /// actor still completes and reports [`Refill::Exhausted`]; the following
    /// [`Battle::peek_next_owner`] fails with
    /// [`CarouselError::NoSchedulableActor`].
    pub fn complete_turn(&mut self, outcome: TurnOutcome) -> Result<TurnSummary, CarouselError> {
        let owner = self.carousel.peek_next_owner()?;
        self.validate_outcome(owner, &outcome)?;
        let len = self.roster.len();
        let unknown = |actor: ActorId| CarouselError::UnknownActor { actor, len };

        let rank = {
            let actor = self.roster.get_mut(owner).ok_or_else(|| unknown(owner))?;
            for &rank in &outcome.skill_ranks {
                actor.record_skill_rank(rank);
            }
            actor.synthesise_skill_rank(self.config.default_skill_rank)
        };

        for &defeated in &outcome.defeated {
            let actor = self
                .roster
                .get_mut(defeated)
                .ok_or_else(|| unknown(defeated))?;
            if actor.active {
                actor.deactivate();
                self.carousel.report_mut().mark_defeated(defeated);
                tracing::info!(
                    target: "battle::engine",
                    actor = %defeated,
                    name = %actor.name,
                    "actor defeated"
                );
            }
        }

        for application in &outcome.statuses {
            let actor = self
                .roster
                .get_mut(application.target)
                .ok_or_else(|| unknown(application.target))?;
            actor
                .status_effects
                .apply(
                    application.kind,
                    application.multiplier,
                    self.config.status_duration,
                )
                .map_err(|source| CarouselError::InvalidStatus {
                    actor: application.target,
                    source,
                })?;
            if application.affects_ordering() {
                self.carousel.report_mut().mark_status_trigger();
            }
        }

        if self.config.rank_change_invalidates && rank != self.config.default_skill_rank {
            self.carousel.report_mut().mark_status_trigger();
        }

        let refill = self.carousel.advance_turn(self.roster.as_mut_slice())?;
        self.turn += 1;

        tracing::debug!(
            target: "battle::engine",
            turn = self.turn,
            owner = %owner,
            rank,
            refill = ?refill,
            "turn completed"
        );

        Ok(TurnSummary {
            owner,
            rank,
            refill,
        })
    }

    fn validate_outcome(&self, owner: ActorId, outcome: &TurnOutcome) -> Result<(), CarouselError> {
        let len = self.roster.len();
        let referenced = std::iter::once(owner)
            .chain(outcome.defeated.iter().copied())
            .chain(outcome.statuses.iter().map(|application| application.target));
        for actor in referenced {
            if self.roster.get(actor).is_none() {
                return Err(CarouselError::UnknownActor { actor, len });
            }
        }

        for application in &outcome.statuses {
            if !StatusEffect::is_valid_multiplier(application.multiplier) {
                return Err(CarouselError::InvalidStatus {
                    actor: application.target,
                    source: StatusError::InvalidMultiplier {
                        kind: application.kind,
                        multiplier: application.multiplier,
                    },
                });
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            turn: self.turn,
            actors: self.roster.as_slice().to_vec(),
            queue: self.carousel.entries().cloned().collect(),
        }
    }

    /// Queued turns in dispatch order.
    pub fn queue(&self) -> Vec<TurnEntry> {
        self.carousel.entries().cloned().collect()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }
}
