use std::collections::VecDeque;

use super::entry::TurnEntry;
use super::errors::CarouselError;
use super::report::TurnReport;
use super::shadow::ShadowHaste;
use super::traits::Schedulable;
use crate::config::BattleConfig;
use crate::state::ActorId;
use crate::stats::compute_counter;

/// How [`Carousel::advance_turn`] refilled the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Refill {
    /// One entry was appended; earlier projections were kept.
    Incremental,
    /// The whole queue was discarded and rebuilt from real state.
    Recomputed,
    /// The turn completed but no actor is left to schedule; the queue only
    /// holds stale entries, if any.
    Exhausted,
}

/// Turn-order scheduler owning the counters and the lookahead queue.
///
/// Actors are passed in by slice on every call; slot `i` of the slice is
/// [`ActorId`] `i`. The same slice (same order, same length) must be used for
/// the lifetime of a battle.
///
/// # State
///
/// - `real_counters`: time remaining for each actor at the current real turn.
///   Advanced only by [`Carousel::advance_turn`].
/// - `counters`: speculative copy used while synthesising the queue.
/// - `shadow`: speculative haste per actor.
/// - `first_turn_assigned`: whether the actor's next projected turn still
///   uses its real last skill rank.
///
/// # Invariants
///
/// - `queue.len() <= lookahead`
/// - Only active actors with a resolved counter are ever selected.
/// - Ties are broken by ascending actor index.
#[derive(Clone, Debug)]
pub struct Carousel {
    lookahead: usize,
    default_rank: i32,
    real_counters: Vec<Option<i32>>,
    counters: Vec<Option<i32>>,
    shadow: Vec<ShadowHaste>,
    first_turn_assigned: Vec<bool>,
    queue: VecDeque<TurnEntry>,
    report: TurnReport,
}

impl Carousel {
    /// Creates an empty carousel. Call [`Carousel::init`] before use.
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            lookahead: config.lookahead,
            default_rank: config.default_skill_rank,
            real_counters: Vec::new(),
            counters: Vec::new(),
            shadow: Vec::new(),
            first_turn_assigned: Vec::new(),
            queue: VecDeque::with_capacity(config.lookahead),
            report: TurnReport::new(),
        }
    }

    /// Computes every actor's initial counter from its real rank and haste,
    /// then builds the first queue.
    pub fn init<A: Schedulable>(&mut self, actors: &[A]) -> Result<(), CarouselError> {
        self.real_counters = actors.iter().map(real_counter_of).collect();
        self.counters = vec![None; actors.len()];
        self.shadow = vec![ShadowHaste::NEUTRAL; actors.len()];
        self.first_turn_assigned = vec![false; actors.len()];
        self.report = TurnReport::new();

        tracing::debug!(
            target: "battle::carousel",
            actors = actors.len(),
            counters = ?self.real_counters,
            "initial counters computed"
        );

        self.pre_compute_queue(actors)
    }

    /// Full recompute: discards every projected turn and synthesises
    /// `lookahead` new ones from real state.
    pub fn pre_compute_queue<A: Schedulable>(
        &mut self,
        actors: &[A],
    ) -> Result<(), CarouselError> {
        self.reset_projection(actors);

        while self.queue.len() < self.lookahead {
            let next = self.select_next_event_index(actors)?;
            self.assign_turn(actors, next)?;
        }

        tracing::debug!(
            target: "battle::carousel",
            queue = ?self.queue.iter().map(|entry| entry.owner.0).collect::<Vec<_>>(),
            "turn queue recomputed"
        );
        Ok(())
    }

    /// Clears the queue and reseeds the speculative state from real state
    /// without synthesising any entry.
    pub fn reset_projection<A: Schedulable>(&mut self, actors: &[A]) {
        self.sync_len(actors);
        self.queue.clear();
        self.first_turn_assigned.fill(false);

        for (slot, actor) in actors.iter().enumerate() {
            self.shadow[slot] = ShadowHaste::from_real(actor.haste());
            self.counters[slot] = self.real_counters[slot];

            if actor.is_active() && self.real_counters[slot].is_none() {
                tracing::warn!(
                    target: "battle::carousel",
                    actor = slot,
                    name = actor.name(),
                    "actor has no resolvable counter and will not be scheduled"
                );
            }
        }
    }

    /// Selects the active actor with the smallest counter and drains every
    /// active counter by that amount.
    ///
    /// The selected actor's counter is left at zero for
    /// [`Carousel::assign_turn`] to overwrite.
    pub fn select_next_event_index<A: Schedulable>(
        &mut self,
        actors: &[A],
    ) -> Result<ActorId, CarouselError> {
        let (slot, elapsed) = actors
            .iter()
            .zip(self.counters.iter())
            .enumerate()
            .filter(|(_, (actor, _))| actor.is_active())
            .filter_map(|(slot, (_, counter))| counter.map(|value| (slot, value)))
            .min_by_key(|&(slot, value)| (value, slot))
            .ok_or(CarouselError::NoSchedulableActor)?;

        for (actor, counter) in actors.iter().zip(self.counters.iter_mut()) {
            if !actor.is_active() {
                continue;
            }
            if let Some(value) = counter {
                *value = value.saturating_sub(elapsed);
            }
        }

        Ok(ActorId::from_index(slot))
    }

    /// Appends a projected turn for `owner` and recomputes its speculative
    /// counter.
    ///
    /// The first projected turn of an actor within a recompute pass uses its
    /// real last skill rank; later ones assume the nominal rank. Each
    /// assignment consumes one turn of shadow haste.
    pub fn assign_turn<A: Schedulable>(
        &mut self,
        actors: &[A],
        owner: ActorId,
    ) -> Result<(), CarouselError> {
        let slot = owner.index();
        let actor = actors
            .get(slot)
            .filter(|_| slot < self.counters.len())
            .ok_or(CarouselError::UnknownActor {
                actor: owner,
                len: actors.len(),
            })?;

        if self.queue.len() >= self.lookahead {
            if let Some(evicted) = self.queue.pop_front() {
                tracing::warn!(
                    target: "battle::carousel",
                    evicted = %evicted.owner,
                    "turn queue full, evicting head entry"
                );
            }
        }
        self.queue.push_back(TurnEntry::new(owner, actor.name()));

        let rank = if self.first_turn_assigned[slot] {
            self.default_rank
        } else {
            self.first_turn_assigned[slot] = true;
            actor.last_skill_rank()
        };

        let shadow = &mut self.shadow[slot];
        self.counters[slot] = actor
            .tick_speed()
            .and_then(|tick_speed| compute_counter(tick_speed, rank, shadow.multiplier));
        shadow.consume();

        Ok(())
    }

    /// Owner of the next queued turn.
    ///
    /// An empty queue means the driver advanced past what the carousel
    /// produced; this is a programming error and is reported as such.
    pub fn peek_next_owner(&self) -> Result<ActorId, CarouselError> {
        self.queue.front().map(|entry| entry.owner).ok_or_else(|| {
            tracing::error!(
                target: "battle::carousel",
                "peeked an empty turn queue"
            );
            CarouselError::EmptyQueue
        })
    }

    /// Like [`Carousel::peek_next_owner`], but skips entries whose owner is no
    /// longer active by forcing no-op advances.
    ///
    /// Once the queue has drained because nobody is schedulable, this reports
    /// [`CarouselError::NoSchedulableActor`] rather than an empty queue.
    pub fn next_dispatchable_owner<A: Schedulable>(
        &mut self,
        actors: &mut [A],
    ) -> Result<ActorId, CarouselError> {
        loop {
            if self.queue.is_empty() && !self.has_schedulable(actors) {
                return Err(CarouselError::NoSchedulableActor);
            }
            let owner = self.peek_next_owner()?;
            let active = actors
                .get(owner.index())
                .map(Schedulable::is_active)
                .ok_or(CarouselError::UnknownActor {
                    actor: owner,
                    len: actors.len(),
                })?;

            if active {
                return Ok(owner);
            }

            tracing::debug!(
                target: "battle::carousel",
                owner = %owner,
                "skipping queued turn of inactive actor"
            );
            self.advance_turn(actors)?;
        }
    }

    /// Completes the head turn.
    ///
    /// Advances the real clock to the owner's turn, recomputes the owner's
    /// real counter from its real rank and haste, applies the real status
    /// countdown, then consumes the [`TurnReport`] to decide between an
    /// incremental refill and a full recompute. The turn still counts as
    /// completed when the refill finds nobody to schedule; that case returns
    /// [`Refill::Exhausted`].
    pub fn advance_turn<A: Schedulable>(
        &mut self,
        actors: &mut [A],
    ) -> Result<Refill, CarouselError> {
        let entry = self.queue.pop_front().ok_or_else(|| {
            tracing::error!(
                target: "battle::carousel",
                "advanced an empty turn queue"
            );
            CarouselError::EmptyQueue
        })?;
        let slot = entry.owner.index();
        if slot >= actors.len() || slot >= self.real_counters.len() {
            return Err(CarouselError::UnknownActor {
                actor: entry.owner,
                len: actors.len(),
            });
        }

        if actors[slot].is_active() {
            self.advance_real_clock(actors, slot);
            actors[slot].tick_status_effects();
        }

        let report = self.report.take();
        if report.should_invalidate() {
            tracing::debug!(
                target: "battle::carousel",
                owner = %entry.owner,
                defeated = ?report.defeated,
                status_trigger = report.status_trigger_applied,
                "turn invalidated projection"
            );
            let recomputed = self.pre_compute_queue(actors);
            return self.refill_or_exhaust(recomputed, Refill::Recomputed);
        }

        let appended = self
            .select_next_event_index(actors)
            .and_then(|next| self.assign_turn(actors, next));
        self.refill_or_exhaust(appended, Refill::Incremental)
    }

    fn refill_or_exhaust(
        &self,
        result: Result<(), CarouselError>,
        refill: Refill,
    ) -> Result<Refill, CarouselError> {
        match result {
            Ok(()) => Ok(refill),
            Err(CarouselError::NoSchedulableActor) => {
                tracing::info!(
                    target: "battle::carousel",
                    stale = self.queue.len(),
                    "no schedulable actor left after turn"
                );
                Ok(Refill::Exhausted)
            }
            Err(err) => Err(err),
        }
    }

    fn has_schedulable<A: Schedulable>(&self, actors: &[A]) -> bool {
        actors
            .iter()
            .zip(self.real_counters.iter())
            .any(|(actor, counter)| actor.is_active() && counter.is_some())
    }

    fn advance_real_clock<A: Schedulable>(&mut self, actors: &[A], slot: usize) {
        if let Some(elapsed) = self.real_counters[slot] {
            for (actor, counter) in actors.iter().zip(self.real_counters.iter_mut()) {
                if !actor.is_active() {
                    continue;
                }
                if let Some(value) = counter {
                    *value = value.saturating_sub(elapsed).max(0);
                }
            }
        }
        self.real_counters[slot] = real_counter_of(&actors[slot]);
    }

    /// Grows the per-actor vectors to match `actors`.
    fn sync_len<A: Schedulable>(&mut self, actors: &[A]) {
        let len = actors.len();
        if self.real_counters.len() < len {
            let fresh = actors[self.real_counters.len()..]
                .iter()
                .map(real_counter_of);
            self.real_counters.extend(fresh);
        }
        self.real_counters.truncate(len);
        self.counters.resize(len, None);
        self.shadow.resize(len, ShadowHaste::NEUTRAL);
        self.first_turn_assigned.resize(len, false);
    }

    /// Pending triggers for the turn in progress.
    pub fn report(&self) -> &TurnReport {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut TurnReport {
        &mut self.report
    }

    /// Queued turns in the order they will be taken.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &TurnEntry> + '_ {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// Speculative counter of an actor.
    pub fn counter(&self, actor: ActorId) -> Option<i32> {
        self.counters.get(actor.index()).copied().flatten()
    }

    /// Counter of an actor at the current real turn.
    pub fn real_counter(&self, actor: ActorId) -> Option<i32> {
        self.real_counters.get(actor.index()).copied().flatten()
    }

    pub fn shadow_haste(&self, actor: ActorId) -> Option<ShadowHaste> {
        self.shadow.get(actor.index()).copied()
    }
}

fn real_counter_of<A: Schedulable>(actor: &A) -> Option<i32> {
    let rank = actor.last_skill_rank();
    let haste = actor.haste().multiplier;
    actor
        .tick_speed()
        .and_then(|tick_speed| compute_counter(tick_speed, rank, haste))
}
