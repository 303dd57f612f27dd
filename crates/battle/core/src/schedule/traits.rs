use crate::state::{ActorState, StatusEffect};

/// Narrow capability the carousel needs from a combatant.
///
/// Implementors are addressed by their slot in the slice handed to the
/// carousel; the slot index is the actor's identity for scheduling purposes.
pub trait Schedulable {
    /// Display name written into queue entries.
    fn name(&self) -> &str;

    /// Resolved tick speed, or `None` if the speed attribute was unresolvable.
    fn tick_speed(&self) -> Option<i32>;

    /// Rank of the heaviest skill used during the last real turn.
    fn last_skill_rank(&self) -> i32;

    /// False once the actor is removed from scheduling.
    fn is_active(&self) -> bool;

    /// Real haste `(multiplier, remaining)` pair.
    fn haste(&self) -> StatusEffect;

    /// Real once-per-completed-turn status countdown.
    fn tick_status_effects(&mut self);
}

impl Schedulable for ActorState {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick_speed(&self) -> Option<i32> {
        self.tick_speed
    }

    fn last_skill_rank(&self) -> i32 {
        self.last_skill_rank
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn haste(&self) -> StatusEffect {
        self.status_effects.haste()
    }

    fn tick_status_effects(&mut self) {
        let expired = self.status_effects.tick();
        if !expired.is_empty() {
            tracing::debug!(
                target: "battle::status",
                actor = %self.id,
                expired = ?expired.as_slice(),
                "status effects expired"
            );
        }
    }
}
