//! Per-turn invalidation triggers.

use crate::state::ActorId;

/// What happened during the turn that just completed, as far as ordering is
/// concerned.
///
/// The driver fills this in before calling
/// [`Carousel::advance_turn`](super::Carousel::advance_turn), which reads and
/// clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Actors that became inactive this turn.
    pub defeated: Vec<ActorId>,
    /// An effect fired that perturbs future ordering (haste, rank change).
    pub status_trigger_applied: bool,
}

impl TurnReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an actor that died or was incapacitated this turn.
    pub fn mark_defeated(&mut self, actor: ActorId) {
        if !self.defeated.contains(&actor) {
            self.defeated.push(actor);
        }
    }

    pub fn mark_status_trigger(&mut self) {
        self.status_trigger_applied = true;
    }

    #[inline]
    pub fn unit_died(&self) -> bool {
        !self.defeated.is_empty()
    }

    /// Full recompute is required when any trigger fired.
    #[inline]
    pub fn should_invalidate(&self) -> bool {
        self.unit_died() || self.status_trigger_applied
    }

    /// Returns the current report and resets the triggers.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_keeps_incremental_refill() {
        assert!(!TurnReport::new().should_invalidate());
    }

    #[test]
    fn either_trigger_invalidates() {
        let mut died = TurnReport::new();
        died.mark_defeated(ActorId(1));
        assert!(died.unit_died());
        assert!(died.should_invalidate());

        let mut status = TurnReport::new();
        status.mark_status_trigger();
        assert!(!status.unit_died());
        assert!(status.should_invalidate());
    }

    #[test]
    fn take_clears_triggers() {
        let mut report = TurnReport::new();
        report.mark_defeated(ActorId(0));
        report.mark_defeated(ActorId(0));
        report.mark_status_trigger();

        let taken = report.take();
        assert_eq!(taken.defeated, vec![ActorId(0)]);
        assert!(taken.status_trigger_applied);
        assert!(!report.should_invalidate());
    }
}
