//! Speculative haste mirror used during queue synthesis.

use crate::state::StatusEffect;

/// Projected haste state of one actor.
///
/// Seeded from the real haste at the start of every full recompute and only
/// decremented when a synthetic turn is assigned to the actor, so the
/// projection sees haste running out without the real status changing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowHaste {
    pub multiplier: f32,
    pub remaining: i32,
}

impl ShadowHaste {
    pub const NEUTRAL: Self = Self {
        multiplier: 1.0,
        remaining: 0,
    };

    /// Copies the real haste state.
    pub fn from_real(effect: StatusEffect) -> Self {
        Self {
            multiplier: effect.multiplier,
            remaining: effect.remaining,
        }
    }

    /// Consumes one projected turn of haste.
    pub fn consume(&mut self) {
        if self.multiplier == 1.0 {
            return;
        }

        self.remaining -= 1;
        if self.remaining <= 0 {
            *self = Self::NEUTRAL;
        }
    }
}

impl Default for ShadowHaste {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverts_to_neutral_after_remaining_turns() {
        let mut shadow = ShadowHaste::from_real(StatusEffect::new(0.5, 2));
        shadow.consume();
        assert_eq!(shadow.multiplier, 0.5);
        assert_eq!(shadow.remaining, 1);
        shadow.consume();
        assert_eq!(shadow, ShadowHaste::NEUTRAL);
    }

    #[test]
    fn neutral_shadow_is_untouched() {
        let mut shadow = ShadowHaste::NEUTRAL;
        shadow.consume();
        assert_eq!(shadow, ShadowHaste::NEUTRAL);
    }
}
