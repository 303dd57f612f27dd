//! Tick speed resolution.
//!
//! The raw agility attribute (0–255) is discretized into a small number of
//! tick-speed bands. Lower tick speed means the actor's counter drains sooner,
//! so faster actors sit in the lower bands.

/// A half-open agility interval `[lower, upper)` mapped to a tick speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSpeedBand {
    pub lower: i32,
    pub upper: i32,
    pub tick_speed: i32,
}

impl TickSpeedBand {
    const fn new(upper: i32, lower: i32, tick_speed: i32) -> Self {
        Self {
            lower,
            upper,
            tick_speed,
        }
    }

    /// Returns true if `attribute` falls inside this band.
    #[inline]
    pub const fn contains(&self, attribute: i32) -> bool {
        attribute >= self.lower && attribute < self.upper
    }
}

/// Agility bands, ordered from the fastest band down to the slowest.
///
/// Bands are contiguous and cover `[0, 256)`.
pub const TICK_SPEED_BANDS: [TickSpeedBand; 19] = [
    TickSpeedBand::new(256, 170, 3),
    TickSpeedBand::new(170, 98, 4),
    TickSpeedBand::new(98, 62, 5),
    TickSpeedBand::new(62, 44, 6),
    TickSpeedBand::new(44, 35, 7),
    TickSpeedBand::new(35, 29, 8),
    TickSpeedBand::new(29, 23, 9),
    TickSpeedBand::new(23, 19, 10),
    TickSpeedBand::new(19, 17, 11),
    TickSpeedBand::new(17, 15, 12),
    TickSpeedBand::new(15, 12, 13),
    TickSpeedBand::new(12, 10, 14),
    TickSpeedBand::new(10, 7, 15),
    TickSpeedBand::new(7, 5, 16),
    TickSpeedBand::new(5, 4, 20),
    TickSpeedBand::new(4, 3, 22),
    TickSpeedBand::new(3, 2, 24),
    TickSpeedBand::new(2, 1, 26),
    TickSpeedBand::new(1, 0, 28),
];

/// Maps an agility attribute to its tick speed.
///
/// Returns `None` when no band contains the attribute (outside `[0, 256)`).
/// Callers treat `None` as "do not schedule this actor".
///
/// # Examples
/// - agility 255 → 3
/// - agility 100 → 4
/// - agility 0 → 28
pub fn resolve_tick_speed(attribute: i32) -> Option<i32> {
    TICK_SPEED_BANDS
        .iter()
        .find(|band| band.contains(attribute))
        .map(|band| band.tick_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_extremes_of_valid_range() {
        assert_eq!(resolve_tick_speed(255), Some(3));
        assert_eq!(resolve_tick_speed(0), Some(28));
    }

    #[test]
    fn band_edges_are_half_open() {
        assert_eq!(resolve_tick_speed(170), Some(3));
        assert_eq!(resolve_tick_speed(169), Some(4));
        assert_eq!(resolve_tick_speed(98), Some(4));
        assert_eq!(resolve_tick_speed(97), Some(5));
        assert_eq!(resolve_tick_speed(4), Some(20));
        assert_eq!(resolve_tick_speed(1), Some(26));
    }

    #[test]
    fn out_of_range_attribute_is_unresolved() {
        assert_eq!(resolve_tick_speed(256), None);
        assert_eq!(resolve_tick_speed(-1), None);
        assert_eq!(resolve_tick_speed(i32::MAX), None);
    }

    #[test]
    fn bands_are_contiguous_and_monotonic() {
        for pair in TICK_SPEED_BANDS.windows(2) {
            assert_eq!(pair[0].lower, pair[1].upper);
            assert!(pair[0].tick_speed < pair[1].tick_speed);
        }
        assert_eq!(TICK_SPEED_BANDS[0].upper, 256);
        assert_eq!(TICK_SPEED_BANDS[TICK_SPEED_BANDS.len() - 1].lower, 0);
    }

    #[test]
    fn every_valid_attribute_resolves() {
        assert!((0..256).all(|agility| resolve_tick_speed(agility).is_some()));
    }
}
