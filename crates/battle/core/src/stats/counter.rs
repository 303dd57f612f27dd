//! Counter value model.
//!
//! Formula: `counter = floor(tick_speed × rank × haste)`
//!
//! - `rank` is 3 for a neutral action; heavier skills declare higher ranks
//!   (slower follow-up), light ones lower ranks.
//! - `haste` is 1.0 when neutral; below 1.0 accelerates, above 1.0 delays.

/// Computes the counter value for an actor's next turn.
///
/// Returns `None` when `tick_speed` is negative (an unresolved tick speed
/// propagated from [`super::resolve_tick_speed`]).
///
/// # Examples
/// - tick speed 10, rank 3, haste 1.0 → 30
/// - tick speed 10, rank 3, haste 0.5 → 15
/// - tick speed 5, rank 5, haste 1.5 → 37
pub fn compute_counter(tick_speed: i32, rank: i32, haste: f32) -> Option<i32> {
    if tick_speed < 0 {
        return None;
    }

    let raw = tick_speed as f64 * rank as f64 * haste as f64;
    Some(raw.floor() as i32)
}
