//! Speed stats that feed the turn carousel.
//!
//! ```text
//! [ agility attribute ] → resolve_tick_speed → [ tick speed ]
//!                                                   ↓
//!                  [ skill rank, haste ] → compute_counter → [ counter value ]
//! ```
//!
//! Both steps are pure. A `None` result marks an actor the carousel must not
//! schedule.

pub mod counter;
pub mod speed;

pub use counter::compute_counter;
pub use speed::{TICK_SPEED_BANDS, TickSpeedBand, resolve_tick_speed};
