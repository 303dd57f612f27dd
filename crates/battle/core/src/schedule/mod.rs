//! Turn carousel: speed-driven next-event scheduling with a speculative
//! lookahead queue.
//!
//! The carousel is a soonest-deadline-first discrete-event simulation. Each
//! schedulable actor owns a counter value; the smallest counter acts next and
//! every other counter drains by the same amount. The lookahead queue is built
//! by running that simulation forward on a speculative copy of the counters
//! and of each actor's haste, so projecting never touches ground truth.
//!
//! # Protocol
//!
//! ```text
//! init ─▶ peek_next_owner ─▶ (external turn) ─▶ advance_turn ─┐
//!              ▲                                               │
//!              └───────────────────────────────────────────────┘
//! ```
//!
//! Between the peek and the advance the driver fills in the [`TurnReport`]
//! (deaths, ordering-relevant status triggers). `advance_turn` consumes the
//! report and either appends one entry or rebuilds the whole queue.

mod carousel;
mod entry;
mod errors;
mod report;
mod shadow;
mod traits;

pub use carousel::{Carousel, Refill};
pub use entry::TurnEntry;
pub use errors::CarouselError;
pub use report::TurnReport;
pub use shadow::ShadowHaste;
pub use traits::Schedulable;
