//! Data-driven battle content.
//!
//! Loaders turn RON/TOML files into battle-core types:
//! - Roster catalogs (RON list of actor templates)
//! - Battle configuration (TOML)
//!
//! Content never appears in scheduling state; it only seeds a
//! [`battle_core::Battle`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, RosterLoader};
