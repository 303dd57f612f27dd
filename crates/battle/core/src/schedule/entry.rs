use crate::state::ActorId;

/// One projected turn in the lookahead queue.
///
/// Entries are immutable once synthesised; presentation layers render them
/// as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnEntry {
    pub owner: ActorId,
    pub name: String,
}

impl TurnEntry {
    pub fn new(owner: ActorId, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }
}
