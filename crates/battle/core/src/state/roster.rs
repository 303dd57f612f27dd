//! Ordered collection of battle participants.

use std::collections::BTreeMap;

use super::actor::{ActorId, ActorState, ActorTemplate};
use crate::config::BattleConfig;

/// Actors in scheduling order. An actor's [`ActorId`] is its slot here, so
/// actors are never removed, only deactivated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    actors: Vec<ActorState>,
    /// Spawns per base name; persisted so suffixes keep counting after a
    /// reload.
    name_counts: BTreeMap<String, u32>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster by spawning every template in order.
    pub fn from_templates<'t>(
        templates: impl IntoIterator<Item = &'t ActorTemplate>,
        config: &BattleConfig,
    ) -> Self {
        let mut roster = Self::new();
        for template in templates {
            roster.spawn(template, config);
        }
        roster
    }

    /// Appends an actor built from `template` and returns its id.
    ///
    /// Repeated names get a counter suffix: the second "Lupus" becomes
    /// "Lupus (2)".
    pub fn spawn(&mut self, template: &ActorTemplate, config: &BattleConfig) -> ActorId {
        let id = ActorId::from_index(self.actors.len());
        let mut actor = ActorState::from_template(id, template, config);
        actor.name = self.unique_name(&template.name);
        self.actors.push(actor);
        id
    }

    /// Appends a pre-built actor, re-stamping its id to the next slot.
    pub fn push(&mut self, mut actor: ActorState) -> ActorId {
        let id = ActorId::from_index(self.actors.len());
        actor.id = id;
        actor.name = self.unique_name(&actor.name);
        self.actors.push(actor);
        id
    }

    fn unique_name(&mut self, base: &str) -> String {
        let count = self.name_counts.entry(base.to_owned()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base.to_owned()
        } else {
            format!("{} ({})", base, count)
        }
    }

    pub fn get(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.get(id.index())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorState> {
        self.actors.get_mut(id.index())
    }

    pub fn as_slice(&self) -> &[ActorState] {
        &self.actors
    }

    pub fn as_mut_slice(&mut self) -> &mut [ActorState] {
        &mut self.actors
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.iter()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Number of actors still taking part in scheduling.
    pub fn active_count(&self) -> usize {
        self.actors.iter().filter(|actor| actor.active).count()
    }
}
