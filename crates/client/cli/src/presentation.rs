//! Text and JSON rendering of a finished run.

use std::fmt;

use serde::Serialize;

use battle_core::{ActorId, BattleSnapshot, TurnSummary};

#[derive(Serialize)]
pub struct RunReport {
    pub turns: Vec<TurnSummary>,
    pub snapshot: BattleSnapshot,
}

impl RunReport {
    pub fn new(turns: Vec<TurnSummary>, snapshot: BattleSnapshot) -> Self {
        Self { turns, snapshot }
    }

    fn name_of(&self, id: ActorId) -> &str {
        self.snapshot
            .actors
            .get(id.index())
            .map(|actor| actor.name.as_str())
            .unwrap_or("?")
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Turns")?;
        for (turn, summary) in self.turns.iter().enumerate() {
            writeln!(
                f,
                "  {:>3}. {:<20} rank {} ({:?})",
                turn + 1,
                self.name_of(summary.owner),
                summary.rank,
                summary.refill
            )?;
        }

        writeln!(f, "Actors")?;
        for actor in &self.snapshot.actors {
            let tick_speed = actor
                .tick_speed
                .map_or_else(|| "-".to_string(), |ts| ts.to_string());
            writeln!(
                f,
                "  {} {:<20} {:<14} agility {:>3}  tick speed {:>2}  {}",
                actor.id,
                actor.name,
                actor.species.as_ref(),
                actor.agility,
                tick_speed,
                if actor.active { "active" } else { "down" }
            )?;
        }

        writeln!(f, "Queue")?;
        for (slot, entry) in self.snapshot.queue.iter().enumerate() {
            writeln!(f, "  {:>3}. {}", slot + 1, entry.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActorTemplate, Battle, BattleConfig, Roster, Species, TurnOutcome};

    #[test]
    fn text_report_lists_turns_and_queue() {
        let config = BattleConfig::with_lookahead(3);
        let templates = [
            ActorTemplate::new("Lupus", Species::Lupus, 20),
            ActorTemplate::new("Red-Nosed Hare", Species::RedNosedHare, 70),
        ];
        let roster = Roster::from_templates(&templates, &config);
        let mut battle = Battle::new(config, roster);
        battle.init().unwrap();
        let summary = battle.complete_turn(TurnOutcome::neutral()).unwrap();

        let text = RunReport::new(vec![summary], battle.snapshot()).to_string();
        assert!(text.contains("1. Red-Nosed Hare"));
        assert!(text.contains("Queue"));
        assert_eq!(text.lines().filter(|line| line.contains("Lupus")).count(), 2);
    }
}
