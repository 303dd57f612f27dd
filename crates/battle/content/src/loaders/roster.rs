//! Roster catalog loader.
//!
//! RON format: a list of actor templates in scheduling order.
//!
//! ```ron
//! [
//!     (name: "Lupus", species: Lupus, agility: 90),
//!     (name: "Red-Nosed Hare", species: RedNosedHare, agility: 120, haste: Some(0.5)),
//! ]
//! ```

use std::path::Path;

use battle_core::{ActorTemplate, BattleConfig, Roster, StatusEffect};

use crate::loaders::{LoadResult, read_file};

/// Loader for battle rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load templates from a RON file and spawn them into a [`Roster`].
    pub fn load(path: &Path, config: &BattleConfig) -> LoadResult<Roster> {
        let templates = Self::load_templates(path)?;
        Ok(Roster::from_templates(&templates, config))
    }

    /// Load the raw templates without spawning them.
    pub fn load_templates(path: &Path) -> LoadResult<Vec<ActorTemplate>> {
        let content = read_file(path)?;
        Self::parse_templates(&content)
    }

    pub fn parse_templates(content: &str) -> LoadResult<Vec<ActorTemplate>> {
        let templates: Vec<ActorTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if templates.is_empty() {
            anyhow::bail!("Roster must contain at least one actor");
        }
        if templates.len() > BattleConfig::MAX_ACTORS {
            anyhow::bail!(
                "Roster has {} actors, more than the supported {}",
                templates.len(),
                BattleConfig::MAX_ACTORS
            );
        }

        let invalid_haste = templates.iter().find_map(|template| {
            template
                .haste
                .filter(|&haste| !StatusEffect::is_valid_multiplier(haste))
                .map(|haste| (template, haste))
        });
        if let Some((template, haste)) = invalid_haste {
            anyhow::bail!(
                "Actor '{}' has invalid haste {}: multipliers must be finite and positive",
                template.name,
                haste
            );
        }

        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActorId, Species, StatusKind};
    use std::io::Write;

    const ROSTER: &str = r#"[
        (name: "Lupus", species: Lupus, agility: 90),
        (name: "Red-Nosed Hare", species: RedNosedHare, agility: 120, haste: Some(0.5)),
        (name: "Lupus", species: Lupus, agility: 90),
    ]"#;

    #[test]
    fn parses_templates_with_optional_fields() {
        let templates = RosterLoader::parse_templates(ROSTER).unwrap();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[0].species, Species::Lupus);
        assert_eq!(templates[0].haste, None);
        assert_eq!(templates[1].haste, Some(0.5));
    }

    #[test]
    fn loaded_roster_is_spawned_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROSTER.as_bytes()).unwrap();

        let roster = RosterLoader::load(file.path(), &BattleConfig::default()).unwrap();
        assert_eq!(roster.len(), 3);

        let hare = roster.get(ActorId(1)).unwrap();
        assert_eq!(hare.tick_speed, Some(4));
        assert_eq!(hare.status_effects.get(StatusKind::Haste).multiplier, 0.5);
        assert_eq!(roster.get(ActorId(2)).unwrap().name, "Lupus (2)");
    }

    #[test]
    fn bundled_roster_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/roster.ron");
        let roster = RosterLoader::load(&path, &BattleConfig::default()).unwrap();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster.active_count(), 5);
        assert!(roster.iter().all(|actor| actor.tick_speed.is_some()));
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(RosterLoader::parse_templates("[]").is_err());
    }

    #[test]
    fn invalid_haste_is_rejected() {
        let error = RosterLoader::parse_templates(
            r#"[(name: "Lupus", species: Lupus, agility: 20, haste: Some(-1000000000.0))]"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("invalid haste"));

        assert!(
            RosterLoader::parse_templates(r#"[(name: "Hare", agility: 70, haste: Some(0.0))]"#)
                .is_err()
        );
    }

    #[test]
    fn malformed_roster_is_rejected() {
        let error = RosterLoader::parse_templates("[(name: \"x\")]").unwrap_err();
        assert!(error.to_string().contains("Failed to parse roster RON"));
    }
}
