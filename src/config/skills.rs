//! Skill catalog loading.
//!
//! The catalog is a YAML document with two top-level keys:
//!
//! ```yaml
//! skills:
//!   thresholds: { blind_spot: 0.6, improvement: 0.2, regression: 0.15 }
//!   windows: { recent: 7, baseline: 30 }
//!   skill_criteria:
//!     clarity:
//!       name: Clarity
//!       positive: [clear_ask]
//!       negative: [rambling]
//!   criteria_labels:
//!     clear_ask: Made a clear ask
//! drill_types:
//!   practice_mode_mapping:
//!     opening: first-impressions
//! ```
//!
//! Skills are analyzed in the order they appear under `skill_criteria`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::error::ConfigError;
use crate::domain::blind_spots::{BlindSpotConfig, SkillDefinition, Thresholds, WindowLengths};

#[derive(Debug, Deserialize)]
struct SkillCatalog {
    #[serde(default)]
    skills: SkillsSection,
    #[serde(default)]
    drill_types: DrillTypesSection,
}

#[derive(Debug, Default, Deserialize)]
struct SkillsSection {
    #[serde(default)]
    thresholds: Thresholds,
    #[serde(default)]
    windows: WindowLengths,
    #[serde(default)]
    skill_criteria: OrderedSkills,
    #[serde(default)]
    criteria_labels: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct DrillTypesSection {
    #[serde(default)]
    practice_mode_mapping: HashMap<String, Option<String>>,
}

/// Skill definitions in document order, keyed by their map key.
#[derive(Debug, Default)]
struct OrderedSkills(Vec<SkillDefinition>);

impl<'de> Deserialize<'de> for OrderedSkills {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedSkillsVisitor;

        impl<'de> Visitor<'de> for OrderedSkillsVisitor {
            type Value = OrderedSkills;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of skill key to skill definition")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(OrderedSkills::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut skills = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, mut skill)) = map.next_entry::<String, SkillDefinition>()? {
                    if skill.name.is_empty() {
                        skill.name = key.clone();
                    }
                    skill.key = key;
                    skills.push(skill);
                }
                Ok(OrderedSkills(skills))
            }
        }

        deserializer.deserialize_any(OrderedSkillsVisitor)
    }
}

impl BlindSpotConfig {
    /// Parses and validates a YAML skill catalog.
    ///
    /// Skills without any criteria are dropped with a warning.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let catalog: SkillCatalog = serde_yaml::from_str(yaml)?;
        let (skills, empty): (Vec<_>, Vec<_>) = catalog
            .skills
            .skill_criteria
            .0
            .into_iter()
            .partition(|skill| !skill.criteria.is_empty());
        for skill in &empty {
            tracing::warn!(skill = %skill.key, "Skill has no criteria, omitting it from analysis");
        }

        let config = BlindSpotConfig::new(catalog.skills.thresholds, catalog.skills.windows, skills)
        .with_criteria_labels(catalog.skills.criteria_labels)
        .with_practice_modes(catalog.drill_types.practice_mode_mapping);

        config.validate()?;
        Ok(config)
    }
}

/// Reads the skill catalog from disk.
pub fn load_blind_spot_config(path: impl AsRef<Path>) -> Result<BlindSpotConfig, ConfigError> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::SkillCatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config = BlindSpotConfig::from_yaml_str(&yaml)?;

    tracing::info!(
        path = %path.display(),
        skills = config.skills().len(),
        "Loaded skill catalog"
    );
    Ok(config)
}
