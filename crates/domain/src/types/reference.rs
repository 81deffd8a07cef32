//! Reference tables for location codes
//!
//! Three ordered lists of `{code, label}` pairs (buildings, floors, areas)
//! drive classification. They are plain values handed to the classifier at
//! construction time so deployments and tests can swap them freely.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{STANDARD_AREAS, STANDARD_BUILDINGS, STANDARD_FLOORS};
use crate::errors::{Result, SiteCodeError};

/// One `{code, label}` pair of a reference table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub code: String,
    pub label: String,
}

impl ReferenceEntry {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self { code: code.into(), label: label.into() }
    }
}

/// Location level a reference table classifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationLevel {
    Building,
    Floor,
    Area,
}

impl LocationLevel {
    /// Outermost first.
    pub const ALL: [Self; 3] = [Self::Building, Self::Floor, Self::Area];
}

impl fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Building => "building",
            Self::Floor => "floor",
            Self::Area => "area",
        };
        f.write_str(name)
    }
}

/// A code that appears in more than one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCollision {
    pub code: String,
    pub levels: Vec<LocationLevel>,
}

/// The building, floor and area lookup tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTables {
    #[serde(default)]
    pub buildings: Vec<ReferenceEntry>,
    #[serde(default)]
    pub floors: Vec<ReferenceEntry>,
    #[serde(default)]
    pub areas: Vec<ReferenceEntry>,
}

impl ReferenceTables {
    pub fn new(
        buildings: Vec<ReferenceEntry>,
        floors: Vec<ReferenceEntry>,
        areas: Vec<ReferenceEntry>,
    ) -> Self {
        Self { buildings, floors, areas }
    }

    /// The tables shipped with the tool.
    pub fn standard() -> Self {
        fn entries(pairs: &[(&str, &str)]) -> Vec<ReferenceEntry> {
            pairs.iter().map(|(code, label)| ReferenceEntry::new(*code, *label)).collect()
        }

        Self::new(entries(STANDARD_BUILDINGS), entries(STANDARD_FLOORS), entries(STANDARD_AREAS))
    }

    pub fn table(&self, level: LocationLevel) -> &[ReferenceEntry] {
        match level {
            LocationLevel::Building => &self.buildings,
            LocationLevel::Floor => &self.floors,
            LocationLevel::Area => &self.areas,
        }
    }

    /// Total number of entries across all three tables
    pub fn len(&self) -> usize {
        self.buildings.len() + self.floors.len() + self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check structural soundness of every table
    ///
    /// # Errors
    /// Returns `SiteCodeError::Config` if a code is empty, contains
    /// whitespace (it could never match a single token), or appears twice in
    /// the same table.
    pub fn validate(&self) -> Result<()> {
        for level in LocationLevel::ALL {
            let mut seen = HashSet::new();
            for entry in self.table(level) {
                if entry.code.is_empty() {
                    return Err(SiteCodeError::Config(format!(
                        "{level} table contains an empty code (label '{}')",
                        entry.label
                    )));
                }
                if entry.code.chars().any(char::is_whitespace) {
                    return Err(SiteCodeError::Config(format!(
                        "{level} code '{}' contains whitespace",
                        entry.code
                    )));
                }
                if !seen.insert(entry.code.as_str()) {
                    return Err(SiteCodeError::Config(format!(
                        "{level} code '{}' is defined more than once",
                        entry.code
                    )));
                }
            }
        }
        Ok(())
    }

    /// Codes shared between tables, in building/floor/area scan order
    ///
    /// Collisions are tolerated (a colliding token resolves in every table it
    /// matches) but callers usually want to hear about them.
    pub fn cross_table_collisions(&self) -> Vec<CodeCollision> {
        let mut collisions: Vec<CodeCollision> = Vec::new();

        for level in LocationLevel::ALL {
            for entry in self.table(level) {
                if collisions.iter().any(|c| c.code == entry.code) {
                    continue;
                }
                let levels: Vec<LocationLevel> = LocationLevel::ALL
                    .into_iter()
                    .filter(|other| self.table(*other).iter().any(|e| e.code == entry.code))
                    .collect();
                if levels.len() > 1 {
                    collisions.push(CodeCollision { code: entry.code.clone(), levels });
                }
            }
        }

        collisions
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::standard()
    }
}
