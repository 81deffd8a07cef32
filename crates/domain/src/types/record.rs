//! Classified records and parse diagnostics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grouping key: resolved `(building, floor, area)` labels
///
/// Field order matters: the derived `Ord` compares building, then floor,
/// then area, and an empty label sorts before any non-empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    pub building: String,
    pub floor: String,
    pub area: String,
}

impl LocationKey {
    pub fn new(
        building: impl Into<String>,
        floor: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self { building: building.into(), floor: floor.into(), area: area.into() }
    }

    /// Non-empty labels, outermost first
    pub fn path(&self) -> Vec<&str> {
        [self.building.as_str(), self.floor.as_str(), self.area.as_str()]
            .into_iter()
            .filter(|label| !label.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.building.is_empty() && self.floor.is_empty() && self.area.is_empty()
    }
}

/// One surviving CSV line after classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub location: LocationKey,
    /// Raw hour field, parsed only when the tree is built
    pub hour: String,
    /// Left part of the code string, untouched
    pub full_code: String,
    /// Right part of the code string; rewritten by prefix reduction
    pub label: String,
}

impl ClassifiedRecord {
    pub fn new(
        location: LocationKey,
        hour: impl Into<String>,
        full_code: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self { location, hour: hour.into(), full_code: full_code.into(), label: label.into() }
    }

    /// No token matched any reference table.
    pub fn is_unclassified(&self) -> bool {
        self.location.is_empty()
    }
}

/// Why a line was dropped before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum MalformedReason {
    /// Comma-separated field count other than two
    FieldCount(usize),
    /// Hyphen-separated part count of the code string other than two
    CodePartCount(usize),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 2 comma-separated fields, found {n}"),
            Self::CodePartCount(n) => {
                write!(f, "expected 2 hyphen-separated code parts, found {n}")
            }
        }
    }
}

/// A malformed row, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the source text
    pub line_number: usize,
    pub reason: MalformedReason,
}

impl SkippedRow {
    /// Empty or whitespace-only line; not worth a warning.
    pub fn is_blank(&self, line: &str) -> bool {
        self.reason == MalformedReason::FieldCount(1) && line.trim().is_empty()
    }
}
