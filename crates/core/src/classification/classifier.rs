//! Code classifier - turns raw CSV lines into classified records
//!
//! Each line must look like `<code tokens>-<label>,<hours>`. The code
//! tokens are matched against the building, floor and area tables; a token
//! that matches a table overwrites any earlier match for that table, so the
//! last matching token wins. Area codes additionally match inside a token
//! followed by `&` (`AA&B` resolves to `Area A & B`).
//!
//! Rows failing a structural check are skipped and reported as
//! [`SkippedRow`]s; they never abort the parse.

use serde::Serialize;
use sitecode_domain::constants::{
    AREA_COMBINATION_JOINER, AREA_COMBINATION_MARKER, CODE_LABEL_SEPARATOR, CODE_TOKEN_SEPARATOR,
    FIELD_SEPARATOR,
};
use sitecode_domain::{
    ClassifiedRecord, LocationKey, LocationLevel, MalformedReason, ReferenceEntry,
    ReferenceTables, SkippedRow,
};
use tracing::{debug, warn};

/// Records and diagnostics produced from one source text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutput {
    pub records: Vec<ClassifiedRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Lines examined, blank ones included
    pub lines: usize,
}

/// Classifies code strings against a set of reference tables
#[derive(Debug, Clone)]
pub struct CodeClassifier {
    tables: ReferenceTables,
}

impl CodeClassifier {
    pub fn new(tables: ReferenceTables) -> Self {
        for collision in tables.cross_table_collisions() {
            warn!(
                code = %collision.code,
                levels = ?collision.levels,
                "reference code appears in more than one table; tokens will match each of them"
            );
        }
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Parse a whole source text, one record per well-formed line
    ///
    /// Lines are split on `\n` only; a trailing `\r` stays in the hour field
    /// and is trimmed when hours are parsed.
    pub fn parse(&self, text: &str) -> ParseOutput {
        self.parse_lines(text.split('\n'))
    }

    pub fn parse_lines<'a, I>(&self, lines: I) -> ParseOutput
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut output = ParseOutput::default();

        for (index, line) in lines.into_iter().enumerate() {
            output.lines += 1;
            match self.classify_line(line) {
                Ok(record) => output.records.push(record),
                Err(reason) => {
                    let skipped = SkippedRow { line_number: index + 1, reason };
                    if skipped.is_blank(line) {
                        debug!(line_number = skipped.line_number, "skipping blank line");
                    } else {
                        warn!(
                            line_number = skipped.line_number,
                            reason = %reason,
                            "skipping malformed row"
                        );
                    }
                    output.skipped.push(skipped);
                }
            }
        }

        output
    }

    /// Classify a single line
    ///
    /// # Errors
    /// Returns the [`MalformedReason`] when the line does not split into two
    /// comma fields or its code does not split into two hyphen parts.
    pub fn classify_line(&self, line: &str) -> Result<ClassifiedRecord, MalformedReason> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let [code, hour] = fields.as_slice() else {
            return Err(MalformedReason::FieldCount(fields.len()));
        };

        let parts: Vec<&str> = code.split(CODE_LABEL_SEPARATOR).collect();
        let [left, right] = parts.as_slice() else {
            return Err(MalformedReason::CodePartCount(parts.len()));
        };

        Ok(ClassifiedRecord::new(self.resolve_location(left), *hour, *left, *right))
    }

    /// Resolve building, floor and area labels from a code string
    pub fn resolve_location(&self, code: &str) -> LocationKey {
        let mut location = LocationKey::default();

        for token in code.split(CODE_TOKEN_SEPARATOR) {
            for level in LocationLevel::ALL {
                let Some(label) = self.resolve_token(token, level) else {
                    continue;
                };
                match level {
                    LocationLevel::Building => location.building = label,
                    LocationLevel::Floor => location.floor = label,
                    LocationLevel::Area => location.area = label,
                }
            }
        }

        location
    }

    /// Label a token resolves to at one level, if any
    pub fn resolve_token(&self, token: &str, level: LocationLevel) -> Option<String> {
        let table = self.tables.table(level);
        match level {
            LocationLevel::Area => match_area(token, table),
            LocationLevel::Building | LocationLevel::Floor => match_exact(token, table),
        }
    }
}

fn match_exact(token: &str, table: &[ReferenceEntry]) -> Option<String> {
    table.iter().rev().find(|entry| entry.code == token).map(|entry| entry.label.clone())
}

fn match_area(token: &str, table: &[ReferenceEntry]) -> Option<String> {
    let mut resolved = None;

    for entry in table {
        if entry.code == token {
            resolved = Some(entry.label.clone());
        }

        let marker = format!("{}{AREA_COMBINATION_MARKER}", entry.code);
        if token.contains(&marker) {
            let mut label = entry.label.clone();
            for piece in token.split(AREA_COMBINATION_MARKER).skip(1) {
                label.push_str(AREA_COMBINATION_JOINER);
                label.push_str(piece);
            }
            resolved = Some(label);
        }
    }

    resolved
}
