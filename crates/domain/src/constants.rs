//! Application constants
//!
//! Centralized location for all domain-level constants, including the
//! standard reference tables shipped with the tool.

// Tokenization
pub const CODE_LABEL_SEPARATOR: char = '-';
pub const FIELD_SEPARATOR: char = ',';
pub const CODE_TOKEN_SEPARATOR: char = ' ';
pub const AREA_COMBINATION_MARKER: char = '&';
pub const AREA_COMBINATION_JOINER: &str = " & ";

// Output naming
pub const JSON_EXTENSION: &str = "json";
pub const FLAT_CSV_SUFFIX: &str = "_new";
pub const FLAT_CSV_EXTENSION: &str = "csv";
pub const FLAT_CSV_HEADER: [&str; 6] = ["build", "floor", "area", "hour", "full", "label"];

// Batch defaults
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 4;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Standard building codes, in scan order.
pub const STANDARD_BUILDINGS: &[(&str, &str)] = &[
    ("B0", "Building 0"),
    ("B1", "Building 1 North"),
    ("B2", "Building 2 South"),
    ("B3", "Building 3"),
    ("B4", "Building 4"),
    ("GC", "General Conditions"),
];

/// Standard floor codes, in scan order.
pub const STANDARD_FLOORS: &[(&str, &str)] = &[
    ("F01", "Floor 01"),
    ("F02", "Floor 02"),
    ("F03", "Floor 03"),
    ("F04", "Floor 04"),
    ("F05", "Roof"),
    ("F0", "Phase 0"),
    ("F1", "1st Floor"),
    ("F2", "2nd Floor"),
    ("F3", "Roof"),
    ("FD", "Door"),
    ("FX", "Ext"),
];

/// Standard area codes, in scan order.
pub const STANDARD_AREAS: &[(&str, &str)] = &[
    ("A0", "General Conditions"),
    ("AA", "Area A"),
    ("AB", "Area B"),
    ("AC", "Area C"),
    ("AD", "Area D"),
    ("AE", "Area A Exterior"),
    ("AF", "Area B Exterior"),
    ("AG", "Area C Exterior"),
    ("AH", "Area D Exterior"),
    ("AK", "Ceilings"),
    ("AX", "Ext"),
    ("Int", "Interior"),
    ("Ext", "Exterior"),
];
