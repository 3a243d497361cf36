//! Application constants for the collision log converter
//!
//! Token positions, column names and exit codes shared by the parser,
//! writer and CLI.

// =============================================================================
// Input Format
// =============================================================================

/// Separator between tokens on a data line
pub const TOKEN_SEPARATOR: char = ' ';

/// Number of header lines discarded before the data rows
pub const HEADER_LINES: usize = 1;

/// Token index of the first particle id (token 0 is the event index)
pub const P1_TOKEN: usize = 1;
pub const P2_TOKEN: usize = 2;
pub const TIME_TOKEN: usize = 3;

/// First token of the per-particle block for particle 1 and particle 2
pub const P1_STATE_TOKEN: usize = 4;
pub const P2_STATE_TOKEN: usize = 11;

/// Number of values in a per-particle block (x, y, z, vx, vy, vz, r)
pub const PARTICLE_STATE_FIELDS: usize = 7;

/// Minimum tokens for a basic line: index, p1, p2, time
pub const BASIC_TOKEN_COUNT: usize = 4;

/// Minimum tokens for an extended line
pub const EXTENDED_TOKEN_COUNT: usize = P2_STATE_TOKEN + PARTICLE_STATE_FIELDS;

// =============================================================================
// Output Columns
// =============================================================================

/// Columns always written
pub const BASE_COLUMNS: [&str; 3] = ["p1", "p2", "time"];

/// Columns written only for the extended layout, in output order
pub const EXTENDED_COLUMNS: [&str; 14] = [
    "p1x", "p1y", "p1z", "p1vx", "p1vy", "p1vz", "p1r", "p2x", "p2y", "p2z", "p2vx", "p2vy",
    "p2vz", "p2r",
];

/// Extension given to the output when no output path is supplied
pub const DEFAULT_OUTPUT_EXTENSION: &str = "csv";

// =============================================================================
// Process Exit Codes
// =============================================================================

pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
    pub const MALFORMED_ROW: i32 = 3;
    pub const OUTPUT_NOT_WRITABLE: i32 = 4;
    pub const CONFIGURATION: i32 = 5;
}

// =============================================================================
// Progress Reporting
// =============================================================================

/// Update the spinner every this many parsed rows
pub const PROGRESS_UPDATE_INTERVAL: usize = 10_000;
