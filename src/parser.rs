//! Collision log reading and row parsing.
//!
//! Reads the raw lines of an event log, discards the header line and
//! converts each data line into a [`ParsedRecord`] by token position.

use crate::constants::{
    BASE_COLUMNS, EXTENDED_COLUMNS, HEADER_LINES, P1_STATE_TOKEN, P1_TOKEN, P2_STATE_TOKEN,
    P2_TOKEN, PARTICLE_STATE_FIELDS, TIME_TOKEN,
};
use crate::error::{ConversionError, Result};
use crate::layout::Layout;
use crate::models::{ParsedRecord, ParticleState, RawLine};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Read every line of the file at `path`
pub fn load(path: &Path) -> Result<Vec<RawLine>> {
    if !path.exists() {
        return Err(ConversionError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.strip_suffix('\r').unwrap_or(&line);
        lines.push(RawLine::new(index + 1, text));
    }

    debug!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Remove the header line; fewer than two lines leave nothing
pub fn drop_header(lines: Vec<RawLine>) -> Vec<RawLine> {
    lines.into_iter().skip(HEADER_LINES).collect()
}

/// Convert one data line into a record of the given layout
///
/// The first missing or non-numeric token aborts with a malformed-row error
/// naming the line. Tokens past the layout's last field are ignored.
pub fn parse(line: &RawLine, layout: Layout) -> Result<ParsedRecord> {
    let tokens = line.tokens();

    let p1 = field(line, &tokens, P1_TOKEN, BASE_COLUMNS[0])?;
    let p2 = field(line, &tokens, P2_TOKEN, BASE_COLUMNS[1])?;
    let time = field(line, &tokens, TIME_TOKEN, BASE_COLUMNS[2])?;

    if !layout.has_extended_fields() {
        return Ok(ParsedRecord::basic(p1, p2, time));
    }

    let first = particle_state(line, &tokens, P1_STATE_TOKEN, &EXTENDED_COLUMNS[..7])?;
    let second = particle_state(line, &tokens, P2_STATE_TOKEN, &EXTENDED_COLUMNS[7..])?;

    Ok(ParsedRecord::extended(p1, p2, time, first, second))
}

fn particle_state(
    line: &RawLine,
    tokens: &[&str],
    start: usize,
    columns: &[&str],
) -> Result<ParticleState> {
    let mut values = [0.0; PARTICLE_STATE_FIELDS];
    for (offset, (value, column)) in values.iter_mut().zip(columns).enumerate() {
        *value = field(line, tokens, start + offset, column)?;
    }
    Ok(ParticleState::from_values(values))
}

fn field(line: &RawLine, tokens: &[&str], index: usize, column: &str) -> Result<f64> {
    let token = tokens.get(index).ok_or(ConversionError::MissingToken {
        line: line.line_number,
        index,
        found: tokens.len(),
    })?;

    token
        .parse::<f64>()
        .map_err(|_| ConversionError::InvalidNumber {
            line: line.line_number,
            column: column.to_string(),
            token: token.to_string(),
        })
}
