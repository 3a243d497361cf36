//! Core data structures for collision log conversion.
//!
//! Defines raw input lines, parsed collision records, the record table
//! handed to the CSV writer, and the statistics reported after a run.

use crate::constants::TOKEN_SEPARATOR;
use crate::error::{ConversionError, Result};
use crate::layout::Layout;
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One unparsed line of the input log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number in the input file
    pub line_number: usize,
    pub text: String,
}

impl RawLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    /// Tokens split on single spaces; consecutive spaces yield empty tokens
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split(TOKEN_SEPARATOR).collect()
    }

    /// Number of tokens, not counting empty ones left by trailing separators
    pub fn token_count(&self) -> usize {
        self.text
            .trim_end_matches(TOKEN_SEPARATOR)
            .split(TOKEN_SEPARATOR)
            .count()
    }
}

/// Position, velocity and radius of one particle at the collision
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub r: f64,
}

impl ParticleState {
    pub fn from_values(values: [f64; 7]) -> Self {
        let [x, y, z, vx, vy, vz, r] = values;
        Self {
            x,
            y,
            z,
            vx,
            vy,
            vz,
            r,
        }
    }

    /// Values in output column order
    pub fn values(&self) -> [f64; 7] {
        [self.x, self.y, self.z, self.vx, self.vy, self.vz, self.r]
    }
}

/// Fixed-field numeric row derived from a raw line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub p1: f64,
    pub p2: f64,
    pub time: f64,
    /// Per-particle states, present only for the extended layout
    pub particles: Option<(ParticleState, ParticleState)>,
}

impl ParsedRecord {
    pub fn basic(p1: f64, p2: f64, time: f64) -> Self {
        Self {
            p1,
            p2,
            time,
            particles: None,
        }
    }

    pub fn extended(
        p1: f64,
        p2: f64,
        time: f64,
        first: ParticleState,
        second: ParticleState,
    ) -> Self {
        Self {
            p1,
            p2,
            time,
            particles: Some((first, second)),
        }
    }

    pub fn layout(&self) -> Layout {
        if self.particles.is_some() {
            Layout::Extended
        } else {
            Layout::Basic
        }
    }

    /// All values in the column order of [`Layout::columns`]
    pub fn values(&self) -> Vec<f64> {
        let mut values = vec![self.p1, self.p2, self.time];
        if let Some((first, second)) = &self.particles {
            values.extend_from_slice(&first.values());
            values.extend_from_slice(&second.values());
        }
        values
    }
}

/// Ordered collection of parsed records sharing one layout
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    layout: Layout,
    records: Vec<ParsedRecord>,
}

impl RecordTable {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            records: Vec::new(),
        }
    }

    pub fn with_capacity(layout: Layout, capacity: usize) -> Self {
        Self {
            layout,
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a record; its layout must match the table's
    pub fn push(&mut self, record: ParsedRecord) -> Result<()> {
        if record.layout() != self.layout {
            return Err(ConversionError::configuration(format!(
                "cannot add a {} record to a {} table",
                record.layout(),
                self.layout
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn records(&self) -> &[ParsedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build a column-per-field DataFrame in layout order
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let names = self.layout.columns();
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(self.records.len()); names.len()];

        for record in &self.records {
            for (column, value) in columns.iter_mut().zip(record.values()) {
                column.push(value);
            }
        }

        let columns = names
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.into(), values))
            .collect::<Vec<_>>();

        Ok(DataFrame::new(columns)?)
    }
}

/// Summary of a completed conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStats {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub layout: Layout,
    pub rows_written: usize,
    pub processing_time_ms: u128,
}
