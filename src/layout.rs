//! Column layouts for collision event rows.
//!
//! A log either carries only the collision triple (`p1 p2 time`) or the
//! extended layout with position, velocity and radius for both particles.
//! The layout is fixed for a whole run; rows are never classified one by one.

use crate::constants::{BASE_COLUMNS, BASIC_TOKEN_COUNT, EXTENDED_COLUMNS, EXTENDED_TOKEN_COUNT};
use crate::models::RawLine;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete column layout of a record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// `p1, p2, time`
    Basic,
    /// `p1, p2, time` followed by the fourteen per-particle columns
    Extended,
}

impl Layout {
    /// Output column names in order
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = BASE_COLUMNS.to_vec();
        if self.has_extended_fields() {
            columns.extend_from_slice(&EXTENDED_COLUMNS);
        }
        columns
    }

    /// Minimum number of tokens a data line needs for this layout
    pub fn required_tokens(&self) -> usize {
        match self {
            Layout::Basic => BASIC_TOKEN_COUNT,
            Layout::Extended => EXTENDED_TOKEN_COUNT,
        }
    }

    pub fn has_extended_fields(&self) -> bool {
        matches!(self, Layout::Extended)
    }

    /// Identify a layout from a CSV header
    pub fn from_columns<S: AsRef<str>>(names: &[S]) -> Option<Self> {
        [Layout::Basic, Layout::Extended].into_iter().find(|layout| {
            let expected = layout.columns();
            expected.len() == names.len()
                && expected
                    .iter()
                    .zip(names)
                    .all(|(expected, actual)| *expected == AsRef::<str>::as_ref(actual))
        })
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Basic => write!(f, "basic"),
            Layout::Extended => write!(f, "extended"),
        }
    }
}

/// How the layout of a run is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum LayoutChoice {
    /// Decide from the token count of the first data row
    #[default]
    Auto,
    /// Always write `p1, p2, time` only
    Basic,
    /// Always write the extended column set
    Extended,
}

impl LayoutChoice {
    /// Resolve to a concrete layout before any row is parsed
    ///
    /// With `Auto` the first data row decides: eighteen or more tokens select
    /// the extended layout. Later rows are held to that decision.
    pub fn resolve(&self, first_row: Option<&RawLine>) -> Layout {
        match self {
            LayoutChoice::Basic => Layout::Basic,
            LayoutChoice::Extended => Layout::Extended,
            LayoutChoice::Auto => match first_row {
                Some(row) if row.token_count() >= EXTENDED_TOKEN_COUNT => Layout::Extended,
                _ => Layout::Basic,
            },
        }
    }
}
