//! Collision Log Converter Library
//!
//! Converts space-delimited logs of simulated particle collision events
//! into CSV tables with named columns.
//!
//! This library provides tools for:
//! - Reading event logs and discarding their header line
//! - Parsing fixed token positions into typed collision records
//! - Choosing between the basic and extended column layouts once per run
//! - Writing the record table as CSV through polars, and reading it back

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod models;
pub mod parser;
pub mod processor;
pub mod writer;

pub use config::ConversionConfig;
pub use error::{ConversionError, Result};
pub use layout::{Layout, LayoutChoice};
pub use models::{ConversionStats, ParsedRecord, ParticleState, RawLine, RecordTable};
pub use processor::{ConversionContext, RecordTransformer, convert};
