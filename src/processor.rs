//! Conversion pipeline for collision event logs.
//!
//! Runs the load, header drop, parse and export steps in order. Per-run
//! state lives in a [`ConversionContext`] that the caller creates with
//! [`ConversionContext::init`] and tears down with [`ConversionContext::close`].

use crate::config::ConversionConfig;
use crate::constants::{EXTENDED_TOKEN_COUNT, PROGRESS_UPDATE_INTERVAL};
use crate::error::{ConversionError, Result};
use crate::layout::{Layout, LayoutChoice};
use crate::models::{ConversionStats, RawLine, RecordTable};
use crate::{parser, writer};

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Explicitly created processing context for one run
pub struct ConversionContext {
    config: ConversionConfig,
    started: Instant,
    progress: ProgressBar,
}

impl ConversionContext {
    /// Set up a context; the spinner is hidden when progress is disabled
    pub fn init(config: ConversionConfig) -> Self {
        let progress = if config.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        } else {
            ProgressBar::hidden()
        };

        debug!("Initialized conversion context: {:?}", config);
        Self {
            config,
            started: Instant::now(),
            progress,
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn set_message(&self, message: impl Into<String>) {
        self.progress.set_message(message.into());
    }

    /// Tear down the context and return the run time
    pub fn close(self) -> Duration {
        self.progress.finish_and_clear();
        let elapsed = self.started.elapsed();
        debug!("Closed conversion context after {:?}", elapsed);
        elapsed
    }
}

/// Turns an event log into a CSV record table
pub struct RecordTransformer<'ctx> {
    context: &'ctx mut ConversionContext,
}

impl<'ctx> RecordTransformer<'ctx> {
    pub fn new(context: &'ctx mut ConversionContext) -> Self {
        Self { context }
    }

    /// Whether the run writes the extended column set
    ///
    /// Decided once from the configured choice and, for `Auto`, the first
    /// data row. Never re-evaluated per row.
    pub fn extended_fields_present(&self, data: &[RawLine]) -> bool {
        self.layout_for(data).has_extended_fields()
    }

    fn layout_for(&self, data: &[RawLine]) -> Layout {
        self.context.config().layout.resolve(data.first())
    }

    /// Parse every data line; the first malformed row aborts the run
    ///
    /// When the layout was picked automatically from a basic first row, a
    /// later row carrying extended fields is rejected instead of truncated.
    pub fn parse_all(&mut self, data: &[RawLine]) -> Result<RecordTable> {
        let layout = self.layout_for(data);
        let reject_extended =
            self.context.config().layout == LayoutChoice::Auto && !layout.has_extended_fields();
        debug!(
            "Parsing {} rows with {} layout (extended fields: {})",
            data.len(),
            layout,
            layout.has_extended_fields()
        );

        let mut table = RecordTable::with_capacity(layout, data.len());
        for (parsed, line) in data.iter().enumerate() {
            if reject_extended && line.token_count() >= EXTENDED_TOKEN_COUNT {
                return Err(ConversionError::UnexpectedExtendedRow {
                    line: line.line_number,
                    tokens: line.token_count(),
                });
            }
            table.push(parser::parse(line, layout)?)?;

            if (parsed + 1) % PROGRESS_UPDATE_INTERVAL == 0 {
                self.context
                    .set_message(format!("Parsed {}/{} rows", parsed + 1, data.len()));
            }
        }

        Ok(table)
    }

    /// Convert `input` into a CSV at `output`
    ///
    /// The path pair is validated before the input is opened.
    pub fn transform(&mut self, input: &Path, output: &Path) -> Result<ConversionStats> {
        self.context.config().validate_paths(input, output)?;

        self.context
            .set_message(format!("Reading {}", input.display()));
        let lines = parser::load(input)?;
        let data = parser::drop_header(lines);

        let table = self.parse_all(&data)?;

        self.context
            .set_message(format!("Writing {}", output.display()));
        let rows_written = writer::export(&table, output)?;

        Ok(ConversionStats {
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            layout: table.layout(),
            rows_written,
            processing_time_ms: self.context.elapsed().as_millis(),
        })
    }
}

/// Run a full conversion with a fresh context
pub fn convert(input: &Path, output: &Path, config: ConversionConfig) -> Result<ConversionStats> {
    let mut context = ConversionContext::init(config);
    let result = RecordTransformer::new(&mut context).transform(input, output);
    let elapsed = context.close();

    let stats = result?;
    info!(
        "Converted {} rows from {} in {:?}",
        stats.rows_written,
        input.display(),
        elapsed
    );
    Ok(ConversionStats {
        processing_time_ms: elapsed.as_millis(),
        ..stats
    })
}
