//! Configuration management and validation.
//!
//! Holds the per-run settings for a conversion: input and output paths,
//! the layout choice, and terminal reporting preferences.

use crate::constants::DEFAULT_OUTPUT_EXTENSION;
use crate::error::{ConversionError, Result};
use crate::layout::LayoutChoice;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// How the column layout is chosen
    pub layout: LayoutChoice,

    /// Show a spinner while rows are parsed
    pub show_progress: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            layout: LayoutChoice::Auto,
            show_progress: true,
        }
    }
}

impl ConversionConfig {
    pub fn with_layout(mut self, layout: LayoutChoice) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check the input/output pair before anything is read
    pub fn validate_paths(&self, input: &Path, output: &Path) -> Result<()> {
        if output.as_os_str().is_empty() {
            return Err(ConversionError::configuration("output path is empty"));
        }
        if output == input || same_file(input, output) {
            return Err(ConversionError::configuration(format!(
                "output path {} would overwrite the input",
                output.display()
            )));
        }
        if output.is_dir() {
            return Err(ConversionError::configuration(format!(
                "output path {} is a directory",
                output.display()
            )));
        }

        debug!(
            "Validated paths: input={}, output={}, layout={:?}",
            input.display(),
            output.display(),
            self.layout
        );
        Ok(())
    }
}

/// True when both paths exist and resolve to the same file
fn same_file(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

/// Default output path: the input with its extension replaced by `.csv`,
/// or `<stem>.out.csv` when the input is already a `.csv` file
pub fn default_output_path(input: &Path) -> PathBuf {
    let is_csv = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DEFAULT_OUTPUT_EXTENSION));

    if is_csv {
        input.with_extension(format!("out.{}", DEFAULT_OUTPUT_EXTENSION))
    } else {
        input.with_extension(DEFAULT_OUTPUT_EXTENSION)
    }
}
