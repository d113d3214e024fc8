use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::InfestationError;
use crate::geometry::DEFAULT_PRECISION;

/// Tunable constants of the extraction heuristics.
///
/// Every field has a default tuned for the recurring report layout, so a
/// config file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Decimal places of every positional comparison (line grouping, ordering).
    pub precision: u32,
    /// Scale applied to the left offset when indenting rendered lines.
    pub print_scale: f64,
    /// Characters dropped from a word before testing it as a data token.
    pub ignorable_chars: Vec<char>,
    /// Rows before the first data row of a table-text dump.
    pub table_preamble_rows: usize,
    /// Width of the right half in the last-resort value split.
    pub fallback_split_width: usize,
    /// Subcategory recorded for top-level table rows ("total").
    pub total_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            print_scale: 0.05,
            ignorable_chars: vec![',', ' '],
            table_preamble_rows: 3,
            fallback_split_width: 6,
            total_marker: "razem".into(),
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, InfestationError> {
    let content = std::fs::read_to_string(path).map_err(|e| InfestationError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ExtractionConfig =
        serde_json::from_str(&content).map_err(|e| InfestationError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ExtractionConfig) -> Result<(), InfestationError> {
    if config.precision > 6 {
        return Err(InfestationError::ConfigInvalid(format!(
            "precision {} is finer than OCR coordinates carry (max 6)",
            config.precision
        )));
    }

    if !(config.print_scale.is_finite() && config.print_scale > 0.0) {
        return Err(InfestationError::ConfigInvalid(
            "print_scale must be a positive number".into(),
        ));
    }

    if config.table_preamble_rows == 0 {
        return Err(InfestationError::ConfigInvalid(
            "table_preamble_rows must include at least the label row".into(),
        ));
    }

    if config.fallback_split_width == 0 {
        return Err(InfestationError::ConfigInvalid(
            "fallback_split_width must not be zero".into(),
        ));
    }

    if config.total_marker.trim().is_empty() {
        return Err(InfestationError::ConfigInvalid(
            "total_marker must not be empty".into(),
        ));
    }

    Ok(())
}
