// src/config.rs
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs, path::Path};
use tracing::debug;

pub const DEFAULT_MEASUREMENT_MARKER: &str = "TONNAGE";

/// Columns the source export is known to add that never belong to a region block:
/// the row-number column and the pandas-style placeholder for an unnamed first column.
pub static DEFAULT_IGNORED_COLUMNS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    ["NO.", "Unnamed: 0"]
        .iter()
        .map(|s| s.to_string())
        .collect()
});

/// Tunable surface of the layout heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Substring that marks a measurement column (matched case-insensitively).
    measurement_marker: String,
    /// Exact column names removed before pairing.
    ignored_columns: BTreeSet<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            measurement_marker: DEFAULT_MEASUREMENT_MARKER.to_string(),
            ignored_columns: DEFAULT_IGNORED_COLUMNS.clone(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the measurement marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.measurement_marker = marker.into();
        self
    }

    /// Replace the whole ignore set.
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_columns = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn measurement_marker(&self) -> &str {
        &self.measurement_marker
    }

    pub fn ignored_columns(&self) -> &BTreeSet<String> {
        &self.ignored_columns
    }

    /// True when `name`, uppercased, contains the uppercased marker.
    /// A blank marker matches nothing.
    pub fn is_measurement_column(&self, name: &str) -> bool {
        if !self.has_marker() {
            return false;
        }
        name.to_uppercase()
            .contains(&self.measurement_marker.to_uppercase())
    }

    pub fn has_marker(&self) -> bool {
        !self.measurement_marker.trim().is_empty()
    }

    /// An empty marker would match every column, so it is refused.
    pub fn validate(&self) -> Result<()> {
        if !self.has_marker() {
            bail!("measurement marker must not be empty");
        }
        Ok(())
    }

    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: LayoutConfig =
            serde_yaml::from_str(text).context("parsing layout config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a YAML config file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading layout config {}", path.display()))?;
        let cfg = Self::from_yaml_str(&text)
            .with_context(|| format!("invalid layout config {}", path.display()))?;
        debug!(
            path = %path.display(),
            marker = %cfg.measurement_marker,
            ignored = cfg.ignored_columns.len(),
            "loaded layout config"
        );
        Ok(cfg)
    }
}
