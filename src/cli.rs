//! CLI command implementations for gridfence.

pub(crate) mod areas;
pub(crate) mod distance;
pub(crate) mod generate;
pub(crate) mod harvest;
pub(crate) mod plan;

mod output;

use clap::ValueEnum;
use gridfence::ToroidalGrid;
use gridfence::config::AgentConfig;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

/// Output format for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<gridfence::GridError> for CliError {
    fn from(e: gridfence::GridError) -> Self {
        Self::new(format!("Invalid map: {e}"))
    }
}

impl From<gridfence::SnapshotError> for CliError {
    fn from(e: gridfence::SnapshotError) -> Self {
        Self::new(format!("Invalid snapshot: {e}"))
    }
}

impl From<gridfence::EngineError> for CliError {
    fn from(e: gridfence::EngineError) -> Self {
        Self::new(e.to_string())
    }
}

/// Read a map file: one row per line, blank lines ignored.
pub(crate) fn read_grid(path: &Path) -> Result<ToroidalGrid, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    let rows: Vec<&str> = text.lines().map(str::trim).filter(|row| !row.is_empty()).collect();
    Ok(ToroidalGrid::from_rows(&rows)?)
}

/// Read an agent config JSON file, or fall back to the defaults.
pub(crate) fn read_agent_config(path: Option<&Path>) -> Result<AgentConfig, CliError> {
    let Some(path) = path else {
        return Ok(AgentConfig::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("Invalid config {}: {e}", path.display())))
}

/// Print a value as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
    println!("{json}");
    Ok(())
}
