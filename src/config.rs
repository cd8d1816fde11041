//! Runtime configuration

use crate::constants::config::{DEFAULT_COLLECT_STATISTICS, DEFAULT_TRACE_EXECUTION};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings of one flow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowGraphConfig {
    /// Debug-log every control step
    pub trace_execution: bool,
    /// Maintain memoization statistics
    pub collect_statistics: bool,
}

impl Default for FlowGraphConfig {
    fn default() -> Self {
        Self {
            trace_execution: DEFAULT_TRACE_EXECUTION,
            collect_statistics: DEFAULT_COLLECT_STATISTICS,
        }
    }
}

impl FlowGraphConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
