//! JSON output format for join-state reports
//!
//! Sprint 4: --format json implementation

use serde::{Deserialize, Serialize};

use crate::status::DeviceState;

/// Root JSON output structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonStatus {
    /// Version of the tool that produced the report
    pub version: String,
    /// Format name
    pub format: String,
    /// The device's join state
    pub device: DeviceState,
}

impl JsonStatus {
    /// Wrap a snapshot in the versioned envelope
    pub fn new(device: DeviceState) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "enlace-json-v1".to_string(),
            device,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
