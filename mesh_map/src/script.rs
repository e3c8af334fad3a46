//! Scripted host events fed to the map view.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    KeyDown { code: u32 },
    KeyUp { code: u32 },
    ClickNode { id: String },
    ClickMap,
    /// The host changed location, e.g. through the back button.
    Navigate { path: String },
    SetFilter {
        #[serde(rename = "type")]
        node_type: String,
        visible: bool,
    },
    Resize { width: f64 },
}

pub fn parse(json: &str) -> Result<Vec<ScriptEvent>> {
    serde_json::from_str(json).context("invalid event script")
}

/// Read a script from `path`, or from stdin when no path is given.
pub fn load(path: Option<&Path>) -> Result<Vec<ScriptEvent>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("failed to read script from stdin")?;
            json
        }
    };
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse(&json)
}
