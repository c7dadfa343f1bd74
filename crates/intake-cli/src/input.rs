//! Payload input from files or stdin

use anyhow::{Context, Result};
use intake_core::types::payload_from_json;
use intake_core::RawPayload;
use std::fs;
use std::io::Read;

/// Read raw text from `path`, or from stdin when `path` is `-`
pub fn read_text(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read payload from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read payload from {}", path))
    }
}

/// Read and decode a JSON object payload
pub fn read_payload(path: &str) -> Result<RawPayload> {
    let text = read_text(path)?;
    let payload = payload_from_json(text.trim())
        .with_context(|| format!("Payload in {} is not a JSON object", display_name(path)))?;
    Ok(payload)
}

fn display_name(path: &str) -> &str {
    if path == "-" {
        "stdin"
    } else {
        path
    }
}
