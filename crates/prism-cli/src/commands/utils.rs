use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use prism_core::metrics::MetricsBag;
use prism_core::strategy::{MetricSpec, Params};
use serde_json::Value;

/// Parses `key=value`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Product parameters from `key=value` pairs. Values that parse as JSON
/// (numbers, booleans, arrays) keep their type; anything else is a string.
pub fn params_from_pairs(pairs: Vec<(String, String)>) -> Params {
    pairs
        .into_iter()
        .map(|(key, raw)| {
            let value = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));
            (key, value)
        })
        .collect()
}

/// Text from `--file`, the positional argument, or stdin when the argument
/// is `-` or missing.
pub fn read_text(inline: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    match inline {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            if text.trim().is_empty() {
                return Err(anyhow!("No input given"));
            }
            Ok(text)
        }
    }
}

/// `label: value` lines in panel order.
pub fn metric_lines(specs: &[MetricSpec], metrics: &MetricsBag) -> Vec<String> {
    specs
        .iter()
        .filter_map(|spec| {
            metrics
                .get(spec.key)
                .map(|value| format!("{:<24} {}", spec.label, spec.format.render(*value)))
        })
        .collect()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
