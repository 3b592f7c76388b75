//! Typed access to loosely-typed product parameters.
//!
//! Parameters arrive as a JSON object (from the CLI, a stored template, or an
//! API caller). Values may be given either natively or as strings, so
//! `"variants": 3` and `"variants": "3"` read the same.

use serde_json::Value;
use std::str::FromStr;

use crate::error::{PrismError, Result};

/// Raw parameters passed to [`Strategy::run`](super::Strategy::run).
pub type Params = serde_json::Map<String, Value>;

/// Borrowing reader over [`Params`] with per-type defaults.
pub struct ParamReader<'a> {
    params: &'a Params,
}

impl<'a> ParamReader<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self { params }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.params.get(name).filter(|v| !v.is_null())
    }

    pub fn str_or(&self, name: &str, default: &str) -> Result<String> {
        match self.get(name) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.trim().to_string()),
            Some(other) => Err(PrismError::invalid_param(
                name,
                format!("expected a string, got {}", other),
            )),
        }
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(PrismError::invalid_param(name, format!("'{}' is not a boolean", s))),
            },
            Some(other) => Err(PrismError::invalid_param(
                name,
                format!("expected a boolean, got {}", other),
            )),
        }
    }

    pub fn u64_opt(&self, name: &str) -> Result<Option<u64>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                PrismError::invalid_param(name, format!("{} is not a non-negative integer", n))
            }),
            Some(Value::String(s)) => s.trim().parse::<u64>().map(Some).map_err(|_| {
                PrismError::invalid_param(name, format!("'{}' is not a non-negative integer", s))
            }),
            Some(other) => Err(PrismError::invalid_param(
                name,
                format!("expected an integer, got {}", other),
            )),
        }
    }

    pub fn u64_or(&self, name: &str, default: u64) -> Result<u64> {
        Ok(self.u64_opt(name)?.unwrap_or(default))
    }

    /// Like [`u64_or`](Self::u64_or) but rejects values outside `min..=max`.
    pub fn u64_in(&self, name: &str, default: u64, min: u64, max: u64) -> Result<u64> {
        let value = self.u64_or(name, default)?;
        if !(min..=max).contains(&value) {
            return Err(PrismError::invalid_param(
                name,
                format!("{} is outside {}..={}", value, min, max),
            ));
        }
        Ok(value)
    }

    /// A list given as a JSON array of strings or a comma-separated string.
    ///
    /// Entries are trimmed and empty entries dropped.
    pub fn list(&self, name: &str) -> Result<Vec<String>> {
        let raw: Vec<String> = match self.get(name) {
            None => return Ok(Vec::new()),
            Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(PrismError::invalid_param(
                        name,
                        format!("list entries must be strings, got {}", other),
                    )),
                })
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(PrismError::invalid_param(
                    name,
                    format!("expected a list, got {}", other),
                ));
            }
        };

        Ok(raw
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }

    /// Parses a string parameter into `T`, falling back to `default` when absent.
    pub fn parse_or<T: FromStr>(&self, name: &str, default: T) -> Result<T> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(default),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| PrismError::invalid_param(name, format!("unsupported value '{}'", s))),
            Some(other) => Err(PrismError::invalid_param(
                name,
                format!("expected a string, got {}", other),
            )),
        }
    }
}
