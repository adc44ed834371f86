//! Typed accessors over process environment variables.
//!
//! Lists are comma separated. Integers that fail to parse read as `0`,
//! both for single values and for each element of a list; use
//! [`try_get_int`] to tell a bad value apart from a real zero.

use crate::config::ConfigError;

/// Returns the value of `name`, or `default` if it is unset.
///
/// A variable set to the empty string is returned as is.
pub fn get_string(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Returns the comma separated elements of `name`, each trimmed.
///
/// Falls back to `defaults` when the variable is unset or empty.
pub fn get_string_list(name: &str, defaults: &[&str]) -> Vec<String> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => split_list(&raw),
        _ => defaults.iter().map(|value| value.to_string()).collect(),
    }
}

/// Returns `name` parsed as an integer, or `default` if it is unset.
///
/// A set but unparsable value yields `0`, not `default`.
pub fn get_int(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => parse_int_or_zero(&raw),
        Err(_) => default,
    }
}

/// Returns the comma separated elements of `name` parsed as integers.
///
/// Elements that fail to parse become `0`. Falls back to `defaults` when
/// the variable is unset or empty.
pub fn get_int_list(name: &str, defaults: &[i64]) -> Vec<i64> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => split_list(&raw)
            .iter()
            .map(|value| parse_int_or_zero(value))
            .collect(),
        _ => defaults.to_vec(),
    }
}

/// Strict variant of [`get_int`]: `Ok(None)` when unset, an error when the
/// value is not an integer.
pub fn try_get_int(name: &str) -> Result<Option<i64>, ConfigError> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidInt {
            name: name.to_string(),
            value: raw,
        })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|value| value.trim().to_string()).collect()
}

fn parse_int_or_zero(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}
