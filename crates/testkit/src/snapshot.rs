//! Golden-file JSON snapshots.
//!
//! Values are written as pretty JSON with object keys sorted and a trailing
//! newline, so goldens diff cleanly. Set `AUTOPLANTER_UPDATE_SNAPSHOTS=1` to
//! rewrite them instead of comparing.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "AUTOPLANTER_UPDATE_SNAPSHOTS";

/// `<manifest_dir>/tests/snapshots/<name>`; pass `env!("CARGO_MANIFEST_DIR")`.
pub fn snapshot_file(manifest_dir: &str, name: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("snapshots").join(name)
}

/// Assert that `value` matches the JSON snapshot stored at `path`.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if should_update_snapshots() {
        return write_snapshot(path, &actual);
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create it)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    // Tolerate CRLF checkouts.
    if expected.replace("\r\n", "\n") != actual {
        anyhow::bail!(
            "Snapshot mismatch at {} (run with {}=1 to update)\n--- actual ---\n{}",
            path.display(),
            UPDATE_SNAPSHOTS_ENV,
            actual
        );
    }

    Ok(())
}

fn should_update_snapshots() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

/// Canonical text form used for snapshot comparison.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let mut text =
        serde_json::to_string_pretty(&sort_keys(value)).context("Failed to format snapshot")?;
    text.push('\n');
    Ok(text)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_nested_keys() {
        let text = canonical_json(&json!({"b": 1, "a": {"z": true, "m": [ {"y": 0, "x": 1} ]}}))
            .expect("serializes");
        let expected = "{\n  \"a\": {\n    \"m\": [\n      {\n        \"x\": 1,\n        \"y\": 0\n      }\n    ],\n    \"z\": true\n  },\n  \"b\": 1\n}\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn snapshot_file_is_under_tests_dir() {
        let path = snapshot_file("/work/crate", "demo.json");
        assert!(path.ends_with("tests/snapshots/demo.json"));
    }
}
