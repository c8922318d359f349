//! JSON input and output for commands
//!
//! Results go to stdout unless `--output` names a file; logs never share the
//! stream, so stdout stays a single JSON document.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};

/// Writes `value` as pretty-printed JSON to `destination`, or stdout if `None`.
pub fn write_json<T>(value: &T, destination: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match destination {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            emit_json(value, BufWriter::new(file), &path.display().to_string())
        }
        None => emit_json(value, io::stdout().lock(), "stdout"),
    }
}

fn emit_json<T, W>(value: &T, mut writer: W, target: &str) -> anyhow::Result<()>
where
    T: Serialize,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write to {target}"))
}

/// Reads a whole JSON file; `kind` names the file in error messages.
pub fn read_json<T>(kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to open {kind} file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {kind} JSON file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json(&serde_json::json!({"players": ["A", "B"]}), Some(&path)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        let value: serde_json::Value = read_json("output", &path).unwrap();
        assert_eq!(value["players"][1], "B");
    }

    #[test]
    fn test_emit_json_to_buffer() {
        let mut buffer = vec![];
        emit_json(&[1, 2], &mut buffer, "buffer").unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[\n  1,\n  2\n]\n");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<serde_json::Value>("config", &dir.path().join("none.json"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to open config file"));
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_json::<serde_json::Value>("config", &path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config JSON file"));
    }
}
