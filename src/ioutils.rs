use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::constants::STDIN_INDICATOR;
use crate::error::{Error, Result};

/// Ensures the output directory exists and is safe to write to.
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    let base_path = std::env::current_dir().unwrap_or_default();
    let abs_path = if dest_path.is_absolute() {
        dest_path.to_path_buf()
    } else {
        base_path.join(dest_path)
    };

    if let Some(parent) = abs_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(abs_path, content).map_err(Error::IoError)
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

/// Parses render data given as a JSON string. Blank input is an empty object.
pub fn parse_string_to_json(buf: &str) -> Result<Map<String, Value>> {
    if buf.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_str(buf).map_err(|e| Error::DataParse(e.to_string()))?;
    into_object(value)
}

/// Reads render data from a `.json`, `.yaml` or `.yml` file.
pub fn read_data_file<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        let value: Value =
            serde_yaml::from_str(&content).map_err(|e| Error::DataParse(e.to_string()))?;
        into_object(value)
    } else {
        parse_string_to_json(&content)
    }
}

/// Builds the render context from a data file and an inline data argument.
///
/// Keys from `data` override keys from `data_file`. A `data` of `-` is read
/// from stdin.
pub fn collect_data(data: Option<&str>, data_file: Option<&Path>) -> Result<Value> {
    let mut context = Map::new();

    if let Some(path) = data_file {
        debug!("Reading render data from {}.", path.display());
        context.extend(read_data_file(path)?);
    }

    if let Some(data) = data {
        let buf = if data == STDIN_INDICATOR {
            debug!("Reading render data from stdin.");
            read_from(std::io::stdin())?
        } else {
            data.to_string()
        };
        context.extend(parse_string_to_json(&buf)?);
    }

    Ok(Value::Object(context))
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::DataParse(format!(
            "expected an object at the top level, got {}",
            crate::template::value::kind_of(Some(&other))
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn refuses_existing_output_dir_without_force() {
        let dir = TempDir::new().unwrap();
        let err = get_output_dir(dir.path(), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(get_output_dir(dir.path(), true).unwrap(), dir.path());
    }

    #[test]
    fn write_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("nested/deeper/page.html");
        write_file("<p></p>", &dest).unwrap();
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "<p></p>");
    }

    #[test]
    fn parses_inline_json_objects_only() {
        assert_eq!(parse_string_to_json("{\"a\": 1}").unwrap()["a"], json!(1));
        assert!(parse_string_to_json("  ").unwrap().is_empty());
        assert_eq!(parse_string_to_json("[1]").unwrap_err().kind(), ErrorKind::DataParse);
        assert_eq!(parse_string_to_json("{").unwrap_err().kind(), ErrorKind::DataParse);
    }

    #[test]
    fn inline_data_overrides_data_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.yaml");
        std::fs::write(&file, "name: Ann\nitems:\n  - a\n  - b\n").unwrap();

        let context = collect_data(Some("{\"name\": \"Bob\"}"), Some(&file)).unwrap();
        assert_eq!(context, json!({"name": "Bob", "items": ["a", "b"]}));
    }

    #[test]
    fn no_data_is_an_empty_context() {
        assert_eq!(collect_data(None, None).unwrap(), json!({}));
    }
}
