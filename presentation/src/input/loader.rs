//! Reads OpenAI-style JSON request documents from files or stdin

use bridge_domain::{ChatMessage, ToolDefinition};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("--metadata must be a JSON object: {0}")]
    Metadata(String),
}

/// A JSON document as read, alongside its typed form.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub raw: Value,
    pub parsed: T,
}

/// Read the messages document; `-` reads stdin.
pub fn read_messages(path: &Path) -> Result<Loaded<Vec<ChatMessage>>, InputError> {
    read_json(path)
}

pub fn read_tools(path: &Path) -> Result<Loaded<Vec<ToolDefinition>>, InputError> {
    read_json(path)
}

/// Parse the `--metadata` argument; absent means empty.
pub fn parse_metadata(raw: Option<&str>) -> Result<Map<String, Value>, InputError> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(InputError::Metadata(format!("got {}", json_kind(&other)))),
        Err(e) => Err(InputError::Metadata(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>, InputError> {
    let read_error = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };

    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(read_error)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    };

    let parse_error = |source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let raw: Value = serde_json::from_str(&text).map_err(parse_error)?;
    let parsed = T::deserialize(&raw).map_err(parse_error)?;
    Ok(Loaded { raw, parsed })
}
