use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use spot_core::{ErrorInfo, SpotError};

fn encoding_error(code: &str, err: serde_json::Error) -> SpotError {
    SpotError::Serde(
        ErrorInfo::new(code, err.to_string())
            .with_context("line", err.line().to_string())
            .with_context("column", err.column().to_string()),
    )
}

// Object members are re-inserted in key order at every depth.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));
            let mut sorted = Map::new();
            for (key, member) in entries {
                sorted.insert(key, sort_keys(member));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}

/// Compact JSON with object keys sorted, so equal values always give equal bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SpotError> {
    let tree = serde_json::to_value(value).map_err(|err| encoding_error("canonical-encode", err))?;
    serde_json::to_vec(&sort_keys(tree)).map_err(|err| encoding_error("canonical-write", err))
}

/// Parses JSON bytes, e.g. a manifest read back from disk.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, SpotError> {
    serde_json::from_slice(data).map_err(|err| {
        encoding_error("json-parse", err).with_context("bytes", data.len().to_string())
    })
}
