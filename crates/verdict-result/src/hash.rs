use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use verdict_core::{ErrorInfo, VerdictError};

use crate::report::DecisionReport;

fn serde_error(code: &str, err: impl ToString) -> VerdictError {
    VerdictError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, val)| (key, canonicalize(val)))
                .collect();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into JSON bytes with object keys sorted at every depth.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, VerdictError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Computes a stable hexadecimal SHA-256 digest of the canonical JSON of `value`.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, VerdictError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(bytes)))
}

/// Computes the canonical digest of a decision report, ignoring its stored digest.
pub fn hash_report(report: &DecisionReport) -> Result<String, VerdictError> {
    let mut unstamped = report.clone();
    unstamped.digest.clear();
    stable_hash_string(&unstamped)
}
