//! # Init Data
//!
//! The flat key/value payload the platform client hands to the mini app.
//! Keys are unique and kept in byte-wise order, which is exactly the order
//! the check-string needs.

use crate::domain::errors::{DecodeError, InitDataError};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Field holding the claimed signature; never part of the check-string.
pub const HASH_KEY: &str = "hash";

/// Field holding the JSON-encoded user record.
pub const USER_KEY: &str = "user";

/// Field holding the unix time the platform signed the payload.
pub const AUTH_DATE_KEY: &str = "auth_date";

/// Upper bound on the number of fields accepted for verification.
pub const MAX_FIELDS: usize = 64;

/// Upper bound on the summed byte length of all keys and values.
pub const MAX_PAYLOAD_BYTES: usize = 16 * 1024;

/// Client-supplied init data.
///
/// Deserializes from either a JSON object (non-string values are rendered
/// as their compact JSON text) or the raw URL-encoded query string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InitDataInput", into = "BTreeMap<String, String>")]
pub struct InitData {
    fields: BTreeMap<String, String>,
}

impl InitData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the URL-encoded form (`query_id=...&user=...&hash=...`).
    ///
    /// Duplicate keys are rejected since the check-string needs each key once.
    /// Escapes that decode to invalid UTF-8 are rejected rather than replaced.
    pub fn from_query(query: &str) -> Result<Self, InitDataError> {
        let mut fields = BTreeMap::new();
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key)?;
            let value = decode_component(value)?;
            if fields.contains_key(&key) {
                return Err(InitDataError::Malformed(format!("duplicate key `{key}`")));
            }
            fields.insert(key, value);
        }
        Ok(Self { fields })
    }

    /// Flatten a JSON object into string fields.
    pub fn from_json_map(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(key, value)| (key, stringify_value(value)))
            .collect();
        Self { fields }
    }

    /// Builder-style insert, mostly for tests and tooling.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The claimed signature, if present.
    pub fn hash(&self) -> Option<&str> {
        self.get(HASH_KEY)
    }

    pub fn auth_date(&self) -> Option<&str> {
        self.get(AUTH_DATE_KEY)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Summed byte length of every key and value.
    pub fn byte_len(&self) -> usize {
        self.fields.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Canonical check-string: every field except `hash`, sorted by key
    /// bytes, rendered `key=value` and joined by `\n` with no trailing newline.
    pub fn data_check_string(&self) -> String {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != HASH_KEY)
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse the embedded user record.
    ///
    /// Only meaningful after verification. A payload without a `user`
    /// field yields an empty object.
    pub fn user(&self) -> Result<Value, DecodeError> {
        match self.get(USER_KEY) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Value::Object(Map::new())),
        }
    }
}

impl FromIterator<(String, String)> for InitData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<InitData> for BTreeMap<String, String> {
    fn from(data: InitData) -> Self {
        data.fields
    }
}

/// Init data as it arrives on the wire, before the query form is decoded.
///
/// Request bodies hold this so a malformed query string surfaces as a
/// verification failure instead of a body rejection.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InitDataInput {
    Query(String),
    Fields(Map<String, Value>),
}

impl InitDataInput {
    pub fn parse(self) -> Result<InitData, InitDataError> {
        InitData::try_from(self)
    }
}

impl TryFrom<InitDataInput> for InitData {
    type Error = InitDataError;

    fn try_from(input: InitDataInput) -> Result<Self, Self::Error> {
        match input {
            InitDataInput::Query(query) => InitData::from_query(&query),
            InitDataInput::Fields(map) => Ok(InitData::from_json_map(map)),
        }
    }
}

/// Decode one `application/x-www-form-urlencoded` component.
fn decode_component(raw: &str) -> Result<String, InitDataError> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| InitDataError::Malformed(format!("`{raw}` does not decode to UTF-8")))
}

/// Render a JSON value as the string that takes part in the check-string.
fn stringify_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
