// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Key schemas for every validated level of a specification document.
//!
//! The top level and zone/family bodies have an explicit key enum with a
//! catch-all `Unrecognized` variant. A mapping is validated as a whole with
//! [`validate_keys`] before any of its values are interpreted. Record entries
//! have a fixed shape and deserialize into [`RecordEntry`].

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::constants::{
    KEY_EXPIRE_SECONDS, KEY_FAMILIES, KEY_FQDNS, KEY_HOST, KEY_IPS, KEY_PRIORITY,
    KEY_REFRESH_SECONDS, KEY_RETRY_SECONDS, KEY_SOA_EMAIL, KEY_TARGET, KEY_TTL_SECONDS, KEY_TXTS,
    KEY_ZONES,
};
use crate::dns_errors::{SpecError, SpecResult};
use crate::record::RecordKind;
use crate::zone::ZoneField;

/// A key belonging to one schema level.
pub(crate) trait SchemaKey: Sized {
    fn parse(key: &str) -> Self;

    /// The raw key name when it is not part of the schema.
    fn unrecognized(&self) -> Option<&str>;
}

/// Keys allowed at the top of a specification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TopLevelKey {
    Ips,
    Fqdns,
    Txts,
    Families,
    Zones,
    Unrecognized(String),
}

impl SchemaKey for TopLevelKey {
    fn parse(key: &str) -> Self {
        match key {
            KEY_IPS => Self::Ips,
            KEY_FQDNS => Self::Fqdns,
            KEY_TXTS => Self::Txts,
            KEY_FAMILIES => Self::Families,
            KEY_ZONES => Self::Zones,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    fn unrecognized(&self) -> Option<&str> {
        match self {
            Self::Unrecognized(key) => Some(key.as_str()),
            _ => None,
        }
    }
}

/// Keys allowed in a zone or family body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ZoneKey {
    /// SOA email or one of the SOA timers
    Setting(ZoneField),
    Families,
    /// A record-kind bucket (`A`, `CNAME`, `MX`, `TXT`)
    Records(RecordKind),
    Unrecognized(String),
}

impl SchemaKey for ZoneKey {
    fn parse(key: &str) -> Self {
        match key {
            KEY_SOA_EMAIL => Self::Setting(ZoneField::SoaEmail),
            KEY_REFRESH_SECONDS => Self::Setting(ZoneField::RefreshSeconds),
            KEY_RETRY_SECONDS => Self::Setting(ZoneField::RetrySeconds),
            KEY_EXPIRE_SECONDS => Self::Setting(ZoneField::ExpireSeconds),
            KEY_TTL_SECONDS => Self::Setting(ZoneField::TtlSeconds),
            KEY_FAMILIES => Self::Families,
            // AAAA records come out of the A bucket, there is no AAAA bucket
            "A" => Self::Records(RecordKind::A),
            "CNAME" => Self::Records(RecordKind::Cname),
            "MX" => Self::Records(RecordKind::Mx),
            "TXT" => Self::Records(RecordKind::Txt),
            other => Self::Unrecognized(other.to_string()),
        }
    }

    fn unrecognized(&self) -> Option<&str> {
        match self {
            Self::Unrecognized(key) => Some(key.as_str()),
            _ => None,
        }
    }
}

/// One entry of a record-kind bucket, before target resolution.
///
/// A missing or null `host` is the zone apex. A null `target` is the empty
/// string, but the key itself is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RecordEntry {
    #[serde(default, deserialize_with = "nullable_scalar")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "nullable_scalar")]
    pub target: Option<String>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub ttl_seconds: Option<u32>,
}

impl RecordEntry {
    pub(crate) const FIELDS: [&'static str; 4] =
        [KEY_HOST, KEY_TARGET, KEY_PRIORITY, KEY_TTL_SECONDS];

    /// Read one entry of the `kind` bucket.
    ///
    /// The key set is checked as a whole before any value is read.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnrecognizedKey`] for a key outside the record
    /// schema and [`SpecError::InvalidValue`] for a non-mapping entry, a missing
    /// target, or a value of the wrong type.
    pub(crate) fn from_value(item: &Value, location: &str, kind: RecordKind) -> SpecResult<Self> {
        let Value::Mapping(mapping) = item else {
            return Err(invalid(location, kind.as_str(), "expected a record mapping"));
        };

        for key in mapping.keys() {
            let name = key.as_str().ok_or_else(|| SpecError::Parse {
                reason: format!("non-string key {key:?} in {location}"),
            })?;
            if !Self::FIELDS.iter().any(|field| *field == name) {
                return Err(SpecError::UnrecognizedKey {
                    location: location.to_string(),
                    key: name.to_string(),
                });
            }
        }

        let entry: Self = serde_yaml::from_value(item.clone())
            .map_err(|e| invalid(location, kind.as_str(), &e.to_string()))?;
        if entry.target.is_none() {
            return Err(invalid(location, KEY_TARGET, "missing target"));
        }
        Ok(entry)
    }
}

/// Scalars become text and `null` becomes the empty string.
fn nullable_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Some(String::new()));
    }
    scalar_text(&value)
        .map(Some)
        .ok_or_else(|| de::Error::custom("expected a scalar"))
}

/// Validate the whole key set of `mapping` against schema `K`.
///
/// Returns the parsed keys paired with their values, in document order.
///
/// # Errors
///
/// Returns [`SpecError::Parse`] for a non-string key and
/// [`SpecError::UnrecognizedKey`] for the first key outside the schema.
pub(crate) fn validate_keys<'v, K: SchemaKey>(
    mapping: &'v Mapping,
    location: &str,
) -> SpecResult<Vec<(K, &'v Value)>> {
    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = key.as_str().ok_or_else(|| SpecError::Parse {
            reason: format!("non-string key {key:?} in {location}"),
        })?;
        entries.push((K::parse(name), value));
    }

    if let Some(key) = entries.iter().find_map(|(key, _)| key.unrecognized()) {
        return Err(SpecError::UnrecognizedKey {
            location: location.to_string(),
            key: key.to_string(),
        });
    }

    Ok(entries)
}

fn invalid(location: &str, key: &str, reason: &str) -> SpecError {
    SpecError::InvalidValue {
        location: location.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Read a mapping value; `null` counts as an empty mapping.
pub(crate) fn optional_mapping<'v>(
    value: &'v Value,
    location: &str,
    key: &str,
) -> SpecResult<Option<&'v Mapping>> {
    match value {
        Value::Null => Ok(None),
        Value::Mapping(mapping) => Ok(Some(mapping)),
        _ => Err(invalid(location, key, "expected a mapping")),
    }
}

/// Read a list value; `null` counts as an empty list.
pub(crate) fn optional_sequence<'v>(
    value: &'v Value,
    location: &str,
    key: &str,
) -> SpecResult<&'v [Value]> {
    match value {
        Value::Null => Ok(&[]),
        Value::Sequence(items) => Ok(items.as_slice()),
        _ => Err(invalid(location, key, "expected a list")),
    }
}

/// Render a scalar as text. Returns `None` for `null` and non-scalars.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Read an optional text value; `null` is absent.
pub(crate) fn optional_text(
    value: &Value,
    location: &str,
    key: &str,
) -> SpecResult<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    scalar_text(value)
        .map(Some)
        .ok_or_else(|| invalid(location, key, "expected a scalar"))
}

/// Read an optional non-negative 32-bit integer; `null` is absent.
pub(crate) fn optional_u32(value: &Value, location: &str, key: &str) -> SpecResult<Option<u32>> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_u64()
        .and_then(|number| u32::try_from(number).ok())
        .map(Some)
        .ok_or_else(|| invalid(location, key, "expected a non-negative integer"))
}

/// Read a list of names (used for `families`).
pub(crate) fn name_list(value: &Value, location: &str, key: &str) -> SpecResult<Vec<String>> {
    optional_sequence(value, location, key)?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(location, key, "family names must be strings"))
        })
        .collect()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod schema_tests;
