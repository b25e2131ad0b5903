// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Set and field differences between existing and desired state.
//!
//! Both sides are keyed maps, so every difference is computed over sorted keys
//! and the result is deterministic.

use std::collections::BTreeMap;

use crate::record::{Record, RecordField, RecordKind};
use crate::zone::{Zone, ZoneField, ZoneMap};

/// Key-level difference between two keyed collections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDelta<'a> {
    /// Keys only present in the existing state
    pub to_delete: Vec<&'a str>,
    /// Keys present on both sides
    pub to_check: Vec<&'a str>,
    /// Keys only present in the desired state
    pub to_add: Vec<&'a str>,
}

impl SetDelta<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_check.is_empty() && self.to_add.is_empty()
    }
}

fn keyed_delta<'a, V>(
    existing: &'a BTreeMap<String, V>,
    desired: &'a BTreeMap<String, V>,
) -> SetDelta<'a> {
    let mut delta = SetDelta::default();

    for key in existing.keys() {
        if desired.contains_key(key) {
            delta.to_check.push(key.as_str());
        } else {
            delta.to_delete.push(key.as_str());
        }
    }
    delta.to_add = desired
        .keys()
        .filter(|key| !existing.contains_key(*key))
        .map(String::as_str)
        .collect();

    delta
}

/// Partition domain names into zones to delete, check and add.
#[must_use]
pub fn zones_delta<'a>(existing: &'a ZoneMap, desired: &'a ZoneMap) -> SetDelta<'a> {
    keyed_delta(existing, desired)
}

/// Partition record keys into records to delete, check and add.
#[must_use]
pub fn records_delta<'a>(
    existing: &'a BTreeMap<String, Record>,
    desired: &'a BTreeMap<String, Record>,
) -> SetDelta<'a> {
    keyed_delta(existing, desired)
}

/// Zone fields whose values differ. Absent versus present is a difference.
#[must_use]
pub fn zone_delta(existing: &Zone, desired: &Zone) -> Vec<ZoneField> {
    ZoneField::ALL
        .into_iter()
        .filter(|field| match field {
            ZoneField::SoaEmail => existing.soa_email != desired.soa_email,
            timer => existing.seconds(*timer) != desired.seconds(*timer),
        })
        .collect()
}

/// Record fields whose values differ.
///
/// `priority` is only compared when the existing record is an MX record.
#[must_use]
pub fn record_delta(existing: &Record, desired: &Record) -> Vec<RecordField> {
    let mut changed = Vec::new();

    if existing.name != desired.name {
        changed.push(RecordField::Name);
    }
    if existing.target != desired.target {
        changed.push(RecordField::Target);
    }
    if existing.kind == RecordKind::Mx && existing.priority != desired.priority {
        changed.push(RecordField::Priority);
    }
    if existing.ttl_seconds != desired.ttl_seconds {
        changed.push(RecordField::TtlSeconds);
    }

    changed
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod delta_tests;
