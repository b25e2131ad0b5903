// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Compile one zone or family body into a [`Zone`].
//!
//! The compiler validates the body's key set, reads the SOA settings, and turns
//! every entry of the `A`, `CNAME`, `MX` and `TXT` buckets into records, with
//! targets resolved through the alias tables. Inheritance and templating are
//! left to the loader, which knows about the other families.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::constants::KEY_FAMILIES;
use crate::dns_errors::{SpecError, SpecResult};
use crate::record::{Record, RecordKind};
use crate::spec::aliases::Aliases;
use crate::spec::schema::{
    name_list, optional_sequence, optional_text, optional_u32, validate_keys, RecordEntry, ZoneKey,
};
use crate::zone::{Zone, ZoneField};

/// What kind of body is being compiled, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Zone,
    Family,
}

impl Section {
    fn location(self, name: &str) -> String {
        match self {
            Self::Zone => format!("zone '{name}'"),
            Self::Family => format!("family '{name}'"),
        }
    }
}

/// A compiled body together with the families it declares, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledZone {
    pub zone: Zone,
    pub families: Vec<String>,
}

/// Builds zones from raw specification bodies.
#[derive(Debug, Clone, Copy)]
pub struct ZoneCompiler<'a> {
    aliases: &'a Aliases,
}

impl<'a> ZoneCompiler<'a> {
    #[must_use]
    pub fn new(aliases: &'a Aliases) -> Self {
        Self { aliases }
    }

    /// Compile the body of zone or family `name`.
    ///
    /// A `null` body is an empty zone.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnrecognizedKey`] for keys outside the zone or record
    /// schema, [`SpecError::InvalidAddress`] for bad `A` targets and
    /// [`SpecError::InvalidValue`] for values of the wrong shape.
    pub fn compile(&self, name: &str, body: &Value, section: Section) -> SpecResult<CompiledZone> {
        let location = section.location(name);
        let empty = Mapping::new();
        let mapping = match body {
            Value::Null => &empty,
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(SpecError::InvalidValue {
                    location,
                    key: name.to_string(),
                    reason: "expected a mapping".to_string(),
                })
            }
        };

        let mut zone = Zone::new(name);
        let mut families = Vec::new();

        for (key, value) in validate_keys::<ZoneKey>(mapping, &location)? {
            match key {
                ZoneKey::Setting(ZoneField::SoaEmail) => {
                    zone.soa_email = optional_text(value, &location, ZoneField::SoaEmail.as_str())?;
                }
                ZoneKey::Setting(timer) => {
                    let seconds = optional_u32(value, &location, timer.as_str())?;
                    zone.set_seconds(timer, seconds);
                }
                ZoneKey::Families => {
                    families = name_list(value, &location, KEY_FAMILIES)?;
                }
                ZoneKey::Records(kind) => {
                    for record in self.compile_bucket(name, &location, kind, value)? {
                        zone.add_record(record);
                    }
                }
                // rejected by validate_keys
                ZoneKey::Unrecognized(_) => {}
            }
        }

        debug!(
            zone = %name,
            records = zone.records.len(),
            families = families.len(),
            "Compiled {}",
            location
        );

        Ok(CompiledZone { zone, families })
    }

    fn compile_bucket(
        &self,
        zone_name: &str,
        location: &str,
        kind: RecordKind,
        bucket: &Value,
    ) -> SpecResult<Vec<Record>> {
        let entry_location = format!("{kind} record in zone '{zone_name}'");
        let mut records = Vec::new();
        for item in optional_sequence(bucket, location, kind.as_str())? {
            let entry = RecordEntry::from_value(item, &entry_location, kind)?;
            let raw_target = entry.target.as_deref().unwrap_or_default();
            match kind {
                RecordKind::A | RecordKind::Aaaa => {
                    for (address_kind, address) in
                        self.aliases.resolve_addresses(zone_name, raw_target)?
                    {
                        records.push(build_record(&entry, zone_name, address_kind, address));
                    }
                }
                RecordKind::Cname | RecordKind::Mx => {
                    let target = self.aliases.resolve_fqdn(raw_target).to_string();
                    records.push(build_record(&entry, zone_name, kind, target));
                }
                RecordKind::Txt => {
                    let target = self.aliases.resolve_text(raw_target).to_string();
                    records.push(build_record(&entry, zone_name, kind, target));
                }
            }
        }
        Ok(records)
    }
}

fn build_record(entry: &RecordEntry, zone_name: &str, kind: RecordKind, target: String) -> Record {
    Record::new(zone_name, kind, entry.host.clone().unwrap_or_default(), target)
        .with_priority(entry.priority)
        .with_ttl(entry.ttl_seconds)
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod compiler_tests;
