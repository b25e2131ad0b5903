// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS zone model, family inheritance and CNAME templating.
//!
//! Zones are identified by their domain name, never by the provider identifier.
//! A [`Family`] is a zone-shaped template that is only ever used as a merge
//! source: it is read-only once loaded, and every record a zone inherits from it
//! is an owned copy.

use std::collections::BTreeMap;
use std::fmt;

use crate::constants::ZONE_TEMPLATE_VARIABLE;
use crate::record::{display_optional, normalize_seconds, Record, RecordKind, ZoneId};

/// Zones keyed by domain name, iterated in sorted order.
pub type ZoneMap = BTreeMap<String, Zone>;

/// Zone-level fields compared when diffing two zones with the same domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZoneField {
    SoaEmail,
    RefreshSeconds,
    RetrySeconds,
    ExpireSeconds,
    TtlSeconds,
}

impl ZoneField {
    /// Every compared field, in diff order.
    pub const ALL: [Self; 5] = [
        Self::SoaEmail,
        Self::RefreshSeconds,
        Self::RetrySeconds,
        Self::ExpireSeconds,
        Self::TtlSeconds,
    ];

    /// The four SOA timer fields.
    pub const TIMERS: [Self; 4] = [
        Self::RefreshSeconds,
        Self::RetrySeconds,
        Self::ExpireSeconds,
        Self::TtlSeconds,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SoaEmail => "soa_email",
            Self::RefreshSeconds => "refresh_seconds",
            Self::RetrySeconds => "retry_seconds",
            Self::ExpireSeconds => "expire_seconds",
            Self::TtlSeconds => "ttl_seconds",
        }
    }
}

impl fmt::Display for ZoneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One DNS domain with its SOA settings and records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Zone {
    /// Domain name, the zone's identity
    pub domain: String,
    /// Provider zone identifier, absent until the zone is created
    pub id: Option<ZoneId>,
    /// Provider zone type (`master` or `slave`)
    pub zone_type: Option<String>,
    pub soa_email: Option<String>,
    pub refresh_seconds: Option<u32>,
    pub retry_seconds: Option<u32>,
    pub expire_seconds: Option<u32>,
    pub ttl_seconds: Option<u32>,
    /// Records keyed by [`Record::key`]
    pub records: BTreeMap<String, Record>,
}

impl Zone {
    /// Create an empty zone.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Read one of the SOA timer fields.
    ///
    /// Returns `None` for [`ZoneField::SoaEmail`], which is not a timer.
    #[must_use]
    pub fn seconds(&self, field: ZoneField) -> Option<u32> {
        match field {
            ZoneField::SoaEmail => None,
            ZoneField::RefreshSeconds => self.refresh_seconds,
            ZoneField::RetrySeconds => self.retry_seconds,
            ZoneField::ExpireSeconds => self.expire_seconds,
            ZoneField::TtlSeconds => self.ttl_seconds,
        }
    }

    /// Set one of the SOA timer fields, normalizing zero to absent.
    pub fn set_seconds(&mut self, field: ZoneField, value: Option<u32>) {
        let value = normalize_seconds(value);
        match field {
            ZoneField::SoaEmail => {}
            ZoneField::RefreshSeconds => self.refresh_seconds = value,
            ZoneField::RetrySeconds => self.retry_seconds = value,
            ZoneField::ExpireSeconds => self.expire_seconds = value,
            ZoneField::TtlSeconds => self.ttl_seconds = value,
        }
    }

    /// Render one field for change reports.
    #[must_use]
    pub fn field_value(&self, field: ZoneField) -> String {
        match field {
            ZoneField::SoaEmail => self
                .soa_email
                .clone()
                .unwrap_or_else(|| "none".to_string()),
            timer => display_optional(self.seconds(timer)),
        }
    }

    /// Insert a record under its identity key.
    ///
    /// A record with the same key replaces the existing one.
    pub fn add_record(&mut self, record: Record) {
        self.records.insert(record.key(), record);
    }

    /// Pull missing values from `other` into this zone.
    ///
    /// Scalar fields are copied only when absent here. Records are copied only
    /// when their key is absent here; existing records are never replaced.
    /// Copied records are re-owned by this zone.
    pub fn merge(&mut self, other: &Zone) {
        if self.soa_email.is_none() {
            self.soa_email.clone_from(&other.soa_email);
        }
        for field in ZoneField::TIMERS {
            if self.seconds(field).is_none() {
                self.set_seconds(field, other.seconds(field));
            }
        }

        for (key, record) in &other.records {
            if self.records.contains_key(key) {
                continue;
            }
            let mut inherited = record.clone();
            inherited.zone_name.clone_from(&self.domain);
            self.records.insert(key.clone(), inherited);
        }
    }

    /// Merge a family template into this zone.
    ///
    /// The template's CNAME targets are rendered for this zone first, so an
    /// inherited record never replaces one the zone already holds under the
    /// rendered key.
    pub fn inherit(&mut self, family: &Family) {
        let mut template = family.template().clone();
        template.domain.clone_from(&self.domain);
        template.instantiate();
        self.merge(&template);
    }

    /// Replace `{{ zone }}` in every CNAME target with this zone's domain.
    ///
    /// Substituted records are re-keyed since the target is part of the key.
    /// A rendered record is dropped when its new key is already taken.
    pub fn instantiate(&mut self) {
        let templated: Vec<String> = self
            .records
            .iter()
            .filter(|(_, record)| {
                record.kind == RecordKind::Cname
                    && render_zone_template(&record.target, &self.domain) != record.target
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in templated {
            if let Some(mut record) = self.records.remove(&key) {
                record.target = render_zone_template(&record.target, &self.domain);
                if !self.records.contains_key(&record.key()) {
                    self.add_record(record);
                }
            }
        }
    }
}

/// A read-only zone template used as an inheritance source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family(Zone);

impl Family {
    #[must_use]
    pub fn new(template: Zone) -> Self {
        Self(template)
    }

    /// Family name, carried as the template's domain.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.domain
    }

    #[must_use]
    pub fn template(&self) -> &Zone {
        &self.0
    }
}

/// Substitute every `{{ zone }}` placeholder in `template`.
///
/// Whitespace inside the braces is optional. Other placeholders are left as-is.
#[must_use]
pub fn render_zone_template(template: &str, zone: &str) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("}}") else {
            break;
        };

        if inner[..close].trim() == ZONE_TEMPLATE_VARIABLE {
            rendered.push_str(&rest[..open]);
            rendered.push_str(zone);
        } else {
            rendered.push_str(&rest[..open + 2 + close + 2]);
        }
        rest = &inner[close + 2..];
    }

    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod zone_tests;
