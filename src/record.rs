// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS record model and record identity.
//!
//! A [`Record`] is one resource record inside a zone. Records are compared for
//! diffing by their identity key (see [`record_key`]): two records with the same
//! kind, host and target are the same record even when priority or TTL differ.
//! Those differences surface as field-level updates.

use std::fmt;

/// Provider-assigned zone identifier
pub type ZoneId = u64;

/// Provider-assigned record identifier
pub type RecordId = u64;

/// Record kinds managed by zonesync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// IPv4 address record
    A,
    /// IPv6 address record
    Aaaa,
    /// Canonical name alias
    Cname,
    /// Mail exchange, the only kind carrying a meaningful priority
    Mx,
    /// Text record
    Txt,
}

impl RecordKind {
    /// Every managed kind, in display order.
    pub const ALL: [Self; 5] = [Self::A, Self::Aaaa, Self::Cname, Self::Mx, Self::Txt];

    /// Wire name of the kind (`A`, `AAAA`, `CNAME`, `MX`, `TXT`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
        }
    }

    /// Parse a kind name, ignoring case.
    ///
    /// Returns `None` for kinds zonesync does not manage (`NS`, `SRV`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record fields compared when diffing two records with the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordField {
    Name,
    Target,
    Priority,
    TtlSeconds,
}

impl RecordField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Target => "target",
            Self::Priority => "priority",
            Self::TtlSeconds => "ttl_seconds",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the identity key of a record: `kind:host:target`.
///
/// The host of an apex record is the empty string, so an apex A record pointing
/// at `1.2.3.4` has the key `A::1.2.3.4`.
#[must_use]
pub fn record_key(kind: RecordKind, host: &str, target: &str) -> String {
    format!("{kind}:{host}:{target}")
}

/// Treat an explicit zero as "use the provider default".
///
/// Applied once, when a zone or record is constructed.
#[must_use]
pub fn normalize_seconds(value: Option<u32>) -> Option<u32> {
    value.filter(|seconds| *seconds != 0)
}

/// One DNS resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Name of the zone owning this record
    pub zone_name: String,
    /// Provider zone identifier, absent for desired-state records
    pub zone_id: Option<ZoneId>,
    /// Provider record identifier, absent for desired-state records
    pub id: Option<RecordId>,
    pub kind: RecordKind,
    /// Host name, empty for the zone apex
    pub name: String,
    pub target: String,
    /// Only meaningful for MX records
    pub priority: Option<u32>,
    /// Absent means provider default
    pub ttl_seconds: Option<u32>,
}

impl Record {
    /// Create a desired-state record with no provider identifiers.
    #[must_use]
    pub fn new(
        zone_name: impl Into<String>,
        kind: RecordKind,
        name: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            zone_name: zone_name.into(),
            zone_id: None,
            id: None,
            kind,
            name: name.into(),
            target: target.into(),
            priority: None,
            ttl_seconds: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Option<u32>) -> Self {
        self.priority = priority;
        self
    }

    /// Set the TTL, normalizing zero to absent.
    #[must_use]
    pub fn with_ttl(mut self, ttl_seconds: Option<u32>) -> Self {
        self.ttl_seconds = normalize_seconds(ttl_seconds);
        self
    }

    /// Attach provider identifiers to a record read from the provider.
    #[must_use]
    pub fn with_ids(mut self, zone_id: ZoneId, id: RecordId) -> Self {
        self.zone_id = Some(zone_id);
        self.id = Some(id);
        self
    }

    /// Identity key of this record.
    #[must_use]
    pub fn key(&self) -> String {
        record_key(self.kind, &self.name, &self.target)
    }

    /// Render one field for change reports.
    #[must_use]
    pub fn field_value(&self, field: RecordField) -> String {
        match field {
            RecordField::Name => self.name.clone(),
            RecordField::Target => self.target.clone(),
            RecordField::Priority => display_optional(self.priority),
            RecordField::TtlSeconds => display_optional(self.ttl_seconds),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = if self.name.is_empty() {
            "@"
        } else {
            self.name.as_str()
        };
        write!(f, "{} {} -> {}", self.kind, host, self.target)?;
        if self.kind == RecordKind::Mx {
            write!(f, " (priority {})", display_optional(self.priority))?;
        }
        Ok(())
    }
}

pub(crate) fn display_optional(value: Option<u32>) -> String {
    value.map_or_else(|| "default".to_string(), |v| v.to_string())
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
