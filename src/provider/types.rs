// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the legacy Linode DNS API.
//!
//! Every response is wrapped in an envelope:
//!
//! ```json
//! { "ACTION": "domain.list", "ERRORARRAY": [], "DATA": [ ... ] }
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::record::{Record, RecordId, RecordKind, ZoneId};
use crate::zone::{Zone, ZoneField};

/// Response envelope returned by every action.
#[derive(Debug, Clone, Deserialize)]
pub struct LinodeEnvelope {
    #[serde(rename = "ERRORARRAY", default)]
    pub errors: Vec<LinodeApiError>,
    /// Left untyped until the error array has been checked
    #[serde(rename = "DATA", default)]
    pub data: Value,
}

/// One entry of `ERRORARRAY`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinodeApiError {
    #[serde(rename = "ERRORCODE", default)]
    pub code: i64,
    #[serde(rename = "ERRORMESSAGE", default)]
    pub message: String,
}

/// A zone as returned by `domain.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinodeDomain {
    #[serde(rename = "DOMAINID")]
    pub id: ZoneId,
    #[serde(rename = "DOMAIN")]
    pub domain: String,
    #[serde(rename = "TYPE", default)]
    pub zone_type: Option<String>,
    #[serde(rename = "SOA_EMAIL", default)]
    pub soa_email: Option<String>,
    #[serde(rename = "REFRESH_SEC", default)]
    pub refresh_seconds: Option<u32>,
    #[serde(rename = "RETRY_SEC", default)]
    pub retry_seconds: Option<u32>,
    #[serde(rename = "EXPIRE_SEC", default)]
    pub expire_seconds: Option<u32>,
    #[serde(rename = "TTL_SEC", default)]
    pub ttl_seconds: Option<u32>,
}

impl From<LinodeDomain> for Zone {
    fn from(domain: LinodeDomain) -> Self {
        let mut zone = Zone::new(domain.domain);
        zone.id = Some(domain.id);
        zone.zone_type = domain.zone_type;
        zone.soa_email = domain.soa_email.filter(|email| !email.is_empty());
        zone.set_seconds(ZoneField::RefreshSeconds, domain.refresh_seconds);
        zone.set_seconds(ZoneField::RetrySeconds, domain.retry_seconds);
        zone.set_seconds(ZoneField::ExpireSeconds, domain.expire_seconds);
        zone.set_seconds(ZoneField::TtlSeconds, domain.ttl_seconds);
        zone
    }
}

/// A record as returned by `domain.resource.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinodeResource {
    #[serde(rename = "DOMAINID")]
    pub zone_id: ZoneId,
    #[serde(rename = "RESOURCEID")]
    pub id: RecordId,
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "NAME", default)]
    pub name: String,
    #[serde(rename = "TARGET", default)]
    pub target: String,
    #[serde(rename = "PRIORITY", default)]
    pub priority: Option<u32>,
    #[serde(rename = "TTL_SEC", default)]
    pub ttl_seconds: Option<u32>,
}

impl LinodeResource {
    /// Convert into a [`Record`] owned by `zone_name`.
    ///
    /// Returns `None` for kinds this tool does not manage (NS, SRV, ...); such
    /// records are left untouched on the provider.
    #[must_use]
    pub fn into_record(self, zone_name: &str) -> Option<Record> {
        let Some(kind) = RecordKind::parse(&self.kind) else {
            warn!(
                zone = %zone_name,
                record_type = %self.kind,
                name = %self.name,
                "Skipping unmanaged record type"
            );
            return None;
        };

        let priority = if kind == RecordKind::Mx {
            self.priority
        } else {
            None
        };

        Some(
            Record::new(zone_name, kind, self.name, self.target)
                .with_priority(priority)
                .with_ttl(self.ttl_seconds)
                .with_ids(self.zone_id, self.id),
        )
    }
}

/// `DATA` of `domain.create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedDomain {
    #[serde(rename = "DomainID")]
    pub id: ZoneId,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
