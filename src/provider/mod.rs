// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS hosting provider gateway.
//!
//! The reconciler only talks to a provider through [`DnsProvider`]. Reading the
//! remote state is done by [`remote::fetch_existing_state`], which builds the
//! same [`ZoneMap`](crate::zone::ZoneMap) shape the specification loader
//! produces, so both sides can be diffed directly.
//!
//! ## Module Structure
//!
//! - [`linode`] - Client for the legacy Linode DNS API
//! - [`types`] - Linode wire types
//! - [`remote`] - Remote state reader

pub mod linode;
pub mod remote;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use linode::LinodeClient;
pub use remote::fetch_existing_state;

use async_trait::async_trait;

use crate::dns_errors::ProviderResult;
use crate::record::{Record, RecordField, ZoneId};
use crate::zone::{Zone, ZoneField};

/// Operations a DNS hosting provider must support.
///
/// Zones and records handed to the mutating methods carry the provider
/// identifiers they were read with; implementations report
/// [`ProviderError::MissingIdentifier`](crate::dns_errors::ProviderError::MissingIdentifier)
/// when one is required but absent.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every zone hosted by the provider, without records.
    async fn list_zones(&self) -> ProviderResult<Vec<Zone>>;

    /// List the records of one zone.
    ///
    /// Records of kinds outside [`RecordKind`](crate::record::RecordKind) are
    /// skipped.
    async fn list_records(&self, zone: &Zone) -> ProviderResult<Vec<Record>>;

    /// Create a zone and return its new identifier.
    async fn create_zone(&self, zone: &Zone) -> ProviderResult<ZoneId>;

    async fn delete_zone(&self, zone: &Zone) -> ProviderResult<()>;

    /// Apply the `changed` fields of `desired` to the existing `zone`.
    async fn update_zone(
        &self,
        zone: &Zone,
        desired: &Zone,
        changed: &[ZoneField],
    ) -> ProviderResult<()>;

    async fn create_record(&self, zone_id: ZoneId, record: &Record) -> ProviderResult<()>;

    async fn delete_record(&self, record: &Record) -> ProviderResult<()>;

    /// Apply the `changed` fields of `desired` to the existing `record`.
    async fn update_record(
        &self,
        record: &Record,
        desired: &Record,
        changed: &[RecordField],
    ) -> ProviderResult<()>;
}
