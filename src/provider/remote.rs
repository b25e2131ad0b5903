// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Read the complete remote state from a provider.

use tracing::{debug, info};

use crate::dns_errors::ProviderResult;
use crate::provider::DnsProvider;
use crate::zone::ZoneMap;

/// Fetch every zone and all of its records, keyed by domain name.
///
/// # Errors
///
/// Returns the first provider error encountered.
pub async fn fetch_existing_state<P: DnsProvider + ?Sized>(
    provider: &P,
) -> ProviderResult<ZoneMap> {
    let mut zones = ZoneMap::new();

    for mut zone in provider.list_zones().await? {
        for record in provider.list_records(&zone).await? {
            zone.add_record(record);
        }
        debug!(zone = %zone.domain, records = zone.records.len(), "Fetched zone");
        zones.insert(zone.domain.clone(), zone);
    }

    info!(zones = zones.len(), "Fetched existing state");
    Ok(zones)
}
