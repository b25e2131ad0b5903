// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation of desired DNS state against a provider.
//!
//! A sync pass reads the complete remote state, computes an ordered plan of
//! operations and applies it sequentially. The plan is pure: it performs no
//! I/O and depends only on the two snapshots, so a dry run and a real run
//! describe exactly the same changes.
//!
//! ## Module Structure
//!
//! - [`delta`] - Set and field differences
//! - [`plan`] - Ordered operation list
//! - [`apply`] - Sequential executor with dry-run support

pub mod apply;
pub mod delta;
pub mod plan;

pub use apply::{apply, apply_with, ApplyReport};
pub use delta::{record_delta, records_delta, zone_delta, zones_delta, SetDelta};
pub use plan::{plan, Operation};

use tracing::info;

use crate::dns_errors::ProviderResult;
use crate::provider::{fetch_existing_state, DnsProvider};
use crate::zone::ZoneMap;

/// Bring the provider in line with `desired`.
///
/// Zones hosted by the provider but absent from `desired` are deleted.
///
/// # Errors
///
/// Returns the first provider error. Operations applied before the failure
/// are not rolled back.
pub async fn reconcile<P: DnsProvider + ?Sized>(
    provider: &P,
    desired: &ZoneMap,
    dry_run: bool,
) -> ProviderResult<ApplyReport> {
    reconcile_with(provider, desired, dry_run, |_| {}).await
}

/// Like [`reconcile`], reporting each change to `on_change` as it is applied.
///
/// # Errors
///
/// Same as [`reconcile`].
pub async fn reconcile_with<P, F>(
    provider: &P,
    desired: &ZoneMap,
    dry_run: bool,
    on_change: F,
) -> ProviderResult<ApplyReport>
where
    P: DnsProvider + ?Sized,
    F: FnMut(&str),
{
    let existing = fetch_existing_state(provider).await?;
    let operations = plan(&existing, desired);

    info!(
        existing_zones = existing.len(),
        desired_zones = desired.len(),
        operations = operations.len(),
        dry_run,
        "Reconciling DNS zones"
    );

    let report = apply_with(provider, &operations, dry_run, on_change).await?;

    info!(changes = report.changes.len(), dry_run, "Reconciliation complete");
    Ok(report)
}
