// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Sequential plan executor.
//!
//! Operations are applied one at a time, in plan order. The first provider
//! failure aborts the remaining operations; changes already applied stay
//! applied and a rerun converges the rest.

use std::collections::BTreeMap;

use tracing::{error, info};

use crate::dns_errors::{ProviderError, ProviderResult};
use crate::provider::DnsProvider;
use crate::reconcilers::plan::Operation;
use crate::record::ZoneId;

/// Outcome of applying a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// True when no mutating provider call was made
    pub dry_run: bool,
    /// Description of every applied (or, in dry-run mode, intended) change
    pub changes: Vec<String>,
}

impl ApplyReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Apply `operations` against `provider`.
///
/// In dry-run mode no provider method is called and the report lists the
/// intended changes.
///
/// # Errors
///
/// Returns the first provider error, or [`ProviderError::MissingIdentifier`]
/// when a record is added to a zone with no known identifier.
pub async fn apply<P: DnsProvider + ?Sized>(
    provider: &P,
    operations: &[Operation<'_>],
    dry_run: bool,
) -> ProviderResult<ApplyReport> {
    apply_with(provider, operations, dry_run, |_| {}).await
}

/// Like [`apply`], handing every change description to `on_change` before the
/// change is executed.
///
/// A failed run has already reported every change it attempted, the failing
/// one included.
///
/// # Errors
///
/// Same as [`apply`].
pub async fn apply_with<P, F>(
    provider: &P,
    operations: &[Operation<'_>],
    dry_run: bool,
    mut on_change: F,
) -> ProviderResult<ApplyReport>
where
    P: DnsProvider + ?Sized,
    F: FnMut(&str),
{
    let mut report = ApplyReport {
        dry_run,
        changes: Vec::with_capacity(operations.len()),
    };
    let mut created_zones: BTreeMap<String, ZoneId> = BTreeMap::new();

    for operation in operations {
        let description = operation.to_string();
        on_change(description.as_str());

        if dry_run {
            info!(action = operation.action(), "[dry run] {description}");
        } else {
            info!(action = operation.action(), "{description}");
            if let Err(e) = execute(provider, operation, &mut created_zones).await {
                error!(
                    action = operation.action(),
                    error = %e,
                    applied = report.changes.len(),
                    "Aborting remaining changes"
                );
                return Err(e);
            }
        }

        report.changes.push(description);
    }

    Ok(report)
}

async fn execute<P: DnsProvider + ?Sized>(
    provider: &P,
    operation: &Operation<'_>,
    created_zones: &mut BTreeMap<String, ZoneId>,
) -> ProviderResult<()> {
    match operation {
        Operation::DeleteZone { zone } => provider.delete_zone(zone).await,
        Operation::UpdateZone {
            existing,
            desired,
            changed,
        } => provider.update_zone(existing, desired, changed).await,
        Operation::DeleteRecord { record } => provider.delete_record(record).await,
        Operation::UpdateRecord {
            existing,
            desired,
            changed,
        } => provider.update_record(existing, desired, changed).await,
        Operation::CreateZone { zone } => {
            let id = provider.create_zone(zone).await?;
            created_zones.insert(zone.domain.clone(), id);
            Ok(())
        }
        Operation::CreateRecord { zone, record } => {
            let zone_id = zone
                .id
                .or_else(|| created_zones.get(&zone.domain).copied())
                .ok_or_else(|| ProviderError::MissingIdentifier {
                    entity: format!("zone '{}'", zone.domain),
                })?;
            provider.create_record(zone_id, record).await
        }
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
