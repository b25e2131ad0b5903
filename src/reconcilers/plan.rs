// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Ordered change plan.
//!
//! A plan is a flat list of [`Operation`]s borrowing from the existing and
//! desired snapshots. Operations appear in application order:
//!
//! 1. Delete every obsolete zone
//! 2. For every zone present on both sides: update the zone fields, delete
//!    obsolete records, update changed records, add new records
//! 3. For every new zone: create the zone, then add all of its records

use std::fmt;

use tracing::debug;

use crate::reconcilers::delta::{record_delta, records_delta, zone_delta, zones_delta};
use crate::record::{Record, RecordField};
use crate::zone::{Zone, ZoneField, ZoneMap};

/// One intended change against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<'a> {
    DeleteZone {
        zone: &'a Zone,
    },
    UpdateZone {
        existing: &'a Zone,
        desired: &'a Zone,
        changed: Vec<ZoneField>,
    },
    DeleteRecord {
        record: &'a Record,
    },
    UpdateRecord {
        existing: &'a Record,
        desired: &'a Record,
        changed: Vec<RecordField>,
    },
    /// `zone` is the existing zone when it is known to the provider, otherwise
    /// the desired zone created earlier in the same plan.
    CreateRecord {
        zone: &'a Zone,
        record: &'a Record,
    },
    CreateZone {
        zone: &'a Zone,
    },
}

impl Operation<'_> {
    /// Short label used in structured logs.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::DeleteZone { .. } => "delete_zone",
            Self::UpdateZone { .. } => "update_zone",
            Self::DeleteRecord { .. } => "delete_record",
            Self::UpdateRecord { .. } => "update_record",
            Self::CreateRecord { .. } => "create_record",
            Self::CreateZone { .. } => "create_zone",
        }
    }
}

impl fmt::Display for Operation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteZone { zone } => write!(f, "Deleting entire zone {}", zone.domain),
            Self::UpdateZone {
                existing,
                desired,
                changed,
            } => {
                write!(f, "Modifying zone {}", existing.domain)?;
                for field in changed {
                    write!(
                        f,
                        "\n  {field}: {} -> {}",
                        existing.field_value(*field),
                        desired.field_value(*field)
                    )?;
                }
                Ok(())
            }
            Self::DeleteRecord { record } => {
                write!(f, "Deleting record in zone {}: {record}", record.zone_name)
            }
            Self::UpdateRecord {
                existing,
                desired,
                changed,
            } => {
                write!(f, "Modifying record in zone {}: {existing}", existing.zone_name)?;
                for field in changed {
                    write!(
                        f,
                        "\n  {field}: {} -> {}",
                        existing.field_value(*field),
                        desired.field_value(*field)
                    )?;
                }
                Ok(())
            }
            Self::CreateRecord { zone, record } => {
                write!(f, "Adding record in zone {}: {record}", zone.domain)
            }
            Self::CreateZone { zone } => write!(f, "Adding new zone {}", zone.domain),
        }
    }
}

/// Compute the ordered list of operations turning `existing` into `desired`.
///
/// Updates with no changed field are not emitted, so a converged state yields
/// an empty plan.
#[must_use]
pub fn plan<'a>(existing: &'a ZoneMap, desired: &'a ZoneMap) -> Vec<Operation<'a>> {
    let delta = zones_delta(existing, desired);
    let mut operations = Vec::new();

    for domain in &delta.to_delete {
        if let Some(zone) = existing.get(*domain) {
            operations.push(Operation::DeleteZone { zone });
        }
    }

    for domain in &delta.to_check {
        let (Some(current), Some(target)) = (existing.get(*domain), desired.get(*domain)) else {
            continue;
        };
        plan_zone_update(current, target, &mut operations);
    }

    for domain in &delta.to_add {
        let Some(zone) = desired.get(*domain) else {
            continue;
        };
        operations.push(Operation::CreateZone { zone });
        for record in zone.records.values() {
            operations.push(Operation::CreateRecord { zone, record });
        }
    }

    debug!(
        zones_deleted = delta.to_delete.len(),
        zones_checked = delta.to_check.len(),
        zones_added = delta.to_add.len(),
        operations = operations.len(),
        "Computed change plan"
    );

    operations
}

fn plan_zone_update<'a>(
    existing: &'a Zone,
    desired: &'a Zone,
    operations: &mut Vec<Operation<'a>>,
) {
    let changed = zone_delta(existing, desired);
    if !changed.is_empty() {
        operations.push(Operation::UpdateZone {
            existing,
            desired,
            changed,
        });
    }

    let records = records_delta(&existing.records, &desired.records);

    for key in &records.to_delete {
        if let Some(record) = existing.records.get(*key) {
            operations.push(Operation::DeleteRecord { record });
        }
    }

    for key in &records.to_check {
        let (Some(current), Some(target)) = (existing.records.get(*key), desired.records.get(*key))
        else {
            continue;
        };
        let changed = record_delta(current, target);
        if !changed.is_empty() {
            operations.push(Operation::UpdateRecord {
                existing: current,
                desired: target,
                changed,
            });
        }
    }

    for key in &records.to_add {
        if let Some(record) = desired.records.get(*key) {
            operations.push(Operation::CreateRecord {
                zone: existing,
                record,
            });
        }
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod plan_tests;
