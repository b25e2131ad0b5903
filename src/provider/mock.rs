// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory provider used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::dns_errors::{ProviderError, ProviderResult};
use crate::provider::DnsProvider;
use crate::record::{Record, RecordField, ZoneId};
use crate::zone::{Zone, ZoneField};

/// First identifier handed out by [`MockProvider::create_zone`].
pub const FIRST_CREATED_ZONE_ID: ZoneId = 1000;

/// Serves a fixed remote state and records every call it receives.
#[derive(Default)]
pub struct MockProvider {
    zones: Vec<Zone>,
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            ..Self::default()
        }
    }

    /// Fail every call whose log line starts with `prefix`.
    pub fn failing_on(mut self, prefix: &'static str) -> Self {
        self.fail_on = Some(prefix);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the two list methods.
    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("list_"))
            .collect()
    }

    fn record(&self, call: String) -> ProviderResult<()> {
        let fail = self.fail_on.is_some_and(|prefix| call.starts_with(prefix));
        self.calls.lock().unwrap().push(call.clone());
        if fail {
            return Err(ProviderError::ProviderCallFailed {
                action: call,
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }

    fn created_zones(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with("create_zone"))
            .count()
    }
}

fn field_list<T: std::fmt::Display>(fields: &[T]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl DnsProvider for MockProvider {
    async fn list_zones(&self) -> ProviderResult<Vec<Zone>> {
        self.record("list_zones".to_string())?;
        Ok(self
            .zones
            .iter()
            .map(|zone| Zone {
                records: Default::default(),
                ..zone.clone()
            })
            .collect())
    }

    async fn list_records(&self, zone: &Zone) -> ProviderResult<Vec<Record>> {
        self.record(format!("list_records {}", zone.domain))?;
        Ok(self
            .zones
            .iter()
            .find(|candidate| candidate.domain == zone.domain)
            .map(|found| found.records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_zone(&self, zone: &Zone) -> ProviderResult<ZoneId> {
        let id = FIRST_CREATED_ZONE_ID + self.created_zones() as ZoneId;
        self.record(format!("create_zone {}", zone.domain))?;
        Ok(id)
    }

    async fn delete_zone(&self, zone: &Zone) -> ProviderResult<()> {
        self.record(format!("delete_zone {}", zone.domain))
    }

    async fn update_zone(
        &self,
        zone: &Zone,
        _desired: &Zone,
        changed: &[ZoneField],
    ) -> ProviderResult<()> {
        self.record(format!("update_zone {} {}", zone.domain, field_list(changed)))
    }

    async fn create_record(&self, zone_id: ZoneId, record: &Record) -> ProviderResult<()> {
        self.record(format!("create_record {zone_id} {}", record.key()))
    }

    async fn delete_record(&self, record: &Record) -> ProviderResult<()> {
        self.record(format!("delete_record {}", record.key()))
    }

    async fn update_record(
        &self,
        record: &Record,
        _desired: &Record,
        changed: &[RecordField],
    ) -> ProviderResult<()> {
        self.record(format!("update_record {} {}", record.key(), field_list(changed)))
    }
}
