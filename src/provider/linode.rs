// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Client for the legacy Linode DNS API.
//!
//! Every call is a `GET` against the API base URL with the key, the action and
//! its arguments in the query string:
//!
//! ```text
//! GET https://api.linode.com/?api_key=KEY&api_action=domain.resource.list&DomainID=123
//! ```
//!
//! A response whose `ERRORARRAY` is non-empty is reported as
//! [`ProviderError::ProviderCallFailed`] naming the action and the first error
//! message.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::constants::{
    ACTION_DOMAIN_CREATE, ACTION_DOMAIN_DELETE, ACTION_DOMAIN_LIST, ACTION_DOMAIN_UPDATE,
    ACTION_RESOURCE_CREATE, ACTION_RESOURCE_DELETE, ACTION_RESOURCE_LIST, ACTION_RESOURCE_UPDATE,
    DEFAULT_ZONE_TYPE, LINODE_API_TIMEOUT_SECS, LINODE_API_URL,
};
use crate::dns_errors::{ProviderError, ProviderResult};
use crate::provider::types::{CreatedDomain, LinodeDomain, LinodeEnvelope, LinodeResource};
use crate::provider::DnsProvider;
use crate::record::{Record, RecordField, RecordId, RecordKind, ZoneId};
use crate::zone::{Zone, ZoneField};

/// Query arguments of one API call.
type Args = Vec<(&'static str, String)>;

/// API parameter carrying a zone field.
#[must_use]
pub fn zone_field_param(field: ZoneField) -> &'static str {
    match field {
        ZoneField::SoaEmail => "SOA_Email",
        ZoneField::RefreshSeconds => "Refresh_sec",
        ZoneField::RetrySeconds => "Retry_sec",
        ZoneField::ExpireSeconds => "Expire_sec",
        ZoneField::TtlSeconds => "TTL_sec",
    }
}

/// API parameter carrying a record field.
#[must_use]
pub fn record_field_param(field: RecordField) -> &'static str {
    match field {
        RecordField::Name => "Name",
        RecordField::Target => "Target",
        RecordField::Priority => "Priority",
        RecordField::TtlSeconds => "TTL_sec",
    }
}

/// Absent numeric values are sent as `0`, the provider default.
fn seconds_arg(value: Option<u32>) -> String {
    value.unwrap_or(0).to_string()
}

fn zone_field_arg(zone: &Zone, field: ZoneField) -> String {
    match field {
        ZoneField::SoaEmail => zone.soa_email.clone().unwrap_or_default(),
        timer => seconds_arg(zone.seconds(timer)),
    }
}

fn record_field_arg(record: &Record, field: RecordField) -> String {
    match field {
        RecordField::Name => record.name.clone(),
        RecordField::Target => record.target.clone(),
        RecordField::Priority => seconds_arg(record.priority),
        RecordField::TtlSeconds => seconds_arg(record.ttl_seconds),
    }
}

fn zone_id(zone: &Zone) -> ProviderResult<ZoneId> {
    zone.id.ok_or_else(|| ProviderError::MissingIdentifier {
        entity: format!("zone '{}'", zone.domain),
    })
}

fn record_ids(record: &Record) -> ProviderResult<(ZoneId, RecordId)> {
    match (record.zone_id, record.id) {
        (Some(zone_id), Some(id)) => Ok((zone_id, id)),
        _ => Err(ProviderError::MissingIdentifier {
            entity: format!("record '{record}' in zone '{}'", record.zone_name),
        }),
    }
}

/// Linode DNS API client.
#[derive(Debug, Clone)]
pub struct LinodeClient {
    /// HTTP client for API requests
    client: Arc<HttpClient>,
    api_key: Arc<String>,
    base_url: Url,
}

impl LinodeClient {
    /// Create a client for the public Linode endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> ProviderResult<Self> {
        Self::with_base_url(api_key, LINODE_API_URL)
    }

    /// Create a client for an alternative API endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> ProviderResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ProviderError::Http {
            action: "configure".to_string(),
            reason: format!("invalid API URL '{base_url}': {e}"),
        })?;

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(LINODE_API_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Http {
                action: "configure".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client: Arc::new(client),
            api_key: Arc::new(api_key.into()),
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Call `action` and decode its `DATA` payload.
    async fn call<T: DeserializeOwned>(&self, action: &str, args: Args) -> ProviderResult<T> {
        let mut query: Vec<(&str, String)> = Vec::with_capacity(args.len() + 2);
        query.push(("api_key", self.api_key.to_string()));
        query.push(("api_action", action.to_string()));
        query.extend(args);

        let url = Url::parse_with_params(self.base_url.as_str(), &query).map_err(|e| {
            ProviderError::Http {
                action: action.to_string(),
                reason: e.to_string(),
            }
        })?;

        // The URL carries the API key, so only the action is logged
        debug!(action = %action, "Calling Linode API");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| ProviderError::Http {
                action: action.to_string(),
                reason: e.without_url().to_string(),
            })?;

        let envelope: LinodeEnvelope = response.json().await.map_err(|e| ProviderError::Decode {
            action: action.to_string(),
            reason: e.without_url().to_string(),
        })?;

        if let Some(first) = envelope.errors.first() {
            error!(
                action = %action,
                code = first.code,
                message = %first.message,
                "Linode API returned an error"
            );
            return Err(ProviderError::ProviderCallFailed {
                action: action.to_string(),
                message: first.message.clone(),
            });
        }

        serde_json::from_value(envelope.data).map_err(|e| ProviderError::Decode {
            action: action.to_string(),
            reason: e.to_string(),
        })
    }

    /// Call a mutating action whose `DATA` is not needed.
    async fn call_ignoring_data(&self, action: &str, args: Args) -> ProviderResult<()> {
        self.call::<serde_json::Value>(action, args).await.map(|_| ())
    }
}

#[async_trait]
impl DnsProvider for LinodeClient {
    async fn list_zones(&self) -> ProviderResult<Vec<Zone>> {
        let domains: Vec<LinodeDomain> = self.call(ACTION_DOMAIN_LIST, Vec::new()).await?;
        debug!(zones = domains.len(), "Listed zones");
        Ok(domains.into_iter().map(Zone::from).collect())
    }

    async fn list_records(&self, zone: &Zone) -> ProviderResult<Vec<Record>> {
        let args = vec![("DomainID", zone_id(zone)?.to_string())];
        let resources: Vec<LinodeResource> = self.call(ACTION_RESOURCE_LIST, args).await?;
        Ok(resources
            .into_iter()
            .filter_map(|resource| resource.into_record(&zone.domain))
            .collect())
    }

    async fn create_zone(&self, zone: &Zone) -> ProviderResult<ZoneId> {
        let mut args: Args = vec![
            ("Domain", zone.domain.clone()),
            (
                "Type",
                zone.zone_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ZONE_TYPE.to_string()),
            ),
            (
                zone_field_param(ZoneField::SoaEmail),
                zone.soa_email.clone().unwrap_or_default(),
            ),
        ];
        for field in ZoneField::TIMERS {
            if let Some(seconds) = zone.seconds(field) {
                args.push((zone_field_param(field), seconds.to_string()));
            }
        }

        let created: CreatedDomain = self.call(ACTION_DOMAIN_CREATE, args).await?;
        debug!(zone = %zone.domain, zone_id = created.id, "Created zone");
        Ok(created.id)
    }

    async fn delete_zone(&self, zone: &Zone) -> ProviderResult<()> {
        let args = vec![("DomainID", zone_id(zone)?.to_string())];
        self.call_ignoring_data(ACTION_DOMAIN_DELETE, args).await
    }

    async fn update_zone(
        &self,
        zone: &Zone,
        desired: &Zone,
        changed: &[ZoneField],
    ) -> ProviderResult<()> {
        let mut args: Args = vec![("DomainID", zone_id(zone)?.to_string())];
        args.extend(
            changed
                .iter()
                .map(|field| (zone_field_param(*field), zone_field_arg(desired, *field))),
        );
        self.call_ignoring_data(ACTION_DOMAIN_UPDATE, args).await
    }

    async fn create_record(&self, zone_id: ZoneId, record: &Record) -> ProviderResult<()> {
        let mut args: Args = vec![
            ("DomainID", zone_id.to_string()),
            ("Type", record.kind.as_str().to_string()),
            (record_field_param(RecordField::Name), record.name.clone()),
            (record_field_param(RecordField::Target), record.target.clone()),
        ];
        if record.kind == RecordKind::Mx {
            if let Some(priority) = record.priority {
                args.push((record_field_param(RecordField::Priority), priority.to_string()));
            }
        }
        if let Some(ttl) = record.ttl_seconds {
            args.push((record_field_param(RecordField::TtlSeconds), ttl.to_string()));
        }

        self.call_ignoring_data(ACTION_RESOURCE_CREATE, args).await
    }

    async fn delete_record(&self, record: &Record) -> ProviderResult<()> {
        let (zone_id, id) = record_ids(record)?;
        let args = vec![
            ("DomainID", zone_id.to_string()),
            ("ResourceID", id.to_string()),
        ];
        self.call_ignoring_data(ACTION_RESOURCE_DELETE, args).await
    }

    async fn update_record(
        &self,
        record: &Record,
        desired: &Record,
        changed: &[RecordField],
    ) -> ProviderResult<()> {
        let (zone_id, id) = record_ids(record)?;
        let mut args: Args = vec![
            ("DomainID", zone_id.to_string()),
            ("ResourceID", id.to_string()),
        ];
        args.extend(
            changed
                .iter()
                .map(|field| (record_field_param(*field), record_field_arg(desired, *field))),
        );
        self.call_ignoring_data(ACTION_RESOURCE_UPDATE, args).await
    }
}

#[cfg(test)]
#[path = "linode_tests.rs"]
mod linode_tests;
