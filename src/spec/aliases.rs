// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Alias tables and target resolution.
//!
//! A specification can name IP addresses, FQDNs and text values once and refer
//! to them by alias from any record. Resolution happens once, at compile time.
//! A target that is not an alias is used literally.

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde_yaml::Value;

use crate::dns_errors::{SpecError, SpecResult};
use crate::record::RecordKind;
use crate::spec::schema::{optional_mapping, scalar_text};

/// One alias table: alias name to expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable(BTreeMap<String, String>);

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, expansion: impl Into<String>) {
        self.0.insert(alias.into(), expansion.into());
    }

    /// Expand `raw` if it is exactly an alias name, otherwise return it unchanged.
    #[must_use]
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.0.get(raw).map_or(raw, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a table from the value of a top-level `IPs`/`FQDNs`/`TXTs` key.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not a mapping of scalars.
    pub fn from_value(value: &Value, key: &str) -> SpecResult<Self> {
        let mut table = Self::new();
        let Some(mapping) = optional_mapping(value, "top level", key)? else {
            return Ok(table);
        };

        for (alias, expansion) in mapping {
            let alias = alias.as_str().ok_or_else(|| SpecError::Parse {
                reason: format!("non-string alias {alias:?} in {key}"),
            })?;
            let expansion = scalar_text(expansion).ok_or_else(|| SpecError::InvalidValue {
                location: format!("alias table {key}"),
                key: alias.to_string(),
                reason: "expected a scalar expansion".to_string(),
            })?;
            table.insert(alias, expansion);
        }

        Ok(table)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(alias, expansion)| (alias.into(), expansion.into()))
                .collect(),
        )
    }
}

/// The three alias tables of a specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aliases {
    /// Expansions for `A` targets, possibly several addresses each
    pub ips: AliasTable,
    /// Expansions for `CNAME` and `MX` targets
    pub fqdns: AliasTable,
    /// Expansions for `TXT` targets
    pub txts: AliasTable,
}

impl Aliases {
    /// Resolve an `A` target into one `(kind, address)` pair per address.
    ///
    /// The expansion is split on whitespace; IPv4 literals yield `A`, IPv6
    /// literals yield `AAAA`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidAddress`] for a token that is not an IP
    /// literal. A target with no tokens yields no records.
    pub fn resolve_addresses(
        &self,
        zone: &str,
        raw: &str,
    ) -> SpecResult<Vec<(RecordKind, String)>> {
        let expansion = self.ips.resolve(raw);
        expansion
            .split_whitespace()
            .map(|token| {
                classify_address(token)
                    .map(|kind| (kind, token.to_string()))
                    .ok_or_else(|| SpecError::InvalidAddress {
                        zone: zone.to_string(),
                        address: token.to_string(),
                    })
            })
            .collect()
    }

    /// Resolve a `CNAME` or `MX` target.
    #[must_use]
    pub fn resolve_fqdn<'a>(&'a self, raw: &'a str) -> &'a str {
        self.fqdns.resolve(raw)
    }

    /// Resolve a `TXT` target.
    #[must_use]
    pub fn resolve_text<'a>(&'a self, raw: &'a str) -> &'a str {
        self.txts.resolve(raw)
    }
}

/// Classify an address literal as `A` (IPv4) or `AAAA` (IPv6).
#[must_use]
pub fn classify_address(token: &str) -> Option<RecordKind> {
    if token.parse::<Ipv4Addr>().is_ok() {
        Some(RecordKind::A)
    } else if token.parse::<Ipv6Addr>().is_ok() {
        Some(RecordKind::Aaaa)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "aliases_tests.rs"]
mod aliases_tests;
