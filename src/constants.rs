// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for zonesync.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Specification Keys
// ============================================================================

/// Top-level key holding the IP alias table
pub const KEY_IPS: &str = "IPs";

/// Top-level key holding the FQDN alias table
pub const KEY_FQDNS: &str = "FQDNs";

/// Top-level key holding the text alias table
pub const KEY_TXTS: &str = "TXTs";

/// Top-level key holding family templates (also a zone-level inheritance list)
pub const KEY_FAMILIES: &str = "families";

/// Top-level key holding the zones to deploy
pub const KEY_ZONES: &str = "zones";

/// Zone key for the SOA contact email
pub const KEY_SOA_EMAIL: &str = "SOA_email";

/// Zone key for the SOA refresh interval
pub const KEY_REFRESH_SECONDS: &str = "refresh_seconds";

/// Zone key for the SOA retry interval
pub const KEY_RETRY_SECONDS: &str = "retry_seconds";

/// Zone key for the SOA expire time
pub const KEY_EXPIRE_SECONDS: &str = "expire_seconds";

/// Zone and record key for the time-to-live
pub const KEY_TTL_SECONDS: &str = "ttl_seconds";

/// Record key for the host name
pub const KEY_HOST: &str = "host";

/// Record key for the target value
pub const KEY_TARGET: &str = "target";

/// Record key for the MX priority
pub const KEY_PRIORITY: &str = "priority";

/// Template token replaced with the zone name in CNAME targets
pub const ZONE_TEMPLATE_VARIABLE: &str = "zone";

// ============================================================================
// Linode API Constants
// ============================================================================

/// Public endpoint of the Linode DNS manager API
pub const LINODE_API_URL: &str = "https://api.linode.com/";

/// Timeout applied to every Linode API request
pub const LINODE_API_TIMEOUT_SECS: u64 = 30;

/// Zone type used when creating a zone that does not declare one
pub const DEFAULT_ZONE_TYPE: &str = "master";

pub const ACTION_DOMAIN_LIST: &str = "domain.list";
pub const ACTION_DOMAIN_CREATE: &str = "domain.create";
pub const ACTION_DOMAIN_DELETE: &str = "domain.delete";
pub const ACTION_DOMAIN_UPDATE: &str = "domain.update";
pub const ACTION_RESOURCE_LIST: &str = "domain.resource.list";
pub const ACTION_RESOURCE_CREATE: &str = "domain.resource.create";
pub const ACTION_RESOURCE_DELETE: &str = "domain.resource.delete";
pub const ACTION_RESOURCE_UPDATE: &str = "domain.resource.update";

// ============================================================================
// Logging Constants
// ============================================================================

/// Environment variable selecting the log output format (`text` or `json`)
pub const LOG_FORMAT_ENV: &str = "RUST_LOG_FORMAT";

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
