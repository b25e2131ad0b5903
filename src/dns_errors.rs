// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Specification and provider error types for zonesync.
//!
//! This module provides specialized error types for:
//! - Loading and compiling the declarative YAML specification
//! - Calls made against the Linode DNS API
//!
//! Specification errors are always fatal and are raised before any provider
//! call is made. Provider errors abort the remaining operation queue; operations
//! already applied are not rolled back.

use thiserror::Error;

/// Errors that can occur while loading or compiling a specification.
///
/// Every variant names the offending entity (zone, family, key or address) so
/// the message printed by the binary is enough to locate the problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The specification file could not be read
    #[error("Failed to read specification file '{path}': {reason}")]
    Read {
        /// Path of the specification file
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The specification is not valid YAML, or its shape cannot be used
    #[error("Failed to parse specification: {reason}")]
    Parse {
        /// Parser message
        reason: String,
    },

    /// A key that is not part of the schema at this level
    ///
    /// Raised at the top level, at zone and family level, and inside record entries.
    #[error("Unrecognized key '{key}' in {location}")]
    UnrecognizedKey {
        /// Where the key was found (e.g. "zone 'example.com'")
        location: String,
        /// The offending key
        key: String,
    },

    /// An `A` target token is neither an IPv4 nor an IPv6 literal
    #[error("Cannot parse IP address '{address}' in zone '{zone}'")]
    InvalidAddress {
        /// Zone (or family) being compiled
        zone: String,
        /// The token that failed to parse
        address: String,
    },

    /// A `families` entry names a family that was never defined
    #[error("Zone '{zone}' references undefined family '{family}'")]
    MissingReference {
        /// Zone (or family) holding the reference
        zone: String,
        /// The undefined family name
        family: String,
    },

    /// A family inherits from itself, directly or through other families
    #[error("Family '{family}' inherits from itself: {chain}")]
    CyclicFamily {
        /// Family where the cycle was detected
        family: String,
        /// Inheritance chain, joined with " -> "
        chain: String,
    },

    /// A recognized key carries a value of the wrong shape
    #[error("Invalid value for '{key}' in {location}: {reason}")]
    InvalidValue {
        /// Where the value was found
        location: String,
        /// Key holding the value
        key: String,
        /// Explanation of what is invalid
        reason: String,
    },
}

/// Errors returned by a DNS provider while reading or mutating remote state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider rejected the call
    ///
    /// Returned when the Linode API answers with a non-empty `ERRORARRAY`.
    #[error("API call {action} failed: {message}")]
    ProviderCallFailed {
        /// API action name (e.g. "domain.create")
        action: String,
        /// First error message reported by the provider
        message: String,
    },

    /// The HTTP request itself failed (connection, timeout, TLS, status)
    #[error("HTTP request for {action} failed: {reason}")]
    Http {
        /// API action name
        action: String,
        /// Transport failure
        reason: String,
    },

    /// The provider answered with a body that does not have the expected shape
    #[error("Unexpected response for {action}: {reason}")]
    Decode {
        /// API action name
        action: String,
        /// Decoding failure
        reason: String,
    },

    /// An operation needs a provider-assigned identifier the entity does not carry
    #[error("{entity} has no provider-assigned identifier")]
    MissingIdentifier {
        /// Description of the entity (e.g. "zone 'example.com'")
        entity: String,
    },
}

/// Convenience alias for provider results.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Convenience alias for specification results.
pub type SpecResult<T> = std::result::Result<T, SpecError>;
