// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # zonesync - Declarative DNS zone synchronisation
//!
//! zonesync reads a YAML specification of DNS zones and brings a hosting
//! provider (the Linode DNS manager) in line with it: missing zones and records
//! are created, changed ones are updated and everything else is deleted.
//!
//! ## Overview
//!
//! A sync pass runs in four steps:
//!
//! 1. Load and validate the specification into the desired state
//! 2. Read the complete remote state from the provider
//! 3. Compute an ordered plan of operations from the two snapshots
//! 4. Apply the plan sequentially, or only describe it in dry-run mode
//!
//! ## Modules
//!
//! - [`spec`] - Specification loading, alias resolution and family inheritance
//! - [`zone`] - Zone model and CNAME templating
//! - [`record`] - Record model and identity keys
//! - [`reconcilers`] - Diffing, planning and plan execution
//! - [`provider`] - Provider gateway trait and the Linode client
//! - [`dns_errors`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use zonesync::provider::LinodeClient;
//! use zonesync::reconcilers::reconcile;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let desired = zonesync::spec::load_str(
//!     r"
//! IPs:
//!   web: 1.2.3.4 2600::11aa
//! zones:
//!   example.com:
//!     A: [ { host: www, target: web } ]
//! ",
//! )?
//! .into_desired_state();
//!
//! let client = LinodeClient::new("api-key")?;
//! let report = reconcile(&client, &desired, true).await?;
//! for change in &report.changes {
//!     println!("{change}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod dns_errors;
pub mod provider;
pub mod reconcilers;
pub mod record;
pub mod spec;
pub mod zone;
