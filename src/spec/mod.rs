// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Declarative specification loading.
//!
//! A specification is a YAML document with five top-level keys:
//!
//! ```yaml
//! IPs:
//!   foo: 1.2.3.4 2600::11aa
//! FQDNs:
//!   mx1: mx1.domain.com
//! TXTs:
//!   spf: v=spf1 ip4:1.2.3.4 -all
//! families:
//!   apache:
//!     SOA_email: webmaster@domain.com
//!     A: [ { host: , target: foo } ]
//!     CNAME: [ { host: www, target: "{{ zone }}" } ]
//! zones:
//!   mydomain.com:
//!     families: [ apache ]
//!     MX: [ { host: , target: mx1, priority: 10 } ]
//! ```
//!
//! Loading happens in three phases: the alias tables are read, every family is
//! compiled (resolving nested families transitively), then every zone is
//! compiled, has its CNAME templates rendered, and inherits its families in
//! declaration order. Any error aborts the whole load.
//!
//! ## Module Structure
//!
//! - [`schema`] - Key schemas and value readers
//! - [`aliases`] - Alias tables and target resolution
//! - [`compiler`] - Zone and family body compilation

pub mod aliases;
pub mod compiler;
pub(crate) mod schema;

pub use aliases::{AliasTable, Aliases};
pub use compiler::{CompiledZone, Section, ZoneCompiler};

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::constants::{KEY_FAMILIES, KEY_FQDNS, KEY_IPS, KEY_TXTS, KEY_ZONES};
use crate::dns_errors::{SpecError, SpecResult};
use crate::zone::{Family, Zone, ZoneMap};
use schema::{optional_mapping, validate_keys, TopLevelKey};

/// A fully loaded specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specification {
    pub aliases: Aliases,
    /// Resolved family templates, by name
    pub families: BTreeMap<String, Family>,
    /// Desired state, by domain name
    pub zones: ZoneMap,
}

impl Specification {
    /// Consume the specification, keeping only the desired state.
    #[must_use]
    pub fn into_desired_state(self) -> ZoneMap {
        self.zones
    }
}

/// Load a specification from a YAML file.
///
/// # Errors
///
/// Returns [`SpecError::Read`] if the file cannot be read, and any error of
/// [`load_str`] otherwise.
pub fn load_file(path: &Path) -> SpecResult<Specification> {
    debug!(path = %path.display(), "Reading specification file");
    let text = std::fs::read_to_string(path).map_err(|e| SpecError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_str(&text)
}

/// Load a specification from YAML text.
///
/// # Errors
///
/// Returns [`SpecError::Parse`] for malformed YAML and any error of
/// [`load_value`] otherwise.
pub fn load_str(text: &str) -> SpecResult<Specification> {
    let document: Value = serde_yaml::from_str(text).map_err(|e| SpecError::Parse {
        reason: e.to_string(),
    })?;
    load_value(&document)
}

/// Load a specification from an already parsed YAML tree.
///
/// # Errors
///
/// Returns an error for unrecognized keys at any level, invalid addresses,
/// undefined or cyclic family references, and values of the wrong shape.
pub fn load_value(document: &Value) -> SpecResult<Specification> {
    let empty = Mapping::new();
    let top = match document {
        Value::Null => &empty,
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(SpecError::Parse {
                reason: "the top level of a specification must be a mapping".to_string(),
            })
        }
    };

    let mut aliases = Aliases::default();
    let mut raw_families = None;
    let mut raw_zones = None;

    for (key, value) in validate_keys::<TopLevelKey>(top, "top level")? {
        match key {
            TopLevelKey::Ips => aliases.ips = AliasTable::from_value(value, KEY_IPS)?,
            TopLevelKey::Fqdns => aliases.fqdns = AliasTable::from_value(value, KEY_FQDNS)?,
            TopLevelKey::Txts => aliases.txts = AliasTable::from_value(value, KEY_TXTS)?,
            TopLevelKey::Families => {
                raw_families = optional_mapping(value, "top level", KEY_FAMILIES)?;
            }
            TopLevelKey::Zones => raw_zones = optional_mapping(value, "top level", KEY_ZONES)?,
            TopLevelKey::Unrecognized(_) => {}
        }
    }

    let families = resolve_families(ZoneCompiler::new(&aliases), raw_families.unwrap_or(&empty))?;

    let mut zones = ZoneMap::new();
    for (name, body) in named_entries(raw_zones.unwrap_or(&empty), KEY_ZONES)? {
        let zone = compile_zone(name, body, &aliases, &families)?;
        zones.insert(name.to_string(), zone);
    }

    info!(
        zones = zones.len(),
        families = families.len(),
        ips = aliases.ips.len(),
        fqdns = aliases.fqdns.len(),
        txts = aliases.txts.len(),
        "Loaded specification"
    );

    Ok(Specification {
        aliases,
        families,
        zones,
    })
}

/// Pair every entry of a `families`/`zones` mapping with its string name.
fn named_entries<'v>(
    mapping: &'v Mapping,
    section: &str,
) -> SpecResult<Vec<(&'v str, &'v Value)>> {
    mapping
        .iter()
        .map(|(name, body)| {
            name.as_str()
                .map(|name| (name, body))
                .ok_or_else(|| SpecError::Parse {
                    reason: format!("non-string name {name:?} in {section}"),
                })
        })
        .collect()
}

/// Compile every family, resolving nested families depth-first.
fn resolve_families(
    compiler: ZoneCompiler<'_>,
    raw: &Mapping,
) -> SpecResult<BTreeMap<String, Family>> {
    let mut resolver = FamilyResolver {
        compiler,
        raw: named_entries(raw, KEY_FAMILIES)?.into_iter().collect(),
        resolved: BTreeMap::new(),
    };

    let names: Vec<&str> = resolver.raw.keys().copied().collect();
    for name in names {
        resolver.resolve(name, &mut Vec::new())?;
    }

    Ok(resolver.resolved)
}

struct FamilyResolver<'a, 'v> {
    compiler: ZoneCompiler<'a>,
    raw: BTreeMap<&'v str, &'v Value>,
    resolved: BTreeMap<String, Family>,
}

impl FamilyResolver<'_, '_> {
    /// Resolve family `name`; `chain` holds the families currently being resolved.
    fn resolve(&mut self, name: &str, chain: &mut Vec<String>) -> SpecResult<()> {
        if self.resolved.contains_key(name) {
            return Ok(());
        }
        if let Some(start) = chain.iter().position(|entry| entry == name) {
            let mut cycle = chain[start..].to_vec();
            cycle.push(name.to_string());
            return Err(SpecError::CyclicFamily {
                family: name.to_string(),
                chain: cycle.join(" -> "),
            });
        }

        let Some(body) = self.raw.get(name).copied() else {
            return Err(SpecError::MissingReference {
                zone: chain.last().cloned().unwrap_or_default(),
                family: name.to_string(),
            });
        };

        let compiled = self.compiler.compile(name, body, Section::Family)?;
        let mut template = compiled.zone;

        chain.push(name.to_string());
        for parent in &compiled.families {
            self.resolve(parent, chain)?;
            // nested templates stay unrendered until a zone inherits them
            if let Some(family) = self.resolved.get(parent) {
                template.merge(family.template());
            }
        }
        chain.pop();

        let family = Family::new(template);
        debug!(
            family = %family.name(),
            records = family.template().records.len(),
            "Resolved family"
        );
        self.resolved.insert(family.name().to_string(), family);
        Ok(())
    }
}

/// Compile a single zone body against a set of resolved families.
///
/// The zone's own CNAME templates are rendered first, then it inherits its
/// families in declaration order. Inherited templates are rendered for this
/// zone before they are merged, so they never replace the zone's own records.
///
/// # Errors
///
/// Returns any compile error, or [`SpecError::MissingReference`] for an
/// unknown family.
pub fn compile_zone(
    name: &str,
    body: &Value,
    aliases: &Aliases,
    families: &BTreeMap<String, Family>,
) -> SpecResult<Zone> {
    let compiled = ZoneCompiler::new(aliases).compile(name, body, Section::Zone)?;
    let mut zone = compiled.zone;
    zone.instantiate();
    for family_name in &compiled.families {
        let family = families
            .get(family_name)
            .ok_or_else(|| SpecError::MissingReference {
                zone: name.to_string(),
                family: family_name.clone(),
            })?;
        zone.inherit(family);
    }
    Ok(zone)
}
