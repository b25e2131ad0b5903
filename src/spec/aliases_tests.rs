// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `aliases.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::dns_errors::SpecError;
    use crate::record::RecordKind;

    fn aliases() -> Aliases {
        Aliases {
            ips: [
                ("foo", "1.2.3.4 2600::11aa"),
                ("bar", "2.3.4.5"),
                ("broken", "1.2.3.4 not-an-ip"),
            ]
            .into_iter()
            .collect(),
            fqdns: [("mx1", "mx1.domain.com")].into_iter().collect(),
            txts: [("spf", "v=spf1 ip4:1.2.3.4 -all")].into_iter().collect(),
        }
    }

    #[test]
    fn test_resolve_returns_expansion_on_exact_match() {
        let aliases = aliases();
        assert_eq!(aliases.resolve_fqdn("mx1"), "mx1.domain.com");
        assert_eq!(aliases.resolve_text("spf"), "v=spf1 ip4:1.2.3.4 -all");
    }

    #[test]
    fn test_resolve_passes_unknown_names_through() {
        let aliases = aliases();
        assert_eq!(aliases.resolve_fqdn("mx2.domain.com"), "mx2.domain.com");
        assert_eq!(aliases.resolve_fqdn("MX1"), "MX1");
        assert_eq!(aliases.resolve_text("hello world"), "hello world");
    }

    #[test]
    fn test_mixed_alias_fans_out_to_a_and_aaaa() {
        let resolved = aliases().resolve_addresses("a.com", "foo").unwrap();
        assert_eq!(
            resolved,
            vec![
                (RecordKind::A, "1.2.3.4".to_string()),
                (RecordKind::Aaaa, "2600::11aa".to_string()),
            ]
        );
    }

    #[test]
    fn test_literal_address_without_alias() {
        let resolved = aliases().resolve_addresses("a.com", "2600::22bb").unwrap();
        assert_eq!(resolved, vec![(RecordKind::Aaaa, "2600::22bb".to_string())]);
    }

    #[test]
    fn test_invalid_token_is_fatal() {
        let err = aliases().resolve_addresses("a.com", "broken").unwrap_err();
        assert_eq!(
            err,
            SpecError::InvalidAddress {
                zone: "a.com".to_string(),
                address: "not-an-ip".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_alias_is_treated_as_literal_address() {
        let err = aliases().resolve_addresses("a.com", "webserver").unwrap_err();
        assert!(matches!(err, SpecError::InvalidAddress { address, .. } if address == "webserver"));
    }

    #[test]
    fn test_empty_target_yields_no_addresses() {
        let aliases = aliases();
        assert!(aliases.resolve_addresses("a.com", "").unwrap().is_empty());
        assert!(aliases.resolve_addresses("a.com", "  ").unwrap().is_empty());
    }

    #[test]
    fn test_classify_address() {
        assert_eq!(classify_address("10.0.0.1"), Some(RecordKind::A));
        assert_eq!(classify_address("::1"), Some(RecordKind::Aaaa));
        assert_eq!(classify_address("1.2.3"), None);
        assert_eq!(classify_address("256.1.1.1"), None);
    }

    #[test]
    fn test_table_from_value() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("web: 1.2.3.4\nport: 8080\n").unwrap();
        let table = AliasTable::from_value(&value, "IPs").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("port"), "8080");

        let value: serde_yaml::Value = serde_yaml::from_str("[a, b]").unwrap();
        assert!(AliasTable::from_value(&value, "IPs").is_err());

        let table = AliasTable::from_value(&serde_yaml::Value::Null, "TXTs").unwrap();
        assert!(table.is_empty());
    }
}
