// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `types.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::record::RecordKind;
    use crate::zone::Zone;
    use serde_json::json;

    #[test]
    fn test_domain_into_zone() {
        let domain: LinodeDomain = serde_json::from_value(json!({
            "DOMAINID": 42,
            "DOMAIN": "example.com",
            "TYPE": "master",
            "SOA_EMAIL": "admin@example.com",
            "REFRESH_SEC": 0,
            "RETRY_SEC": 300,
            "EXPIRE_SEC": 0,
            "TTL_SEC": 3600,
            "STATUS": 1,
            "MASTER_IPS": ""
        }))
        .unwrap();

        let zone = Zone::from(domain);
        assert_eq!(zone.domain, "example.com");
        assert_eq!(zone.id, Some(42));
        assert_eq!(zone.zone_type.as_deref(), Some("master"));
        assert_eq!(zone.soa_email.as_deref(), Some("admin@example.com"));
        assert_eq!(zone.refresh_seconds, None);
        assert_eq!(zone.retry_seconds, Some(300));
        assert_eq!(zone.ttl_seconds, Some(3600));
        assert!(zone.records.is_empty());
    }

    #[test]
    fn test_empty_soa_email_is_absent() {
        let domain: LinodeDomain = serde_json::from_value(json!({
            "DOMAINID": 1,
            "DOMAIN": "slave.example.com",
            "TYPE": "slave",
            "SOA_EMAIL": ""
        }))
        .unwrap();

        assert_eq!(Zone::from(domain).soa_email, None);
    }

    #[test]
    fn test_resource_into_record() {
        let resource: LinodeResource = serde_json::from_value(json!({
            "DOMAINID": 42,
            "RESOURCEID": 7,
            "TYPE": "mx",
            "NAME": "",
            "TARGET": "mail.example.com",
            "PRIORITY": 10,
            "TTL_SEC": 0,
            "WEIGHT": 5
        }))
        .unwrap();

        let record = resource.into_record("example.com").unwrap();
        assert_eq!(record.kind, RecordKind::Mx);
        assert_eq!(record.zone_name, "example.com");
        assert_eq!(record.zone_id, Some(42));
        assert_eq!(record.id, Some(7));
        assert_eq!(record.priority, Some(10));
        assert_eq!(record.ttl_seconds, None);
        assert_eq!(record.key(), "MX::mail.example.com");
    }

    #[test]
    fn test_priority_dropped_for_non_mx() {
        let resource: LinodeResource = serde_json::from_value(json!({
            "DOMAINID": 42,
            "RESOURCEID": 8,
            "TYPE": "A",
            "NAME": "www",
            "TARGET": "1.2.3.4",
            "PRIORITY": 10
        }))
        .unwrap();

        assert_eq!(resource.into_record("example.com").unwrap().priority, None);
    }

    #[test]
    fn test_unmanaged_record_type_is_skipped() {
        let resource: LinodeResource = serde_json::from_value(json!({
            "DOMAINID": 42,
            "RESOURCEID": 9,
            "TYPE": "NS",
            "NAME": "",
            "TARGET": "ns1.linode.com"
        }))
        .unwrap();

        assert!(resource.into_record("example.com").is_none());
    }

    #[test]
    fn test_envelope_with_errors() {
        let envelope: LinodeEnvelope = serde_json::from_value(json!({
            "ACTION": "domain.list",
            "ERRORARRAY": [ { "ERRORCODE": 4, "ERRORMESSAGE": "Authentication failed" } ],
            "DATA": {}
        }))
        .unwrap();

        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.errors[0].code, 4);
        assert_eq!(envelope.errors[0].message, "Authentication failed");
    }

    #[test]
    fn test_created_domain_id() {
        let created: CreatedDomain = serde_json::from_value(json!({ "DomainID": 99 })).unwrap();
        assert_eq!(created.id, 99);
    }
}
