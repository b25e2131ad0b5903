// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `record.rs`

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_record_key_uses_empty_host_verbatim() {
        assert_eq!(record_key(RecordKind::A, "", "1.2.3.4"), "A::1.2.3.4");
    }

    #[test]
    fn test_record_key_format() {
        assert_eq!(
            record_key(RecordKind::Cname, "www", "example.com"),
            "CNAME:www:example.com"
        );
        assert_eq!(
            record_key(RecordKind::Aaaa, "v6", "2600::11aa"),
            "AAAA:v6:2600::11aa"
        );
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(RecordKind::parse("mx"), Some(RecordKind::Mx));
        assert_eq!(RecordKind::parse("AAAA"), Some(RecordKind::Aaaa));
        assert_eq!(RecordKind::parse("Txt"), Some(RecordKind::Txt));
    }

    #[test]
    fn test_kind_parse_rejects_unmanaged_kinds() {
        assert_eq!(RecordKind::parse("NS"), None);
        assert_eq!(RecordKind::parse("SRV"), None);
        assert_eq!(RecordKind::parse(""), None);
    }

    #[test]
    fn test_zero_ttl_normalizes_to_absent() {
        let record = Record::new("example.com", RecordKind::A, "", "1.2.3.4")
            .with_ttl(Some(0));
        assert_eq!(record.ttl_seconds, None);

        let record = Record::new("example.com", RecordKind::A, "", "1.2.3.4")
            .with_ttl(Some(300));
        assert_eq!(record.ttl_seconds, Some(300));
    }

    #[test]
    fn test_new_record_has_no_provider_ids() {
        let record = Record::new("example.com", RecordKind::Txt, "", "v=spf1 -all");
        assert_eq!(record.zone_id, None);
        assert_eq!(record.id, None);
        assert_eq!(record.key(), "TXT::v=spf1 -all");
    }

    #[test]
    fn test_display_marks_apex_and_mx_priority() {
        let record = Record::new("example.com", RecordKind::Mx, "", "mx1.example.com")
            .with_priority(Some(10));
        assert_eq!(record.to_string(), "MX @ -> mx1.example.com (priority 10)");

        let record = Record::new("example.com", RecordKind::A, "www", "1.2.3.4")
            .with_priority(Some(5));
        assert_eq!(record.to_string(), "A www -> 1.2.3.4");
    }

    #[test]
    fn test_field_value_renders_absent_as_default() {
        let record = Record::new("example.com", RecordKind::A, "www", "1.2.3.4");
        assert_eq!(record.field_value(RecordField::TtlSeconds), "default");
        assert_eq!(record.field_value(RecordField::Name), "www");
    }
}
