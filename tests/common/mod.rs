// Common test utilities for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "integration-key";

/// Identifier handed out by the fake `domain.create`
pub const CREATED_ZONE_ID: u64 = 3;

/// Wrap `data` in a successful Linode response envelope
pub fn envelope(action: &str, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ACTION": action,
        "ERRORARRAY": [],
        "DATA": data
    }))
}

/// A Linode response envelope carrying an error
pub fn error_envelope(action: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ACTION": action,
        "ERRORARRAY": [ { "ERRORCODE": 8, "ERRORMESSAGE": message } ],
        "DATA": {}
    }))
}

async fn mount_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("api_action", action))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Start a fake Linode API hosting two zones.
///
/// - `example.com` (id 1): a stale `A` record for `www` and an `NS` record
/// - `stray.org` (id 2): no records
///
/// Every mutating action succeeds, except `failing_action` which answers with
/// an error envelope.
pub async fn fake_linode(failing_action: Option<&str>) -> MockServer {
    let server = MockServer::start().await;

    mount_action(
        &server,
        "domain.list",
        envelope(
            "domain.list",
            json!([
                {
                    "DOMAINID": 1, "DOMAIN": "example.com", "TYPE": "master",
                    "SOA_EMAIL": "admin@example.com", "REFRESH_SEC": 0, "RETRY_SEC": 0,
                    "EXPIRE_SEC": 0, "TTL_SEC": 0
                },
                {
                    "DOMAINID": 2, "DOMAIN": "stray.org", "TYPE": "master",
                    "SOA_EMAIL": "admin@stray.org", "REFRESH_SEC": 0, "RETRY_SEC": 0,
                    "EXPIRE_SEC": 0, "TTL_SEC": 0
                }
            ]),
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(query_param("api_action", "domain.resource.list"))
        .and(query_param("DomainID", "1"))
        .respond_with(envelope(
            "domain.resource.list",
            json!([
                {
                    "DOMAINID": 1, "RESOURCEID": 10, "TYPE": "A", "NAME": "www",
                    "TARGET": "1.1.1.1", "PRIORITY": 0, "TTL_SEC": 0
                },
                {
                    "DOMAINID": 1, "RESOURCEID": 11, "TYPE": "NS", "NAME": "",
                    "TARGET": "ns1.linode.com", "PRIORITY": 0, "TTL_SEC": 0
                }
            ]),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("api_action", "domain.resource.list"))
        .and(query_param("DomainID", "2"))
        .respond_with(envelope("domain.resource.list", json!([])))
        .mount(&server)
        .await;

    let mutations = [
        ("domain.create", json!({ "DomainID": CREATED_ZONE_ID })),
        ("domain.delete", json!({ "DomainID": 2 })),
        ("domain.update", json!({ "DomainID": 1 })),
        ("domain.resource.create", json!({ "ResourceID": 100 })),
        ("domain.resource.delete", json!({ "ResourceID": 10 })),
        ("domain.resource.update", json!({ "ResourceID": 10 })),
    ];
    for (action, data) in mutations {
        let response = if failing_action == Some(action) {
            error_envelope(action, "Object not found")
        } else {
            envelope(action, data)
        };
        mount_action(&server, action, response).await;
    }

    server
}

/// `api_action` of every request received, in order
pub async fn received_actions(server: &MockServer) -> Vec<String> {
    received_param(server, "api_action").await
}

/// Value of `param` in every request received, in order; empty when absent
pub async fn received_param(server: &MockServer, param: &str) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == param)
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Specification keeping `example.com` with a new `www` address and adding
/// `new.com`; `stray.org` is not listed.
pub const SPEC: &str = r"
IPs:
  web: 1.2.3.4
TXTs:
  spf: v=spf1 -all
zones:
  example.com:
    SOA_email: admin@example.com
    A: [ { host: www, target: web } ]
  new.com:
    SOA_email: hostmaster@new.com
    TXT: [ { host: '', target: spf } ]
";
