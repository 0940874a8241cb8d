// Integration tests for `MyUplinkClient` using wiremock.

use std::collections::HashMap;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use myuplink_api::{Credentials, Error, MyUplinkClient};

// ── Helpers ─────────────────────────────────────────────────────────

fn token_credentials() -> Credentials {
    Credentials::AccessToken(secrecy::SecretString::from("test-token".to_owned()))
}

async fn setup() -> (MockServer, MyUplinkClient) {
    let server = MockServer::start().await;
    let client =
        MyUplinkClient::from_reqwest(&server.uri(), reqwest::Client::new(), token_credentials())
            .unwrap();
    (server, client)
}

fn systems_page(page: u32, num_items: u64, systems: serde_json::Value) -> serde_json::Value {
    json!({
        "page": page,
        "itemsPerPage": 100,
        "numItems": num_items,
        "systems": systems,
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_systems_single_page() {
    let (server, client) = setup().await;

    let body = systems_page(
        1,
        1,
        json!([{
            "systemId": "sys-1",
            "name": "Villa Gransäter",
            "securityLevel": "admin",
            "hasAlarm": false,
            "country": "Sweden",
            "devices": [{
                "id": "dev-1",
                "connectionState": "Connected",
                "currentFwVersion": "9501R2",
                "product": { "serialNumber": "06545554444444", "name": "F730 CU 3x400V" }
            }]
        }]),
    );

    Mock::given(method("GET"))
        .and(path("/v2/systems/me"))
        .and(query_param("page", "1"))
        .and(query_param("itemsPerPage", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client.list_systems(1, 100).await.unwrap();

    assert_eq!(page.num_items, 1);
    assert_eq!(page.systems.len(), 1);
    assert_eq!(page.systems[0].system_id, "sys-1");
    assert_eq!(page.systems[0].name, "Villa Gransäter");
    assert_eq!(page.systems[0].devices[0].id, "dev-1");
    assert_eq!(
        page.systems[0].devices[0]
            .product
            .as_ref()
            .unwrap()
            .name
            .as_deref(),
        Some("F730 CU 3x400V")
    );
}

#[tokio::test]
async fn test_list_all_systems_walks_pages() {
    let (server, client) = setup().await;

    let full_page: Vec<serde_json::Value> = (0..100)
        .map(|i| json!({ "systemId": format!("sys-{i}"), "name": "A", "devices": [] }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v2/systems/me"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(systems_page(1, 101, json!(full_page))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/systems/me"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(systems_page(
            2,
            101,
            json!([{ "systemId": "sys-100", "name": "B", "devices": [] }]),
        )))
        .mount(&server)
        .await;

    let systems = client.list_all_systems().await.unwrap();

    assert_eq!(systems.len(), 101);
    assert_eq!(systems[100].system_id, "sys-100");
}

#[tokio::test]
async fn test_get_device() {
    let (server, client) = setup().await;

    let body = json!({
        "id": "dev-1",
        "connectionState": "Connected",
        "firmware": { "currentFwVersion": "9501R2", "desiredFwVersion": "9502R1" },
        "product": { "serialNumber": "06545554444444", "name": "VVM320 E" }
    });

    Mock::given(method("GET"))
        .and(path("/v2/devices/dev-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let device = client.get_device("dev-1").await.unwrap();

    assert_eq!(device.id, "dev-1");
    let firmware = device.firmware.unwrap();
    assert_eq!(firmware.current_fw_version.as_deref(), Some("9501R2"));
    assert_eq!(firmware.desired_fw_version.as_deref(), Some("9502R1"));
}

#[tokio::test]
async fn test_list_device_points() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "category": "F730 CU 3x400V",
            "parameterId": "40004",
            "parameterName": "Current outd temp (BT1)",
            "parameterUnit": "°C",
            "writable": false,
            "timestamp": "2024-01-01T12:00:00+00:00",
            "value": -12.5,
            "strVal": "-12.5°C",
            "minValue": null,
            "maxValue": null,
            "enumValues": [],
            "scaleValue": "0.1",
            "zoneId": null
        },
        {
            "category": "F730 CU 3x400V",
            "parameterId": "47041",
            "parameterName": "Comfort mode",
            "parameterUnit": "",
            "writable": true,
            "value": 0,
            "enumValues": [
                { "value": "0", "text": "economy", "icon": "" },
                { "value": "1", "text": "normal", "icon": "" }
            ]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/v2/devices/dev-1/points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let points = client.list_device_points("dev-1").await.unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].parameter_id, "40004");
    assert_eq!(points[0].parameter_unit, "°C");
    assert!(!points[0].writable);
    assert_eq!(points[0].scale_value.as_deref(), Some("0.1"));
    assert_eq!(points[1].enum_values.len(), 2);
    assert_eq!(points[1].enum_values[0].value, "0");
    assert_eq!(points[1].enum_values[1].text, "normal");
}

#[tokio::test]
async fn test_patch_points_sends_value_map() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/v2/devices/dev-1/points"))
        .and(body_string_contains("\"47041\""))
        .and(body_string_contains("\"1\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut values = HashMap::new();
    values.insert("47041".to_owned(), json!("1"));
    client.patch_points("dev-1", &values).await.unwrap();
}

// ── Token flow ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_client_credentials_token_cached_across_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/systems/me"))
        .and(wiremock::matchers::header(
            "authorization",
            "Bearer fresh-token",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(systems_page(1, 0, json!([]))))
        .expect(2)
        .mount(&server)
        .await;

    let credentials = Credentials::ClientCredentials {
        client_id: "client".to_owned(),
        client_secret: secrecy::SecretString::from("secret".to_owned()),
    };
    let client =
        MyUplinkClient::from_reqwest(&server.uri(), reqwest::Client::new(), credentials).unwrap();

    client.list_systems(1, 100).await.unwrap();
    client.list_systems(1, 100).await.unwrap();
}

#[tokio::test]
async fn test_token_endpoint_rejection_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let credentials = Credentials::ClientCredentials {
        client_id: "client".to_owned(),
        client_secret: secrecy::SecretString::from("wrong".to_owned()),
    };
    let client =
        MyUplinkClient::from_reqwest(&server.uri(), reqwest::Client::new(), credentials).unwrap();

    let err = client.list_systems(1, 100).await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
    assert!(err.is_auth());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_is_auth() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.list_systems(1, 100).await.unwrap_err();
    assert!(err.is_auth());
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_error_500_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "description": "internal error"
        })))
        .mount(&server)
        .await;

    let err = client.get_device("dev-1").await.unwrap_err();
    match err {
        Error::Api { status, ref message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.is_transient());
    assert!(!err.is_auth());
}

#[tokio::test]
async fn test_malformed_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/devices/dev-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_device("dev-1").await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}
