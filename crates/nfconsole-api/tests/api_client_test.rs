#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nfconsole_api::{ApiClient, ApiSurface, BasePaths, DeviceGroup, Error, Gnb, K4Key, SubscriberAuth, Upf};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client =
        ApiClient::with_client(reqwest::Client::new(), &server.uri(), &BasePaths::default()).unwrap();
    (server, client)
}

fn config_path(suffix: &str) -> String {
    format!("/config/v1/{suffix}")
}

fn subscriber_path(suffix: &str) -> String {
    format!("/api/{suffix}")
}

// ── Generic verbs ───────────────────────────────────────────────────

#[tokio::test]
async fn test_error_carries_status_and_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("network-slice/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_string("network slice missing not found"))
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, Error> =
        client.get(ApiSurface::Config, &["network-slice", "missing"]).await;

    let err = result.unwrap_err();
    assert!(err.is_not_found());
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "network slice missing not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_error_body_uses_reason_phrase() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(config_path("inventory/gnb/gnb1")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.delete_gnb("gnb1").await.unwrap_err();
    assert!(
        matches!(&err, Error::Api { status: 500, message } if message == "Internal Server Error"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_empty_success_body_parses_as_null() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(config_path("inventory/upf")))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let body: Option<serde_json::Value> = client
        .post(ApiSurface::Config, &["inventory", "upf"], &json!({}))
        .await
        .unwrap();
    assert!(body.is_none());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("inventory/gnb")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = client.list_gnbs().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { ref body, .. } if body.contains("proxy error")));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::with_client(reqwest::Client::new(), &uri, &BasePaths::default()).unwrap();
    let err = client.list_upfs().await.unwrap_err();
    assert!(err.is_connection(), "expected connection error, got: {err:?}");
}

// ── Device groups ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_device_groups_accepts_names_and_records() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("device-group")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "site1",
            {"group-name": "site2", "imsis": []}
        ])))
        .mount(&server)
        .await;

    let names = client.list_device_groups().await.unwrap();
    assert_eq!(names, ["site1", "site2"]);
}

#[tokio::test]
async fn test_create_device_group_posts_to_named_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(config_path("device-group/site1")))
        .and(body_json(json!({
            "group-name": "site1",
            "imsis": ["001010000000001", "001010000000002"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let group = DeviceGroup {
        group_name: "site1".into(),
        imsis: vec!["001010000000001".into(), "001010000000002".into()],
        ..DeviceGroup::default()
    };
    client.create_device_group(&group).await.unwrap();
}

// ── Network slices ──────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_network_slice() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(config_path("network-slice/slice-42")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_network_slice("slice-42").await.unwrap();
}

#[tokio::test]
async fn test_get_network_slice() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("network-slice/slice-42")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slice-name": "slice-42",
            "slice-id": {"sst": "1", "sd": "010203"},
            "site-device-group": ["site1"],
            "site-info": {
                "site-name": "lab",
                "plmn": {"mcc": "001", "mnc": "01"},
                "gNodeBs": [{"name": "gnb1", "tac": 1}],
                "upf": {"upf.lab": {}}
            },
            "application-filtering-rules": []
        })))
        .mount(&server)
        .await;

    let slice = client.get_network_slice("slice-42").await.unwrap();
    assert_eq!(slice.slice_id.sd, "010203");
    assert_eq!(slice.site_info.plmn.mcc, "001");
    assert_eq!(slice.site_device_group, ["site1"]);
}

// ── Inventory ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_gnb_crud_routes() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(config_path("inventory/gnb")))
        .and(body_json(json!({"name": "gnb1", "tac": 7})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(config_path("inventory/gnb/gnb1")))
        .and(body_json(json!({"name": "gnb1", "tac": 8})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_gnb(&Gnb { name: "gnb1".into(), tac: Some(7) })
        .await
        .unwrap();
    client
        .update_gnb("gnb1", &Gnb { name: "gnb1".into(), tac: Some(8) })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_upfs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("inventory/upf")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "upf-hostname": "upf.lab",
            "ip": "192.168.1.200",
            "port": 8805,
            "dnn": "internet",
            "description": ""
        }])))
        .mount(&server)
        .await;

    let upfs = client.list_upfs().await.unwrap();
    assert_eq!(
        upfs,
        [Upf {
            hostname: "upf.lab".into(),
            ip: "192.168.1.200".into(),
            port: 8805,
            dnn: "internet".into(),
            description: String::new(),
        }]
    );
}

// ── K4 keys ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_k4_routes_use_subscriber_base() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(subscriber_path("k4opt")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"k4_sno": 5, "k4": "00112233445566778899aabbccddeeff"},
            {"k4_sno": 6, "k4": "ffeeddccbbaa99887766554433221100", "identifier": "K4_AES"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(subscriber_path("k4opt/6/K4_AES")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "k4 key deleted successfully"})))
        .expect(1)
        .mount(&server)
        .await;

    let keys = client.list_k4_keys().await.unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(
        keys[1],
        K4Key {
            k4_sno: 6,
            k4: "ffeeddccbbaa99887766554433221100".into(),
            label: Some("K4_AES".into()),
        }
    );
    client.delete_k4_key(6, keys[1].label.as_deref()).await.unwrap();
}

// ── Subscribers ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_subscribers_fetches_details_and_skips_failures() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(subscriber_path("subscriber")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "001010000000001",
            {"ueId": "imsi-001010000000002", "plmnID": "00101"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(subscriber_path("subscriber/001010000000001")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plmnID": "00101",
            "opc": "981d464c7c52eb6e5036234984ad0bcf",
            "key": "5122250214c33e723a5dd523fc145fc0",
            "sequenceNumber": "16f3b3f70fc2",
            "k4_sno": 1,
            "encryptionAlgorithm": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(subscriber_path("subscriber/001010000000002")))
        .respond_with(ResponseTemplate::new(500).set_body_string("db unavailable"))
        .mount(&server)
        .await;

    let subs = client.list_subscribers().await.unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].imsi, "001010000000001");
    assert_eq!(subs[0].auth.encryption_algorithm, 2);
}

#[tokio::test]
async fn test_create_subscriber_writes_flat_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(subscriber_path("subscriber/001010000000001")))
        .and(body_json(json!({
            "plmnID": "00101",
            "opc": "981d464c7c52eb6e5036234984ad0bcf",
            "key": "5122250214c33e723a5dd523fc145fc0",
            "sequenceNumber": "16f3b3f70fc2",
            "k4_sno": 1,
            "encryptionAlgorithm": 2
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let auth = SubscriberAuth {
        plmn_id: "00101".into(),
        opc: "981d464c7c52eb6e5036234984ad0bcf".into(),
        key: "5122250214c33e723a5dd523fc145fc0".into(),
        sequence_number: "16f3b3f70fc2".into(),
        k4_sno: 1,
        encryption_algorithm: 2,
    };
    client.create_subscriber("001010000000001", &auth).await.unwrap();
}
