#![allow(clippy::unwrap_used)]
// Integration tests for managers and the console against a mock server.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nfconsole_core::{
    Command, CommandResult, Console, ConsoleConfig, CoreError, FormValues, Gnbs, K4Keys, Manager, NetworkSlices,
    ResourceKind, Shell, Subscribers,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, nfconsole_api::ApiClient) {
    let server = MockServer::start().await;
    let config = ConsoleConfig::new(Url::parse(&server.uri()).unwrap());
    let client = config.build_client().unwrap();
    (server, client)
}

fn form(pairs: &[(&str, &str)]) -> FormValues {
    pairs.iter().copied().collect()
}

fn slice(name: &str) -> serde_json::Value {
    json!({
        "slice-name": name,
        "slice-id": {"sst": "1", "sd": "010203"},
        "site-device-group": ["site1"],
        "site-info": {
            "site-name": "lab",
            "plmn": {"mcc": "001", "mnc": "01", "tac": "1"},
            "gNodeBs": [{"name": "gnb1", "tac": 1}],
            "upf": {"upf.lab": {}}
        },
        "application-filtering-rules": []
    })
}

async fn mount_slice_details(server: &MockServer) {
    for name in ["slice-42", "slice-7"] {
        Mock::given(method("GET"))
            .and(path(format!("/config/v1/network-slice/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(slice(name)))
            .mount(server)
            .await;
    }
}

// ── Slice delete ────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_slice_refetches_list() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/config/v1/network-slice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["slice-42", "slice-7"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/config/v1/network-slice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["slice-7"])))
        .mount(&server)
        .await;
    mount_slice_details(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/config/v1/network-slice/slice-42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut manager = Manager::<NetworkSlices>::new();
    let before = manager.list(&api).await;
    assert_eq!(before.keys(), ["slice-42", "slice-7"]);

    manager.delete(&api, "slice-42").await.unwrap();
    assert_eq!(manager.cached_keys(), ["slice-7"]);
    assert_eq!(manager.view().keys(), ["slice-7"]);
}

#[tokio::test]
async fn test_delete_slice_not_found_keeps_cache() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/config/v1/network-slice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["slice-42", "slice-7"])))
        .expect(1)
        .mount(&server)
        .await;
    mount_slice_details(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/config/v1/network-slice/slice-42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("network slice slice-42 not found"))
        .mount(&server)
        .await;

    let mut manager = Manager::<NetworkSlices>::new();
    manager.list(&api).await;

    let err = manager.delete(&api, "slice-42").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "network slice slice-42 not found");
    assert_eq!(manager.cached_keys(), ["slice-42", "slice-7"]);
}

// ── Validation before network ───────────────────────────────────────

#[tokio::test]
async fn test_invalid_form_never_reaches_server() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut manager = Manager::<Gnbs>::new();
    let err = manager
        .create(&api, &form(&[("name", "gnb1"), ("tac", "16777216")]))
        .await
        .unwrap_err();

    match err {
        CoreError::Validation { errors } => assert_eq!(errors, ["TAC must be between 1 and 16777215"]),
        other => panic!("expected validation error, got: {other:?}"),
    }
}

// ── List failure ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_failure_becomes_view_state() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/config/v1/inventory/gnb"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let mut manager = Manager::<Gnbs>::new();
    let view = manager.list(&api).await;
    assert!(view.is_empty());
    assert_eq!(view.placeholder(), Some("database unavailable"));
}

#[tokio::test]
async fn test_fetch_returns_the_failure() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/config/v1/inventory/upf"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let mut console = Console::new(api);
    let err = console.execute(Command::Fetch(ResourceKind::Upf)).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: 503, .. }));
    assert_eq!(console.view(ResourceKind::Upf).placeholder(), Some("upstream down"));
}

// ── Update targets the original key ─────────────────────────────────

#[tokio::test]
async fn test_update_ignores_key_in_form() {
    let (server, api) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/config/v1/inventory/gnb/gnb1"))
        .and(body_json(json!({"name": "gnb1", "tac": 7})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/config/v1/inventory/gnb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "gnb1", "tac": 7}])))
        .mount(&server)
        .await;

    let mut manager = Manager::<Gnbs>::new();
    manager
        .update(&api, "gnb1", &form(&[("name", "renamed"), ("tac", "7")]))
        .await
        .unwrap();
    assert_eq!(manager.cached_keys(), ["gnb1"]);
}

// ── K4 delete with label ────────────────────────────────────────────

#[tokio::test]
async fn test_k4_delete_uses_label_route() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/k4opt/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"k4_sno": 2, "k4": "00112233445566778899aabbccddeeff", "identifier": "K4_AES"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/k4opt/2/K4_AES"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/k4opt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut manager = Manager::<K4Keys>::new();
    manager.delete(&api, "2").await.unwrap();
    assert_eq!(manager.view().placeholder(), Some("No K4 keys found"));
}

// ── Console routing ─────────────────────────────────────────────────

#[tokio::test]
async fn test_console_create_subscriber_through_handle() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/subscriber/001010000000001"))
        .and(body_json(json!({
            "plmnID": "00101",
            "opc": "cd63cb71954a9f4e48a5994e37a02baf",
            "key": "465b5ce8b199b49faa5f0a2ee238a6bc",
            "sequenceNumber": "16f3b3f70fc2",
            "k4_sno": 1,
            "encryptionAlgorithm": 2
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/subscriber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["001010000000001"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/subscriber/001010000000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plmnID": "00101",
            "opc": "cd63cb71954a9f4e48a5994e37a02baf",
            "key": "465b5ce8b199b49faa5f0a2ee238a6bc",
            "sequenceNumber": "16f3b3f70fc2",
            "k4_sno": 1,
            "encryptionAlgorithm": 2
        })))
        .mount(&server)
        .await;

    let handle = Console::new(api).spawn();
    let mut shell = Shell::new(ResourceKind::Subscriber);
    let cmd = shell
        .submit(form(&[
            ("imsi", "001010000000001"),
            ("plmn_id", "00101"),
            ("key", "465b5ce8b199b49faa5f0a2ee238a6bc"),
            ("opc", "cd63cb71954a9f4e48a5994e37a02baf"),
            ("sequence_number", "16f3b3f70fc2"),
            ("k4_sno", "1"),
        ]))
        .unwrap();

    let result = handle.execute(cmd).await;
    let note = shell.on_result(&result).unwrap();
    assert_eq!(note.message, "Subscriber 001010000000001 created");

    match result.unwrap() {
        CommandResult::Saved { list, created, .. } => {
            assert!(created);
            assert_eq!(list.keys(), ["001010000000001"]);
        }
        other => panic!("expected Saved, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_options_lists_referenced_keys() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/k4opt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"k4_sno": 1, "k4": "00112233445566778899aabbccddeeff"},
            {"k4_sno": 4, "k4": "ffeeddccbbaa99887766554433221100"}
        ])))
        .mount(&server)
        .await;

    let mut console = Console::new(api);
    let result = console.execute(Command::Options(ResourceKind::K4Key)).await.unwrap();
    assert_eq!(
        result,
        CommandResult::Options {
            kind: ResourceKind::K4Key,
            keys: vec!["1".into(), "4".into()],
        }
    );
    assert_eq!(console.view(ResourceKind::K4Key).keys(), ["1", "4"]);
}

#[tokio::test]
async fn test_detail_prefills_form() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/subscriber/001010000000002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plmnID": "00101",
            "authenticationSubscription": {
                "permanentKey": {"permanentKeyValue": "465b5ce8b199b49faa5f0a2ee238a6bc", "encryptionAlgorithm": 0},
                "opc": {"opcValue": "cd63cb71954a9f4e48a5994e37a02baf"},
                "sequenceNumber": "000000000022",
                "k4_sno": 3
            }
        })))
        .mount(&server)
        .await;

    let manager = Manager::<Subscribers>::new();
    let (view, values) = manager.detail(&api, "001010000000002").await.unwrap();
    assert_eq!(view.key, "001010000000002");
    assert_eq!(values.get("k4_sno"), "3");
    assert_eq!(values.get("encryption_algorithm"), "0");
}
