mod common;

use common::{RPC_PATH, TestApp};
use serde_json::{Value, json};

#[tokio::test]
async fn test_parse_error() {
    let app = TestApp::new();

    let response = app.server.post(RPC_PATH).text("{not json").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn test_empty_batch() {
    let app = TestApp::new();

    let body = app.server.post(RPC_PATH).json(&json!([])).await.json::<Value>();

    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn test_batch_keeps_order_and_ids() {
    let app = TestApp::new();

    let body = app
        .server
        .post(RPC_PATH)
        .json(&json!([
            { "jsonrpc": "2.0", "method": "system.listMethods", "id": "a" },
            { "jsonrpc": "2.0", "method": "ox.nothing", "params": [], "id": "b" },
            { "jsonrpc": "2.0", "method": "ox.logon", "params": ["admin", "wrong"], "id": "c" }
        ]))
        .await
        .json::<Value>();

    let responses = body.as_array().unwrap();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], "a");
    assert!(responses[0]["result"].is_array());
    assert_eq!(responses[1]["id"], "b");
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[1]["error"]["message"], "Unknown method ox.nothing");
    assert_eq!(responses[2]["id"], "c");
    assert_eq!(responses[2]["error"]["code"], -32011);
}

#[tokio::test]
async fn test_invalid_version() {
    let app = TestApp::new();

    let body = app
        .server
        .post(RPC_PATH)
        .json(&json!({ "jsonrpc": "1.0", "method": "system.listMethods", "id": 5 }))
        .await
        .json::<Value>();

    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["id"], 5);
}

#[tokio::test]
async fn test_unparseable_date_is_params_fault() {
    let app = TestApp::new();

    let (code, _) = app
        .fault(
            "ox.getAdvertiserPublisherStatistics",
            json!(["s", 1, { "dateTime.iso8601": "March 1st" }]),
        )
        .await;

    assert_eq!(code, -32602);
}

#[tokio::test]
async fn test_list_methods() {
    let app = TestApp::new();

    let methods = app.result("system.listMethods", json!([])).await;
    let names: Vec<&str> = methods
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    for expected in [
        "ox.logon",
        "ox.logoff",
        "ox.addAdvertiser",
        "ox.modifyAdvertiser",
        "ox.getAdvertiser",
        "ox.deleteAdvertiser",
        "ox.getAdvertiserPublisherStatistics",
        "ox.getAdvertiserDailyStatistics",
        "system.methodSignature",
        "system.methodHelp",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn test_method_signature_and_help() {
    let app = TestApp::new();

    let signatures = app
        .result(
            "system.methodSignature",
            json!(["ox.getAdvertiserPublisherStatistics"]),
        )
        .await;
    assert_eq!(signatures.as_array().unwrap().len(), 4);
    assert_eq!(signatures[3], json!(["array", "string", "int"]));

    let help = app
        .result("system.methodHelp", json!(["ox.logon"]))
        .await;
    assert!(help.as_str().unwrap().contains("session"));

    let (code, message) = app
        .fault("system.methodHelp", json!(["ox.missing"]))
        .await;
    assert_eq!(code, -32601);
    assert_eq!(message, "Unknown method ox.missing");
}
