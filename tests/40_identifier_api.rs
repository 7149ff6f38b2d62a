mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde_json::json;

#[tokio::test]
async fn list_includes_data_supplier() {
    let res = TestClient::new().get("/api/flavor/123/identifiers").await;
    res.assert_status(StatusCode::OK);

    let rows = res.json();
    let rows = rows.as_array().expect("array of identifiers");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["dataSupplierId"], 1);
    assert_eq!(rows[0]["identifier"], "capella-pear");
    assert_eq!(rows[0]["dataSupplier"]["name"], "ELR");
}

#[tokio::test]
async fn flavor_without_identifiers_is_no_content() {
    TestClient::new().get("/api/flavor/124/identifiers").await.assert_no_content();
}

#[tokio::test]
async fn single_identifier_by_composite_key() {
    let client = TestClient::new();

    let res = client.get("/api/flavor/123/identifier/2").await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json()["identifier"], "cap-pear-v1");

    client.get("/api/flavor/200/identifier/2").await.assert_no_content();
}

#[tokio::test]
async fn non_numeric_supplier_is_bad_request() {
    let errors = TestClient::new()
        .get("/api/flavor/123/identifier/elr")
        .await
        .validation_errors();
    assert_eq!(errors[0]["param"], "dataSupplierId");
}

#[tokio::test]
async fn create_update_delete_flow() {
    let client = TestClient::new();

    let res = client
        .post("/api/flavor/124/identifier", json!({ "dataSupplierId": 2, "identifier": "cap-sweet-strawberry" }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json()["flavorId"], 124);

    let res = client
        .put("/api/flavor/124/identifier/2", json!({ "identifier": "cap-sweet-strawberry-v2" }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json()[0]["identifier"], "cap-sweet-strawberry-v2");

    let res = client.delete("/api/flavor/124/identifier/2").await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json(), json!(1));

    client.get("/api/flavor/124/identifiers").await.assert_no_content();
}

#[tokio::test]
async fn duplicate_identifier_is_server_error() {
    TestClient::new()
        .post("/api/flavor/123/identifier", json!({ "dataSupplierId": 1, "identifier": "again" }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_requires_supplier_and_identifier() {
    let errors = TestClient::new()
        .post("/api/flavor/124/identifier", json!({}))
        .await
        .validation_errors();
    let params: Vec<&str> = errors.iter().filter_map(|e| e["param"].as_str()).collect();
    assert_eq!(params, vec!["dataSupplierId", "identifier"]);
}

#[tokio::test]
async fn update_of_missing_identifier_is_no_content() {
    TestClient::new()
        .put("/api/flavor/300/identifier/1", json!({ "identifier": "fa-fuji" }))
        .await
        .assert_no_content();
}

#[tokio::test]
async fn notes_include_flavor_and_profile() {
    let res = TestClient::new().get("/api/flavor/123/notes").await;
    res.assert_status(StatusCode::OK);

    let notes = res.json();
    let notes = notes.as_array().expect("array of notes");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["flavor"]["name"], "Pear");
    assert_eq!(notes[0]["userProfile"]["name"], "mixer");

    TestClient::new().get("/api/flavor/300/notes").await.assert_no_content();
}
