mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde_json::json;

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .expect("array body")
        .iter()
        .filter_map(|row| row["id"].as_i64())
        .collect()
}

#[tokio::test]
async fn ingredient_list_includes_category() {
    let res = TestClient::new().get("/api/ingredient").await;
    res.assert_status(StatusCode::OK);

    let body = res.json();
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    assert_eq!(body[2]["ingredientCategory"]["name"], "Nicotine");
}

#[tokio::test]
async fn limit_bounds_the_page() {
    let body = TestClient::new().get("/api/ingredient?limit=2").await.json();
    assert_eq!(ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn offset_is_one_based() {
    let client = TestClient::new();
    assert_eq!(ids(&client.get("/api/ingredient?offset=1&limit=2").await.json()), vec![1, 2]);
    assert_eq!(ids(&client.get("/api/ingredient?offset=3&limit=2").await.json()), vec![3, 4]);
}

#[tokio::test]
async fn page_past_the_end_is_empty_list() {
    let res = TestClient::new().get("/api/ingredient?offset=50").await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn non_numeric_limit_is_bad_request() {
    let errors = TestClient::new().get("/api/ingredient?limit=stop").await.validation_errors();
    assert_eq!(errors[0]["location"], "query");
    assert_eq!(errors[0]["param"], "limit");
    assert_eq!(errors[0]["value"], "stop");
}

const PAGED_LISTS: [&str; 4] = ["/api/ingredient", "/api/ingredient-category", "/api/preparation", "/api/vendor"];

#[tokio::test]
async fn every_paged_list_answers_empty_page_past_the_end() {
    let client = TestClient::new();
    for route in PAGED_LISTS {
        let res = client.get(&format!("{}?offset=50", route)).await;
        assert_eq!(res.status, StatusCode::OK, "{} past the end", route);
        assert_eq!(res.json(), json!([]), "{} past the end", route);
    }
}

#[tokio::test]
async fn every_paged_list_rejects_non_numeric_paging() {
    let client = TestClient::new();
    for route in PAGED_LISTS {
        for (query, param) in [("limit=stop", "limit"), ("offset=ham", "offset")] {
            let errors = client.get(&format!("{}?{}", route, query)).await.validation_errors();
            assert_eq!(errors[0]["location"], "query", "{}?{}", route, query);
            assert_eq!(errors[0]["param"], param, "{}?{}", route, query);
        }
    }
}

#[tokio::test]
async fn negative_offset_is_bad_request() {
    let errors = TestClient::new().get("/api/vendor?offset=-1").await.validation_errors();
    assert_eq!(errors[0]["param"], "offset");
    assert_eq!(errors[0]["value"], "-1");
    assert_eq!(errors[0]["msg"], "must be an integer of at least 0");
}

#[tokio::test]
async fn zero_limit_is_bad_request() {
    TestClient::new().get("/api/preparation?limit=0").await.validation_errors();
}

#[tokio::test]
async fn ingredient_by_id() {
    let client = TestClient::new();

    let body = client.get("/api/ingredient/5").await.json();
    assert_eq!(body["name"], "Sucralose");
    assert_eq!(body["ingredientCategory"]["name"], "Additive");

    client.get("/api/ingredient/0").await.assert_no_content();
    client.get("/api/ingredient/ham").await.validation_errors();
}

#[tokio::test]
async fn counts_are_bare_numbers() {
    let client = TestClient::new();
    assert_eq!(client.get("/api/ingredient/count").await.json(), json!(5));
    assert_eq!(client.get("/api/ingredient-category/count").await.json(), json!(4));
    assert_eq!(client.get("/api/vendor/count").await.json(), json!(3));
}

#[tokio::test]
async fn ingredient_categories_page() {
    let body = TestClient::new().get("/api/ingredient-category?offset=2&limit=2").await.json();
    assert_eq!(ids(&body), vec![2, 3]);
}

#[tokio::test]
async fn preparations_page() {
    let res = TestClient::new().get("/api/preparation?limit=1").await;
    res.assert_status(StatusCode::OK);

    let body = res.json();
    assert_eq!(ids(&body), vec![1]);
    assert!(body[0]["volumeMl"].is_number());
}

#[tokio::test]
async fn vendors() {
    let client = TestClient::new();

    assert_eq!(ids(&client.get("/api/vendor").await.json()), vec![1, 2, 3]);
    assert_eq!(client.get("/api/vendor/2").await.json()["code"], "TPA");
    client.get("/api/vendor/42").await.assert_no_content();
}
