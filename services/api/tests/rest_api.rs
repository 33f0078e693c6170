//! End-to-end tests for the HTTP surface, driven through the router with
//! `tower::ServiceExt::oneshot` against the built-in sample catalog.

use api_lib::adapters::InMemoryProfileStore;
use api_lib::config::Config;
use api_lib::web::{router, state::AppState};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use skincare_core::Catalog;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::default();
    let state = Arc::new(AppState {
        catalog: Arc::new(Catalog::sample()),
        profiles: Arc::new(InMemoryProfileStore::new(config.session_ttl)),
        config: Arc::new(config),
    });
    router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

fn request(method: Method, uri: &str, session: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn start_session(app: &Router) -> String {
    let (status, body) = send(app, request(Method::POST, "/sessions", None, None)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["profile"]["skin_type"], "normal");
    body["session_id"].as_str().unwrap().to_string()
}

fn ids(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn missing_or_malformed_session_header_is_bad_request() {
    let app = app();

    let (status, _) = send(&app, request(Method::GET, "/ingredients", None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(Method::GET, "/ingredients", Some("not-a-uuid"), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_or_ended_session_is_unauthorized() {
    let app = app();
    let stranger = uuid::Uuid::new_v4().to_string();
    let (status, _) = send(&app, request(Method::GET, "/profile", Some(&stranger), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let session = start_session(&app).await;
    let (status, _) = send(&app, request(Method::DELETE, "/sessions", Some(&session), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request(Method::GET, "/profile", Some(&session), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn facets_are_public() {
    let app = app();
    let (status, body) = send(&app, request(Method::GET, "/catalog/facets", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);
    assert_eq!(body["brands"].as_array().unwrap().len(), 7);
    assert_eq!(body["min_price"], json!(24.99));
    assert_eq!(body["max_price"], json!(56.99));
}

#[tokio::test]
async fn ingredients_filter_by_band_and_sort_by_safety() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/ingredients?safety=high&sort=safety-high",
            Some(&session),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["ing7", "ing10", "ing1", "ing3", "ing5"]);
    assert_eq!(body[0]["safety"]["tier"], "green");

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/ingredients?skin_types=all&safety=low",
            Some(&session),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    for item in body.as_array().unwrap() {
        assert_eq!(item["safety"]["level"], "Caution");
    }
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_filter_values_are_rejected() {
    let app = app();
    let session = start_session(&app).await;

    for uri in [
        "/ingredients?sort=alphabetical",
        "/ingredients?skin_types=scaly",
        "/products?min_price=50&max_price=10",
        "/search?q=serum&safety=extreme",
    ] {
        let (status, _) = send(&app, request(Method::GET, uri, Some(&session), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn products_filter_by_category_and_price() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/products?categories=Serum&sort=price-low",
            Some(&session),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["prod4", "prod1"]);

    let (_, body) = send(
        &app,
        request(
            Method::GET,
            "/products?max_price=30&sort=price-low",
            Some(&session),
            None,
        ),
    )
    .await;
    assert_eq!(ids(&body), vec!["prod2", "prod8", "prod6"]);
}

#[tokio::test]
async fn products_sort_by_price_descending() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/products?categories=Moisturizer,Serum&sort=price-high",
            Some(&session),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["prod3", "prod1", "prod4", "prod5"]);
}

#[tokio::test]
async fn eye_cream_detail_flags_fragrance_allergy() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/products/prod7", Some(&session), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["assessment"]["suitable_for_skin"], true);
    assert_eq!(body["product"]["assessment"]["suitable_for_user"], false);
    assert_eq!(
        body["product"]["assessment"]["allergens"],
        json!(["Fragrance (Parfum)"])
    );
    assert_eq!(body["safety_breakdown"]["safe"], json!(["ing1", "ing5"]));
    assert_eq!(body["safety_breakdown"]["caution"], json!(["ing6", "ing8"]));

    let (status, _) = send(
        &app,
        request(Method::GET, "/products/prod99", Some(&session), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ingredient_detail_lists_related_products() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/ingredients/ing5", Some(&session), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ingredient"]["name"], "Vitamin C");
    assert_eq!(ids(&body["related_products"]), vec!["prod4", "prod7"]);
}

#[tokio::test]
async fn search_records_history_and_finds_vitamin_c() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/search?q=%20Vitamin%20C%20", Some(&session), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "Vitamin C");
    assert_eq!(ids(&body["ingredients"]), vec!["ing5"]);
    assert_eq!(ids(&body["products"]), vec!["prod4"]);

    let (_, profile) = send(&app, request(Method::GET, "/profile", Some(&session), None)).await;
    assert_eq!(profile["search_history"][0], "Vitamin C");

    let (_, body) = send(&app, request(Method::GET, "/search?q=%20%20", Some(&session), None)).await;
    assert!(body["ingredients"].as_array().unwrap().is_empty());
    assert!(body["products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn profile_edits_persist_within_the_session() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/profile/skin-type",
            Some(&session),
            Some(json!({ "skin_type": "Sensitive" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skin_type"], "sensitive");

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            "/profile/skin-type",
            Some(&session),
            Some(json!({ "skin_type": "scaly" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(
        &app,
        request(
            Method::POST,
            "/profile/allergies",
            Some(&session),
            Some(json!({ "value": "Parabens" })),
        ),
    )
    .await;
    assert_eq!(body["allergies"], json!(["fragrance", "parabens"]));

    let (_, body) = send(
        &app,
        request(Method::DELETE, "/profile/allergies/fragrance", Some(&session), None),
    )
    .await;
    assert_eq!(body["allergies"], json!(["parabens"]));

    let (_, body) = send(
        &app,
        request(
            Method::PATCH,
            "/profile",
            Some(&session),
            Some(json!({ "name": "Ada" })),
        ),
    )
    .await;
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "guest@example.com");

    let (_, body) = send(
        &app,
        request(Method::DELETE, "/profile/search-history", Some(&session), None),
    )
    .await;
    assert!(body["search_history"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_profile_edits_are_all_kept() {
    let app = app();
    let session = start_session(&app).await;
    let add = |value: &str| {
        request(
            Method::POST,
            "/profile/allergies",
            Some(&session),
            Some(json!({ "value": value })),
        )
    };

    let (a, b, c, d) = tokio::join!(
        send(&app, add("parabens")),
        send(&app, add("sulfates")),
        send(&app, add("alcohol")),
        send(&app, add("lanolin")),
    );
    for (status, _) in [a, b, c, d] {
        assert_eq!(status, StatusCode::OK);
    }

    let (_, profile) = send(&app, request(Method::GET, "/profile", Some(&session), None)).await;
    let mut allergies: Vec<&str> = profile["allergies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    allergies.sort_unstable();
    assert_eq!(
        allergies,
        vec!["alcohol", "fragrance", "lanolin", "parabens", "sulfates"]
    );
}

#[tokio::test]
async fn favorites_require_known_products() {
    let app = app();
    let session = start_session(&app).await;

    let (status, _) = send(
        &app,
        request(Method::PUT, "/profile/favorites/prod99", Some(&session), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        request(Method::PUT, "/profile/favorites/prod4", Some(&session), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorite_products"], json!(["prod1", "prod5", "prod4"]));

    let (_, body) = send(
        &app,
        request(Method::DELETE, "/profile/favorites/prod1", Some(&session), None),
    )
    .await;
    assert_eq!(body["favorite_products"], json!(["prod5", "prod4"]));

    let (_, body) = send(
        &app,
        request(Method::GET, "/profile/favorites", Some(&session), None),
    )
    .await;
    assert_eq!(ids(&body), vec!["prod5", "prod4"]);
    assert!(body.as_array().unwrap().iter().all(|p| p["is_favorite"] == true));
}

#[tokio::test]
async fn recommendations_exclude_allergens_and_other_skin_types() {
    let app = app();
    let session = start_session(&app).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/profile/recommendations", Some(&session), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["prod5", "prod1", "prod4"]);

    let (_, body) = send(
        &app,
        request(
            Method::GET,
            "/profile/recommendations?limit=1",
            Some(&session),
            None,
        ),
    )
    .await;
    assert_eq!(ids(&body), vec!["prod5"]);
}
