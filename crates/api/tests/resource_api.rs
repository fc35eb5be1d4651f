//! HTTP-level integration tests for the catalog resource endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Every test runs on fresh in-memory stores.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use catalog_api::state::Stores;
use catalog_core::entity::EntityType;
use catalog_db::models::ProductCategoryRecord;
use catalog_events::{AuditAction, AuditEvent, AuditOutcome};
use common::{body_json, delete, get, post_json, put_json, FailingStore};
use serde_json::json;
use tokio::sync::broadcast;

fn drain(rx: &mut broadcast::Receiver<AuditEvent>) -> Vec<AuditEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn create_category(app: &axum::Router, title: &str) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/api/v1/product-categories",
        json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// CRUD lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn category_lifecycle_create_list_update_delete() {
    let (app, _bus) = common::build_test_app();

    let created = create_category(&app, "Fruits").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Fruits");
    assert!(created["created"].is_string());
    assert_eq!(created["created"], created["updated"]);

    let list = body_json(get(app.clone(), "/api/v1/product-categories").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0]["title"], "Fruits");

    let response = put_json(
        app.clone(),
        "/api/v1/product-categories",
        json!({ "id": id, "title": "Fruit" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["title"], "Fruit");
    assert_eq!(updated["created"], created["created"]);

    let created_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["created"].clone()).unwrap();
    let updated_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["updated"].clone()).unwrap();
    assert!(updated_at > created_at);

    let response = delete(app.clone(), &format!("/api/v1/product-categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/product-categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_by_id_returns_the_record() {
    let (app, _bus) = common::build_test_app();
    let created = create_category(&app, "Dairy").await;

    let response = get(
        app,
        &format!("/api/v1/product-categories/{}", created["id"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], created);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (app, _bus) = common::build_test_app();
    let response = get(app, "/api/v1/product-categories/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn every_entity_path_is_mounted() {
    let (app, _bus) = common::build_test_app();
    for path in [
        "product-categories",
        "product-subcategories",
        "products",
        "nutrient-categories",
        "nutrients",
        "treating-types",
        "product-nutrients",
    ] {
        let response = get(app.clone(), &format!("/api/v1/{path}")).await;
        assert_eq!(response.status(), StatusCode::OK, "GET /api/v1/{path}");
        assert_eq!(body_json(response).await["data"], json!([]));
    }
}

#[tokio::test]
async fn nested_entities_carry_their_foreign_keys() {
    let (app, _bus) = common::build_test_app();
    let category = create_category(&app, "Vegetables").await;

    let response = post_json(
        app.clone(),
        "/api/v1/product-subcategories",
        json!({ "title": "Roots", "productCategoryId": category["id"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let sub = body_json(response).await["data"].clone();
    assert_eq!(sub["productCategoryId"], category["id"]);

    let response = post_json(
        app.clone(),
        "/api/v1/products",
        json!({ "title": "Carrot", "productSubCategoryId": sub["id"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let product = body_json(response).await["data"].clone();
    assert_eq!(product["productSubCategoryId"], sub["id"]);

    let response = post_json(
        app.clone(),
        "/api/v1/nutrient-categories",
        json!({ "title": "Vitamins" }),
    )
    .await;
    let nutrient_category = body_json(response).await["data"].clone();

    let response = post_json(
        app.clone(),
        "/api/v1/nutrients",
        json!({
            "title": "Vitamin A",
            "dailyDose": 0.9,
            "nutrientCategoryId": nutrient_category["id"],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let nutrient = body_json(response).await["data"].clone();
    assert_eq!(nutrient["dailyDose"], 0.9);

    let response = post_json(app.clone(), "/api/v1/treating-types", json!({ "title": "Raw" })).await;
    let treating = body_json(response).await["data"].clone();

    let response = post_json(
        app,
        "/api/v1/product-nutrients",
        json!({
            "productId": product["id"],
            "nutrientId": nutrient["id"],
            "treatingTypeId": treating["id"],
            "quality": 8.3,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let link = body_json(response).await["data"].clone();
    assert_eq!(link["quality"], 8.3);
    assert_eq!(link["productId"], product["id"]);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_titles_are_rejected_with_400() {
    let (app, _bus) = common::build_test_app();

    for body in [
        json!({}),
        json!({ "title": "" }),
        json!({ "title": "Fruits 2" }),
        json!({ "title": "A".repeat(31) }),
    ] {
        let response = post_json(app.clone(), "/api/v1/product-categories", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let list = body_json(get(app, "/api/v1/product-categories").await).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn update_without_id_is_rejected() {
    let (app, _bus) = common::build_test_app();
    let response = put_json(
        app,
        "/api/v1/product-categories",
        json!({ "title": "Fruits" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn negative_daily_dose_is_rejected() {
    let (app, _bus) = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/nutrients",
        json!({ "title": "Iron", "dailyDose": -1.0, "nutrientCategoryId": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("dailyDose"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, _bus) = common::build_test_app();
    let response = common::send(
        app,
        axum::http::Method::POST,
        "/api/v1/product-categories",
        Some(json!(["not", "an", "object"])),
    )
    .await;
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pagination_filters_case_insensitively_and_counts_before_slicing() {
    let (app, _bus) = common::build_test_app();
    for title in ["Fruits", "Vegetables", "Frozen food", "Nuts", "Dried fruits"] {
        create_category(&app, title).await;
    }

    let response = post_json(
        app.clone(),
        "/api/v1/product-categories/pagination",
        json!({ "query": "FRU", "sortBy": "title", "ascending": true, "skip": 0, "take": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await["data"].clone();
    assert_eq!(page["total"], 2);
    assert_eq!(page["values"].as_array().unwrap().len(), 1);
    assert_eq!(page["values"][0]["title"], "Dried fruits");

    // Leading whitespace is part of the needle.
    let response = post_json(
        app.clone(),
        "/api/v1/product-categories/pagination",
        json!({ "query": " fruits" }),
    )
    .await;
    let page = body_json(response).await["data"].clone();
    assert_eq!(page["total"], 1);
    assert_eq!(page["values"][0]["title"], "Dried fruits");

    let response = post_json(
        app,
        "/api/v1/product-categories/pagination",
        json!({ "sortBy": "title", "ascending": false }),
    )
    .await;
    let page = body_json(response).await["data"].clone();
    let titles: Vec<&str> = page["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Vegetables", "Nuts", "Fruits", "Frozen food", "Dried fruits"]
    );
}

#[tokio::test]
async fn pagination_edge_cases() {
    let (app, _bus) = common::build_test_app();
    for title in ["Alpha", "Beta", "Gamma"] {
        create_category(&app, title).await;
    }
    let uri = "/api/v1/product-categories/pagination";

    // Skip beyond the end: empty page, full total.
    let page = body_json(post_json(app.clone(), uri, json!({ "skip": 10 })).await).await;
    assert_eq!(page["data"]["total"], 3);
    assert_eq!(page["data"]["values"], json!([]));

    // Take zero: empty page.
    let page = body_json(post_json(app.clone(), uri, json!({ "take": 0 })).await).await;
    assert_eq!(page["data"]["total"], 3);
    assert_eq!(page["data"]["values"], json!([]));

    // Unknown sort key: insertion order, no error.
    let response = post_json(app.clone(), uri, json!({ "sortBy": "colour" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["data"]["values"][0]["title"], "Alpha");
    assert_eq!(page["data"]["values"][2]["title"], "Gamma");

    // Whitespace is part of the needle; no single-word title contains it.
    let page = body_json(post_json(app.clone(), uri, json!({ "query": " " })).await).await;
    assert_eq!(page["data"]["total"], 0);

    // Empty query matches everything.
    let page = body_json(post_json(app.clone(), uri, json!({ "query": "" })).await).await;
    assert_eq!(page["data"]["total"], 3);

    // No match.
    let page = body_json(post_json(app, uri, json!({ "query": "zzz" })).await).await;
    assert_eq!(page["data"]["total"], 0);
}

#[tokio::test]
async fn pagination_defaults_take_to_ten() {
    let (app, _bus) = common::build_test_app();
    for title in [
        "Aa", "Bb", "Cc", "Dd", "Ee", "Ff", "Gg", "Hh", "Ii", "Jj", "Kk", "Ll",
    ] {
        create_category(&app, title).await;
    }

    let page = body_json(
        post_json(app, "/api/v1/product-categories/pagination", json!({})).await,
    )
    .await;
    assert_eq!(page["data"]["total"], 12);
    assert_eq!(page["data"]["values"].as_array().unwrap().len(), 10);
}

// ---------------------------------------------------------------------------
// Audit events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_mutations_publish_success_events() {
    let (app, bus) = common::build_test_app();
    let mut rx = bus.subscribe();

    let created = create_category(&app, "Fruits").await;
    let id = created["id"].as_i64().unwrap();
    put_json(
        app.clone(),
        "/api/v1/product-categories",
        json!({ "id": id, "title": "Fruit" }),
    )
    .await;
    delete(app, &format!("/api/v1/product-categories/{id}")).await;

    let events = drain(&mut rx);
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.outcome == AuditOutcome::Success));
    assert!(events
        .iter()
        .all(|e| e.entity_type == EntityType::ProductCategory));

    assert_eq!(events[0].action, AuditAction::Create);
    assert_eq!(events[0].payload, created);
    assert_eq!(events[1].action, AuditAction::Update);
    assert_eq!(events[1].payload["title"], "Fruit");
    assert_eq!(events[2].action, AuditAction::Delete);
    assert_eq!(events[2].payload, json!(format!("with ID: {id}")));
}

#[tokio::test]
async fn caller_errors_publish_no_events() {
    let (app, bus) = common::build_test_app();
    let mut rx = bus.subscribe();

    let response = delete(app.clone(), "/api/v1/product-categories/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        app.clone(),
        "/api/v1/product-categories",
        json!({ "id": 42, "title": "Ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(app, "/api/v1/product-categories", json!({ "title": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn failed_create_publishes_one_failure_event_and_returns_500() {
    let mut stores = Stores::in_memory();
    stores.product_categories = Arc::new(FailingStore::<ProductCategoryRecord>::new());
    let (app, bus) = common::build_app_with_stores(stores);
    let mut rx = bus.subscribe();

    let response = post_json(
        app.clone(),
        "/api/v1/product-categories",
        json!({ "title": "Fruits" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PERSISTENCE_ERROR");
    assert_eq!(json["error"], "Product category has not been created");

    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, AuditOutcome::Failure);
    assert_eq!(events[0].action, AuditAction::Create);
    assert!(events[0].payload.as_str().unwrap().contains("disk full"));

    let list = body_json(get(app, "/api/v1/product-categories").await).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn failure_in_one_entity_leaves_others_working() {
    let mut stores = Stores::in_memory();
    stores.product_categories = Arc::new(FailingStore::<ProductCategoryRecord>::new());
    let (app, _bus) = common::build_app_with_stores(stores);

    let response = post_json(app, "/api/v1/treating-types", json!({ "title": "Boiled" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
