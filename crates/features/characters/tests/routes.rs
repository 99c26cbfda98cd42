use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use roster_kernel::domain::character::{Character, CharacterInput};
use roster_kernel::domain::config::ApiConfig;
use roster_kernel::server::{ApiState, not_found_fallback};
use roster_kernel::store::CharacterStore;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(store: CharacterStore) -> Router {
    let state =
        ApiState::builder().config(ApiConfig::default()).characters(store).build().unwrap();
    let (router, _api): (Router, _) =
        roster_characters::router().with_state(state).split_for_parts();
    router.fallback(not_found_fallback).method_not_allowed_fallback(not_found_fallback)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_owned())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

fn stats(hp: i64, mana: i64) -> CharacterInput {
    CharacterInput { hp: Some(json!(hp)), mana: Some(json!(mana)), ..CharacterInput::default() }
}

#[tokio::test]
async fn list_returns_data_envelope_in_order() {
    let store = CharacterStore::with_characters([Character::starter()]).unwrap();
    let second = store.create(stats(1, 2));
    let app = app(store);

    let (status, body) = send(&app, Method::GET, "/api/characters", None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Darth Vader");
    assert_eq!(data[1]["id"], json!(second.id));
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = app(CharacterStore::new());
    let payload = json!({
        "name": "Yoda",
        "characterClass": "Jedi",
        "level": 50,
        "hp": 80,
        "mana": 120,
        "attack": 15,
        "items": ["Lightsaber"],
    });

    let (status, created) =
        send(&app, Method::POST, "/api/characters", Some(&payload.to_string())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Character created");

    let id = created["data"]["id"].as_str().unwrap().to_owned();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/characters/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    let mut expected = payload;
    expected["id"] = json!(id);
    assert_eq!(fetched, json!({ "data": expected }));
}

#[tokio::test]
async fn create_ignores_unknown_fields_and_client_ids() {
    let app = app(CharacterStore::new());

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/characters",
        Some(r#"{"name": "Rey", "foo": "bar", "id": "chosen-by-client"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], "Rey");
    assert!(created["data"].get("foo").is_none());
    assert_ne!(created["data"]["id"], "chosen-by-client");
}

#[tokio::test]
async fn create_with_empty_body_leaves_fields_unset() {
    let app = app(CharacterStore::new());

    let (status, created) = send(&app, Method::POST, "/api/characters", None).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = created["data"].as_object().unwrap();
    assert_eq!(data.len(), 1, "only the generated id is present: {data:?}");
}

#[tokio::test]
async fn patch_and_put_merge_supplied_fields() {
    let store = CharacterStore::new();
    let existing = store.create(stats(100, 50));
    let app = app(store.clone());
    let uri = format!("/api/characters/{}", existing.id);

    for method in [Method::PATCH, Method::PUT] {
        let (status, body) = send(&app, method, &uri, Some(r#"{"hp": 80, "id": "x"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Character update successfully");
        assert_eq!(body["data"]["id"], json!(existing.id));
        assert_eq!(body["data"]["hp"], 80);
        assert_eq!(body["data"]["mana"], 50);
    }

    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn delete_removes_one_record() {
    let store = CharacterStore::new();
    let a = store.create(stats(1, 1));
    let b = store.create(stats(2, 2));
    let c = store.create(stats(3, 3));
    let app = app(store.clone());

    let (status, body) = send(&app, Method::DELETE, &format!("/api/characters/{}", b.id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Character deleted successfuly" }));
    assert_eq!(store.list(), vec![a, c]);
}

#[tokio::test]
async fn unknown_ids_return_exact_messages_and_leave_store_alone() {
    let store = CharacterStore::with_characters([Character::starter()]).unwrap();
    let before = store.list();
    let app = app(store.clone());

    let (status, body) = send(&app, Method::GET, "/api/characters/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "character not found!" }));

    for method in [Method::PUT, Method::PATCH] {
        let (status, body) =
            send(&app, method, "/api/characters/missing", Some(r#"{"hp": 1}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Character not found" }));
    }

    let (status, body) = send(&app, Method::DELETE, "/api/characters/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Character not found" }));

    assert_eq!(store.list(), before);
}

#[tokio::test]
async fn malformed_bodies_are_rejected_without_mutation() {
    let store = CharacterStore::new();
    let existing = store.create(stats(10, 10));
    let app = app(store.clone());

    let (status, body) = send(&app, Method::POST, "/api/characters", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let uri = format!("/api/characters/{}", existing.id);
    let (status, _) = send(&app, Method::PATCH, &uri, Some("42")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.list(), vec![existing]);
}

#[tokio::test]
async fn array_bodies_carry_no_fields() {
    let store = CharacterStore::new();
    let existing = store.create(stats(10, 10));
    let app = app(store.clone());

    let (status, created) = send(&app, Method::POST, "/api/characters", Some("[1]")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"].as_object().unwrap().len(), 1);

    let uri = format!("/api/characters/{}", existing.id);
    let (status, body) = send(&app, Method::PATCH, &uri, Some("[1, 2, 3]")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::to_value(&existing).unwrap());
}

#[tokio::test]
async fn non_json_content_type_reads_as_empty_body() {
    let app = app(CharacterStore::new());

    for content_type in [Some("text/plain"), None] {
        let mut request = Request::builder().method(Method::POST).uri("/api/characters");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        let request = request.body(Body::from(r#"{"name": "x"}"#)).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let created: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(created["data"].get("name").is_none(), "{content_type:?}: {created}");
    }
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let store = CharacterStore::new();
    let app = app(store.clone());
    let body = vec![b' '; 2 * 1024 * 1024 + 1];

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/characters")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(store.is_empty());
}

#[tokio::test]
async fn unmatched_requests_fall_back_to_resource_not_found() {
    let app = app(CharacterStore::new());
    let expected = json!({ "message": "Resource not found" });

    for (method, uri) in [
        (Method::GET, "/"),
        (Method::GET, "/api"),
        (Method::POST, "/api/heroes"),
        (Method::DELETE, "/api/characters"),
        (Method::POST, "/api/characters/some-id"),
    ] {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body, expected, "{method} {uri}");
    }
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let store = CharacterStore::with_characters([Character::starter()]).unwrap();
    let app = app(store);

    let first = send(&app, Method::GET, "/api/characters", None).await;
    let second = send(&app, Method::GET, "/api/characters", None).await;
    assert_eq!(first, second);

    let uri = format!("/api/characters/{}", Character::starter().id);
    let first = send(&app, Method::GET, &uri, None).await;
    let second = send(&app, Method::GET, &uri, None).await;
    assert_eq!(first, second);
}
