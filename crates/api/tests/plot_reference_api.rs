//! HTTP-level integration tests for the `/plot-references` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_in_book_and_read_back() {
    let app = TestApp::new();
    let (user, token) = app.user("ursula").await;
    let book = app.book(user, None).await;
    let body = json!({ "name": "Ged", "type": "character", "referenceId": 12 });

    let uri = format!("/api/v1/plot-references?bookId={book}");
    let response = post_json_auth(&app, &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["message"], "Plot reference created.");
    assert_eq!(
        created["data"],
        json!({ "id": 1, "name": "Ged", "type": "character", "referenceId": 12 })
    );

    let uri = format!("/api/v1/plot-references/1?bookId={book}");
    let found = body_json(get_auth(&app, &uri, &token).await).await;
    assert_eq!(found["message"], "Plot reference found.");
    assert_eq!(found["data"], created["data"]);
}

#[tokio::test]
async fn dto_never_exposes_parents() {
    let app = TestApp::new();
    let (user, token) = app.user("ursula").await;
    let series = app.series(user, "Earthsea").await;

    let uri = format!("/api/v1/plot-references?seriesId={series}");
    let json = body_json(post_json_auth(&app, &uri, json!({ "name": "Roke" }), &token).await).await;

    let data = json["data"].as_object().unwrap();
    assert!(!data.contains_key("seriesId"));
    assert!(!data.contains_key("series_id"));
    assert!(!data.contains_key("bookId"));
}

#[tokio::test]
async fn unknown_reference_type_is_rejected() {
    let app = TestApp::new();
    let (user, token) = app.user("ursula").await;
    let series = app.series(user, "Earthsea").await;

    let uri = format!("/api/v1/plot-references?seriesId={series}");
    let body = json!({ "name": "Roke", "type": "spaceship" });
    let response = post_json_auth(&app, &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_under_foreign_book_is_no_owned_parent() {
    let app = TestApp::new();
    let (owner, _) = app.user("owner").await;
    let (_, stranger_token) = app.user("stranger").await;
    let book = app.book(owner, None).await;

    let uri = format!("/api/v1/plot-references?bookId={book}");
    let response = post_json_auth(&app, &uri, json!({ "name": "Roke" }), &stranger_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_OWNED_PARENT");
    assert_eq!(
        json["message"],
        "A plot reference must be created belonging to one of your series or books."
    );
}

#[tokio::test]
async fn update_and_delete_through_series() {
    let app = TestApp::new();
    let (user, token) = app.user("ursula").await;
    let series = app.series(user, "Earthsea").await;
    let uri = format!("/api/v1/plot-references?seriesId={series}");
    post_json_auth(&app, &uri, json!({ "name": "Roke", "type": "location" }), &token).await;

    let item = format!("/api/v1/plot-references/1?seriesId={series}");
    let update = json!({ "updatedData": { "referenceId": 4 } });
    let json = body_json(patch_json_auth(&app, &item, update, &token).await).await;
    assert_eq!(json["message"], "Plot reference updated.");
    assert_eq!(
        json["data"],
        json!({ "id": 1, "name": "Roke", "type": "location", "referenceId": 4 })
    );

    assert_eq!(delete_auth(&app, &item, &token).await.status(), StatusCode::OK);
    assert_eq!(
        get_auth(&app, &item, &token).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn every_operation_requires_a_scope() {
    let app = TestApp::new();
    let (_, token) = app.user("ursula").await;

    let responses = [
        get_auth(&app, "/api/v1/plot-references", &token).await,
        post_json_auth(&app, "/api/v1/plot-references", json!({ "name": "X" }), &token).await,
        get_auth(&app, "/api/v1/plot-references/1", &token).await,
        patch_json_auth(
            &app,
            "/api/v1/plot-references/1",
            json!({ "updatedData": {} }),
            &token,
        )
        .await,
        delete_auth(&app, "/api/v1/plot-references/1", &token).await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "MISSING_SCOPE");
    }
}

#[tokio::test]
async fn stranger_cannot_reach_reference_through_owners_book() {
    let app = TestApp::new();
    let (owner, owner_token) = app.user("owner").await;
    let (_, stranger_token) = app.user("stranger").await;
    let book = app.book(owner, None).await;
    let uri = format!("/api/v1/plot-references?bookId={book}");
    post_json_auth(&app, &uri, json!({ "name": "Ged" }), &owner_token).await;

    let item = format!("/api/v1/plot-references/1?bookId={book}");
    let update = json!({ "updatedData": { "name": "Sparrowhawk" } });
    let responses = [
        get_auth(&app, &item, &stranger_token).await,
        patch_json_auth(&app, &item, update, &stranger_token).await,
        delete_auth(&app, &item, &stranger_token).await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["message"], "Forbidden account action.");
    }

    let json = body_json(get_auth(&app, &item, &owner_token).await).await;
    assert_eq!(json["data"]["name"], "Ged");
}

#[tokio::test]
async fn read_through_other_series_is_forbidden() {
    let app = TestApp::new();
    let (user, token) = app.user("ursula").await;
    let first = app.series(user, "One").await;
    let second = app.series(user, "Two").await;
    let uri = format!("/api/v1/plot-references?seriesId={first}");
    post_json_auth(&app, &uri, json!({ "name": "Roke" }), &token).await;

    let item = format!("/api/v1/plot-references/1?seriesId={second}");
    let response = get_auth(&app, &item, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN_ACTION");
}

#[tokio::test]
async fn delete_then_delete_again_is_forbidden() {
    let app = TestApp::new();
    let (user, token) = app.user("ursula").await;
    let book = app.book(user, None).await;
    let uri = format!("/api/v1/plot-references?bookId={book}");
    post_json_auth(&app, &uri, json!({ "name": "Ged" }), &token).await;

    let item = format!("/api/v1/plot-references/1?bookId={book}");
    let first = delete_auth(&app, &item, &token).await;
    assert_eq!(
        body_json(first).await,
        json!({ "message": "Plot reference deleted." })
    );

    let second = delete_auth(&app, &item, &token).await;
    assert_eq!(second.status(), StatusCode::FORBIDDEN);
}
