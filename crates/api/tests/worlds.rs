//! Integration tests for worlds, the world summary and the profile.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, id_of, TestContext};
use serde_json::json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test: creating a world stores it under the caller with a trimmed title
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_world_trims_title_and_sets_owner() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_json("/api/v1/worlds", json!({ "title": "  Eldoria  ", "genre": "fantasy" }))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Eldoria");
    assert_eq!(json["data"]["visibility"], "private");
    assert_eq!(json["data"]["owner_id"], ctx.user_id.to_string());

    let stored = ctx.stub.rows("worlds");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["owner_id"], ctx.user_id.to_string());
}

#[tokio::test]
async fn requests_forward_the_callers_session() {
    let ctx = TestContext::new().await;

    ctx.get("/api/v1/worlds").await;

    let requests = ctx.stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {}", ctx.token).as_str())
    );
}

// ---------------------------------------------------------------------------
// Test: a blank title is rejected before the service is called
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_title_is_rejected_without_a_write() {
    let ctx = TestContext::new().await;

    let response = ctx.post_json("/api/v1/worlds", json!({ "title": "   " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Title must be 1-100 characters");
    assert_eq!(json["fields"][0]["field"], "title");
    assert!(ctx.stub.requests().is_empty());
}

// ---------------------------------------------------------------------------
// Test: listing only returns the caller's worlds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_worlds_filters_by_owner() {
    let ctx = TestContext::new().await;
    ctx.seed_world("Mine");
    ctx.stub.seed(
        "worlds",
        json!({
            "owner_id": Uuid::new_v4(),
            "title": "Someone else's",
            "summary": null,
            "visibility": "public",
        }),
    );

    let json = body_json(ctx.get("/api/v1/worlds").await).await;

    let worlds = json["data"].as_array().unwrap();
    assert_eq!(worlds.len(), 1);
    assert_eq!(worlds[0]["title"], "Mine");
}

// ---------------------------------------------------------------------------
// Test: get, update and delete a world
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_world_returns_404() {
    let ctx = TestContext::new().await;
    let id = Uuid::new_v4();

    let response = ctx.get(&format!("/api/v1/worlds/{id}")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], format!("World with id {id} not found"));
}

#[tokio::test]
async fn update_world_changes_only_given_members() {
    let ctx = TestContext::new().await;
    let id = ctx.seed_world("Eldoria");

    let response = ctx
        .put_json(&format!("/api/v1/worlds/{id}"), json!({ "summary": "A realm of ash" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Eldoria");
    assert_eq!(json["data"]["summary"], "A realm of ash");
}

#[tokio::test]
async fn delete_world_then_404() {
    let ctx = TestContext::new().await;
    let id = ctx.seed_world("Doomed");
    let uri = format!("/api/v1/worlds/{id}");

    let response = ctx.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(ctx.stub.rows("worlds").is_empty());

    let response = ctx.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: world summary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summary_counts_world_contents() {
    let ctx = TestContext::new().await;
    let world = ctx.seed_world("Eldoria");
    let other = ctx.seed_world("Other");
    let ty = ctx.seed_card_type(world, "Character", json!([]));
    ctx.seed_card(world, ty, "Aria", None);
    ctx.seed_card(world, ty, "Borin", None);
    ctx.seed_folder(world, "People", None, 0);
    ctx.seed_folder(other, "Elsewhere", None, 0);

    let response = ctx.get(&format!("/api/v1/worlds/{world}/summary")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_cards"], 2);
    assert_eq!(json["data"]["total_folders"], 1);
    assert_eq!(json["data"]["total_card_types"], 1);
}

#[tokio::test]
async fn summary_of_unknown_world_skips_procedure() {
    let ctx = TestContext::new().await;

    let response = ctx
        .get(&format!("/api/v1/worlds/{}/summary", Uuid::new_v4()))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(ctx
        .stub
        .requests()
        .iter()
        .all(|r| !r.target.starts_with("rpc/")));
}

// ---------------------------------------------------------------------------
// Test: profile
// ---------------------------------------------------------------------------

fn seed_profile(ctx: &TestContext) {
    ctx.stub.seed(
        "profiles",
        json!({
            "id": ctx.user_id,
            "display_name": null,
            "avatar_url": null,
            "plan": "free",
            "ai_credits_used": 0,
            "storage_bytes_used": 0,
        }),
    );
}

#[tokio::test]
async fn profile_read_and_update() {
    let ctx = TestContext::new().await;
    seed_profile(&ctx);

    let json = body_json(ctx.get("/api/v1/profile").await).await;
    assert_eq!(json["data"]["plan"], "free");

    let response = ctx
        .put_json("/api/v1/profile", json!({ "display_name": "Mira" }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["display_name"], "Mira");
    assert_eq!(id_of(&json["data"]), ctx.user_id);
}

#[tokio::test]
async fn profile_rejects_bad_avatar_url() {
    let ctx = TestContext::new().await;
    seed_profile(&ctx);

    let response = ctx
        .put_json("/api/v1/profile", json!({ "avatar_url": "not a url" }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Avatar URL must be a valid URL");
    assert!(ctx.stub.writes().iter().all(|r| r.method != Method::PATCH));
}

#[tokio::test]
async fn missing_profile_returns_404() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/api/v1/profile").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
