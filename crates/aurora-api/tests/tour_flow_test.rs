//! Integration tests for tours and routes over `PostgreSQL`.

mod common;

use aurora_test_support::ScriptedGenerator;
use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

async fn mount(app: axum::Router, slug: &str) -> (Uuid, serde_json::Value) {
    let (status, json) = common::post_json(app, "/api/v1/tours", &json!({ "slug": slug })).await;
    assert_eq!(status, StatusCode::CREATED);
    (json["tour_id"].as_str().unwrap().parse().unwrap(), json)
}

#[sqlx::test(migrations = false)]
async fn test_health_reports_catalog(pool: PgPool) {
    let state = common::build_test_state(pool, ScriptedGenerator::numbered(1)).await;

    let (status, json) = common::get_json(common::build_test_app(&state), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[sqlx::test(migrations = false)]
async fn test_variant_rotates_across_visits_and_cache_persists(pool: PgPool) {
    let state = common::build_test_state(pool, ScriptedGenerator::numbered(3)).await;
    let mut variants = Vec::new();

    for _ in 0..4 {
        let (tour_id, json) = mount(common::build_test_app(&state), "mars").await;
        variants.push(json["variant"].as_str().unwrap().to_owned());

        let (status, json) = common::post_json(
            common::build_test_app(&state),
            &format!("/api/v1/tours/{tour_id}/start"),
            &json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["commands"][0]["step_index"], 0);
    }

    assert_eq!(
        variants,
        vec!["explorer", "scientist", "storyteller", "explorer"]
    );
}

#[sqlx::test(migrations = false)]
async fn test_finishing_tour_on_route_opens_next_stop(pool: PgPool) {
    let state = common::build_test_state(pool, ScriptedGenerator::numbered(2)).await;

    // Start a route earth -> jupiter.
    let (status, route) = common::post_json(
        common::build_test_app(&state),
        "/api/v1/routes",
        &json!({ "from": "earth", "to": "jupiter" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let route_id = route["route_id"].as_str().unwrap().to_owned();

    // Tour the first stop to its end.
    let (tour_id, _) = mount(common::build_test_app(&state), "earth").await;
    common::post_json(
        common::build_test_app(&state),
        &format!("/api/v1/tours/{tour_id}/start"),
        &json!({}),
    )
    .await;
    let next_uri = format!("/api/v1/tours/{tour_id}/next");
    let body = json!({ "route_id": route_id });
    let (_, step) = common::post_json(common::build_test_app(&state), &next_uri, &body).await;
    assert_eq!(step["finished"], false);

    // "Finish" hands off to the route.
    let (status, finish) =
        common::post_json(common::build_test_app(&state), &next_uri, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(finish["finished"], true);
    assert_eq!(finish["next_stop"], "mars");
    assert_eq!(
        finish["commands"],
        json!([
            { "command": "hide_tour_overlay" },
            { "command": "focus_camera", "slug": "mars" },
            { "command": "open_entity", "slug": "mars" },
        ])
    );

    let (_, route) = common::get_json(
        common::build_test_app(&state),
        &format!("/api/v1/routes/{route_id}"),
    )
    .await;
    assert_eq!(route["current"], "mars");
    assert_eq!(route["cursor"], 1);
}

#[sqlx::test(migrations = false)]
async fn test_preferences_persist(pool: PgPool) {
    let state = common::build_test_state(pool, ScriptedGenerator::numbered(1)).await;

    let (status, _) = common::put_json(
        common::build_test_app(&state),
        "/api/v1/preferences",
        &json!({ "muted": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) =
        common::get_json(common::build_test_app(&state), "/api/v1/preferences").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "muted": true, "narration_enabled": true }));
}

#[sqlx::test(migrations = false)]
async fn test_unknown_tour_returns_404(pool: PgPool) {
    let state = common::build_test_state(pool, ScriptedGenerator::numbered(1)).await;
    let tour_id = Uuid::new_v4();

    let (status, json) = common::get_json(
        common::build_test_app(&state),
        &format!("/api/v1/tours/{tour_id}"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");
}
