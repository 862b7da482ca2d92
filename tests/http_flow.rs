mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use catalog_admin_api::{
    entity::{Skus, Spus},
    middleware::auth::issue_token,
    routes::create_router,
    state::AppState,
};
use common::*;
use http_body_util::BodyExt;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app(state: &AppState) -> Router {
    create_router().with_state(state.clone())
}

fn token() -> String {
    issue_token(JWT_SECRET, Uuid::new_v4(), "staff", chrono::Duration::hours(1))
        .expect("token")
}

async fn send(
    state: &AppState,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tok) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {tok}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("json body"))
        }
        None => Body::empty(),
    };

    let response = app(state)
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("router response");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, location, value)
}

fn sku_body(code: &str) -> Value {
    json!({
        "code": code,
        "name": "Ring",
        "length": "1.5",
        "width": "1.5",
        "height": "0.5",
        "weight": "2.5",
    })
}

#[tokio::test]
async fn gallery_routes_require_a_token() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let (status, _, body) = send(&state, Method::GET, "/categories/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["data"]["error"].is_string());

    let (status, _, _) = send(&state, Method::GET, "/skus/", None, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = issue_token("other-secret", Uuid::new_v4(), "staff", chrono::Duration::hours(1))?;
    let (status, _, _) = send(&state, Method::GET, "/spus/", None, Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = send(&state, Method::GET, "/stocks/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
    Ok(())
}

#[tokio::test]
async fn sku_add_without_a_usable_spu_redirects_to_the_list() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (_, leaf) = seed_categories(&state).await?;
    let spu = seed_spu(&state, "RING", leaf.id).await?;
    let tok = token();

    let (status, location, body) =
        send(&state, Method::GET, "/skus/add/", None, Some(&tok)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/skus/"));
    assert_eq!(body["data"]["level"], "error");

    let (status, location, body) = send(
        &state,
        Method::POST,
        "/skus/add/?spu=9999",
        Some(sku_body("RING-01")),
        Some(&tok),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/skus/"));
    assert_eq!(body["message"], "SPU does not exist");
    assert_eq!(Skus::find().count(&state.orm).await?, 0);

    let uri = format!("/skus/add/?spu={}", spu.id);
    let (status, _, body) = send(&state, Method::GET, &uri, None, Some(&tok)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["spu"]["code"], "RING");

    let (status, _, body) =
        send(&state, Method::POST, &uri, Some(sku_body("RING-01")), Some(&tok)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["spu_id"], spu.id);
    assert_eq!(body["data"]["color"], "无");
    assert_eq!(Skus::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn sku_add_checks_the_spu_before_the_body() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (_, leaf) = seed_categories(&state).await?;
    let spu = seed_spu(&state, "RING", leaf.id).await?;
    let tok = token();

    for uri in ["/skus/add/", "/skus/add/?spu=9999", "/skus/add/?spu=abc"] {
        let (status, location, body) =
            send(&state, Method::POST, uri, Some(json!({})), Some(&tok)).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location.as_deref(), Some("/skus/"));
        assert_eq!(body["data"]["level"], "error");
    }

    let uri = format!("/skus/add/?spu={}", spu.id);
    let (status, _, _) = send(&state, Method::POST, &uri, Some(json!({})), Some(&tok)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(Skus::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn huge_page_numbers_return_an_empty_page() -> anyhow::Result<()> {
    let state = setup_state().await?;
    seed_categories(&state).await?;
    let tok = token();

    for uri in [
        "/categories/?page=9223372036854775807",
        "/spus/?page=9223372036854775807",
        "/skus/?page=9223372036854775807",
    ] {
        let (status, _, body) = send(&state, Method::GET, uri, None, Some(&tok)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["meta"]["per_page"], 10);
    }

    let (_, _, body) = send(
        &state,
        Method::GET,
        "/categories/?page=9223372036854775807",
        None,
        Some(&tok),
    )
    .await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["meta"]["total"], 2);
    Ok(())
}

#[tokio::test]
async fn create_reports_field_errors() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (_, leaf) = seed_categories(&state).await?;
    let tok = token();

    let (status, _, body) = send(
        &state,
        Method::POST,
        "/spus/add/",
        Some(json!({
            "code": "ABC",
            "name": "Short code",
            "sales_channel": "online",
            "category_id": leaf.id,
        })),
        Some(&tok),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["errors"][0]["field"], "code");
    assert_eq!(Spus::find().count(&state.orm).await?, 0);

    let (status, _, body) = send(
        &state,
        Method::POST,
        "/spus/add/",
        Some(json!({
            "code": "ABCD",
            "name": "Band ring",
            "sales_channel": "online",
            "category_id": leaf.id,
        })),
        Some(&tok),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["code"], "ABCD");
    Ok(())
}

#[tokio::test]
async fn deletes_answer_with_a_flash() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (root, _) = seed_categories(&state).await?;
    let tok = token();

    let (status, location, body) =
        send(&state, Method::POST, "/spus/9999/delete/", None, Some(&tok)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/spus/"));
    assert_eq!(body["data"]["level"], "error");
    assert_eq!(body["message"], "Delete failed: record not found");

    let uri = format!("/categories/{}/delete/", root.id);
    let (status, location, body) = send(&state, Method::POST, &uri, None, Some(&tok)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/categories/"));
    assert_eq!(body["data"]["level"], "error");

    let (status, location, body) =
        send(&state, Method::POST, "/stocks/9999/delete/", None, None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/stocks/"));
    assert_eq!(body["data"]["level"], "error");
    Ok(())
}

#[tokio::test]
async fn sync_reports_its_outcome() -> anyhow::Result<()> {
    let tok = token();

    let state = setup_state_with_sync(FakeSync::ok(7)).await?;
    let (status, location, body) = send(&state, Method::GET, "/skus/sync/", None, Some(&tok)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/skus/"));
    assert_eq!(body["message"], "Synced 7 records");
    assert_eq!(body["data"]["level"], "success");

    let state = setup_state_with_sync(FakeSync {
        synced: Err("upstream unavailable".into()),
        cleaned: Ok(()),
    })
    .await?;
    let (status, _, body) = send(&state, Method::GET, "/skus/sync/", None, Some(&tok)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(body["message"], "Sync failed: upstream unavailable");
    assert_eq!(body["data"]["level"], "error");

    let state = setup_state_with_sync(FakeSync {
        synced: Ok(3),
        cleaned: Err("image store offline".into()),
    })
    .await?;
    let (status, location, body) = send(&state, Method::GET, "/skus/sync/", None, Some(&tok)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/skus/"));
    assert_eq!(body["message"], "Sync failed: image store offline");
    Ok(())
}

#[tokio::test]
async fn unknown_paths_fall_back_to_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (status, _, body) = send(&state, Method::GET, "/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nowhere");
    Ok(())
}
