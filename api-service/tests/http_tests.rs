mod common;

use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

use common::lazy_router;

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_health_returns_no_content() {
    let (router, _) = lazy_router();

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (router, _) = lazy_router();

    let response = router
        .oneshot(post_json("/api/teams", None, json!({ "name": "Reds" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    let body = json_body(response).await;
    assert_eq!(body["status_code"], 401);
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let (router, authenticator) = lazy_router();
    let mut token = authenticator.issue_access_token("tester").unwrap();
    token.push('x');

    let response = router
        .oneshot(post_json(
            "/api/players",
            Some(&token),
            json!({ "name": "Alice" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_team_name_is_unprocessable() {
    let (router, authenticator) = lazy_router();
    let token = authenticator.issue_access_token("tester").unwrap();

    let response = router
        .oneshot(post_json("/api/teams", Some(&token), json!({ "name": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Name cannot be empty"));
}

#[tokio::test]
async fn test_malformed_team_id_is_bad_request() {
    let (router, authenticator) = lazy_router();
    let token = authenticator.issue_access_token("tester").unwrap();

    let response = router
        .oneshot(post_json(
            "/api/teams/not-a-uuid/players",
            Some(&token),
            json!({ "player_id": uuid::Uuid::now_v7().to_string() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_roster_lookup_does_not_require_token() {
    let (router, _) = lazy_router();

    let response = router
        .oneshot(
            Request::get("/api/teams/not-a-uuid/players")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Rejected on the id, not on authentication
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
