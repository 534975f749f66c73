//! HTTP backend tests against an in-process server

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::client::{Backend, ClientError, HttpBackend, PageQuery};
use crate::config::BackendConfig;
use crate::models::UserStatus;

/// Bind a throwaway server for the given router and return its base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test app");
    });
    format!("http://{addr}")
}

fn backend_for(base_url: String) -> HttpBackend {
    HttpBackend::new(&BackendConfig {
        base_url,
        timeout_seconds: 2,
    })
    .expect("build http backend")
}

fn session_body() -> serde_json::Value {
    json!({
        "id": "0b6f7f71-1c62-4e6e-9c42-cc17db7f11ce",
        "userID": "9be32f1f-4d05-4fb2-a6b0-caa8f3e45bb4",
        "username": "cook",
        "token": "granted-token",
        "createdAt": "2024-01-02T10:00:00Z",
        "expiredAt": "2099-01-07T10:00:00Z"
    })
}

#[tokio::test]
async fn test_login_success_parses_session() {
    let app = Router::new().route("/auth/login", post(|| async { Json(session_body()) }));
    let backend = backend_for(serve(app).await);

    let session = backend.login("cook@example.com", "secret123").await.unwrap();

    assert_eq!(session.username, "cook");
    assert_eq!(session.token, "granted-token");
    assert_eq!(session.user_id, "9be32f1f-4d05-4fb2-a6b0-caa8f3e45bb4");
    assert!(session.is_valid());
}

#[tokio::test]
async fn test_login_receives_credentials_as_json() {
    let app = Router::new().route(
        "/auth/login",
        post(|Json(body): Json<serde_json::Value>| async move {
            if body["email"] == "cook@example.com" && body["password"] == "secret123" {
                Json(session_body()).into_response()
            } else {
                StatusCode::BAD_REQUEST.into_response()
            }
        }),
    );
    let backend = backend_for(serve(app).await);

    assert!(backend.login("cook@example.com", "secret123").await.is_ok());
}

#[tokio::test]
async fn test_login_non_2xx_is_wrong_credentials() {
    let app = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "wrong credentials"})),
            )
        }),
    );
    let backend = backend_for(serve(app).await);

    let err = backend.login("cook@example.com", "badpass1").await.unwrap_err();
    assert!(matches!(err, ClientError::WrongCredentials));
}

#[tokio::test]
async fn test_login_unreadable_body_is_transport_error() {
    let app = Router::new().route("/auth/login", post(|| async { "not json" }));
    let backend = backend_for(serve(app).await);

    let err = backend.login("cook@example.com", "secret123").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_list_recipes_passes_paging_and_parses_body() {
    let app = Router::new().route(
        "/recipes/list",
        post(|Query(params): Query<HashMap<String, String>>| async move {
            let size: u64 = params["size"].parse().unwrap_or(0);
            let page: u64 = params["page"].parse().unwrap_or(0);
            Json(json!({
                "recipes": [
                    {"title": "Borscht", "ingredients": [{"name": "beetroot"}]},
                    {"title": "Toast", "ingredients": null}
                ],
                "pagination": {"size": size, "page": page, "total": 2}
            }))
        }),
    );
    let backend = backend_for(serve(app).await);

    let list = backend
        .list_recipes(PageQuery { size: 5, page: 2 })
        .await
        .unwrap();

    assert_eq!(list.recipes.len(), 2);
    assert_eq!(list.recipes[0].title, "Borscht");
    assert_eq!(list.recipes[1].ingredient_summary(), "No ingredients");
    let pagination = list.pagination.unwrap();
    assert_eq!(pagination.size, 5);
    assert_eq!(pagination.page, 2);
}

#[tokio::test]
async fn test_list_recipes_missing_field_is_empty() {
    let app = Router::new().route("/recipes/list", post(|| async { Json(json!({})) }));
    let backend = backend_for(serve(app).await);

    let list = backend.list_recipes(PageQuery::default()).await.unwrap();
    assert!(list.recipes.is_empty());
}

#[tokio::test]
async fn test_list_recipes_failure_is_api_error() {
    let app = Router::new().route(
        "/recipes/list",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "recipes controller error"})),
            )
        }),
    );
    let backend = backend_for(serve(app).await);

    let err = backend.list_recipes(PageQuery::default()).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "recipes controller error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_profile_sends_bearer_token() {
    let app = Router::new().route(
        "/users/{id}",
        post(
            |Path(id): Path<String>, headers: HeaderMap| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|h| h.to_str().ok())
                    .map(|h| h == "Bearer granted-token")
                    .unwrap_or(false);
                if !authorized {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"error": "token does not exist"})),
                    )
                        .into_response();
                }
                Json(json!({"id": id, "name": "cook", "status": "user"})).into_response()
            },
        ),
    );
    let backend = backend_for(serve(app).await);

    let profile = backend
        .get_profile(
            "9be32f1f-4d05-4fb2-a6b0-caa8f3e45bb4",
            Some("granted-token"),
        )
        .await
        .unwrap();
    assert_eq!(profile.name, "cook");
    assert_eq!(profile.status, UserStatus::User);

    let err = backend
        .get_profile("9be32f1f-4d05-4fb2-a6b0-caa8f3e45bb4", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_register_success() {
    let app = Router::new().route(
        "/auth/register",
        post(|Json(body): Json<serde_json::Value>| async move {
            if body["username"] == "cook"
                && body["email"] == "cook@example.com"
                && body["password"] == body["repeatedPassword"]
            {
                StatusCode::OK.into_response()
            } else {
                StatusCode::BAD_REQUEST.into_response()
            }
        }),
    );
    let backend = backend_for(serve(app).await);

    backend
        .register("cook", "cook@example.com", "Secret12")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_conflict_is_api_error() {
    let app = Router::new().route(
        "/auth/register",
        post(|| async {
            (
                StatusCode::CONFLICT,
                Json(json!({"error": "user with such email address already exists"})),
            )
        }),
    );
    let backend = backend_for(serve(app).await);

    let err = backend
        .register("cook", "cook@example.com", "Secret12")
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 409);
            assert!(message.contains("already exists"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind a port, then drop the listener so nothing answers there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = backend_for(format!("http://{addr}"));
    let err = backend.login("cook@example.com", "secret123").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
