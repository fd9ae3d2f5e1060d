use axum::{extract::Path, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{auth::extractors::ActiveUser, state::AppState, users::repo_types::User};

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: String,
}

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/hello/:name", get(say_hello))
        .route("/users/me", get(get_me))
}

pub async fn say_hello(Path(name): Path<String>) -> Json<Greeting> {
    Json(Greeting {
        message: format!("Hello {name}"),
    })
}

#[instrument(skip_all)]
pub async fn get_me(ActiveUser(user): ActiveUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::FromRef,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        app::build_app,
        auth::jwt::JwtKeys,
        users::memory::{sample_user, MemoryUserStore},
    };

    use super::*;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn get_with(uri: &str, name: header::HeaderName, value: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// App with one active and one inactive user, plus a token signer.
    fn fixture() -> (Router, Arc<MemoryUserStore>, JwtKeys) {
        let store = Arc::new(MemoryUserStore::with_users([
            sample_user("alice", "wonderland", true),
            sample_user("mad-hatter", "tea-party", false),
        ]));
        let state = AppState::fake(store.clone());
        let keys = JwtKeys::from_ref(&state);
        (build_app(state), store, keys)
    }

    #[tokio::test]
    async fn hello_greets_by_name() {
        let (app, _, _) = fixture();
        let res = app.oneshot(get("/hello/Alice")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({"message": "Hello Alice"}));
    }

    #[tokio::test]
    async fn hello_decodes_path_segment() {
        let (app, _, _) = fixture();
        let res = app.oneshot(get("/hello/Mary%20Ann")).await.unwrap();
        assert_eq!(body_json(res).await["message"], "Hello Mary Ann");
    }

    #[tokio::test]
    async fn me_returns_active_user_for_bearer_token() {
        let (app, _, keys) = fixture();
        let token = keys.sign("alice").unwrap();
        let res = app
            .oneshot(get_with("/users/me", header::AUTHORIZATION, &format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["username"], "alice");
        assert!(body.get("hashed_password").is_none());
    }

    #[tokio::test]
    async fn me_accepts_session_cookie() {
        let (app, _, keys) = fixture();
        let token = keys.sign("alice").unwrap();
        let res = app
            .oneshot(get_with("/users/me", header::COOKIE, &format!("session={token}")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn me_rejects_inactive_user_with_400() {
        let (app, _, keys) = fixture();
        let token = keys.sign("mad-hatter").unwrap();
        let res = app
            .oneshot(get_with("/users/me", header::AUTHORIZATION, &format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["detail"], "Inactive user");
    }

    #[tokio::test]
    async fn me_sees_deactivation_on_next_request() {
        let (app, store, keys) = fixture();
        let token = keys.sign("alice").unwrap();
        store.set_active("alice", false);
        let res = app
            .oneshot(get_with("/users/me", header::AUTHORIZATION, &format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn me_rejects_missing_invalid_or_orphan_tokens() {
        let (app, _, keys) = fixture();
        let orphan = keys.sign("cheshire").unwrap();
        let requests = [
            get("/users/me"),
            get_with("/users/me", header::AUTHORIZATION, "Bearer not-a-token"),
            get_with("/users/me", header::AUTHORIZATION, &format!("Bearer {orphan}")),
        ];
        for req in requests {
            let res = app.clone().oneshot(req).await.unwrap();
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
            assert_eq!(
                body_json(res).await["detail"],
                "Could not validate credentials"
            );
        }
    }
}
