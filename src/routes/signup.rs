use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use super::extract::AppJson;
use crate::models::{AppState, SignupData, SignupRequest, SignupResponse};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .with_state(state)
}

/// POST /signup - Create an account through the auth vendor
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignupRequest>,
) -> AppResult<Json<SignupResponse>> {
    info!(email = %request.email, "Signup request received");

    let user = state.auth.sign_up(&request.email, &request.password).await?;

    if !user.is_confirmed() {
        return Err(AppError::Auth("User creation failed.".to_string()));
    }

    Ok(Json(SignupResponse {
        message: "User created successfully".to_string(),
        data: SignupData {
            id: user.id,
            email: user.email,
            created_at: user.created_at.map(|t| t.to_rfc3339()),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use crate::routes::test_support::{test_state_with_auth, MockAuth, MockParser, MockQaModel};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn post_signup(auth: MockAuth) -> (StatusCode, serde_json::Value) {
        post_signup_body(auth, r#"{"email": "ada@example.com", "password": "hunter22"}"#).await
    }

    async fn post_signup_body(auth: MockAuth, json: &'static str) -> (StatusCode, serde_json::Value) {
        let temp_dir = TempDir::new().unwrap();
        let app = router(test_state_with_auth(
            &temp_dir,
            Arc::new(MockParser::returning("")),
            Arc::new(MockQaModel::answering("")),
            Arc::new(auth),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn user(confirmed: bool) -> AuthUser {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        AuthUser {
            id: "user-1".to_string(),
            email: Some("ada@example.com".to_string()),
            created_at: Some(created),
            confirmed_at: confirmed.then_some(created),
        }
    }

    #[tokio::test]
    async fn test_confirmed_signup() {
        let (status, body) = post_signup(MockAuth { user: Some(user(true)) }).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["data"]["id"], "user-1");
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert_eq!(body["data"]["created_at"], "2024-05-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn test_unconfirmed_signup_is_400() {
        let (status, body) = post_signup(MockAuth { user: Some(user(false)) }).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "User creation failed.");
    }

    #[tokio::test]
    async fn test_auth_service_failure_is_500() {
        let (status, body) = post_signup(MockAuth { user: None }).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("auth service unreachable"));
    }

    #[tokio::test]
    async fn test_missing_password_is_422_with_detail() {
        let (status, body) = post_signup_body(
            MockAuth { user: Some(user(true)) },
            r#"{"email": "ada@example.com"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("missing field `password`"));
    }
}
