//! API Routes
//!
//! - `POST /signup` - Account creation through the auth vendor
//! - `POST /upload` - Document upload and parsing
//! - `POST /ask` - Question answering over one stored document
//! - `GET /documents` - Stored document listing
//! - `GET /health` - Health check

pub mod documents;
pub mod extract;
pub mod health;
pub mod signup;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let body_limit = match state.config.server.max_upload_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };
    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(signup::router(state.clone()))
        .merge(documents::router(state.clone()))
        .merge(health::router(state))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}


#[cfg(test)]
mod tests {
    use super::test_support::{test_state, MockParser, MockQaModel};
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let temp_dir = TempDir::new().unwrap();
        let app = create_router(test_state(
            &temp_dir,
            Arc::new(MockParser::returning("T")),
            Arc::new(MockQaModel::answering("A")),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/ask")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_other_origin() {
        let temp_dir = TempDir::new().unwrap();
        let app = create_router(test_state(
            &temp_dir,
            Arc::new(MockParser::returning("T")),
            Arc::new(MockQaModel::answering("A")),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documents")
                    .header(header::ORIGIN, "http://evil.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
