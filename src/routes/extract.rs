// Request extractors whose rejections render as `AppError` bodies

use axum::extract::FromRequest;

use crate::types::AppError;

/// `Json` that reports malformed bodies as `{"detail": ...}`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
