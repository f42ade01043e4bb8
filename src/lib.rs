// DocQuery - document upload and question answering over external vendors

pub mod config;
pub mod types;
pub mod models;
pub mod store;
pub mod storage;
pub mod parser;
pub mod llm;
pub mod agents;
pub mod auth;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use types::{AppError, AppResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
