use std::sync::Arc;

use tracing::warn;

use crate::agents::{AnswerAgent, QaModel};
use crate::auth::{AuthService, SupabaseAuth};
use crate::config::Config;
use crate::parser::{DocumentParser, UnstructuredParser};
use crate::storage::UploadStorage;
use crate::store::{DocumentStore, InMemoryDocumentStore};
use crate::types::AppResult;

/// Shared handler state. Every vendor sits behind a trait object so tests can
/// swap in mocks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub documents: Arc<dyn DocumentStore>,
    pub uploads: UploadStorage,
    pub parser: Arc<dyn DocumentParser>,
    pub qa_model: Arc<dyn QaModel>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// Wire the vendor-backed implementations described by `config`
    pub fn from_config(config: Config) -> AppResult<Self> {
        if config.llm.api_key.is_empty() {
            warn!(provider = %config.llm.provider, "No LLM API key configured, /ask will fail");
        }
        if config.parser.api_key.is_empty() {
            warn!("UNSTRUCTUREDIO_API_KEY not set, partition requests are unauthenticated");
        }
        if config.auth.supabase_url.is_empty() {
            warn!("SUPABASE_URL not set, /signup will fail");
        }

        let uploads = UploadStorage::from_config(&config.storage);
        let parser = UnstructuredParser::new(&config.parser, uploads.output_dir());
        let qa_model = AnswerAgent::from_config(&config.llm)?;
        let auth = SupabaseAuth::from_config(&config.auth);

        Ok(Self {
            config: Arc::new(config),
            documents: Arc::new(InMemoryDocumentStore::new()),
            uploads,
            parser: Arc::new(parser),
            qa_model: Arc::new(qa_model),
            auth: Arc::new(auth),
        })
    }
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub data: SignupData,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SignupData {
    pub id: String,
    pub email: Option<String>,
    /// RFC 3339 creation time as reported by the auth vendor
    pub created_at: Option<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub document_id: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct AskRequest {
    pub document_id: String,
    pub query: String,
}

/// Answer format matching frontend expectations: `{query, response, document}`
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct AskResponse {
    pub query: String,
    pub response: String,
    /// Original file name of the queried document
    pub document: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub documents: usize,
    pub llm_provider: String,
}
