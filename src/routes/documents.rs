use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info};
use uuid::Uuid;

use super::extract::AppJson;
use crate::models::{AppState, AskRequest, AskResponse, UploadResponse};
use crate::store::{DocumentRecord, DocumentSummary};
use crate::types::{AppError, AppResult};

const FILE_FIELD: &str = "file";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_document))
        .route("/ask", post(ask_question))
        .route("/documents", get(list_documents))
        .with_state(state)
}

/// POST /upload - Store, parse and register an uploaded document
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let (file_name, data) = read_file_field(&mut multipart).await?;
    let document_id = Uuid::new_v4().to_string();

    info!(document_id = %document_id, file_name = %file_name, bytes = data.len(), "Upload received");

    let file_path = state.uploads.save(&document_id, &file_name, &data).await?;

    let content = match state.parser.parse(&file_path).await {
        Ok(content) => content,
        Err(e) => {
            error!(document_id = %document_id, error = %e, "Document processing failed");
            state.uploads.remove(&file_path).await;
            return Err(e);
        }
    };

    let record = DocumentRecord::new(&document_id, file_name, file_path.clone(), content);
    if let Err(e) = state.documents.insert(record).await {
        error!(document_id = %document_id, error = %e, "Document registration failed");
        state.parser.discard(&file_path).await;
        state.uploads.remove(&file_path).await;
        return Err(e);
    }

    info!(document_id = %document_id, "Document uploaded and processed");

    Ok(Json(UploadResponse {
        message: "Document uploaded and processed successfully".to_string(),
        document_id,
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> AppResult<(String, bytes::Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await?;
        return Ok((file_name, data));
    }

    Err(AppError::InvalidRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// POST /ask - Answer a question about a stored document
pub async fn ask_question(
    State(state): State<AppState>,
    AppJson(request): AppJson<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    info!(document_id = %request.document_id, query_len = request.query.len(), "Question received");

    let record = state
        .documents
        .get(&request.document_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    let response = state.qa_model.answer(&record.content, &request.query).await?;

    Ok(Json(AskResponse {
        query: request.query,
        response,
        document: record.file_name,
    }))
}

/// GET /documents - List every stored document
pub async fn list_documents(State(state): State<AppState>) -> AppResult<Json<Vec<DocumentSummary>>> {
    let documents = state.documents.list().await?;
    Ok(Json(documents))
}
