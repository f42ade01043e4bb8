//! Unstructured.io partition client
//!
//! Sends an uploaded file to the partition API, writes the returned element
//! list to `<output_dir>/<file name>.json` and reads that artifact back as the
//! document content.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use super::DocumentParser;
use crate::config::ParserConfig;
use crate::types::{AppError, AppResult};

const API_KEY_HEADER: &str = "unstructured-api-key";
const SPLIT_PDF_CONCURRENCY_LEVEL: u32 = 15;

pub struct UnstructuredParser {
    client: Client,
    api_key: String,
    endpoint: String,
    strategy: String,
    output_dir: PathBuf,
}

impl UnstructuredParser {
    pub fn new(config: &ParserConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            strategy: config.strategy.clone(),
            output_dir: output_dir.into(),
        }
    }

    /// Location of the artifact produced for `file_path`
    pub fn output_path(&self, file_path: &Path) -> PathBuf {
        let base = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(format!("{}.json", base))
    }

    async fn partition(&self, file_path: &Path) -> AppResult<serde_json::Value> {
        let data = fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(file_path).first_or_octet_stream();

        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime.as_ref())
            .map_err(|e| AppError::ParserApi(format!("Invalid content type: {}", e)))?;

        let form = multipart::Form::new()
            .part("files", part)
            .text("strategy", self.strategy.clone())
            .text("split_pdf_page", "true")
            .text("split_pdf_allow_failed", "true")
            .text(
                "split_pdf_concurrency_level",
                SPLIT_PDF_CONCURRENCY_LEVEL.to_string(),
            );

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .multipart(form);
        if !self.api_key.is_empty() {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ParserApi(format!("Partition request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ParserApi(format!(
                "Partition API error ({}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ParserApi(format!("Failed to parse partition response: {}", e)))
    }
}

#[async_trait]
impl DocumentParser for UnstructuredParser {
    async fn parse(&self, file_path: &Path) -> AppResult<String> {
        info!(path = %file_path.display(), strategy = %self.strategy, "Partitioning document");

        let elements = self.partition(file_path).await?;
        let element_count = elements.as_array().map(Vec::len).unwrap_or(0);

        fs::create_dir_all(&self.output_dir).await?;
        let output_path = self.output_path(file_path);
        fs::write(&output_path, serde_json::to_string_pretty(&elements)?).await?;
        debug!(path = %output_path.display(), elements = element_count, "Partition artifact written");

        read_artifact(&output_path).await
    }

    async fn discard(&self, file_path: &Path) {
        let output_path = self.output_path(file_path);
        match fs::remove_file(&output_path).await {
            Ok(()) => debug!(path = %output_path.display(), "Partition artifact removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %output_path.display(), error = %e, "Failed to remove artifact"),
        }
    }
}

/// Content of a parser artifact, or an empty string when none was produced
pub async fn read_artifact(path: &Path) -> AppResult<String> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}
