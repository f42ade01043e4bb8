// Document parsing capability
// Text extraction is delegated to an external vendor behind `DocumentParser`.

pub mod unstructured;

pub use unstructured::*;

use async_trait::async_trait;
use std::path::Path;

use crate::types::AppResult;

#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Extract the text of a file already written to local storage
    async fn parse(&self, file_path: &Path) -> AppResult<String>;

    /// Drop any artifact `parse` left behind for `file_path`
    async fn discard(&self, _file_path: &Path) {}
}
