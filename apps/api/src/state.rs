use std::sync::Arc;

use crate::extraction::TextExtractor;
use crate::llm_client::ChatModel;
use crate::storage::UploadStore;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Chat-completion backend. Default: `LlmClient`.
    pub llm: Arc<dyn ChatModel>,
    pub extractor: Arc<TextExtractor>,
    /// Present only when `S3_BUCKET` is configured.
    pub uploads: Option<UploadStore>,
}
