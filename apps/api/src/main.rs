mod analysis;
mod config;
mod dashboard;
mod db;
mod errors;
mod extraction;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::{PdfExtractLayer, TesseractCli, TextExtractor};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::UploadStore;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing DATABASE_URL / OPENAI_API_KEY
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mentra API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let extractor = TextExtractor::new(
        Arc::new(PdfExtractLayer),
        Arc::new(TesseractCli::new(
            config.tesseract_path.clone(),
            config.pdftoppm_path.clone(),
            config.ocr_timeout,
        )),
    );

    let uploads = match &config.s3 {
        Some(s3) => {
            let uploads = UploadStore::from_config(s3).await;
            info!("Upload storage enabled (bucket: {})", s3.bucket);
            Some(uploads)
        }
        None => {
            info!("S3_BUCKET not set, uploaded files will not be stored");
            None
        }
    };

    let state = AppState {
        store,
        llm: Arc::new(llm),
        extractor: Arc::new(extractor),
        uploads,
    };

    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
