use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use idscan_ocr::ScanPipeline;
use idscan_server::config::ServerConfig;
use idscan_server::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("idscan_server=info,idscan_ocr=info,tower_http=info")
        }))
        .init();

    let config_path =
        std::env::var("IDSCAN_CONFIG").unwrap_or_else(|_| "idscan.toml".to_string());
    let config = ServerConfig::load(&PathBuf::from(&config_path))
        .with_context(|| format!("loading config from {config_path}"))?;

    let uploads_dir = config.uploads_dir();
    std::fs::create_dir_all(&uploads_dir).context("creating uploads directory")?;

    let state = Arc::new(AppState {
        pipeline: build_pipeline(&config),
        uploads_dir,
        max_upload_bytes: config.max_upload_bytes,
    });

    let router = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(feature = "tesseract")]
fn build_pipeline(config: &ServerConfig) -> ScanPipeline {
    use idscan_ocr::recognizer::tesseract_backend::TesseractRecognizer;

    ScanPipeline::new(
        TesseractRecognizer::new(config.tesseract_data_path.clone(), &config.tesseract_lang),
        config.uploads_dir(),
        config.ocr_timeout(),
    )
}

#[cfg(not(feature = "tesseract"))]
fn build_pipeline(config: &ServerConfig) -> ScanPipeline {
    use idscan_ocr::MockRecognizer;

    tracing::warn!("built without the `tesseract` feature — OCR will return empty text");
    ScanPipeline::new(
        MockRecognizer::new(""),
        config.uploads_dir(),
        config.ocr_timeout(),
    )
}
