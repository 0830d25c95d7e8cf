pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use std::path::PathBuf;

use idscan_ocr::ScanPipeline;

/// Shared state for the HTTP boundary.
pub struct AppState {
    pub pipeline: ScanPipeline,
    /// Root of the content-addressed upload store.
    pub uploads_dir: PathBuf,
    /// Request body cap applied to the scan endpoint.
    pub max_upload_bytes: usize,
}
