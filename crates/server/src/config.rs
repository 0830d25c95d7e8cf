use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration, loaded from a TOML file. Every field has a
/// default, so a missing file or a partial file both work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Uploads are stored under `<data_dir>/uploads`.
    pub data_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Cap on a single OCR run. Recognition dominates request latency, so
    /// this is the only timeout in the pipeline.
    pub ocr_timeout_secs: u64,
    /// Tesseract tessdata directory; `None` uses the system default.
    pub tesseract_data_path: Option<String>,
    pub tesseract_lang: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8330".to_string(),
            data_dir: PathBuf::from("data"),
            max_upload_bytes: 10 * 1024 * 1024,
            ocr_timeout_secs: 30,
            tesseract_data_path: None,
            tesseract_lang: "eng".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    pub fn ocr_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr_timeout_secs)
    }
}
