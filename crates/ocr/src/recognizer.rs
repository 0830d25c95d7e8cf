use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
///
/// Implementations accept preprocessed PNG bytes and return the recognized
/// lines joined with `\n`, in scan order — the extraction rules depend on
/// that line order.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, RecognizeError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string — the seam for testing extraction and the HTTP
/// boundary without Tesseract installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Recognizer for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, RecognizeError> {
        Ok(self.text.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{RecognizeError, Recognizer};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl Recognizer for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, RecognizeError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| RecognizeError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| RecognizeError::ImageDecode(e.to_string()))?;
            let text = lt
                .get_utf8_text()
                .map_err(|e| RecognizeError::Engine(e.to_string()))?;
            // Tesseract terminates its output with a trailing newline that
            // would otherwise feed the line-positional rules an empty line.
            Ok(text.trim_end_matches('\n').to_string())
        }
    }
}
