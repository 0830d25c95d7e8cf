use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use idscan_core::{DocumentFields, DocumentKind};

use crate::extract::Extractor;
use crate::preprocess;
use crate::recognizer::{RecognizeError, Recognizer};
use crate::store;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] preprocess::PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Recognize(#[from] RecognizeError),
    #[error("OCR recognition did not finish within {0:?}")]
    RecognizeTimeout(Duration),
}

/// The result of processing a single uploaded document.
#[derive(Debug)]
pub struct ScanReport {
    /// SHA-256 hex digest of the original file — the content-addressed key.
    pub hash_hex: String,
    /// Where the original upload was stored.
    pub stored_path: PathBuf,
    /// Raw OCR text, lines joined with `\n` in scan order.
    pub ocr_text: String,
    /// Document classification derived from the text.
    pub kind: DocumentKind,
    /// The extracted field mapping.
    pub fields: DocumentFields,
}

/// Orchestrates: hash → content-store → preprocess → OCR → extract.
///
/// One synchronous request-response per document; a failure at any stage
/// aborts the whole run. OCR latency dominates, so the recognition step is
/// the one place a timeout is imposed.
pub struct ScanPipeline {
    recognizer: Arc<dyn Recognizer>,
    uploads_dir: PathBuf,
    ocr_timeout: Duration,
}

impl ScanPipeline {
    pub fn new(
        recognizer: impl Recognizer + 'static,
        uploads_dir: PathBuf,
        ocr_timeout: Duration,
    ) -> Self {
        Self { recognizer: Arc::new(recognizer), uploads_dir, ocr_timeout }
    }

    /// Process a file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ScanReport, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_lowercase();
        self.process_bytes(&bytes, &ext).await
    }

    /// Process raw upload bytes.
    pub async fn process_bytes(&self, data: &[u8], ext: &str) -> Result<ScanReport, PipelineError> {
        // 1. Hash for content addressing; store the original.
        let hash_hex = store::sha256_hex(data);
        let dest = store::upload_path(&self.uploads_dir, &hash_hex, ext);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, data).await?;

        // 2. Preprocess for recognition.
        let image_bytes = preprocess::prepare_for_ocr_from_bytes(data)?;

        // 3. OCR on the blocking pool, bounded by the configured timeout.
        let ocr_text = self.recognize_with_timeout(image_bytes).await?;

        // 4. Classify and extract.
        let kind = Extractor::classify(&ocr_text);
        let fields = Extractor::extract(&ocr_text);
        tracing::debug!(%kind, matched = fields.len(), "extracted document fields");

        Ok(ScanReport { hash_hex, stored_path: dest, ocr_text, kind, fields })
    }

    async fn recognize_with_timeout(
        &self,
        image_bytes: Vec<u8>,
    ) -> Result<String, PipelineError> {
        let recognizer = Arc::clone(&self.recognizer);
        let task = tokio::task::spawn_blocking(move || recognizer.recognize(&image_bytes));
        match tokio::time::timeout(self.ocr_timeout, task).await {
            Err(_) => Err(PipelineError::RecognizeTimeout(self.ocr_timeout)),
            Ok(Err(join)) => {
                Err(RecognizeError::Engine(format!("OCR task aborted: {join}")).into())
            }
            Ok(Ok(result)) => Ok(result?),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::MockRecognizer;
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
    use std::io::Cursor;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn tiny_png() -> Vec<u8> {
        let img: GrayImage = ImageBuffer::from_fn(4, 4, |_, _| Luma([220u8]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    struct SlowRecognizer;

    impl Recognizer for SlowRecognizer {
        fn recognize(&self, _image_bytes: &[u8]) -> Result<String, RecognizeError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(String::new())
        }
    }

    struct FailingRecognizer;

    impl Recognizer for FailingRecognizer {
        fn recognize(&self, _image_bytes: &[u8]) -> Result<String, RecognizeError> {
            Err(RecognizeError::Engine("no text layer".into()))
        }
    }

    #[tokio::test]
    async fn process_bytes_produces_scan_report() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ScanPipeline::new(
            MockRecognizer::new("P<GBRSMITH<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<\n123456789"),
            dir.path().to_path_buf(),
            TIMEOUT,
        );

        let report = pipeline.process_bytes(&tiny_png(), "png").await.unwrap();

        assert_eq!(report.hash_hex.len(), 64);
        assert!(report.stored_path.exists());
        assert_eq!(report.kind, DocumentKind::Passport);
        assert_eq!(report.fields.passport_number.as_deref(), Some("123456789"));
        assert_eq!(report.fields.last_name.as_deref(), Some("SMITH"));
    }

    #[tokio::test]
    async fn process_bytes_dedup_path_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ScanPipeline::new(
            MockRecognizer::new("irrelevant"),
            dir.path().to_path_buf(),
            TIMEOUT,
        );
        let data = tiny_png();

        let r1 = pipeline.process_bytes(&data, "png").await.unwrap();
        let r2 = pipeline.process_bytes(&data, "png").await.unwrap();

        assert_eq!(r1.hash_hex, r2.hash_hex);
        assert_eq!(r1.stored_path, r2.stored_path);
    }

    #[tokio::test]
    async fn process_file_uses_extension_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.PNG");
        tokio::fs::write(&input, tiny_png()).await.unwrap();

        let pipeline =
            ScanPipeline::new(MockRecognizer::new(""), dir.path().to_path_buf(), TIMEOUT);
        let report = pipeline.process_file(&input).await.unwrap();

        assert!(report.stored_path.to_string_lossy().ends_with(".png"));
        assert!(report.fields.is_empty());
    }

    #[tokio::test]
    async fn unreadable_bytes_fail_at_preprocess() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline =
            ScanPipeline::new(MockRecognizer::new(""), dir.path().to_path_buf(), TIMEOUT);
        let err = pipeline.process_bytes(b"not an image", "bin").await.unwrap_err();
        assert!(matches!(err, PipelineError::Preprocess(_)));
    }

    #[tokio::test]
    async fn recognizer_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline =
            ScanPipeline::new(FailingRecognizer, dir.path().to_path_buf(), TIMEOUT);
        let err = pipeline.process_bytes(&tiny_png(), "png").await.unwrap_err();
        assert!(matches!(err, PipelineError::Recognize(_)));
    }

    #[tokio::test]
    async fn slow_recognizer_hits_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ScanPipeline::new(
            SlowRecognizer,
            dir.path().to_path_buf(),
            Duration::from_millis(50),
        );
        let err = pipeline.process_bytes(&tiny_png(), "png").await.unwrap_err();
        assert!(matches!(err, PipelineError::RecognizeTimeout(_)));
    }
}
