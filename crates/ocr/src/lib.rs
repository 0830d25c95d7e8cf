pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod store;

pub use extract::Extractor;
pub use pipeline::{PipelineError, ScanPipeline, ScanReport};
pub use preprocess::{prepare_for_ocr, prepare_for_ocr_from_bytes, PreprocessError};
pub use recognizer::{MockRecognizer, RecognizeError, Recognizer};
pub use store::{sha256_hex, upload_path};
