use image::{DynamicImage, GrayImage};
use imageproc::filter::median_filter;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Ink is darker than the threshold; everything else is treated as paper.
const BINARIZE_THRESHOLD: u8 = 200;

/// Load an image file, clean it up, and return PNG bytes ready for OCR.
pub fn prepare_for_ocr(path: &Path) -> Result<Vec<u8>, PreprocessError> {
    let img = image::open(path)?;
    encode_as_png(clean(img))
}

/// Clean raw image bytes (JPEG / PNG / WEBP / …) and return PNG bytes.
pub fn prepare_for_ocr_from_bytes(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(clean(img))
}

/// Grayscale → binarize → despeckle.
///
/// Identity documents are dark print on a light background; the 3×3 median
/// pass drops the salt-and-pepper specks that thresholding a photo leaves.
fn clean(img: DynamicImage) -> GrayImage {
    // Down-scale very large camera shots (recognition plateaus around
    // 300 DPI / ~2000 px).
    let img = if img.width() > 2800 || img.height() > 2800 {
        img.resize(2800, 2800, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };

    let gray: GrayImage = img.to_luma8();

    let mut binary = gray;
    for pixel in binary.pixels_mut() {
        pixel[0] = if pixel[0] >= BINARIZE_THRESHOLD { 255 } else { 0 };
    }

    median_filter(&binary, 1, 1)
}

fn encode_as_png(img: GrayImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
