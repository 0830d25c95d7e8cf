use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// SHA-256 of an uploaded document as a lowercase hex string (64 chars).
/// The digest is the storage key: identical bytes always land on the same
/// path.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Content-addressed location of a stored upload.
/// Layout: `<uploads>/<first_2_hex_chars>/<full_hex>.<ext>`
pub fn upload_path(uploads_dir: &Path, hash_hex: &str, ext: &str) -> PathBuf {
    uploads_dir
        .join(&hash_hex[..2])
        .join(format!("{hash_hex}.{ext}"))
}
