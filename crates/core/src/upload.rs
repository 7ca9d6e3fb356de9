//! Photo upload validation and stored-file naming.

use std::path::Path;

use rand::Rng;

use crate::error::UploadError;
use crate::types::Timestamp;

/// Multipart field that carries the uploaded photo.
pub const UPLOAD_FIELD: &str = "photo";

/// Largest accepted photo (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extra request-body room for multipart boundaries and part headers on top
/// of [`MAX_UPLOAD_BYTES`].
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Exclusive upper bound of the random filename suffix.
const SUFFIX_RANGE: u32 = 1_000_000_000;

/// Accept only `image/*` MIME types. A missing content type is rejected.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), UploadError> {
    match content_type {
        Some(mime) if mime.to_ascii_lowercase().starts_with("image/") => Ok(()),
        Some(mime) => Err(UploadError::InvalidFileType(mime.to_string())),
        None => Err(UploadError::InvalidFileType("unknown".to_string())),
    }
}

/// Reject files larger than [`MAX_UPLOAD_BYTES`].
pub fn validate_size(len: usize) -> Result<(), UploadError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(UploadError::PayloadTooLarge {
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Build the stored filename: `photo-{millis}-{suffix}{.ext}`.
///
/// The extension is taken from the client's filename, lowercased, and kept
/// only if it is plain ASCII alphanumeric. Path components in the client
/// filename are ignored.
pub fn stored_filename(original_name: &str, millis: i64, suffix: u32) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{UPLOAD_FIELD}-{millis}-{suffix}{ext}")
}

/// Generate a collision-resistant filename from the current time and a
/// random suffix.
pub fn generate_filename(original_name: &str, now: Timestamp) -> String {
    let suffix = rand::rng().random_range(0..SUFFIX_RANGE);
    stored_filename(original_name, now.timestamp_millis(), suffix)
}

/// Join the public static prefix and a stored filename into a relative URL.
pub fn public_url(prefix: &str, filename: &str) -> String {
    format!("{}/{filename}", prefix.trim_end_matches('/'))
}
