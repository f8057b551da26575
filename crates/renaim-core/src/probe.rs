//! Read-only collaborators that gather facts about a file.
//!
//! Everything here is blocking I/O; the synthesizer runs these calls on
//! tokio's blocking pool through [`blocking`].

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use image::{ImageFormat, ImageReader};
use jiff::{tz::TimeZone, Timestamp};
use md5::{Digest, Md5};
use tokio::task;

use crate::config::TimestampSource;
use crate::error::{IoResultExt, RenameError, Result};
use crate::models::Dimensions;

/// Extensions treated as images without looking at the content.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Case-insensitive check against [`IMAGE_EXTENSIONS`].
pub fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(extension))
}

/// Whether the file's leading bytes look like an image format we can decode.
pub fn sniff_image(path: &Path) -> bool {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map(|reader| reader.format().is_some_and(|format| format.reading_enabled()))
        .unwrap_or(false)
}

/// Reads the pixel size from the image header.
///
/// # Errors
///
/// Returns `RenameError::NotAnImage` when the content is not a decodable
/// image, `RenameError::FileSystem` when the file cannot be opened.
pub fn read_image_dimensions(path: &Path) -> Result<Dimensions> {
    let reader = ImageReader::open(path)
        .fs_context(path)?
        .with_guessed_format()
        .fs_context(path)?;

    if reader.format().is_none() {
        return Err(RenameError::NotAnImage {
            path: path.to_path_buf(),
            reason: "unrecognized image format".to_string(),
        });
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| RenameError::NotAnImage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(Dimensions { width, height })
}

/// MD5 digest of the raw file bytes as 32 lowercase hex characters.
pub fn compute_content_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path).fs_context(path)?;
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let read = file.read(&mut buf).fs_context(path)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect())
}

/// Formats the file's creation (or modification) time in the system time
/// zone with a strftime pattern.
///
/// # Errors
///
/// Returns `RenameError::MetadataUnavailable` if the requested time cannot
/// be read.
pub fn fetch_timestamp(path: &Path, source: TimestampSource, format: &str) -> Result<String> {
    let unavailable = |source: std::io::Error| RenameError::MetadataUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(unavailable)?;
    let time = match source {
        TimestampSource::Created => metadata.created().or_else(|_| metadata.modified()),
        TimestampSource::Modified => metadata.modified(),
    }
    .map_err(unavailable)?;

    let timestamp =
        Timestamp::try_from(time).map_err(|e| unavailable(std::io::Error::other(e)))?;
    let zoned = timestamp.to_zoned(TimeZone::system());

    jiff::fmt::strtime::format(format, &zoned)
        .map_err(|e| RenameError::invalid_config("timestamp_format").with_reason(e.to_string()))
}

/// MIME type used when shipping the image to the description service.
pub fn image_mime_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("image/jpeg")
}

/// Runs a blocking probe on tokio's blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| RenameError::Task {
            message: format!("Task join error: {e}"),
        })?
}
