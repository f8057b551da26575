#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use jiff::tz::TimeZone;
use renaim_core::{DescribeError, Describer};

/// Helper function to write a blank image of the given size
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    RgbImage::new(width, height)
        .save_with_format(&path, format)
        .expect("Failed to write test image");
    path
}

/// Helper function to write a plain file
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Sets the modification time to a local wall-clock time
pub fn set_local_mtime(path: &Path, year: i16, month: i8, day: i8, hour: i8, minute: i8, second: i8) {
    let timestamp = jiff::civil::date(year, month, day)
        .at(hour, minute, second, 0)
        .to_zoned(TimeZone::system())
        .expect("Invalid test time")
        .timestamp();
    std::fs::File::options()
        .write(true)
        .open(path)
        .expect("Failed to open test file")
        .set_modified(SystemTime::from(timestamp))
        .expect("Failed to set mtime");
}

/// Describer returning a canned answer, or failing when there is none
pub struct StubDescriber {
    answer: Option<String>,
    calls: AtomicUsize,
}

impl StubDescriber {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Describer for StubDescriber {
    async fn describe(
        &self,
        image: Vec<u8>,
        _mime: &str,
        api_key: &str,
    ) -> Result<String, DescribeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(!image.is_empty(), "describer received no image bytes");
        assert!(!api_key.is_empty(), "describer received no API key");
        self.answer.clone().ok_or(DescribeError::Unauthorized)
    }
}
