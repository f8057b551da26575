mod common;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::{set_local_mtime, write_file, write_image, StubDescriber};
use image::ImageFormat;
use renaim_core::naming::occupied_on_disk;
use renaim_core::{
    FileTask, NamingConfig, OperationKind, RenameError, Synthesizer, TimestampPosition,
    TimestampSource,
};
use tempfile::TempDir;

fn synthesizer(config: NamingConfig) -> Synthesizer {
    Synthesizer::new(config)
}

#[tokio::test]
async fn test_no_rules_is_identity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "photo.png", 4, 4, ImageFormat::Png);

    let config = NamingConfig::builder().build().unwrap();
    let task = FileTask::from_path(&path).unwrap();
    let plan = synthesizer(config)
        .synthesize(&task, occupied_on_disk)
        .await
        .expect("Failed to synthesize");

    assert_eq!(plan.target, path);
    assert_eq!(plan.kind, OperationKind::Rename);
    assert!(plan.is_noop());
}

#[tokio::test]
async fn test_no_rules_with_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let out_dir = temp_dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();
    let path = write_image(temp_dir.path(), "photo.png", 4, 4, ImageFormat::Png);

    let config = NamingConfig::builder()
        .with_output_directory(Some(&out_dir))
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target, out_dir.join("photo.png"));
}

#[tokio::test]
async fn test_trailing_dot_survives_identity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(temp_dir.path(), "notes.", b"text");

    let config = NamingConfig::builder().with_all_extensions(true).build().unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target, path);
    assert!(plan.is_noop());
}

#[tokio::test]
async fn test_trailing_dot_kept_after_suffix() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(temp_dir.path(), "notes.", b"text");

    let config = NamingConfig::builder()
        .with_all_extensions(true)
        .with_suffix(Some("_v2"))
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target_name(), "notes_v2.");
}

#[tokio::test]
async fn test_prefix_and_resolution_keep_extension_case() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "photo.JPG", 1024, 768, ImageFormat::Jpeg);

    let config = NamingConfig::builder()
        .with_resolution(true)
        .with_prefix(Some("vac_"))
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target, temp_dir.path().join("vac_photo_1024x768.JPG"));
}

#[tokio::test]
async fn test_resolution_of_full_hd_image() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "wall.png", 1920, 1080, ImageFormat::Png);

    let config = NamingConfig::builder().with_resolution(true).build().unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert!(plan.target_name().contains("1920x1080"));
}

#[tokio::test]
async fn test_timestamp_pre_with_known_time() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "img.png", 2, 2, ImageFormat::Png);
    set_local_mtime(&path, 2023, 7, 1, 12, 0, 0);

    let config = NamingConfig::builder()
        .with_timestamp(TimestampPosition::Pre)
        .with_timestamp_format(Some("%Y-%m-%d_%H%M%S"))
        .with_timestamp_source(TimestampSource::Modified)
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target_name(), "2023-07-01_120000_img.png");
}

#[tokio::test]
async fn test_timestamp_post_default_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "img.png", 2, 2, ImageFormat::Png);
    set_local_mtime(&path, 2021, 12, 24, 18, 30, 0);

    let config = NamingConfig::builder()
        .with_timestamp(TimestampPosition::Post)
        .with_timestamp_source(TimestampSource::Modified)
        .with_suffix(Some("_xmas"))
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target_name(), "img_xmas_2021-12-24.png");
}

#[tokio::test]
async fn test_created_timestamp_is_available() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "img.png", 2, 2, ImageFormat::Png);

    let config = NamingConfig::builder()
        .with_timestamp(TimestampPosition::Pre)
        .with_timestamp_format(Some("%Y"))
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    let name = plan.target_name();
    let (year, rest) = name.split_once('_').expect("No timestamp separator");
    assert_eq!(year.len(), 4);
    assert!(year.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(rest, "img.png");
}

#[tokio::test]
async fn test_hash_naming_is_deterministic() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "IMG_0001.png", 8, 8, ImageFormat::Png);

    let config = NamingConfig::builder().with_hash(true).build().unwrap();
    let task = FileTask::from_path(&path).unwrap();

    let first = synthesizer(config.clone())
        .synthesize(&task, occupied_on_disk)
        .await
        .unwrap();
    let second = synthesizer(config)
        .synthesize(&task, occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(first.target, second.target);
    let name = first.target_name();
    let stem = name.strip_suffix(".png").expect("Extension not preserved");
    assert_eq!(stem.len(), 32);
    assert!(stem.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[tokio::test]
async fn test_existing_target_is_disambiguated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "img.png", 2, 2, ImageFormat::Png);
    write_file(temp_dir.path(), "new_img.png", b"occupied");

    let config = NamingConfig::builder().with_prefix(Some("new_")).build().unwrap();
    let synth = synthesizer(config);
    let task = FileTask::from_path(&path).unwrap();

    let plan = synth.synthesize(&task, occupied_on_disk).await.unwrap();
    assert_eq!(plan.target, temp_dir.path().join("new_img_1.png"));

    // Earlier assignments in the same occupied set are never reused.
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    claimed.insert(plan.target.clone());
    let next = synth
        .synthesize(&task, |p| occupied_on_disk(p) || claimed.contains(p))
        .await
        .unwrap();
    assert_eq!(next.target, temp_dir.path().join("new_img_2.png"));
}

#[tokio::test]
async fn test_symlink_never_targets_its_source() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "img.png", 2, 2, ImageFormat::Png);

    let config = NamingConfig::builder()
        .with_operation(OperationKind::Symlink)
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target, temp_dir.path().join("img_1.png"));
    assert_eq!(plan.kind, OperationKind::Symlink);
}

#[tokio::test]
async fn test_description_replaces_base_name() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "DSC0042.jpeg", 4, 4, ImageFormat::Jpeg);
    let describer = Arc::new(StubDescriber::answering("Golden Retriever on Beach.jpg"));

    let config = NamingConfig::builder()
        .with_description(true)
        .with_api_key(Some("sk-test"))
        .with_resolution(true)
        .build()
        .unwrap();
    let plan = Synthesizer::new(config)
        .with_describer(describer.clone())
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target_name(), "golden_retriever_on_beach_4x4.jpeg");
    assert_eq!(describer.calls(), 1);
}

#[tokio::test]
async fn test_description_failure_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "cat.png", 4, 4, ImageFormat::Png);

    let config = NamingConfig::builder()
        .with_description(true)
        .with_api_key(Some("sk-test"))
        .build()
        .unwrap();
    let err = Synthesizer::new(config)
        .with_describer(Arc::new(StubDescriber::failing()))
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap_err();

    assert!(matches!(err, RenameError::DescriptionFailed { .. }));
}

#[tokio::test]
async fn test_blank_description_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "cat.png", 4, 4, ImageFormat::Png);

    let config = NamingConfig::builder()
        .with_description(true)
        .with_api_key(Some("sk-test"))
        .build()
        .unwrap();
    let err = Synthesizer::new(config)
        .with_describer(Arc::new(StubDescriber::answering(" ... ")))
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap_err();

    assert!(matches!(err, RenameError::DescriptionFailed { .. }));
}

#[tokio::test]
async fn test_non_image_under_image_rule() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(temp_dir.path(), "notes.txt", b"just text");
    let task = FileTask::from_path(&path).unwrap();

    let strict = NamingConfig::builder().with_resolution(true).build().unwrap();
    let err = synthesizer(strict)
        .synthesize(&task, occupied_on_disk)
        .await
        .unwrap_err();
    assert!(matches!(err, RenameError::NotAnImage { .. }));

    let lenient = NamingConfig::builder()
        .with_resolution(true)
        .with_hash(true)
        .with_prefix(Some("doc_"))
        .with_all_extensions(true)
        .build()
        .unwrap();
    let plan = synthesizer(lenient)
        .synthesize(&task, occupied_on_disk)
        .await
        .unwrap();
    assert_eq!(plan.target_name(), "doc_notes.txt");
}

#[tokio::test]
async fn test_all_extensions_sniffs_image_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "scan.bin", 640, 480, ImageFormat::Png);

    let config = NamingConfig::builder()
        .with_resolution(true)
        .with_all_extensions(true)
        .build()
        .unwrap();
    let plan = synthesizer(config)
        .synthesize(&FileTask::from_path(&path).unwrap(), occupied_on_disk)
        .await
        .unwrap();

    assert_eq!(plan.target_name(), "scan_640x480.bin");
}

#[tokio::test]
async fn test_vanished_file_is_not_found() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_image(temp_dir.path(), "img.png", 2, 2, ImageFormat::Png);
    let task = FileTask::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let config = NamingConfig::builder().build().unwrap();
    let err = synthesizer(config)
        .synthesize(&task, |_: &Path| false)
        .await
        .unwrap_err();

    assert!(matches!(err, RenameError::NotFound { .. }));
}
