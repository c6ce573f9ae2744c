// Photo flow: read from disk, watermark, save as JPEG into the library

use super::test_harness::{gradient, mean_abs_diff, LibraryHarness, TEST_ALBUM};
use image::ImageFormat;
use watermarking::error::PipelineError;
use watermarking::media::store::DISPLAY_NAME_PREFIX;
use watermarking::media::MediaKind;
use watermarking::watermark::{Compositor, WatermarkPosition, WatermarkSettings};

fn settings() -> WatermarkSettings {
    WatermarkSettings::default()
        .with_text("(c) Integration")
        .with_text_size(32.0)
        .with_position(WatermarkPosition::BottomRight)
}

// Test: Saved file decodes to the compositor's output, up to JPEG loss
#[tokio::test]
async fn test_saved_jpeg_matches_composited_image() {
    let harness = LibraryHarness::new();
    let input = harness.write_image("photo.png", 400, 300, ImageFormat::Png);

    let handle = harness
        .pipeline()
        .process_file(&input, &settings())
        .await
        .expect("photo is saved");

    assert_eq!(handle.kind(), MediaKind::Image);
    assert!(handle.display_name().starts_with(DISPLAY_NAME_PREFIX));
    assert!(handle.display_name().ends_with(".jpg"));
    assert_eq!(
        handle.path().parent().unwrap(),
        harness.library_root().join("Pictures").join(TEST_ALBUM)
    );
    assert!(handle.uri().starts_with("file://"));

    let saved = image::open(handle.path()).expect("saved file decodes");
    assert_eq!((saved.width(), saved.height()), (400, 300));

    let expected = Compositor::with_embedded_font()
        .unwrap()
        .compose(&gradient(400, 300), &settings())
        .unwrap();
    let diff = mean_abs_diff(&saved, &expected);
    assert!(diff < 4.0, "mean difference {} too large", diff);
}

#[tokio::test]
async fn test_jpeg_input_is_accepted() {
    let harness = LibraryHarness::new();
    let input = harness.write_image("photo.jpg", 640, 480, ImageFormat::Jpeg);

    let handle = harness
        .pipeline()
        .process_file(&input, &settings())
        .await
        .unwrap();

    let saved = image::open(handle.path()).unwrap();
    assert_eq!((saved.width(), saved.height()), (640, 480));
}

// Test: A batch keeps going past broken inputs and reports them
#[tokio::test]
async fn test_batch_report_counts_saved_and_skipped() {
    let harness = LibraryHarness::new();
    let inputs = vec![
        harness.write_image("one.png", 200, 150, ImageFormat::Png),
        harness.write_bytes("corrupt.jpg", b"\xFF\xD8\xFF\xE0 truncated"),
        harness.write_image("two.jpg", 300, 200, ImageFormat::Jpeg),
        harness.input_path("does-not-exist.png"),
        harness.write_image("three.png", 100, 100, ImageFormat::Png),
    ];

    let pipeline = harness.pipeline();
    let report = pipeline.process_batch(&inputs, &settings()).await.unwrap();

    assert_eq!(report.processed(), 3);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.summary(), "3 images processed, 2 skipped");
    assert_eq!(report.skipped[0].path, inputs[1]);
    assert_eq!(report.skipped[1].path, inputs[3]);

    let saved = LibraryHarness::list(&harness.library_root().join("Pictures").join(TEST_ALBUM));
    assert_eq!(saved.len(), 3);
    // Every saved handle names a distinct file
    for handle in &report.saved {
        assert!(saved.contains(&handle.path().to_path_buf()));
    }
    assert!(!pipeline.is_processing());
}

#[tokio::test]
async fn test_full_batch_summary() {
    let harness = LibraryHarness::new();
    let inputs = vec![
        harness.write_image("a.png", 64, 64, ImageFormat::Png),
        harness.write_image("b.png", 64, 64, ImageFormat::Png),
    ];

    let report = harness
        .pipeline()
        .process_batch(&inputs, &settings())
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.summary(), "2 images processed successfully");
}

// Test: Blank text saves the photo without a watermark
#[tokio::test]
async fn test_blank_text_saves_unmarked_copy() {
    let harness = LibraryHarness::new();
    let input = harness.write_image("plain.png", 200, 120, ImageFormat::Png);

    let handle = harness
        .pipeline()
        .process_file(&input, &settings().with_text("   "))
        .await
        .unwrap();

    let saved = image::open(handle.path()).unwrap();
    assert!(mean_abs_diff(&saved, &gradient(200, 120)) < 2.0);
}

#[tokio::test]
async fn test_invalid_settings_skip_item() {
    let harness = LibraryHarness::new();
    let input = harness.write_image("photo.png", 100, 100, ImageFormat::Png);

    let result = harness
        .pipeline()
        .process_file(&input, &settings().with_opacity(1.5))
        .await;

    assert!(matches!(result, Err(PipelineError::Watermark(_))));
    assert!(LibraryHarness::list(&harness.library_root().join("Pictures").join(TEST_ALBUM)).is_empty());
}

// Test: Concurrent batches on one pipeline, only one runs
#[tokio::test]
async fn test_concurrent_batches_single_flight() {
    let harness = LibraryHarness::new();
    let inputs: Vec<_> = (0..4)
        .map(|i| harness.write_image(&format!("p{}.png", i), 800, 600, ImageFormat::Png))
        .collect();

    let pipeline = harness.pipeline();
    let s = settings();
    let (a, b) = tokio::join!(
        pipeline.process_batch(&inputs, &s),
        pipeline.process_batch(&inputs, &s)
    );

    let rejected = [&a, &b]
        .iter()
        .filter(|r| matches!(r, Err(PipelineError::AlreadyProcessing)))
        .count();
    let accepted = [&a, &b].iter().filter(|r| r.is_ok()).count();

    // join! polls in order on one task: the first batch takes the flag
    // before its first await and the second is turned away
    assert_eq!(accepted, 1);
    assert_eq!(rejected, 1);
    assert_eq!(a.unwrap().processed(), 4);
    assert!(!pipeline.is_processing());
}
