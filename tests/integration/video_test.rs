// Video flow: process in the background, then save to the movie collection

use super::test_harness::{LibraryHarness, TEST_ALBUM};
use watermarking::error::PipelineError;
use watermarking::media::MediaKind;
use watermarking::video::VideoWatermarkProcessor;
use watermarking::watermark::WatermarkSettings;

fn fake_video(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

#[tokio::test]
async fn test_video_is_saved_byte_identical() {
    let harness = LibraryHarness::new();
    let content = fake_video(300_000);
    let input = harness.write_bytes("clip.mp4", &content);

    let processor = VideoWatermarkProcessor::new(harness.work_directory());
    let job = processor
        .start(input, &WatermarkSettings::default())
        .unwrap();
    let progress = job.progress();
    let processed = job.wait().await.unwrap();

    assert_eq!(progress.borrow().fraction(), 1.0);
    assert!(progress.borrow().done);

    let handle = harness.store().save_video(&processed).await.unwrap();

    assert_eq!(handle.kind(), MediaKind::Video);
    assert!(handle.display_name().ends_with(".mp4"));
    assert_eq!(
        handle.path().parent().unwrap(),
        harness.library_root().join("Movies").join(TEST_ALBUM)
    );
    assert_eq!(std::fs::read(handle.path()).unwrap(), content);
}

#[tokio::test]
async fn test_empty_video_completes() {
    let harness = LibraryHarness::new();
    let input = harness.write_bytes("empty.mp4", &[]);

    let processor = VideoWatermarkProcessor::new(harness.work_directory());
    let job = processor.start(input, &WatermarkSettings::default()).unwrap();
    let progress = job.progress();
    let processed = job.wait().await.unwrap();

    assert_eq!(std::fs::metadata(&processed).unwrap().len(), 0);
    assert_eq!(progress.borrow().fraction(), 1.0);
}

// Test: Only one video per processor at a time
#[tokio::test]
async fn test_second_video_rejected_while_busy() {
    let harness = LibraryHarness::new();
    let input = harness.write_bytes("clip.mp4", &fake_video(10_000));

    let processor = VideoWatermarkProcessor::new(harness.work_directory());
    let first = processor
        .start(input.clone(), &WatermarkSettings::default())
        .unwrap();

    let second = processor.start(input, &WatermarkSettings::default());
    assert!(matches!(second, Err(PipelineError::AlreadyProcessing)));

    first.wait().await.unwrap();
    assert!(!processor.is_processing());
}

#[tokio::test]
async fn test_missing_video_leaves_library_untouched() {
    let harness = LibraryHarness::new();
    let processor = VideoWatermarkProcessor::new(harness.work_directory());

    let job = processor
        .start(harness.input_path("missing.mp4"), &WatermarkSettings::default())
        .unwrap();
    assert!(job.wait().await.is_err());

    assert!(LibraryHarness::list(&harness.library_root().join("Movies").join(TEST_ALBUM)).is_empty());
    assert!(LibraryHarness::list(&harness.work_directory()).is_empty());
}
