// Error type tests

use std::error::Error;
use watermarking::error::PipelineError;
use watermarking::media::MediaError;
use watermarking::watermark::WatermarkError;

#[test]
fn test_error_categories_have_distinct_messages() {
    let errors: Vec<Box<dyn Error + Send + Sync>> = vec![
        Box::new(WatermarkError::ConfigError("opacity".to_string())),
        Box::new(WatermarkError::FontError("missing".to_string())),
        Box::new(MediaError::InvalidAlbum("a/b".to_string())),
        Box::new(PipelineError::Decode("bad".to_string())),
        Box::new(PipelineError::AlreadyProcessing),
    ];

    let messages: std::collections::HashSet<String> =
        errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(messages.len(), errors.len());
}

#[test]
fn test_pipeline_error_keeps_io_source() {
    let err = PipelineError::read(
        "/photos/a.jpg",
        std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
    );
    assert_eq!(err.to_string(), "Failed to read /photos/a.jpg: No such file");
    assert!(err.source().is_some());
}

#[test]
fn test_media_error_wraps_into_pipeline_error() {
    let media = MediaError::encode_failed("jpeg", "boom");
    let err: PipelineError = media.into();
    assert!(matches!(err, PipelineError::Media(MediaError::Encode { .. })));
}

#[test]
fn test_errors_convert_into_anyhow() {
    fn fails() -> anyhow::Result<()> {
        Err::<(), _>(PipelineError::AlreadyProcessing)?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(err.downcast_ref::<PipelineError>().is_some());
}
