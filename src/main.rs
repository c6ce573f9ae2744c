use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use watermarking::config::Config;
use watermarking::constants::DEFAULT_CONFIG_FILE;
use watermarking::media::{EncoderQuality, ImageEncoder, MediaStore, PngEncoder};
use watermarking::pipeline::ImagePipeline;
use watermarking::video::VideoWatermarkProcessor;
use watermarking::watermark::{render_overlay, WatermarkFont, WatermarkPosition, WatermarkSettings};

/// Stamp a text watermark onto photos and save them to a media library
#[derive(Parser, Debug)]
#[command(name = "watermarking")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Media library root (overrides media.library_root)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Watermark text
    #[arg(long, global = true)]
    text: Option<String>,

    /// Text size in pixels
    #[arg(long, global = true)]
    text_size: Option<f32>,

    /// Opacity from 0.0 to 1.0
    #[arg(long, global = true)]
    opacity: Option<f32>,

    /// top-left, top-right, bottom-left, bottom-right or center
    #[arg(long, global = true)]
    position: Option<WatermarkPosition>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watermark one or more images and save them to Pictures/<album>
    Image {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Process a video and save it to Movies/<album>
    Video { input: PathBuf },
    /// Render the watermark alone onto a transparent PNG
    Overlay { output: PathBuf },
    /// Validate the configuration and exit
    CheckConfig,
}

impl Args {
    /// Settings from the config file with command-line overrides applied.
    fn settings(&self, base: &WatermarkSettings) -> WatermarkSettings {
        let mut settings = base.clone();
        if let Some(text) = &self.text {
            settings = settings.with_text(text.clone());
        }
        if let Some(text_size) = self.text_size {
            settings = settings.with_text_size(text_size);
        }
        if let Some(opacity) = self.opacity {
            settings = settings.with_opacity(opacity);
        }
        if let Some(position) = self.position {
            settings = settings.with_position(position);
        }
        settings
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, loaded) = Config::load_or_default(&args.config)
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    config.watermark = args.settings(&config.watermark);
    if let Some(library) = &args.library {
        config.media.library_root = library.clone();
    }

    watermarking::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    tracing::info!(
        config_file = %args.config.display(),
        loaded,
        library_root = %config.media.library_root.display(),
        album = %config.media.album,
        position = %config.watermark.position,
        "Configuration loaded successfully"
    );

    match &args.command {
        Command::Image { inputs } => run_images(&config, inputs).await,
        Command::Video { input } => run_video(&config, input.clone()).await,
        Command::Overlay { output } => run_overlay(&config, output).await,
        Command::CheckConfig => {
            println!("Configuration OK");
            Ok(())
        }
    }
}

async fn run_images(config: &Config, inputs: &[PathBuf]) -> anyhow::Result<()> {
    let pipeline = ImagePipeline::from_config(config)?;
    let report = pipeline.process_batch(inputs, &config.watermark).await?;

    for handle in &report.saved {
        println!("{}", handle.uri());
    }
    for item in &report.skipped {
        eprintln!("skipped {}: {}", item.path.display(), item.reason);
    }
    println!("{}", report.summary());

    if report.saved.is_empty() {
        bail!("No images were saved");
    }
    Ok(())
}

async fn run_video(config: &Config, input: PathBuf) -> anyhow::Result<()> {
    let store = MediaStore::from_config(&config.media)?;
    let processor = VideoWatermarkProcessor::new(&config.media.work_directory);

    let job = processor.start(input, &config.watermark)?;

    let mut progress = job.progress();
    let reporter = tokio::spawn(async move {
        let mut last_decile = 0;
        while progress.changed().await.is_ok() {
            let decile = (progress.borrow().fraction() * 10.0) as u32;
            if decile > last_decile {
                last_decile = decile;
                tracing::info!(percent = decile * 10, "Video processing progress");
            }
        }
    });

    let processed = job.wait().await?;
    // The sender is gone once the job finished, so the reporter ends too
    let _ = reporter.await;

    let handle = store.save_video(&processed).await?;
    println!("{}", handle.uri());
    Ok(())
}

async fn run_overlay(config: &Config, output: &Path) -> anyhow::Result<()> {
    let font = WatermarkFont::load(config.font.path.as_deref())?;
    let overlay = render_overlay(&font, &config.watermark.text, config.watermark.text_size)?;
    let encoded = PngEncoder.encode_image(&DynamicImage::ImageRgba8(overlay), EncoderQuality::default())?;

    tokio::fs::write(output, &encoded.data)
        .await
        .with_context(|| format!("Failed to write overlay to {}", output.display()))?;

    println!("{}", output.display());
    Ok(())
}
