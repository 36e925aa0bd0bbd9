use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use disperse::codec;
use error_diffusion::{Disperser, PixelMode, Quantizer};

#[derive(Parser)]
#[command(name = "disperse")]
#[command(about = "Floyd-Steinberg error diffusion dithering for image files")]
struct Cli {
    /// Input image path (PNG or JPEG)
    input: PathBuf,

    /// Output path; defaults to <input-stem>-dithered.png next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Channel layout to process in
    #[arg(short, long, value_enum, default_value = "color")]
    mode: Mode,

    /// Output levels per channel: 2 is black/white threshold, 3-256 uniform
    #[arg(short, long, default_value_t = 2)]
    levels: u16,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Single luminance channel
    Grayscale,
    /// Red, green, and blue processed independently
    Color,
}

impl From<Mode> for PixelMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Grayscale => PixelMode::Grayscale,
            Mode::Color => PixelMode::Rgb,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "disperse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let policy = if cli.levels == 2 {
        Quantizer::Threshold
    } else {
        Quantizer::uniform(cli.levels)?
    };

    let mut buffer = codec::decode(&cli.input, cli.mode.into())?;
    tracing::info!(
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels(),
        levels = cli.levels,
        "dithering image"
    );
    Disperser::new(policy).dither(&mut buffer)?;

    let output = cli
        .output
        .unwrap_or_else(|| codec::default_output_path(&cli.input));
    codec::encode(&buffer, &output)?;
    println!("Wrote {}", output.display());

    Ok(())
}
