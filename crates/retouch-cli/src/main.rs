use clap::{Parser, ValueEnum};
use retouch_core::{AdjustmentParams, EditSession, EditorConfig, ExportFormat};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Discrete operators, applied in the order given after the adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Operation {
    /// Rotate 90 degrees clockwise
    #[value(name = "rotate90")]
    Rotate90,
    /// Fixed-kernel sharpen
    Sharpen,
    /// Radial darkening toward the edges
    Vignette,
}

#[derive(Parser, Debug)]
#[command(name = "retouch")]
#[command(about = "Apply brightness, contrast, color and filter adjustments to an image")]
#[command(long_about = "\
Apply brightness, contrast, color and filter adjustments to an image

Adjustments always run in a fixed order on the loaded image:
  brightness → contrast → saturation → warmth → blur → grayscale mix

Discrete operations (--op) then run in the order given, each on the
result of the previous step:

  retouch photo.png -o out.jpg --brightness 20 --op rotate90 --op vignette

Without -o the image is saved back over the input file. The output
format follows the file extension (png, jpg/jpeg, bmp, gif); alpha is
flattened for formats that cannot store it.")]
#[command(version)]
struct Cli {
    /// Image to edit
    input: PathBuf,

    /// Where to write the result (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Brightness, -100 to 100
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<f32>,

    /// Contrast around mid-gray, -100 to 100
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f32>,

    /// Saturation, 0 (grayscale) to 200
    #[arg(long)]
    saturation: Option<f32>,

    /// Warmth, -100 (cool) to 100 (warm)
    #[arg(long, allow_negative_numbers = true)]
    warmth: Option<f32>,

    /// Blend toward grayscale, 0 to 100
    #[arg(long)]
    grayscale_mix: Option<f32>,

    /// Gaussian blur radius, 0 to 20
    #[arg(long)]
    blur_radius: Option<f32>,

    /// TOML file with adjustment values; flags override it
    #[arg(long)]
    params: Option<PathBuf>,

    /// Discrete operation to apply (repeatable)
    #[arg(long = "op", value_enum)]
    ops: Vec<Operation>,

    /// Editor configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JPEG quality, 1 to 100 (overrides the config file)
    #[arg(long)]
    quality: Option<u8>,

    /// Log every pipeline stage
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parameters from the optional TOML file, overridden by explicit flags.
fn resolve_params(cli: &Cli) -> Result<AdjustmentParams, Box<dyn std::error::Error>> {
    let mut params = match &cli.params {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => AdjustmentParams::default(),
    };

    let overrides = [
        (cli.brightness, &mut params.brightness),
        (cli.contrast, &mut params.contrast),
        (cli.saturation, &mut params.saturation),
        (cli.warmth, &mut params.warmth),
        (cli.grayscale_mix, &mut params.grayscale_mix),
        (cli.blur_radius, &mut params.blur_radius),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value;
        }
    }
    Ok(params)
}

fn resolve_config(cli: &Cli) -> Result<EditorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    if let Some(quality) = cli.quality {
        config.export.jpeg_quality = quality;
    }
    Ok(config)
}

fn apply_operation(session: &mut EditSession, op: Operation) -> Result<(), retouch_core::EditorError> {
    match op {
        Operation::Rotate90 => session.rotate90()?,
        Operation::Sharpen => session.sharpen()?,
        Operation::Vignette => session.vignette()?,
    };
    Ok(())
}

/// Load, adjust, apply operations and write. Returns where and how the result was written.
fn run(cli: &Cli) -> Result<(PathBuf, ExportFormat), Box<dyn std::error::Error>> {
    let config = resolve_config(cli)?;
    let params = resolve_params(cli)?;

    let mut session = EditSession::new();
    session.load(&cli.input)?;

    if !params.is_default() {
        session.preview_from_baseline(params)?;
    }
    for &op in &cli.ops {
        apply_operation(&mut session, op)?;
    }

    let (path, format) = match &cli.output {
        Some(output) => (output.clone(), session.export(output, &config.export)?),
        None => (cli.input.clone(), session.save(&config.export)?),
    };
    info!(path = %path.display(), "done");
    Ok((path, format))
}

fn describe(path: &Path, format: ExportFormat) -> String {
    format!("Wrote {} ({})", path.display(), format.extension())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (path, format) = run(&cli)?;
    println!("{}", describe(&path, format));
    Ok(())
}
