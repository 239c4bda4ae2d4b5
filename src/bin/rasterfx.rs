use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "rasterfx", version)]
struct Cli {
    /// Log what the filters decide to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rotate a PNG by a quarter turn.
    Rotate(RotateArgs),
    /// Blur a PNG with the exponential blur.
    Blur(BlurArgs),
    /// Run a JSON filter chain over a PNG.
    Filter(FilterArgs),
}

#[derive(Parser, Debug)]
struct RotateArgs {
    /// Input PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Quarter turn in degrees: 90, 180 or 270. A 90 degree turn moves the last column to
    /// the top row, which reads counter-clockwise on screen.
    #[arg(long, default_value_t = 90)]
    degrees: u32,
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Input PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Blur radius in pixels.
    #[arg(long, default_value_t = 5.0)]
    radius: f64,

    /// Quality/performance trade-off.
    #[arg(long, value_enum, default_value_t = HintChoice::Performance)]
    hint: HintChoice,

    /// Blur the alpha channel only.
    #[arg(long)]
    alpha_only: bool,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Input PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Filter chain JSON file: one `{"kind", "params"}` object or an array of them.
    #[arg(long, conflicts_with = "json", required_unless_present = "json")]
    chain: Option<PathBuf>,

    /// Filter chain given inline.
    #[arg(long)]
    json: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HintChoice {
    Performance,
    Quality,
    Animation,
}

impl From<HintChoice> for rasterfx::BlurHint {
    fn from(h: HintChoice) -> Self {
        match h {
            HintChoice::Performance => rasterfx::BlurHint::Performance,
            HintChoice::Quality => rasterfx::BlurHint::Quality,
            HintChoice::Animation => rasterfx::BlurHint::Animation,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Rotate(args) => cmd_rotate(args),
        Command::Blur(args) => cmd_blur(args),
        Command::Filter(args) => cmd_filter(args),
    }
}

fn read_png(path: &Path) -> anyhow::Result<rasterfx::Image> {
    let decoded = image::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .to_rgba8();
    let (w, h) = decoded.dimensions();
    Ok(rasterfx::Image::from_rgba8(w, h, decoded.as_raw())?)
}

fn write_png(path: &Path, img: &rasterfx::Image) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &img.to_rgba8(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_rotate(args: RotateArgs) -> anyhow::Result<()> {
    let Some(direction) = rasterfx::RotationDirection::from_degrees(args.degrees) else {
        anyhow::bail!(
            "rotation must be 90, 180 or 270 degrees, got {}",
            args.degrees
        );
    };
    let src = read_png(&args.in_path)?;
    let rotated = src.rotated(direction)?;
    write_png(&args.out, &rotated)
}

fn cmd_blur(args: BlurArgs) -> anyhow::Result<()> {
    let src = read_png(&args.in_path)?;
    let mut params = rasterfx::BlurParams::new(args.radius).with_hint(args.hint.into());
    if args.alpha_only {
        params = params.alpha_only();
    }
    let blurred = rasterfx::blur_image(&src, &params)?;
    let out = blurred.into_full_size(src.width(), src.height())?;
    write_png(&args.out, &out)
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let json = match (&args.chain, args.json) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("read filter chain '{}'", path.display()))?,
        (None, Some(inline)) => inline,
        (None, None) => anyhow::bail!("either --chain or --json is required"),
    };
    let chain = rasterfx::parse_filter_chain(&json).context("parse filter chain")?;

    let mut img = read_png(&args.in_path)?;
    let mut origin = rasterfx::Vec2::ZERO;
    for descriptor in &chain {
        let filter = descriptor.build()?;
        let out = filter.apply(&img)?;
        origin += out.offset;
        img = out.image;
    }
    if origin != rasterfx::Vec2::ZERO {
        eprintln!(
            "output origin relative to input: ({}, {})",
            origin.x, origin.y
        );
    }
    write_png(&args.out, &img)
}
