use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "layerblend", version)]
struct Cli {
    /// Log dispatch timing and decisions to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every blend mode with its table index.
    Modes,
    /// Composite one filter pass and write the result as a PNG.
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Blend mode, by name (e.g. `soft-light`) or table index.
    #[arg(long)]
    mode: layerblend::BlendMode,

    /// Input (source) PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Drawing PNG; its alpha is the mask. Defaults to an opaque fill of the mode's
    /// default layer color, or white.
    #[arg(long)]
    drawing: Option<PathBuf>,

    /// Background PNG. Defaults to the input.
    #[arg(long)]
    blending: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Restrict the pass to `left,top,right,bottom` (half-open).
    #[arg(long, value_parser = parse_rect)]
    rect: Option<layerblend::Region>,

    /// Engine settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Fixed seed for the noise mode.
    #[arg(long)]
    seed: Option<u64>,

    /// Run rows sequentially.
    #[arg(long, default_value_t = false)]
    sequential: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Modes => cmd_modes(),
        Command::Apply(args) => cmd_apply(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_modes() -> anyhow::Result<()> {
    for mode in layerblend::BlendMode::ALL {
        println!("{:>2} {}", mode.index(), mode.name());
    }
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let mut settings = match &args.config {
        Some(path) => layerblend::EngineSettings::from_path(path)?,
        None => layerblend::EngineSettings::default(),
    };
    if args.threads.is_some() {
        settings.threads = args.threads;
    }
    if args.seed.is_some() {
        settings.noise_seed = args.seed;
    }
    if args.sequential {
        settings.parallel = false;
    }

    let input = load_surface(&args.in_path)?;
    let (w, h) = (input.width(), input.height());

    let drawing = match &args.drawing {
        Some(path) => premultiply(load_surface(path)?),
        None => {
            let fill = args
                .mode
                .default_layer()
                .map(layerblend::pack_rgb)
                .unwrap_or([255, 255, 255, 255]);
            layerblend::Surface::filled(w, h, fill)?
        }
    };
    let blending = match &args.blending {
        Some(path) => load_surface(path)?,
        None => input.clone(),
    };

    let mut engine = layerblend::FilterEngine::new(drawing, blending, settings)
        .context("bind drawing and blending surfaces")?;
    if args.mode == layerblend::BlendMode::BlurPrecomputed {
        engine.precompute_blur_default(&input)?;
    }

    let mut output = engine.blending().clone();
    engine
        .apply(args.mode, &input, &mut output, args.rect)
        .with_context(|| format!("apply mode '{}'", args.mode))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    output
        .into_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn load_surface(path: &Path) -> anyhow::Result<layerblend::Surface> {
    let img = image::open(path)
        .with_context(|| format!("read image '{}'", path.display()))?
        .to_rgba8();
    Ok(layerblend::Surface::from_image(img))
}

fn premultiply(mut s: layerblend::Surface) -> layerblend::Surface {
    for px in s.data_mut().chunks_exact_mut(4) {
        let p = layerblend::premultiply_rgba8([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&p);
    }
    s
}

fn parse_rect(s: &str) -> Result<layerblend::Region, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid rect '{s}': {e}"))?;
    match parts.as_slice() {
        &[left, top, right, bottom] => Ok(layerblend::Region::new(left, top, right, bottom)),
        _ => Err(format!(
            "invalid rect '{s}': expected left,top,right,bottom"
        )),
    }
}
