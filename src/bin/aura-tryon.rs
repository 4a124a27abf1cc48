use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aura-tryon", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the products of a catalog.
    Catalog(CatalogArgs),
    /// Stream a camera, composite the selected garment, and optionally save a snapshot.
    Live(LiveArgs),
    /// Composite a garment onto a still photo.
    Still(StillArgs),
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Catalog JSON (`{"products":[...]}`); the builtin catalog when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LiveArgs {
    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog JSON; the builtin catalog when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory overlay paths are resolved against.
    #[arg(long, default_value = "clothes_images")]
    assets: PathBuf,

    /// Camera backend.
    #[arg(long, value_enum, default_value_t = CameraChoice::Synthetic)]
    camera: CameraChoice,

    /// Product to try on.
    #[arg(long)]
    product: Option<String>,

    /// Number of frames to draw; runs until the camera ends when omitted.
    #[arg(long)]
    frames: Option<u64>,

    /// Tick as fast as possible instead of at the configured fps.
    #[arg(long)]
    no_pace: bool,

    /// Directory to write a snapshot of the last frame into.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StillArgs {
    /// Photo of the person.
    #[arg(long)]
    model: PathBuf,

    /// Garment image (PNG with transparency).
    #[arg(long)]
    garment: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Garment width as a fraction of the photo width.
    #[arg(long, default_value_t = 0.55)]
    width_ratio: f64,

    /// Garment top edge as a fraction of the photo height.
    #[arg(long, default_value_t = 0.25)]
    top_ratio: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CameraChoice {
    Synthetic,
    Ffmpeg,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Catalog(args) => cmd_catalog(args),
        Command::Live(args) => cmd_live(args),
        Command::Still(args) => cmd_still(args),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<aura_tryon::StaticCatalog> {
    match path {
        Some(p) => Ok(aura_tryon::StaticCatalog::load(p)?),
        None => Ok(aura_tryon::StaticCatalog::builtin()),
    }
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    for p in catalog.products() {
        println!("{}\t{}\t{}", p.id, p.overlay, p.name);
    }
    Ok(())
}

fn cmd_live(args: LiveArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(p) => aura_tryon::TryOnConfig::load(p)?,
        None => aura_tryon::TryOnConfig::default(),
    };
    let catalog = Arc::new(load_catalog(args.catalog.as_deref())?);
    let overlays = Arc::new(aura_tryon::OverlayStore::new(&args.assets));

    let source: Box<dyn aura_tryon::MediaSource> = match args.camera {
        CameraChoice::Synthetic => Box::new(aura_tryon::SyntheticCamera::new()),
        CameraChoice::Ffmpeg => Box::new(aura_tryon::FfmpegCamera::new()),
    };

    let mut controller =
        aura_tryon::CaptureController::new(source, catalog.clone(), overlays.clone(), &config)?
            .with_notifier(Arc::new(aura_tryon::TracingNotifier));

    controller.start()?;

    if let Some(product) = &args.product {
        controller.select_overlay(product);
        if let Some(overlay) = aura_tryon::OverlayCatalog::lookup(catalog.as_ref(), product)
            && overlays
                .wait_ready(&overlay, Duration::from_secs(5))
                .is_none()
        {
            tracing::warn!(%product, %overlay, "overlay not ready; drawing without it");
        }
    }

    let mut clock: Box<dyn aura_tryon::FrameClock> = if args.no_pace {
        Box::new(aura_tryon::ManualClock::new())
    } else {
        Box::new(aura_tryon::FixedRateClock::new(config.fps))
    };
    let stats = aura_tryon::run_frame_loop(&mut controller, clock.as_mut(), args.frames);
    tracing::info!(
        ticks = stats.ticks,
        drawn = stats.drawn,
        skipped = stats.skipped,
        terminated = stats.terminated,
        "frame loop finished"
    );

    if let Some(dir) = &args.snapshot_dir {
        let snap = controller.snapshot()?;
        let path = snap.write_to_dir(dir)?;
        eprintln!("wrote {}", path.display());
    }

    controller.stop();
    Ok(())
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let model_bytes = std::fs::read(&args.model)
        .with_context(|| format!("read model photo '{}'", args.model.display()))?;
    let garment_bytes = std::fs::read(&args.garment)
        .with_context(|| format!("read garment '{}'", args.garment.display()))?;

    let model = aura_tryon::decode_frame(&model_bytes)?;
    let garment = aura_tryon::decode_overlay(&garment_bytes)?;
    let placement = aura_tryon::OverlayPlacement {
        width_ratio: args.width_ratio,
        top_ratio: args.top_ratio,
        ..aura_tryon::OverlayPlacement::still()
    };

    let out = aura_tryon::compose_still(&model, &garment, placement)?;
    let png = aura_tryon::encode_png(&out)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
