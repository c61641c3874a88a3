use anyhow::{Context, Result};
use campaint_lib::logging::setup_logging;
use campaint_lib::{io, pick_color, AppConfig, Color, Command, Connectivity, PaintSession, Region};
use clap::Parser;
use std::path::PathBuf;

/// Find regions of a tracked color in image frames and paint with the largest one
#[derive(Parser, Debug)]
#[command(name = "campaint")]
#[command(about = "Color region finding and painting over image frames", long_about = None)]
struct Args {
    /// Input frames, processed in order
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Target color as #RRGGBB
    #[arg(short, long, conflicts_with = "pick")]
    target: Option<String>,

    /// Take the target color from the first frame at X,Y
    #[arg(short, long, value_parser = parse_point)]
    pick: Option<(u32, u32)>,

    /// Maximum per-channel difference from the target color
    #[arg(long)]
    tolerance: Option<u8>,

    /// Regions must have more pixels than this to be kept
    #[arg(long)]
    min_size: Option<usize>,

    /// Pixel neighborhood used to grow regions
    #[arg(long, value_enum)]
    connectivity: Option<ConnectivityArg>,

    /// Brush color as #RRGGBB
    #[arg(long)]
    paint_color: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path for the recolored last frame
    #[arg(long)]
    recolored: Option<PathBuf>,

    /// Output path for the painting
    #[arg(long)]
    painting: Option<PathBuf>,

    /// Seed for reproducible region colors
    #[arg(long)]
    seed: Option<u64>,

    /// Log spec, e.g. "info" or "campaint_lib=debug"
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ConnectivityArg {
    Eight,
    Four,
    Diagonal,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::Eight => Connectivity::Eight,
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Diagonal => Connectivity::Diagonal,
        }
    }
}

fn parse_point(raw: &str) -> Result<(u32, u32), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("Expected X,Y but got '{}'", raw))?;
    let x = x.trim().parse::<u32>().map_err(|e| format!("Bad X: {}", e))?;
    let y = y.trim().parse::<u32>().map_err(|e| format!("Bad Y: {}", e))?;
    Ok((x, y))
}

fn build_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path).map_err(anyhow::Error::msg)?,
        None => AppConfig::default(),
    };
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(min_size) = args.min_size {
        config.min_size = min_size;
    }
    if let Some(connectivity) = args.connectivity {
        config.connectivity = connectivity.into();
    }
    if let Some(paint_color) = &args.paint_color {
        config.paint_color = paint_color.clone();
    }
    if let Some(path) = &args.recolored {
        config.recolored_path = path.clone();
    }
    if let Some(path) = &args.painting {
        config.painting_path = path.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;
    let _logger = setup_logging(&config.log_level).map_err(anyhow::Error::msg)?;

    let paint_color = config.paint_color().map_err(anyhow::Error::msg)?;
    let segment_config = config.segment_config();
    let mut session = match args.seed {
        Some(seed) => {
            PaintSession::with_seed(segment_config, paint_color, config.output_paths(), seed)
        }
        None => PaintSession::new(segment_config, paint_color, config.output_paths()),
    };

    if let Some(hex) = &args.target {
        session.set_target(Color::from_hex(hex).map_err(anyhow::Error::msg)?);
    } else if args.pick.is_none() {
        anyhow::bail!("Either --target or --pick is required");
    }

    println!("CamPaint - Color Region Painting");
    println!("================================");
    println!(
        "Tolerance: {}, min size: {}, connectivity: {:?}",
        session.config().tolerance,
        session.config().min_size,
        session.config().connectivity
    );

    for (idx, path) in args.input.iter().enumerate() {
        let frame = io::load_raster(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Frame {}", idx))?;

        if idx == 0 {
            if let Some((x, y)) = args.pick {
                let color = pick_color(&frame, x, y).map_err(anyhow::Error::msg)?;
                session.set_target(color);
                println!("Picked target {} at ({}, {})", color, x, y);
            }
        }

        let report = session.process_frame(frame);
        println!(
            "{}: {}x{}, {} region(s), largest {}",
            path.display(),
            report.width,
            report.height,
            report.region_count,
            report
                .largest_area
                .map(|area| format!("{} px", area))
                .unwrap_or_else(|| "none".to_string())
        );
        for region in session.regions() {
            log::debug!(
                "  region {} seeded at ({}, {}): {} px",
                region.id(),
                region.seed().x,
                region.seed().y,
                region.area()
            );
        }
    }

    session
        .apply(Command::SaveRecolored)
        .map_err(anyhow::Error::msg)?;
    session
        .apply(Command::SavePainting)
        .map_err(anyhow::Error::msg)?;

    println!("\nSaved recolored image to: {}", config.recolored_path.display());
    println!("Saved painting to: {}", config.painting_path.display());
    if let Some(seed) = session.largest_region().map(Region::seed) {
        println!("Last brush stroke seeded at: ({}, {})", seed.x, seed.y);
    }

    Ok(())
}
