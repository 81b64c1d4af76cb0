use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fieldfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of the particle field as a PNG.
    Frame(FrameArgs),
    /// Print a stable digest of each rendered frame.
    Digest(DigestArgs),
    /// Play the terminal transcript to stdout.
    Transcript(TranscriptArgs),
}

#[derive(Args, Debug)]
struct FieldArgs {
    /// Session config JSON (field tunables, background, seed).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// RNG seed; overrides the config's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Hold the pointer at X,Y for the whole run.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<fieldfx::Point>,

    /// Background colour as #rrggbb or #rrggbbaa; overrides the config.
    #[arg(long, value_parser = parse_color)]
    background: Option<fieldfx::Rgba8>,

    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct DigestArgs {
    #[command(flatten)]
    field: FieldArgs,

    #[arg(long, default_value_t = 1)]
    frames: u64,
}

#[derive(Args, Debug)]
struct TranscriptArgs {
    /// Script JSON (array of {kind, text}); defaults to the built-in script.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print every line immediately instead of on the delay schedule.
    #[arg(long)]
    instant: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Digest(args) => cmd_digest(args),
        Command::Transcript(args) => cmd_transcript(args),
    }
}

fn parse_point(s: &str) -> Result<fieldfx::Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(fieldfx::Point::new(x, y))
}

fn parse_color(s: &str) -> Result<fieldfx::Rgba8, String> {
    fieldfx::Rgba8::parse_hex(s).map_err(|e| e.to_string())
}

fn read_session_config(path: Option<&Path>) -> anyhow::Result<fieldfx::SessionConfig> {
    let Some(path) = path else {
        return Ok(fieldfx::SessionConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    fieldfx::SessionConfig::from_json(&json)
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn make_driver(args: &FieldArgs) -> anyhow::Result<fieldfx::OfflineDriver> {
    let mut cfg = read_session_config(args.config.as_deref())?;
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if args.background.is_some() {
        cfg.background = args.background;
    }

    let viewport = fieldfx::SurfaceSize::new(f64::from(args.width), f64::from(args.height))?;
    let mut driver = fieldfx::OfflineDriver::new(&cfg, viewport, args.fps)?;
    if let Some(p) = args.pointer {
        driver.pointer(p)?;
    }
    tracing::info!(
        width = args.width,
        height = args.height,
        seed = ?cfg.seed,
        particles = cfg.field.count,
        "particle field ready"
    );
    Ok(driver)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut driver = make_driver(&args.field)?;
    let frame = driver.render_to(fieldfx::FrameIndex(args.frame))?;
    frame.save_png(&args.out)?;
    driver.teardown()?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    let mut driver = make_driver(&args.field)?;
    let digests = driver.digests(args.frames)?;
    let field_digest = driver.field()?.state_digest();
    driver.teardown()?;

    let mut out = std::io::stdout().lock();
    for (i, d) in digests.iter().enumerate() {
        writeln!(out, "{i}\t{d:016x}")?;
    }
    writeln!(out, "state\t{field_digest:016x}")?;
    Ok(())
}

fn cmd_transcript(args: TranscriptArgs) -> anyhow::Result<()> {
    let script = match &args.script {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read script '{}'", path.display()))?;
            fieldfx::Script::from_json(&json)
                .with_context(|| format!("parse script '{}'", path.display()))?
        }
        None => fieldfx::Script::default_hero(),
    };

    let mut player = fieldfx::TranscriptPlayer::new(script);
    let mut log = fieldfx::TerminalLog::new();
    let mut out = std::io::stdout().lock();
    let start = Instant::now();

    while let Some(due) = player.next_due() {
        let now = if args.instant {
            due
        } else {
            let elapsed = start.elapsed();
            if due > elapsed {
                std::thread::sleep(due - elapsed);
            }
            start.elapsed().max(due)
        };

        let before = log.len();
        player.poll(now, &mut log);
        for entry in &log.entries()[before..] {
            writeln!(out, "{}", entry.text)?;
        }
        out.flush()?;
    }

    tracing::debug!(
        lines = log.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "transcript done"
    );
    Ok(())
}
