use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use racechart::{
    ChartEvent, ChartSyncAdapter, ContainerId, EntityIndex, FileSource, ManualClock,
    PlaybackStatus, RaceChart, RaceConfig, RecordingChart, Scheduler, SnapshotResolver,
    TimelineController, WallClock, Year,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "racechart", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ranking snapshot of one year as JSON.
    Snapshot(SnapshotArgs),
    /// Replay the race headlessly, printing one JSON line per frame.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Input data (CSV, or JSON with a `.json` extension).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Year to resolve.
    #[arg(long)]
    year: i64,

    /// Chart config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input data (CSV, or JSON with a `.json` extension).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Chart config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick on the wall clock instead of a simulated one.
    #[arg(long)]
    realtime: bool,

    /// Stop after this many ticks even if the race is not over.
    #[arg(long)]
    ticks: Option<usize>,
}

#[derive(serde::Serialize)]
struct Frame {
    at_ms: u64,
    year: Year,
    status: PlaybackStatus,
    events: Vec<ChartEvent>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<RaceConfig> {
    let Some(path) = path else {
        return Ok(RaceConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    RaceConfig::from_json_str(&text).with_context(|| format!("parse config '{}'", path.display()))
}

fn read_index(path: &Path, cfg: &RaceConfig) -> anyhow::Result<EntityIndex> {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let location = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("bad data path '{}'", path.display()))?;
    let source = FileSource::new(base);
    let index = RaceChart::<ManualClock, RecordingChart>::try_load(&source, location, cfg)?;
    Ok(index)
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let index = read_index(&args.in_path, &cfg)?;
    let snapshot = SnapshotResolver::new(cfg.top_n).resolve(&index, args.year)?;

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &snapshot).context("write snapshot")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let index = read_index(&args.in_path, &cfg)?;
    if args.realtime {
        replay(index, &cfg, WallClock::new(), args.ticks)
    } else {
        replay(index, &cfg, ManualClock::new(), args.ticks)
    }
}

fn replay<S: Scheduler>(
    index: EntityIndex,
    cfg: &RaceConfig,
    scheduler: S,
    max_ticks: Option<usize>,
) -> anyhow::Result<()> {
    let range = index.range();
    let mut adapter = ChartSyncAdapter::new(index, cfg.sync_options(), RecordingChart::new());
    adapter.init(&ContainerId::new("racechart-cli"), range.start)?;
    let mut controller =
        TimelineController::new(range, cfg.playback_options(), scheduler, adapter)?;

    let mut out = std::io::stdout().lock();
    controller.play()?;
    emit(&mut out, &mut controller)?;

    let mut ticks = 0;
    while controller.status() == PlaybackStatus::Playing
        && max_ticks.is_none_or(|max| ticks < max)
    {
        let deadline = controller.scheduler().now().after(cfg.step_ms);
        ticks += controller.run_until(deadline)?;
        controller.target_mut().animate(cfg.step_ms)?;
        emit(&mut out, &mut controller)?;
    }

    let (_, mut adapter) = controller.dispose();
    adapter.destroy()?;
    tracing::debug!(ticks, "replay finished");
    Ok(())
}

fn emit<S: Scheduler>(
    out: &mut impl std::io::Write,
    controller: &mut TimelineController<S, ChartSyncAdapter<RecordingChart>>,
) -> anyhow::Result<()> {
    let events = controller.target_mut().backend_mut().take_events();
    let frame = Frame {
        at_ms: controller.scheduler().now().0,
        year: controller.current_year(),
        status: controller.status(),
        events,
    };
    serde_json::to_writer(&mut *out, &frame).context("write frame")?;
    writeln!(out)?;
    Ok(())
}
