// main.rs
//
// Replays an ideal trace of a letter through the tracing engine, section by
// section, and reports what the state machine made of every stroke.

use clap::Parser;
use lettertrace::float_types::Real;
use lettertrace::letter::catalog;
use lettertrace::session::config::SessionConfig;
use lettertrace::session::{Outcome, TracingSession, replay};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Trace a letter with a simulated finger
#[derive(Parser, Debug)]
#[command(name = "lettertrace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Letter to trace
    #[arg(short, long, default_value = "p_small")]
    letter: String,

    /// Session config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Distance between simulated move samples
    #[arg(long, default_value = "15")]
    step: Real,

    /// List the available letters and exit
    #[arg(long)]
    list: bool,

    /// Write an SVG of the finished letter
    #[cfg(feature = "svg-io")]
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let catalog = catalog::global()?;
    if cli.list {
        for name in catalog.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if cli.step.is_nan() || cli.step <= 0.0 {
        anyhow::bail!("--step must be positive, got {}", cli.step);
    }

    let letter = catalog.definition(&cli.letter)?;
    let scale = config.scale;
    let mut session = TracingSession::new(letter.clone(), config)?;

    for (index, section) in letter.sections().iter().enumerate() {
        let samples = replay::ideal_samples(section, scale, cli.step, session.tolerance());
        let outcomes = replay::trace(&mut session, &samples);
        for (i, outcome) in outcomes.iter().enumerate() {
            if let Outcome::Rejected(kind) = outcome {
                warn!(section = index, sample = i, %kind, "sample rejected");
            }
        }
        let accepted = outcomes
            .iter()
            .filter(|o| !matches!(o, Outcome::Rejected(_) | Outcome::Ignored))
            .count();
        info!(
            section = index,
            samples = samples.len(),
            accepted,
            outcome = ?outcomes.last(),
            "section traced"
        );
    }

    let snapshot = session.snapshot();
    println!(
        "letter {}: finished={} strokes={} tolerance={} errors={:?}",
        letter.name(),
        snapshot.finished,
        snapshot.strokes.len(),
        snapshot.tolerance,
        snapshot.errors,
    );

    #[cfg(feature = "svg-io")]
    if let Some(path) = &cli.svg {
        let doc = lettertrace::io::svg::snapshot_document(&snapshot, 640, 720);
        lettertrace::io::svg::save(path, &doc)?;
        info!(path = %path.display(), "wrote svg");
    }

    // let the completion delay run out
    let later = Instant::now() + Duration::from_millis(session.config().completion_reset_delay_ms + 1);
    if session.tick(later) > 0 {
        info!(section = session.active_section(), "session reset after completion");
    }
    Ok(())
}
