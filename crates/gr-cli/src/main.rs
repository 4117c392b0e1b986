mod listen;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gr_core::{Gesture, GestureKind, ThresholdConfig};
use gr_trace::{load_config, read_trace_file, render_config, replay, resolve_config_path};

#[derive(Parser)]
#[command(name = "gr", about = "Gesture recognition engine CLI")]
struct Cli {
    /// Threshold config file (TOML); overrides GR_CONFIG and ./gesture.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded JSONL sample trace and print recognized gestures
    Replay {
        /// Trace file, one pointer sample per line
        trace: PathBuf,

        /// Print gestures as JSON lines
        #[arg(long)]
        json: bool,

        /// Print per-kind counts after the gestures
        #[arg(long)]
        summary: bool,
    },

    /// Recognize gestures from samples streamed on stdin
    Listen,

    /// Print the effective thresholds as TOML
    Config,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Replay {
            trace,
            json,
            summary,
        } => cmd_replay(&cli, trace, *json, *summary),
        Commands::Listen => cmd_listen(&cli).await,
        Commands::Config => cmd_config(&cli),
    }
}

fn load_thresholds(cli: &Cli) -> Result<(ThresholdConfig, Option<PathBuf>)> {
    let path = resolve_config_path(cli.config.as_deref());
    let config = load_config(path.as_deref()).context("failed to load thresholds")?;
    Ok((config, path))
}

fn cmd_replay(cli: &Cli, trace: &Path, json: bool, summary: bool) -> Result<()> {
    let (config, _) = load_thresholds(cli)?;
    let samples = read_trace_file(trace)
        .with_context(|| format!("failed to read trace {}", trace.display()))?;
    let result = replay(config, &samples);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        for gesture in &result.gestures {
            gr_trace::write_gesture(&mut out, gesture)?;
        }
    } else if result.gestures.is_empty() {
        writeln!(out, "(no gestures recognized)")?;
    } else {
        for gesture in &result.gestures {
            writeln!(out, "{}", format_gesture(gesture))?;
        }
    }

    if summary {
        let counts = result.counts();
        writeln!(out, "samples:     {}", result.samples)?;
        writeln!(out, "gestures:    {}", result.gestures.len())?;
        for kind in GestureKind::ALL {
            let count = counts.get(&kind).copied().unwrap_or(0);
            writeln!(out, "{:<12} {count}", format!("{kind}:"))?;
        }
    }
    out.flush()?;
    Ok(())
}

async fn cmd_listen(cli: &Cli) -> Result<()> {
    let (config, _) = load_thresholds(cli)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let stats = listen::run(config, stdin, &mut out).await?;
    tracing::info!(
        samples = stats.samples,
        gestures = stats.gestures,
        skipped = stats.skipped,
        "listen finished"
    );
    Ok(())
}

fn cmd_config(cli: &Cli) -> Result<()> {
    let (config, path) = load_thresholds(cli)?;
    let rendered = render_config(&config)?;
    match path {
        Some(path) => println!("# source: {}", path.display()),
        None => println!("# source: built-in defaults"),
    }
    print!("{rendered}");
    Ok(())
}

/// One human-readable line: `<time>ms  <event>  [@target]`.
fn format_gesture(gesture: &Gesture) -> String {
    match &gesture.target {
        Some(target) => format!("{:>9.1}ms  {}  @{target}", gesture.time_ms, gesture.event),
        None => format!("{:>9.1}ms  {}", gesture.time_ms, gesture.event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_core::{GestureEvent, SwipeDirection, Target};

    #[test]
    fn test_format_gesture_with_target() {
        let gesture = Gesture::new(
            GestureEvent::Tap { x: 10.0, y: 20.0 },
            Some(Target::from("canvas")),
            40.0,
        );
        assert_eq!(format_gesture(&gesture), "     40.0ms  tap (10.0, 20.0)  @canvas");
    }

    #[test]
    fn test_format_gesture_without_target() {
        let gesture = Gesture::new(
            GestureEvent::Swipe {
                direction: SwipeDirection::Left,
                distance: 80.0,
                velocity: 2.0,
            },
            None,
            1_040.0,
        );
        assert_eq!(
            format_gesture(&gesture),
            "   1040.0ms  swipe left distance=80.0 velocity=2.000"
        );
    }

    #[test]
    fn test_cli_parses_global_config_after_subcommand() {
        let cli = Cli::parse_from(["gr", "replay", "t.jsonl", "--config", "g.toml", "--json"]);
        assert_eq!(cli.config, Some(PathBuf::from("g.toml")));
        assert!(matches!(
            cli.command,
            Commands::Replay {
                json: true,
                summary: false,
                ..
            }
        ));
    }
}
