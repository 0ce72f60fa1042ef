use std::io::BufRead;
use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, warn};

use bomber_app::clock::{Clock, FixedStepClock, MonotonicClock};
use bomber_app::game_loop::{self, LoopSettings};
use bomber_app::input::{self, ChannelInput, InputSource, Key, ScriptedInput};
use bomber_app::render::{JsonLinesRenderer, LogRenderer, Renderer};
use bomber_core::config::SimConfig;
use bomber_core::constants::TICK_RATE;
use bomber_sim::SimulationEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// One JSON snapshot per line on stdout.
    Json,
    /// Events and periodic status through the logger.
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputMode {
    /// Seeded random cursor with auto-fire armed early on.
    Scripted,
    /// Line commands from stdin: b, a, d, q, y <altitude>.
    Stdin,
}

/// Headless bomber session: drop bombs from a plane onto a moving target.
#[derive(Parser, Debug)]
#[command(name = "bomber", version, about)]
struct Cli {
    /// JSON file with simulation settings. Missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,

    #[arg(long, default_value_t = TICK_RATE)]
    tick_rate: u32,

    /// Seed for scripted input.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Pace ticks in wall-clock time and read time from the system clock.
    #[arg(long)]
    realtime: bool,

    #[arg(long, value_enum, default_value_t = Output::Log)]
    output: Output,

    #[arg(long, value_enum, default_value_t = InputMode::Scripted)]
    input: InputMode,
}

/// Scripted runs without `--ticks` stop here.
const DEFAULT_SCRIPTED_TICKS: u64 = 1200;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    let mut engine = SimulationEngine::new(config.clone()).context("starting simulation")?;

    let mut input: Box<dyn InputSource> = match cli.input {
        InputMode::Scripted => Box::new(
            ScriptedInput::new(cli.seed, config.initial_altitude, config.screen_height)
                .with_random_fire(0.005)
                .with_key_at(30, Key::A),
        ),
        InputMode::Stdin => Box::new(spawn_stdin_reader()?),
    };

    let settings = loop_settings(&cli);
    if settings.realtime && !cli.realtime {
        info!("stdin input runs in realtime");
    }

    let mut clock: Box<dyn Clock> = if settings.realtime {
        Box::new(MonotonicClock::new())
    } else {
        Box::new(FixedStepClock::for_tick_rate(cli.tick_rate))
    };

    let mut renderer: Box<dyn Renderer> = match cli.output {
        Output::Json => Box::new(JsonLinesRenderer::new(std::io::stdout().lock())),
        Output::Log => Box::new(LogRenderer::new(u64::from(cli.tick_rate))),
    };

    let summary = game_loop::run_game_loop(
        &mut engine,
        clock.as_mut(),
        input.as_mut(),
        renderer.as_mut(),
        &settings,
    )
    .context("game loop failed")?;

    if let Some(last) = &summary.last_snapshot {
        let score = last.score;
        info!(
            "session over after {} ticks: {} manual + {} auto releases, {} impacts, {} target strikes",
            summary.ticks,
            score.manual_releases,
            score.auto_releases,
            score.ground_impacts,
            score.target_strikes
        );
    }
    Ok(())
}

/// Loop settings for the parsed flags. Stdin input always runs paced
/// against the wall clock.
fn loop_settings(cli: &Cli) -> LoopSettings {
    let max_ticks = match (cli.ticks, cli.input) {
        (Some(ticks), _) => Some(ticks),
        (None, InputMode::Scripted) => Some(DEFAULT_SCRIPTED_TICKS),
        (None, InputMode::Stdin) => None,
    };
    LoopSettings {
        tick_rate: cli.tick_rate,
        max_ticks,
        realtime: cli.realtime || cli.input == InputMode::Stdin,
    }
}

/// Read stdin on a background thread and forward parsed events.
fn spawn_stdin_reader() -> anyhow::Result<ChannelInput> {
    let (tx, source) = ChannelInput::channel();
    thread::Builder::new()
        .name("bomber-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match input::parse_line(&line) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => warn!("ignoring input line {line:?}"),
                }
            }
        })
        .context("spawning stdin reader")?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdin_input_is_always_paced() {
        let cli = Cli::parse_from(["bomber", "--input", "stdin"]);
        let settings = loop_settings(&cli);
        assert!(settings.realtime);
        assert_eq!(settings.max_ticks, None);
    }

    #[test]
    fn test_scripted_input_defaults() {
        let cli = Cli::parse_from(["bomber"]);
        let settings = loop_settings(&cli);
        assert!(!settings.realtime);
        assert_eq!(settings.max_ticks, Some(DEFAULT_SCRIPTED_TICKS));
        assert_eq!(settings.tick_rate, TICK_RATE);

        let cli = Cli::parse_from(["bomber", "--ticks", "10", "--realtime"]);
        let settings = loop_settings(&cli);
        assert!(settings.realtime);
        assert_eq!(settings.max_ticks, Some(10));
    }
}
