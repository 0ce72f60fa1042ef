//! Game loop: drives the simulation engine at a fixed tick rate.
//!
//! Each frame drains the input source, samples the clock once, ticks the
//! engine with that time and hands the snapshot to the renderer. Pacing only
//! decides when frames happen; the simulation sees nothing but the sampled
//! time, so results do not depend on it.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use bomber_core::constants::TICK_RATE;
use bomber_core::state::GameStateSnapshot;
use bomber_sim::SimulationEngine;

use crate::clock::Clock;
use crate::input::{self, InputSource};
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub tick_rate: u32,
    /// Stop after this many ticks even without a shutdown request.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold the tick rate in wall-clock time.
    pub realtime: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            max_ticks: None,
            realtime: false,
        }
    }
}

impl LoopSettings {
    /// Nominal duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

/// How the loop ended.
#[derive(Debug, Clone)]
pub struct LoopSummary {
    pub ticks: u64,
    pub shutdown_requested: bool,
    pub last_snapshot: Option<GameStateSnapshot>,
}

/// Run until shutdown is requested or `max_ticks` is reached.
pub fn run_game_loop(
    engine: &mut SimulationEngine,
    clock: &mut dyn Clock,
    input: &mut dyn InputSource,
    renderer: &mut dyn Renderer,
    settings: &LoopSettings,
) -> io::Result<LoopSummary> {
    let tick_duration = settings.tick_duration();
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;
    let mut last_snapshot = None;

    info!(
        "game loop started at {} Hz{}",
        settings.tick_rate,
        if settings.realtime { " (realtime)" } else { "" }
    );

    loop {
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            info!("tick limit reached after {ticks} ticks");
            break;
        }

        // 1. Drain all pending input
        for event in input.poll(ticks) {
            if let Some(command) = input::map_event(event) {
                engine.queue_command(command);
            }
        }

        // 2. One clock sample per tick
        let now_ms = clock.now_ms();
        let snapshot = engine.tick(now_ms);
        ticks += 1;

        // 3. Render
        renderer.render(&snapshot)?;

        let shutdown = snapshot.shutdown_requested;
        last_snapshot = Some(snapshot);
        if shutdown {
            info!("shutdown after {ticks} ticks");
            break;
        }

        // 4. Sleep until next tick
        if settings.realtime {
            pace(&mut next_tick_time, tick_duration);
        }
    }

    renderer.finish()?;
    Ok(LoopSummary {
        ticks,
        shutdown_requested: engine.is_shut_down(),
        last_snapshot,
    })
}

/// Sleep until the next deadline. When more than two ticks behind, reset the
/// deadline to now instead of catching up.
fn pace(next_tick_time: &mut Instant, tick_duration: Duration) {
    *next_tick_time += tick_duration;
    let now = Instant::now();
    if *next_tick_time > now {
        thread::sleep(*next_tick_time - now);
    } else if now - *next_tick_time > tick_duration * 2 {
        *next_tick_time = now;
    }
}
