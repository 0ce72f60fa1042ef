//! Render boundary. Renderers only read snapshots.

use std::io::{self, Write};

use log::{debug, info};

use bomber_core::events::SimEvent;
use bomber_core::state::GameStateSnapshot;

pub trait Renderer {
    fn render(&mut self, snapshot: &GameStateSnapshot) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One JSON snapshot per line.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, snapshot: &GameStateSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Logs the events of each tick and a periodic status line.
pub struct LogRenderer {
    status_every: u64,
}

impl LogRenderer {
    pub fn new(status_every: u64) -> Self {
        Self {
            status_every: status_every.max(1),
        }
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &GameStateSnapshot) -> io::Result<()> {
        let t = snapshot.time.now_ms;
        for event in &snapshot.events {
            match event {
                SimEvent::ProjectileGrounded {
                    id,
                    struck_target: true,
                    ..
                } => info!("[{t:>8.1}] {id} hit the target"),
                other => debug!("[{t:>8.1}] {other:?}"),
            }
        }

        if snapshot.time.tick % self.status_every == 0 {
            info!(
                "[{t:>8.1}] tick {} altitude {:.1} projectiles {} effects {} target x {:.1} armed {}",
                snapshot.time.tick,
                snapshot.plane.altitude,
                snapshot.projectiles.len(),
                snapshot.effects.len(),
                snapshot.target.position.x,
                snapshot.auto_fire.armed
            );
        }
        Ok(())
    }
}

/// Keeps every snapshot it is given.
#[derive(Default)]
pub struct RecordingRenderer {
    pub snapshots: Vec<GameStateSnapshot>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &GameStateSnapshot) -> io::Result<()> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}
