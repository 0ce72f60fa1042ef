//! Input boundary: raw input events and the sources that produce them.
//!
//! Sources are polled once per frame; each event maps to at most one engine
//! command.

use std::sync::mpsc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use bomber_core::commands::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Drop a bomb now.
    B,
    /// Arm auto-fire.
    A,
    /// Disarm auto-fire.
    D,
    Escape,
    Other(char),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved; `y` is the requested plane altitude in screen px.
    CursorMoved { y: f64 },
    KeyPressed(Key),
    Quit,
}

/// Translate a raw event into an engine command.
pub fn map_event(event: InputEvent) -> Option<Command> {
    match event {
        InputEvent::CursorMoved { y } => Some(Command::SetAltitudeSample { y }),
        InputEvent::KeyPressed(Key::B) => Some(Command::ManualFire),
        InputEvent::KeyPressed(Key::A) => Some(Command::ArmAutoFire),
        InputEvent::KeyPressed(Key::D) => Some(Command::DisarmAutoFire),
        InputEvent::KeyPressed(Key::Escape) | InputEvent::Quit => Some(Command::Shutdown),
        InputEvent::KeyPressed(Key::Other(_)) => None,
    }
}

/// Parse one line of text input: `b`, `a`, `d`, `q` or `y <altitude>`.
pub fn parse_line(line: &str) -> Option<InputEvent> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    match head {
        "y" => parts
            .next()
            .and_then(|v| v.parse::<f64>().ok())
            .map(|y| InputEvent::CursorMoved { y }),
        "q" | "quit" => Some(InputEvent::Quit),
        "b" => Some(InputEvent::KeyPressed(Key::B)),
        "a" => Some(InputEvent::KeyPressed(Key::A)),
        "d" => Some(InputEvent::KeyPressed(Key::D)),
        other => other
            .chars()
            .next()
            .map(|c| InputEvent::KeyPressed(Key::Other(c))),
    }
}

pub trait InputSource {
    /// Events that arrived since the previous poll. `frame` counts from zero.
    fn poll(&mut self, frame: u64) -> Vec<InputEvent>;
}

/// Events pushed from another thread over a channel.
pub struct ChannelInput {
    rx: mpsc::Receiver<InputEvent>,
    disconnected: bool,
}

impl ChannelInput {
    pub fn new(rx: mpsc::Receiver<InputEvent>) -> Self {
        Self {
            rx,
            disconnected: false,
        }
    }

    /// A connected sender/source pair.
    pub fn channel() -> (mpsc::Sender<InputEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self, _frame: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.disconnected {
            return events;
        }
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    // A closed channel counts as a quit.
                    self.disconnected = true;
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }
        events
    }
}

/// Reproducible synthetic input: a seeded random-walk cursor plus key presses
/// at fixed frames.
pub struct ScriptedInput {
    rng: ChaCha8Rng,
    cursor_y: f64,
    max_y: f64,
    step: f64,
    fire_probability: f64,
    keys: Vec<(u64, Key)>,
    quit_at: Option<u64>,
}

impl ScriptedInput {
    pub fn new(seed: u64, start_y: f64, max_y: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            cursor_y: start_y,
            max_y,
            step: 8.0,
            fire_probability: 0.0,
            keys: Vec::new(),
            quit_at: None,
        }
    }

    /// Largest cursor movement per frame.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step.abs();
        self
    }

    /// Chance per frame of a random `B` press.
    pub fn with_random_fire(mut self, probability: f64) -> Self {
        self.fire_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_key_at(mut self, frame: u64, key: Key) -> Self {
        self.keys.push((frame, key));
        self
    }

    pub fn with_quit_at(mut self, frame: u64) -> Self {
        self.quit_at = Some(frame);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if self.step > 0.0 {
            let delta = self.rng.gen_range(-self.step..=self.step);
            self.cursor_y = (self.cursor_y + delta).clamp(0.0, self.max_y);
            events.push(InputEvent::CursorMoved { y: self.cursor_y });
        }

        events.extend(
            self.keys
                .iter()
                .filter(|(at, _)| *at == frame)
                .map(|(_, key)| InputEvent::KeyPressed(*key)),
        );

        if self.fire_probability > 0.0 && self.rng.gen_bool(self.fire_probability) {
            events.push(InputEvent::KeyPressed(Key::B));
        }

        if self.quit_at == Some(frame) {
            events.push(InputEvent::Quit);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            map_event(InputEvent::KeyPressed(Key::B)),
            Some(Command::ManualFire)
        );
        assert_eq!(
            map_event(InputEvent::KeyPressed(Key::A)),
            Some(Command::ArmAutoFire)
        );
        assert_eq!(
            map_event(InputEvent::KeyPressed(Key::D)),
            Some(Command::DisarmAutoFire)
        );
        assert_eq!(map_event(InputEvent::Quit), Some(Command::Shutdown));
        assert_eq!(
            map_event(InputEvent::CursorMoved { y: 42.0 }),
            Some(Command::SetAltitudeSample { y: 42.0 })
        );
        assert_eq!(map_event(InputEvent::KeyPressed(Key::Other('x'))), None);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("b"), Some(InputEvent::KeyPressed(Key::B)));
        assert_eq!(parse_line("  y 250.5 "), Some(InputEvent::CursorMoved { y: 250.5 }));
        assert_eq!(parse_line("y nope"), None);
        assert_eq!(parse_line("q"), Some(InputEvent::Quit));
        assert_eq!(parse_line(""), None);
        assert_eq!(
            parse_line("z"),
            Some(InputEvent::KeyPressed(Key::Other('z')))
        );
    }

    #[test]
    fn test_channel_drains_in_order() {
        let (tx, mut input) = ChannelInput::channel();
        tx.send(InputEvent::CursorMoved { y: 100.0 }).unwrap();
        tx.send(InputEvent::KeyPressed(Key::B)).unwrap();

        assert_eq!(
            input.poll(0),
            vec![
                InputEvent::CursorMoved { y: 100.0 },
                InputEvent::KeyPressed(Key::B)
            ]
        );
        assert!(input.poll(1).is_empty());
    }

    #[test]
    fn test_channel_disconnect_quits_once() {
        let (tx, mut input) = ChannelInput::channel();
        tx.send(InputEvent::KeyPressed(Key::A)).unwrap();
        drop(tx);

        assert_eq!(
            input.poll(0),
            vec![InputEvent::KeyPressed(Key::A), InputEvent::Quit]
        );
        assert!(input.poll(1).is_empty());
    }

    #[test]
    fn test_scripted_is_reproducible() {
        let make = || {
            ScriptedInput::new(7, 300.0, 600.0)
                .with_random_fire(0.05)
                .with_key_at(10, Key::A)
                .with_quit_at(99)
        };
        let mut a = make();
        let mut b = make();
        let events_a: Vec<_> = (0..100).flat_map(|f| a.poll(f)).collect();
        let events_b: Vec<_> = (0..100).flat_map(|f| b.poll(f)).collect();
        assert_eq!(events_a, events_b);

        assert!(events_a.contains(&InputEvent::KeyPressed(Key::A)));
        assert_eq!(events_a.last(), Some(&InputEvent::Quit));
        assert!(events_a.iter().all(|e| match e {
            InputEvent::CursorMoved { y } => (0.0..=600.0).contains(y),
            _ => true,
        }));
    }

    #[test]
    fn test_scripted_zero_step_keeps_cursor_still() {
        let mut input = ScriptedInput::new(1, 300.0, 600.0)
            .with_step(0.0)
            .with_key_at(0, Key::B);
        assert_eq!(input.poll(0), vec![InputEvent::KeyPressed(Key::B)]);
        assert!(input.poll(1).is_empty());
    }
}
