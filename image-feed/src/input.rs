//! Turns raw keyboard and pointer input into feed commands
//!
//! The adapter keeps just enough gesture state to recognise swipes and
//! double-taps. It never touches the feed itself; hosts pass in whether the
//! preview is open and dispatch whatever command comes back.

use crate::config::InputConfig;
use crate::controller::Command;

/// Keys the preview reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    /// Keys a focused text field keeps for itself. Everything else, Escape
    /// in particular, still reaches the preview.
    pub fn moves_caret(self) -> bool {
        matches!(self, Key::ArrowLeft | Key::ArrowRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Finger or mouse pressed on the preview image
    PointerDown { x: f64 },
    /// Released; `touch` tells taps apart from mouse clicks
    PointerUp { x: f64, touch: bool },
    DoubleClick,
}

#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    config: InputConfig,
    swipe_start: Option<f64>,
    last_tap_ms: Option<u64>,
}

impl InputAdapter {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            swipe_start: None,
            last_tap_ms: None,
        }
    }

    /// Returns the command for `event`, if any. `now_ms` is any monotonic clock
    /// in milliseconds.
    pub fn translate(&mut self, event: InputEvent, preview_open: bool, now_ms: u64) -> Option<Command> {
        if !preview_open {
            self.swipe_start = None;
            self.last_tap_ms = None;
            return None;
        }

        match event {
            InputEvent::KeyDown(Key::ArrowRight) => Some(Command::Next),
            InputEvent::KeyDown(Key::ArrowLeft) => Some(Command::Previous),
            InputEvent::KeyDown(Key::Escape) => Some(Command::Close),
            InputEvent::KeyDown(Key::Other) => None,
            InputEvent::PointerDown { x } => {
                self.swipe_start = Some(x);
                None
            }
            InputEvent::PointerUp { x, touch } => {
                let start = self.swipe_start.take()?;
                let dx = x - start;
                if dx < -self.config.swipe_threshold {
                    self.last_tap_ms = None;
                    Some(Command::Next)
                } else if dx > self.config.swipe_threshold {
                    self.last_tap_ms = None;
                    Some(Command::Previous)
                } else if touch {
                    self.tap(now_ms)
                } else {
                    None
                }
            }
            InputEvent::DoubleClick => Some(Command::Like),
        }
    }

    fn tap(&mut self, now_ms: u64) -> Option<Command> {
        match self.last_tap_ms {
            Some(prev) if now_ms.saturating_sub(prev) <= self.config.double_tap_ms => {
                self.last_tap_ms = None;
                Some(Command::Like)
            }
            _ => {
                self.last_tap_ms = Some(now_ms);
                None
            }
        }
    }
}
