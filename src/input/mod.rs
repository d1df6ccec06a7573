//! Input device abstraction
//!
//! The sequencer talks to the host OS only through [`InputDevice`]. The real
//! implementation posts events via `enigo`; tests substitute a recorder.

mod enigo_device;
#[cfg(test)]
pub mod recording;

pub use enigo_device::EnigoDevice;

use anyhow::Result;
use enigo::Key;
use serde::Deserialize;
use std::time::Duration;

/// Mouse button for click actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn to_enigo(self) -> enigo::Button {
        match self {
            MouseButton::Left => enigo::Button::Left,
            MouseButton::Right => enigo::Button::Right,
            MouseButton::Middle => enigo::Button::Middle,
        }
    }
}

/// Primitive pointer and keyboard operations provided by the host
///
/// Implementations must not add delays of their own; all pacing is done by
/// the sequencer through [`InputDevice::wait`].
pub trait InputDevice {
    /// Move the pointer to absolute screen coordinates
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Click `button` once
    fn click(&mut self, button: MouseButton) -> Result<()>;

    /// Emit `text` as synthetic keystrokes, one per character
    fn text(&mut self, text: &str) -> Result<()>;

    fn key_down(&mut self, key: Key) -> Result<()>;

    fn key_up(&mut self, key: Key) -> Result<()>;

    /// Current pointer location
    fn location(&self) -> Result<(i32, i32)>;

    /// Block the calling thread for `duration`
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
