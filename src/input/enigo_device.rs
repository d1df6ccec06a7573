//! Host input via `enigo`
//!
//! Events go to whichever window currently has focus.

use super::{InputDevice, MouseButton};
use anyhow::{Context, Result};
use enigo::{Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};

pub struct EnigoDevice {
    enigo: Enigo,
}

impl EnigoDevice {
    /// Connect to the host input subsystem
    ///
    /// On macOS this fails unless the process has accessibility permission.
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .context("Failed to connect to the host input subsystem")?;
        log::debug!("Input device connected");
        Ok(Self { enigo })
    }
}

impl std::fmt::Debug for EnigoDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnigoDevice").finish_non_exhaustive()
    }
}

impl InputDevice for EnigoDevice {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .with_context(|| format!("Failed to move pointer to ({}, {})", x, y))
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        self.enigo
            .button(button.to_enigo(), Direction::Click)
            .with_context(|| format!("Failed to click {:?} button", button))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.enigo
            .text(text)
            .with_context(|| format!("Failed to type text: {:?}", text))
    }

    fn key_down(&mut self, key: Key) -> Result<()> {
        self.enigo
            .key(key, Direction::Press)
            .with_context(|| format!("Failed to press key {:?}", key))
    }

    fn key_up(&mut self, key: Key) -> Result<()> {
        self.enigo
            .key(key, Direction::Release)
            .with_context(|| format!("Failed to release key {:?}", key))
    }

    fn location(&self) -> Result<(i32, i32)> {
        self.enigo
            .location()
            .context("Failed to read pointer location")
    }
}
