//! Delay-paced input sequencer
//!
//! Turns "click here", "type this", "press this hotkey" into primitive device
//! events with a fixed inter-action delay around each one, giving the DAW
//! time to process input. Nothing here checks that the DAW is focused or even
//! running; events go wherever the OS sends them.
//!
//! A sequencer is not synchronized. Two sequences running at once on
//! separate devices interleave their events unpredictably.

use crate::input::{InputDevice, MouseButton};
use anyhow::{Context, Result};
use enigo::Key;
use std::time::Duration;

/// Default pause between primitive actions
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Default screen position of the track name field
pub const DEFAULT_TRACK_NAME_FIELD: (i32, i32) = (100, 50);

/// Timing and target knobs for a [`Sequencer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// Inter-action delay
    pub delay: Duration,
    /// Key pressed after typing a track name
    pub confirm_key: Key,
    /// Where `click_track_name_field` clicks
    pub track_name_field: (i32, i32),
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            confirm_key: Key::Return,
            track_name_field: DEFAULT_TRACK_NAME_FIELD,
        }
    }
}

pub struct Sequencer<D: InputDevice> {
    device: D,
    config: SequencerConfig,
}

impl<D: InputDevice> Sequencer<D> {
    pub fn new(device: D, config: SequencerConfig) -> Self {
        log::debug!(
            "Sequencer ready (delay {:?}, confirm {:?})",
            config.delay,
            config.confirm_key
        );
        Self { device, config }
    }

    /// Change the delay used by every following call
    pub fn set_delay(&mut self, delay: Duration) {
        self.config.delay = delay;
    }

    #[cfg(test)]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[cfg(test)]
    pub fn into_device(self) -> D {
        self.device
    }

    fn pause(&mut self) {
        self.device.wait(self.config.delay);
    }

    /// Move to (x, y) and click `count` times
    ///
    /// Coordinates are passed to the OS unchecked.
    pub fn click(&mut self, x: i32, y: i32, button: MouseButton, count: u32) -> Result<()> {
        log::debug!("click {:?} x{} at ({}, {})", button, count, x, y);
        self.device.move_to(x, y)?;
        self.pause();
        for _ in 0..count {
            self.device.click(button)?;
        }
        self.pause();
        Ok(())
    }

    /// Type literal text into whatever has focus
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        log::debug!("type_text {:?}", text);
        if !text.is_empty() {
            self.device.text(text)?;
        }
        self.pause();
        Ok(())
    }

    /// Press and release a single key
    pub fn press_key(&mut self, key: Key) -> Result<()> {
        log::debug!("press_key {:?}", key);
        self.device.key_down(key)?;
        self.device.wait(self.config.delay / 2);
        self.device.key_up(key)?;
        self.pause();
        Ok(())
    }

    /// Hold `keys` down in order, then release them in reverse order
    ///
    /// Modifiers listed first are therefore held around the main key.
    pub fn hotkey(&mut self, keys: &[Key]) -> Result<()> {
        log::debug!("hotkey {:?}", keys);
        for &key in keys {
            self.device.key_down(key)?;
        }
        self.pause();
        for &key in keys.iter().rev() {
            self.device.key_up(key)?;
        }
        self.pause();
        Ok(())
    }

    /// Type a track name and confirm it
    ///
    /// The name field must already have focus, usually from a prior click.
    /// If the confirm key fails the field is left half-edited.
    pub fn name_track(&mut self, name: &str) -> Result<()> {
        log::info!("Naming track: {}", name);
        self.type_text(name)?;
        let confirm = self.config.confirm_key;
        self.press_key(confirm)
            .with_context(|| format!("Failed to confirm track name '{}'", name))
    }

    /// Click the configured track name field to give it focus
    pub fn click_track_name_field(&mut self) -> Result<()> {
        let (x, y) = self.config.track_name_field;
        self.click(x, y, MouseButton::Left, 1)
    }

    pub fn cursor_position(&self) -> Result<(i32, i32)> {
        self.device.location()
    }
}
