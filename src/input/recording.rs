//! In-memory input device for tests
//!
//! Records every primitive event and wait into a shared log instead of
//! touching the OS.

use super::{InputDevice, MouseButton};
use anyhow::{Result, bail};
use enigo::Key;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Move(i32, i32),
    Click(MouseButton),
    Char(char),
    KeyDown(Key),
    KeyUp(Key),
    Wait(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDevice {
    events: Arc<Mutex<Vec<Event>>>,
    position: (i32, i32),
    /// Key that fails on press, to exercise error propagation
    failing_key: Option<Key>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(key: Key) -> Self {
        Self {
            failing_key: Some(key),
            ..Self::default()
        }
    }

    /// Handle to the event log, usable after the device moves into a thread
    pub fn log(&self) -> Arc<Mutex<Vec<Event>>> {
        Arc::clone(&self.events)
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl InputDevice for RecordingDevice {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.position = (x, y);
        self.push(Event::Move(x, y));
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        self.push(Event::Click(button));
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            self.push(Event::Char(c));
        }
        Ok(())
    }

    fn key_down(&mut self, key: Key) -> Result<()> {
        if self.failing_key == Some(key) {
            bail!("Failed to press key {:?}", key);
        }
        self.push(Event::KeyDown(key));
        Ok(())
    }

    fn key_up(&mut self, key: Key) -> Result<()> {
        self.push(Event::KeyUp(key));
        Ok(())
    }

    fn location(&self) -> Result<(i32, i32)> {
        Ok(self.position)
    }

    fn wait(&mut self, duration: Duration) {
        self.push(Event::Wait(duration));
    }
}
