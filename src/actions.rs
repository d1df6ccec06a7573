//! Task steps
//!
//! Each step is one timed action from a `[[task]]` entry in the config file,
//! tagged by its `action` field.

use crate::input::{InputDevice, MouseButton};
use crate::keycodes::{is_modifier, parse_key, parse_keys};
use crate::region::Region;
use crate::sequencer::Sequencer;
use anyhow::Result;
use serde::Deserialize;

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Click {
        x: i32,
        y: i32,
        #[serde(default)]
        button: MouseButton,
        #[serde(default = "one")]
        count: u32,
    },
    /// Click the middle of a `"x1,y1,x2,y2"` region
    ClickRegion {
        region: Region,
        #[serde(default)]
        button: MouseButton,
        #[serde(default = "one")]
        count: u32,
    },
    TypeText {
        text: String,
    },
    PressKey {
        key: String,
    },
    Hotkey {
        keys: Vec<String>,
    },
    NameTrack {
        name: String,
    },
    ClickTrackNameField,
}

impl Step {
    /// Check key names without sending anything
    pub fn validate(&self) -> Result<()> {
        match self {
            Step::PressKey { key } => parse_key(key).map(drop),
            Step::Hotkey { keys } => {
                parse_keys(keys)?;
                let names: Vec<&str> = keys
                    .iter()
                    .flat_map(|k| k.split('+'))
                    .filter(|n| !n.trim().is_empty())
                    .collect();
                let first_regular = names
                    .iter()
                    .position(|n| !is_modifier(n))
                    .unwrap_or(names.len());
                if names[first_regular..].iter().any(|n| is_modifier(n)) {
                    log::warn!(
                        "Hotkey {} lists a modifier after a regular key; it will be released first",
                        keys.join("+")
                    );
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Short human-readable form for logs
    pub fn describe(&self) -> String {
        match self {
            Step::Click {
                x,
                y,
                button,
                count,
            } => format!("click {:?} x{} at ({}, {})", button, count, x, y),
            Step::ClickRegion {
                region,
                button,
                count,
            } => format!("click {:?} x{} in region {}", button, count, region),
            Step::TypeText { text } => format!("type {:?}", text),
            Step::PressKey { key } => format!("press {}", key),
            Step::Hotkey { keys } => format!("hotkey {}", keys.join("+")),
            Step::NameTrack { name } => format!("name track {:?}", name),
            Step::ClickTrackNameField => "click track name field".to_string(),
        }
    }

    pub fn run<D: InputDevice>(&self, seq: &mut Sequencer<D>) -> Result<()> {
        match self {
            Step::Click {
                x,
                y,
                button,
                count,
            } => seq.click(*x, *y, *button, *count),
            Step::ClickRegion {
                region,
                button,
                count,
            } => {
                let (x, y) = region.center();
                seq.click(x, y, *button, *count)
            }
            Step::TypeText { text } => seq.type_text(text),
            Step::PressKey { key } => seq.press_key(parse_key(key)?),
            Step::Hotkey { keys } => seq.hotkey(&parse_keys(keys)?),
            Step::NameTrack { name } => seq.name_track(name),
            Step::ClickTrackNameField => seq.click_track_name_field(),
        }
    }
}
