//! Screen regions given as `"x1,y1,x2,y2"`

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    /// Midpoint of the region, rounded down
    pub fn center(&self) -> (i32, i32) {
        let mid = |a: i32, b: i32| ((a as i64 + b as i64).div_euclid(2)) as i32;
        (mid(self.x1, self.x2), mid(self.y1, self.y2))
    }
}

impl FromStr for Region {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let coords = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<i32>()
                    .with_context(|| format!("Invalid coordinate '{}' in region '{}'", part, s))
            })
            .collect::<Result<Vec<_>>>()?;

        let [x1, y1, x2, y2] = coords[..] else {
            bail!(
                "Region must have 4 coordinates (x1,y1,x2,y2), got {} in '{}'",
                coords.len(),
                s
            );
        };
        Ok(Region { x1, y1, x2, y2 })
    }
}

impl TryFrom<String> for Region {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}
