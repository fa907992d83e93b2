//! Display mode and the value, label and color bindings it selects.
//!
//! Both widgets read the same mode: the tree map weights and labels items
//! by the selected total, and the world map colors shapes by it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::CountrySummary;

/// Which per-country total drives the widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Confirmed,
    Death,
}

impl DisplayMode {
    pub fn value_of(self, summary: &CountrySummary) -> u64 {
        match self {
            DisplayMode::Confirmed => summary.confirmed,
            DisplayMode::Death => summary.deaths,
        }
    }

    /// Wire name of the bound field, as the backend spells it.
    pub fn field_name(self) -> &'static str {
        match self {
            DisplayMode::Confirmed => "personConfirmed",
            DisplayMode::Death => "personDeath",
        }
    }

    /// Tree map label: the country name over the selected total.
    pub fn label(self, summary: &CountrySummary) -> String {
        format!("{}\n{}", summary.name, self.value_of(summary))
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Confirmed => DisplayMode::Death,
            DisplayMode::Death => DisplayMode::Confirmed,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Confirmed => f.write_str("Confirmed"),
            DisplayMode::Death => f.write_str("Death"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown display mode {0:?} (expected `confirmed` or `death`)")]
pub struct ParseDisplayModeError(pub String);

impl FromStr for DisplayMode {
    type Err = ParseDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(DisplayMode::Confirmed),
            "death" | "deaths" => Ok(DisplayMode::Death),
            _ => Err(ParseDisplayModeError(s.to_string())),
        }
    }
}

/// One half-open `[from, to)` range of the map color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBin {
    pub from: u64,
    pub to: u64,
    pub color: &'static str,
}

impl ColorBin {
    pub fn contains(&self, value: u64) -> bool {
        self.from <= value && value < self.to
    }
}

pub static COLOR_SCALE: [ColorBin; 5] = [
    ColorBin { from: 0, to: 50_000, color: "#316DB5" },
    ColorBin { from: 50_000, to: 100_000, color: "#D84444" },
    ColorBin { from: 100_000, to: 200_000, color: "#344b70" },
    ColorBin { from: 200_000, to: 1_000_000, color: "#ff1493" },
    ColorBin { from: 1_000_000, to: 10_000_000, color: "#a84f67" },
];

/// Fill for map shapes with no matching country.
pub const DEFAULT_FILL: &str = "#E5E5E5";

pub const SHAPE_BORDER_COLOR: &str = "black";
pub const SHAPE_BORDER_WIDTH: f32 = 0.5;

/// Tree map item colors, assigned by position and cycled.
pub const TREEMAP_PALETTE: [&str; 5] = ["green", "blue", "pink", "red", "orange"];

/// Bin for `value`. Values past the top boundary clamp to the last bin.
pub fn color_bin(value: u64) -> &'static ColorBin {
    let last = &COLOR_SCALE[COLOR_SCALE.len() - 1];
    COLOR_SCALE
        .iter()
        .find(|bin| bin.contains(value))
        .unwrap_or(last)
}

pub fn color_for(value: u64) -> &'static str {
    color_bin(value).color
}

pub fn palette_color(position: usize) -> &'static str {
    TREEMAP_PALETTE[position % TREEMAP_PALETTE.len()]
}
