//! View model read by the tree map and world map widgets.
//!
//! # Design
//! `Dashboard` owns the aggregated rows and the display mode. Rows are
//! assigned once from a fetch; the mode changes only on explicit selection
//! and never triggers a re-fetch or re-aggregation. Everything the widgets
//! draw is derived on demand from those two pieces.

use tracing::{info, warn};

use crate::aggregate::{aggregate, MalformedPolicy};
use crate::display::{color_for, palette_color, DisplayMode, DEFAULT_FILL};
use crate::outcome::FetchOutcome;
use crate::tooltip::{resolve_tooltip, Tooltip};
use crate::types::{CountrySummary, RawRecord};

/// Where the one-shot load currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready(Vec<CountrySummary>),
    NoData,
    Failed(String),
}

/// One tile of the tree map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeMapItem {
    pub name: String,
    pub weight: u64,
    pub label: String,
    pub color: &'static str,
}

/// One data-bound shape of the world map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapShape {
    pub name: String,
    pub value: u64,
    pub color: &'static str,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    state: LoadState,
    mode: DisplayMode,
    policy: MalformedPolicy,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(MalformedPolicy::default())
    }
}

impl Dashboard {
    pub fn new(policy: MalformedPolicy) -> Self {
        Self {
            state: LoadState::Loading,
            mode: DisplayMode::Confirmed,
            policy,
        }
    }

    /// Settle the load with the result of the fetch.
    ///
    /// Every outcome leaves `Loading`; a successful fetch whose records fail
    /// aggregation ends up `Failed`.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome<Vec<RawRecord>>) {
        self.state = match outcome {
            FetchOutcome::Success(records) => match aggregate(&records, self.policy) {
                Ok(rows) if rows.is_empty() => LoadState::NoData,
                Ok(rows) => {
                    info!(countries = rows.len(), "dashboard ready");
                    LoadState::Ready(rows)
                }
                Err(err) => {
                    warn!(error = %err, "aggregation failed");
                    LoadState::Failed(err.to_string())
                }
            },
            FetchOutcome::Empty => LoadState::NoData,
            FetchOutcome::Failure(err) => LoadState::Failed(err.to_string()),
        };
    }

    pub fn select_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Aggregated rows, empty unless the load is `Ready`.
    pub fn summaries(&self) -> &[CountrySummary] {
        match &self.state {
            LoadState::Ready(rows) => rows,
            _ => &[],
        }
    }

    pub fn treemap_items(&self) -> Vec<TreeMapItem> {
        self.summaries()
            .iter()
            .enumerate()
            .map(|(i, s)| TreeMapItem {
                name: s.name.clone(),
                weight: self.mode.value_of(s),
                label: self.mode.label(s),
                color: palette_color(i),
            })
            .collect()
    }

    pub fn map_shapes(&self) -> Vec<MapShape> {
        self.summaries()
            .iter()
            .map(|s| {
                let value = self.mode.value_of(s);
                MapShape {
                    name: s.name.clone(),
                    value,
                    color: color_for(value),
                }
            })
            .collect()
    }

    /// Fill for the map shape called `name`.
    pub fn shape_fill(&self, name: &str) -> &'static str {
        self.summaries()
            .iter()
            .find(|s| s.name == name)
            .map_or(DEFAULT_FILL, |s| color_for(self.mode.value_of(s)))
    }

    pub fn tooltip(&self, hovered: &str) -> Option<Tooltip> {
        resolve_tooltip(self.summaries(), hovered)
    }
}
