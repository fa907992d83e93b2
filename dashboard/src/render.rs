//! Plain-text rendering of the dashboard view model.
//!
//! Mirrors what the widgets are fed: a heading, the active mode, then the
//! tree map tiles and the colored map shapes. A loading, empty or failed
//! load each get their own line instead of a blank screen.

use std::io::{self, Write};

use covid_core::display::{SHAPE_BORDER_COLOR, SHAPE_BORDER_WIDTH};
use covid_core::{Dashboard, LoadState};

pub fn render(dashboard: &Dashboard, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "COVID-19 Data")?;
    writeln!(out, "Display: {}", dashboard.mode())?;

    match dashboard.state() {
        LoadState::Loading => return writeln!(out, "Loading data..."),
        LoadState::NoData => return writeln!(out, "No data available."),
        LoadState::Failed(reason) => return writeln!(out, "Could not load data: {reason}"),
        LoadState::Ready(_) => {}
    }

    writeln!(out)?;
    writeln!(out, "Tree Map ({})", dashboard.mode().field_name())?;
    for item in dashboard.treemap_items() {
        writeln!(
            out,
            "  {:<24} {:>12}  {}",
            item.name, item.weight, item.color
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "World Map (border {SHAPE_BORDER_COLOR} {SHAPE_BORDER_WIDTH})"
    )?;
    for shape in dashboard.map_shapes() {
        writeln!(
            out,
            "  {:<24} {:>12}  {}",
            shape.name, shape.value, shape.color
        )?;
    }
    Ok(())
}

/// Tooltip text for `hovered`, or a note that the map has no data for it.
pub fn render_hover(dashboard: &Dashboard, hovered: &str, out: &mut impl Write) -> io::Result<()> {
    match dashboard.tooltip(hovered) {
        Some(tip) => writeln!(out, "{tip}"),
        None => writeln!(out, "{hovered}: no data"),
    }
}
