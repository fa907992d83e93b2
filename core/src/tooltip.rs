//! Map hover tooltips.

use std::fmt;

use crate::types::CountrySummary;

/// Three-line tooltip for a hovered country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub name: String,
    pub confirmed: u64,
    pub deaths: u64,
}

impl Tooltip {
    pub fn lines(&self) -> [String; 3] {
        [
            self.name.clone(),
            format!("Confirmed: {}", self.confirmed),
            format!("Deaths: {}", self.deaths),
        ]
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Look up `hovered` by exact, case-sensitive name.
///
/// Shape names that the backend spells differently simply get no tooltip.
pub fn resolve_tooltip(summaries: &[CountrySummary], hovered: &str) -> Option<Tooltip> {
    summaries
        .iter()
        .find(|s| s.name == hovered)
        .map(|s| Tooltip {
            name: s.name.clone(),
            confirmed: s.confirmed,
            deaths: s.deaths,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<CountrySummary> {
        vec![
            CountrySummary {
                name: "A".to_string(),
                confirmed: 13,
                deaths: 3,
            },
            CountrySummary {
                name: "B".to_string(),
                confirmed: 5,
                deaths: 0,
            },
        ]
    }

    #[test]
    fn formats_three_lines() {
        let tip = resolve_tooltip(&summaries(), "A").unwrap();
        assert_eq!(tip.to_string(), "A\nConfirmed: 13\nDeaths: 3");
    }

    #[test]
    fn unknown_name_leaves_tooltip_unset() {
        assert!(resolve_tooltip(&summaries(), "Atlantis").is_none());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(resolve_tooltip(&summaries(), "a").is_none());
        assert!(resolve_tooltip(&summaries(), "A ").is_none());
    }

    #[test]
    fn empty_set_never_matches() {
        assert!(resolve_tooltip(&[], "A").is_none());
    }
}
