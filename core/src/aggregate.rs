//! Group daily records by country and sum their counts.
//!
//! Output order is the order in which each country name is first seen in the
//! input, not alphabetical and not by magnitude.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::AggregateError;
use crate::types::{CountrySummary, RawRecord};

/// What to do with a record whose country name is missing or unusable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Fail the whole pass.
    #[default]
    Abort,
    /// Log the record and leave it out of every total.
    Skip,
}

pub fn aggregate(
    records: &[RawRecord],
    policy: MalformedPolicy,
) -> Result<Vec<CountrySummary>, AggregateError> {
    let mut rows: Vec<CountrySummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for (i, record) in records.iter().enumerate() {
        let Some(name) = record.country_name() else {
            match policy {
                MalformedPolicy::Abort => {
                    return Err(AggregateError::MissingCountry {
                        index: i,
                        id: record.id,
                    });
                }
                MalformedPolicy::Skip => {
                    warn!(index = i, id = record.id, "skipping record without country name");
                    skipped += 1;
                    continue;
                }
            }
        };

        let slot = *index.entry(name).or_insert_with_key(|name| {
            rows.push(CountrySummary::new(name.clone()));
            rows.len() - 1
        });
        let row = &mut rows[slot];

        row.confirmed = row
            .confirmed
            .checked_add(record.confirmed)
            .ok_or_else(|| overflow(&row.name, "confirmed"))?;
        row.deaths = row
            .deaths
            .checked_add(record.deaths)
            .ok_or_else(|| overflow(&row.name, "deaths"))?;
    }

    debug!(
        records = records.len(),
        countries = rows.len(),
        skipped,
        "aggregated daily records"
    );
    Ok(rows)
}

fn overflow(country: &str, field: &'static str) -> AggregateError {
    AggregateError::Overflow {
        country: country.to_string(),
        field,
    }
}
