//! Domain DTOs for the `CovidDailies` resource.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! The nested country name is kept as a raw `serde_json::Value` because the
//! backend does not guarantee it is a string. Coercion happens in
//! [`RawRecord::country_name`], so a bad name fails the aggregation pass
//! rather than the whole response decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One daily observation as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub id: i64,
    #[serde(rename = "personConfirmed")]
    pub confirmed: u64,
    #[serde(rename = "personDeath")]
    pub deaths: u64,
    #[serde(
        rename = "CountryRegion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<CountryRegion>,
}

/// The expanded `CountryRegion` navigation property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryRegion {
    #[serde(
        rename = "countryName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub country_name: Option<Value>,
}

impl RawRecord {
    pub fn new(id: i64, confirmed: u64, deaths: u64, country: &str) -> Self {
        Self {
            id,
            confirmed,
            deaths,
            region: Some(CountryRegion {
                country_name: Some(Value::String(country.to_string())),
            }),
        }
    }

    /// Country name coerced to text.
    ///
    /// Strings pass through, numbers and booleans use their JSON rendering.
    /// A missing region, a missing or null name, or a composite value yields
    /// `None`.
    pub fn country_name(&self) -> Option<String> {
        match self.region.as_ref()?.country_name.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// OData collection envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ODataEnvelope<T> {
    #[serde(
        rename = "@odata.context",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<String>,
    pub value: Vec<T>,
}

/// Per-country totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountrySummary {
    pub name: String,
    #[serde(rename = "personConfirmed")]
    pub confirmed: u64,
    #[serde(rename = "personDeath")]
    pub deaths: u64,
}

impl CountrySummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confirmed: 0,
            deaths: 0,
        }
    }
}
