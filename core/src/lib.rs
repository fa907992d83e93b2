//! Data core of the COVID-19 dashboard.
//!
//! # Overview
//! Fetches daily case and death records from the `CovidDailies` OData
//! resource, groups them by country, and exposes a view model for a tree map
//! and a world map. The crate performs no I/O of its own: the host supplies a
//! [`Transport`] that executes the plain-data [`HttpRequest`] values the
//! client builds.
//!
//! # Design
//! - `CovidClient` is stateless; it holds only `base_url`.
//! - Each backend operation is split into `build_*` and `parse_*`, so the
//!   I/O boundary is explicit. `call` and `fetch_dailies` join the two and
//!   absorb failures into a [`FetchOutcome`].
//! - [`aggregate`] is a pure function; [`Dashboard`] owns the result and the
//!   [`DisplayMode`].
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod aggregate;
pub mod client;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod http;
pub mod outcome;
pub mod tooltip;
pub mod types;

pub use aggregate::{aggregate, MalformedPolicy};
pub use client::{CallOptions, CovidClient};
pub use dashboard::{Dashboard, LoadState, MapShape, TreeMapItem};
pub use display::{color_for, DisplayMode};
pub use error::{AggregateError, ApiError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use outcome::FetchOutcome;
pub use tooltip::{resolve_tooltip, Tooltip};
pub use types::{CountryRegion, CountrySummary, ODataEnvelope, RawRecord};
