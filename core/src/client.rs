//! Request builder, response parser and fail-soft caller for the backend.
//!
//! # Design
//! `CovidClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//!
//! `call` and `fetch_dailies` tie the two together through a caller-supplied
//! `Transport`. They are the boundary where errors stop: every failure is
//! logged and folded into `FetchOutcome::Failure`.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::outcome::FetchOutcome;
use crate::types::{ODataEnvelope, RawRecord};

/// Resource path of the daily records collection.
pub const DAILIES_ENDPOINT: &str = "odata/CovidDailies";

/// Field selection applied to every daily record.
pub const DAILIES_SELECT: &str = "id,personConfirmed,personDeath";

/// Expansion that pulls the country name into each record.
pub const DAILIES_EXPAND: &str = "CountryRegion($select=countryName)";

/// Optional parts of a generic backend call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Stateless client for the COVID dailies backend.
#[derive(Debug, Clone)]
pub struct CovidClient {
    base_url: String,
}

impl CovidClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a request for any supported method against `endpoint`.
    ///
    /// Relative endpoints are joined to the base URL; absolute `http(s)://`
    /// endpoints are used as-is. A query string already on `endpoint` is
    /// merged ahead of `options.params`. `options.body` is ignored for `GET`.
    pub fn build_call(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: &CallOptions,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = options.headers.clone();
        let body = match (&options.body, method.carries_body()) {
            (Some(value), true) => {
                let body = serde_json::to_string(value)
                    .map_err(|e| ApiError::SerializationError(e.to_string()))?;
                if !headers
                    .iter()
                    .any(|(k, _)| k.eq_ignore_ascii_case("content-type"))
                {
                    headers.push(("content-type".to_string(), "application/json".to_string()));
                }
                Some(body)
            }
            _ => None,
        };
        let (endpoint, mut query) = split_query(endpoint);
        query.extend(options.params.iter().cloned());
        Ok(HttpRequest {
            method,
            path: self.resolve(endpoint),
            query,
            headers,
            body,
        })
    }

    pub fn build_list_dailies(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.resolve(DAILIES_ENDPOINT),
            query: vec![
                ("$select".to_string(), DAILIES_SELECT.to_string()),
                ("$expand".to_string(), DAILIES_EXPAND.to_string()),
            ],
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_dailies(&self, response: HttpResponse) -> Result<Vec<RawRecord>, ApiError> {
        check_status(&response, 200)?;
        let envelope: ODataEnvelope<RawRecord> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.value)
    }

    /// Parse the JSON payload of any successful response.
    ///
    /// A 204, a blank body, or a literal `null` is `Ok(None)`.
    pub fn parse_call(&self, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        if !response.is_success() {
            return Err(status_error(response));
        }
        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok((!value.is_null()).then_some(value))
    }

    /// Perform a generic call, absorbing every failure.
    pub fn call<T: Transport>(
        &self,
        transport: &T,
        method: HttpMethod,
        endpoint: &str,
        options: &CallOptions,
    ) -> FetchOutcome<Value> {
        let result = self
            .build_call(method, endpoint, options)
            .and_then(|request| {
                debug!(%method, url = %request.url(), "calling backend");
                transport.execute(&request)
            })
            .and_then(|response| self.parse_call(response));

        match result {
            Ok(Some(value)) => FetchOutcome::Success(value),
            Ok(None) => FetchOutcome::Empty,
            Err(err) => {
                warn!(%method, endpoint, error = %err, "backend call failed");
                FetchOutcome::Failure(err)
            }
        }
    }

    /// Fetch every daily record with its country name expanded.
    pub fn fetch_dailies<T: Transport>(&self, transport: &T) -> FetchOutcome<Vec<RawRecord>> {
        let request = self.build_list_dailies();
        debug!(url = %request.url(), "fetching dailies");
        let result = transport
            .execute(&request)
            .and_then(|response| self.parse_list_dailies(response));

        match result {
            Ok(records) if records.is_empty() => {
                info!("backend returned no daily records");
                FetchOutcome::Empty
            }
            Ok(records) => {
                info!(count = records.len(), "fetched daily records");
                FetchOutcome::Success(records)
            }
            Err(err) => {
                warn!(error = %err, "fetching dailies failed");
                FetchOutcome::Failure(err)
            }
        }
    }

    fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

/// Split `endpoint` at `?` into its path and decoded query pairs.
fn split_query(endpoint: &str) -> (&str, Vec<(String, String)>) {
    let Some((path, query)) = endpoint.split_once('?') else {
        return (endpoint, Vec::new());
    };
    let pairs = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect();
    (path, pairs)
}

fn decode(part: &str) -> String {
    urlencoding::decode(part)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| part.to_string())
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(status_error(response.clone()))
}

fn status_error(response: HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    ApiError::HttpError {
        status: response.status,
        body: response.body,
    }
}
