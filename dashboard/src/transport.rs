//! Blocking `ureq` implementation of the core `Transport`.

use std::time::Duration;

use covid_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::debug;
use ureq::RequestBuilder;

/// Executes core requests over HTTP with a shared `ureq` agent.
///
/// Non-2xx responses are returned as data so the core decides what a status
/// means.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

fn with_headers<B>(builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name, value))
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = req.url();
        debug!(method = %req.method, %url, "sending request");

        let body = req.body.as_deref().map(str::as_bytes);
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&url), &req.headers).call(),
            HttpMethod::Delete => {
                let builder = with_headers(self.agent.delete(&url), &req.headers);
                match body {
                    Some(bytes) => builder.force_send_body().send(bytes),
                    None => builder.call(),
                }
            }
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                let builder = match req.method {
                    HttpMethod::Post => self.agent.post(&url),
                    HttpMethod::Put => self.agent.put(&url),
                    _ => self.agent.patch(&url),
                };
                let builder = with_headers(builder, &req.headers);
                match body {
                    Some(bytes) => builder.send(bytes),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(format!("reading body: {e}")))?;

        debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
