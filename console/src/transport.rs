//! Blocking HTTP transport backed by ureq.
//!
//! Status codes are never treated as errors here; 4xx and 5xx responses are
//! handed back to the core, which decides what they mean.

use movies_core::{HttpMethod, HttpRequest, HttpResponse, Transport};
use ureq::typestate::WithBody;
use ureq::RequestBuilder;

#[derive(Debug, thiserror::Error)]
#[error("{method} {path} failed: {source}")]
pub struct TransportError {
    method: HttpMethod,
    path: String,
    #[source]
    source: ureq::Error,
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Error = TransportError;

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        tracing::debug!(%method, %path, "calling movies API");

        let fail = |source| TransportError {
            method,
            path: path.clone(),
            source,
        };
        let mut response = match method {
            HttpMethod::Get => with_headers(self.agent.get(&path), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&path), &headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&path), &headers), body),
            HttpMethod::Put => send(with_headers(self.agent.put(&path), &headers), body),
        }
        .map_err(fail)?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(fail)?;
        tracing::debug!(%method, %path, status, "movies API responded");
        Ok(HttpResponse::new(status, body))
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
