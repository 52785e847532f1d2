// SPDX-License-Identifier: Apache-2.0

//! Transport seam between the RPC clients and the network.
//!
//! Clients build an [`HttpRequest`] and hand it to an injected
//! [`HttpTransport`]; the transport returns raw status and bytes and never
//! interprets them. [`TorTransport`] is the shipped implementation: a
//! blocking reqwest client, optionally routed through a SOCKS5 proxy.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

/// Transport-level failure. The message is surfaced to callers verbatim.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully built request: URL, headers and optional body.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with a JSON body. Content-Type and Content-Length are set
    /// explicitly; Content-Length always equals the body's byte length.
    pub fn post_json(url: Url, body: Vec<u8>) -> Self {
        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Content-Length".to_string(), body.len().to_string()),
        ];
        Self {
            method: Method::Post,
            url,
            headers,
            body: Some(body),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Raw response: HTTP status plus body bytes, uninterpreted.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Abstraction over performing one HTTP exchange. Implementations own
/// timeouts and cancellation; callers issue independent, stateless calls.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking reqwest transport, optionally routed through a SOCKS5 proxy.
#[derive(Clone, Debug)]
pub struct TorTransport {
    client: Client,
}

impl TorTransport {
    /// `proxy` like "socks5h://127.0.0.1:9050". The socks5h scheme is
    /// required for .onion hosts: name resolution must happen inside the
    /// proxy. Hidden-service REST endpoints present self-signed
    /// certificates, so certificate validation is disabled.
    pub fn new(proxy: Option<&str>, timeout: Duration) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true);
        if let Some(proxy) = proxy {
            let proxy =
                reqwest::Proxy::all(proxy).map_err(|e| TransportError(format!("proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError(format!("client build: {e}")))?;
        Ok(Self { client })
    }

    /// Clearnet transport with no proxy; used by tests and local setups.
    pub fn direct(timeout: Duration) -> Result<Self, TransportError> {
        Self::new(None, timeout)
    }
}

impl HttpTransport for TorTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        };
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }
        let resp = req.send().map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|e| TransportError(e.to_string()))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// Normalizes `address` into `scheme://host[:port]` with no trailing slash.
/// An explicit scheme in `address` wins over `default_scheme`.
pub(crate) fn origin(address: &str, default_scheme: &str) -> String {
    let trimmed = address.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{default_scheme}://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_applies_the_default_scheme() {
        assert_eq!(origin("abc.onion", "https"), "https://abc.onion");
        assert_eq!(origin("127.0.0.1:8332", "http"), "http://127.0.0.1:8332");
    }

    #[test]
    fn origin_keeps_an_explicit_scheme_and_drops_trailing_slashes() {
        assert_eq!(origin("http://abc.onion/", "https"), "http://abc.onion");
        assert_eq!(origin(" abc.onion ", "https"), "https://abc.onion");
    }
}
