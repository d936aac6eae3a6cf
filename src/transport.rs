use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::error::GeocodeError;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url: Url,
    pub headers: Vec<(String, String)>
}

impl Request {
    pub fn get(url: Url) -> Self {
        Request { url, headers: Vec::new() }
    }

    pub fn with_header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String
}

/// Sends one GET request and waits for the whole body.
///
/// Timeouts and cancellation belong to the implementation, the geocoder
/// never retries.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Response, GeocodeError>;
}

pub struct ReqwestTransport {
    client: Client
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, GeocodeError> {
        let mut builder = Client::builder();
        // Otherwise reqwest's own default applies
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> Result<Response, GeocodeError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?
            );
        }

        let resp = self.client
            .get(request.url)
            .headers(headers)
            .send()?;

        let status = resp.status().as_u16();
        let body = resp.text()?;

        Ok(Response { status, body })
    }
}
