//! Reqwest-backed HTTP exchange adapter.
//!
//! This adapter owns transport details only: URL joining, the optional
//! request timeout and mapping reqwest failures. Status codes are returned
//! untouched for the domain transport to interpret.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::domain::ports::{
    HttpExchange, HttpExchangeError, HttpMethod, HttpRequest, HttpResponse,
};

const USER_AGENT: &str = concat!("hospital-client/", env!("CARGO_PKG_VERSION"));

/// Exchange that sends requests to one backend base URL.
pub struct ReqwestExchange {
    client: Client,
    base_url: Url,
}

impl ReqwestExchange {
    /// Build an adapter for `base_url`, optionally bounding each request by
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpExchangeError> {
        let url = join_url(&self.base_url, &request.path)?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Append the segments of `path` to the base URL path.
///
/// The base query string is kept; segments are percent-encoded by `url`.
fn join_url(base: &Url, path: &str) -> Result<Url, HttpExchangeError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HttpExchangeError::invalid_url(format!("{base}: cannot be a base")))?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_transport_error(error: reqwest::Error) -> HttpExchangeError {
    if error.is_timeout() {
        HttpExchangeError::timeout(error.to_string())
    } else {
        HttpExchangeError::transport(error.to_string())
    }
}
