use std::io::Write;
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

use crate::error::FetchError;

/// The network side of a run. Implemented over HTTP by `HttpClient`; tests
/// substitute an in-memory version.
pub trait Fetch {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError>;

    /// Streams the body into `sink` and returns the byte count.
    fn fetch_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError>;
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        match HeaderValue::from_str(user_agent) {
            Ok(ua) => {
                headers.insert(USER_AGENT, ua);
            }
            Err(e) => warn!("Ignoring user agent {:?}: {}", user_agent, e),
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(HttpClient { client })
    }

    fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(resp)
    }
}

impl Fetch for HttpClient {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.get(url)?
            .text()
            .map_err(|source| FetchError::Request { url: url.to_string(), source })
    }

    fn fetch_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError> {
        let mut resp = self.get(url)?;
        std::io::copy(&mut resp, sink).map_err(|source| FetchError::Transfer { url: url.to_string(), source })
    }
}
