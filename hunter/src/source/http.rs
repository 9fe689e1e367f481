use std::time::Duration;

use common::JobPosting;
use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, info};

use super::{parse_feed, PostingSource, SearchQuery};
use crate::config::{HttpConfig, JsonFeedConfig};
use crate::error::FetchError;
use crate::retry::{classify_status, run_with_retry, ErrorKind, RetryPolicy};

/// Blocking HTTP client with a timeout and retry policy. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            retry: config.retry,
        })
    }

    /// GETs `url` as text, appending `query` as a query-string pair when given.
    pub fn get_text(&self, url: &str, query: Option<(&str, &str)>) -> Result<String, FetchError> {
        let mut target = Url::parse(url).map_err(|e| FetchError::Malformed {
            origin: url.to_string(),
            reason: format!("invalid URL: {}", e),
        })?;
        if let Some((param, value)) = query {
            target.query_pairs_mut().append_pair(param, value);
        }

        run_with_retry(&self.retry, classify, || self.get_once(&target))
    }

    fn get_once(&self, url: &Url) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url.clone()).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(request_error)
    }
}

fn classify(error: &FetchError) -> ErrorKind {
    match error {
        FetchError::Request { source, .. } if source.is_timeout() => ErrorKind::Timeout,
        FetchError::Request { source, .. } if source.is_connect() => ErrorKind::Connection,
        FetchError::Status { status, .. } => classify_status(*status),
        _ => ErrorKind::Other,
    }
}

/// A remote JSON feed of postings.
pub struct JsonFeedSource {
    config: JsonFeedConfig,
    client: HttpClient,
}

impl JsonFeedSource {
    pub fn new(config: JsonFeedConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl PostingSource for JsonFeedSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, FetchError> {
        let param = self
            .config
            .query_param
            .as_deref()
            .map(|p| (p, query.keywords.as_str()));
        let body = self.client.get_text(&self.config.url, param)?;
        let postings = parse_feed(&body, &self.config.url)?;
        info!("{}: {} posting(s) from {}", self.config.name, postings.len(), self.config.url);
        Ok(postings)
    }
}
