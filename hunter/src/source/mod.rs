//! Posting sources: HTML job boards, JSON feeds and local JSON files.

mod board;
mod file;
mod http;

pub use board::{extract_salary, BoardSource};
pub use file::FileSource;
pub use http::{HttpClient, JsonFeedSource};

use anyhow::Result;
use common::{JobPosting, Profile};
use serde::Deserialize;
use tracing::debug;

use crate::config::{HttpConfig, SourceConfig};
use crate::error::FetchError;

/// What to ask a source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
}

impl SearchQuery {
    pub fn for_profile(profile: &Profile) -> Self {
        Self {
            keywords: profile.job_type.clone(),
        }
    }
}

/// Anything that can produce raw postings for a query.
pub trait PostingSource {
    fn name(&self) -> &str;
    fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, FetchError>;
}

/// Builds every configured source. Remote sources share one HTTP client,
/// built on first use.
pub fn build_sources(
    configs: &[SourceConfig],
    http: &HttpConfig,
) -> Result<Vec<Box<dyn PostingSource>>> {
    let mut client: Option<HttpClient> = None;
    let mut sources: Vec<Box<dyn PostingSource>> = Vec::with_capacity(configs.len());
    for config in configs {
        debug!("building source '{}'", config.name());
        let source: Box<dyn PostingSource> = match config {
            SourceConfig::Board(board) => Box::new(BoardSource::new(
                board.clone(),
                shared_client(&mut client, http)?,
            )?),
            SourceConfig::Json(feed) => Box::new(JsonFeedSource::new(
                feed.clone(),
                shared_client(&mut client, http)?,
            )),
            SourceConfig::File(file) => Box::new(FileSource::new(file.clone())),
        };
        sources.push(source);
    }
    Ok(sources)
}

fn shared_client(slot: &mut Option<HttpClient>, http: &HttpConfig) -> Result<HttpClient, FetchError> {
    if let Some(client) = slot {
        return Ok(client.clone());
    }
    let client = HttpClient::new(http)?;
    *slot = Some(client.clone());
    Ok(client)
}

/// Salary as feeds publish it: free text, a single figure or a range.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSalary {
    Text(String),
    Amount(f64),
    Range { min: Option<f64>, max: Option<f64> },
    Pair(Vec<f64>),
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn format_range(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) => Some(format!("{}-{}", format_amount(lo), format_amount(hi))),
        (Some(v), None) | (None, Some(v)) => Some(format_amount(v)),
        (None, None) => None,
    }
}

impl RawSalary {
    fn render(self) -> Option<String> {
        match self {
            RawSalary::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            RawSalary::Amount(value) => Some(format_amount(value)),
            RawSalary::Range { min, max } => format_range(min, max),
            RawSalary::Pair(values) => match values.as_slice() {
                [v] => Some(format_amount(*v)),
                [lo, hi] => format_range(Some(*lo), Some(*hi)),
                _ => None,
            },
        }
    }
}

/// One record of a JSON feed. Every field may be missing or null.
#[derive(Debug, Deserialize)]
struct RawPosting {
    #[serde(default, alias = "job_title", alias = "position")]
    title: Option<String>,
    #[serde(default, alias = "region", alias = "city")]
    location: Option<String>,
    #[serde(default, alias = "summary", alias = "body")]
    description: Option<String>,
    #[serde(default, alias = "requirements", alias = "qualification")]
    qualifications: Option<String>,
    #[serde(default, alias = "salary_raw", alias = "compensation")]
    salary: Option<RawSalary>,
}

impl RawPosting {
    /// `None` when the record has no usable title.
    fn into_posting(self) -> Option<JobPosting> {
        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return None;
        }
        Some(JobPosting {
            title,
            location: self.location.unwrap_or_default().trim().to_string(),
            description: self.description.unwrap_or_default(),
            qualifications: self.qualifications.unwrap_or_default(),
            salary: self.salary.and_then(RawSalary::render),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WrappedFeed {
    #[serde(alias = "jobs", alias = "results")]
    postings: Vec<RawPosting>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Feed {
    List(Vec<RawPosting>),
    Wrapped(WrappedFeed),
}

/// Decodes a JSON feed body: an array of records, or an object holding one
/// under `postings`, `jobs` or `results`. Records without a title are skipped.
pub fn parse_feed(body: &str, origin: &str) -> Result<Vec<JobPosting>, FetchError> {
    let feed: Feed = serde_json::from_str(body).map_err(|e| FetchError::Malformed {
        origin: origin.to_string(),
        reason: e.to_string(),
    })?;
    let records = match feed {
        Feed::List(records) => records,
        Feed::Wrapped(wrapped) => wrapped.postings,
    };
    let total = records.len();
    let postings: Vec<JobPosting> = records
        .into_iter()
        .filter_map(RawPosting::into_posting)
        .collect();
    if postings.len() < total {
        debug!(
            "{}: skipped {} record(s) without a title",
            origin,
            total - postings.len()
        );
    }
    Ok(postings)
}
