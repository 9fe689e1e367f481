//! HTML job board scraping with CSS selectors.

use std::collections::HashSet;

use anyhow::{anyhow, Result};
use common::JobPosting;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use super::{HttpClient, PostingSource, SearchQuery};
use crate::config::BoardConfig;
use crate::error::FetchError;

/// Finds a salary figure or range in free text, e.g. "$50,000 - $70,000"
/// or "60000 USD". Figures below 1000 are not salaries.
pub fn extract_salary(text: &str) -> Option<String> {
    let amount = r"\$?\d{1,3}(?:,\d{3})+|\$?\d+";
    let range = Regex::new(&format!(r"({amount})\s*(?:-|–|to)\s*({amount})")).ok()?;
    for caps in range.captures_iter(text) {
        let (lo, hi) = (&caps[1], &caps[2]);
        let plausible = [lo, hi]
            .iter()
            .all(|s| parse_amount(s).is_some_and(|n| n >= 1000));
        if plausible {
            return Some(format!("{} - {}", lo, hi));
        }
    }

    let single = Regex::new(amount).ok()?;
    let found = single
        .find_iter(text)
        .find(|m| parse_amount(m.as_str()).is_some_and(|n| n >= 1000))
        .map(|m| m.as_str().to_string());
    found
}

fn parse_amount(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok()
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| anyhow!("invalid CSS selector {:?}: {}", raw, e))
}

fn parse_optional(raw: &Option<String>) -> Result<Option<Selector>> {
    raw.as_deref().map(parse_selector).transpose()
}

/// Pre-parsed selectors for one board.
struct Selectors {
    listing: Selector,
    title: Selector,
    location: Option<Selector>,
    description: Option<Selector>,
    qualifications: Option<Selector>,
    salary: Option<Selector>,
    link: Option<Selector>,
}

/// Scrapes one or more listing pages of a job board.
pub struct BoardSource {
    config: BoardConfig,
    selectors: Selectors,
    client: HttpClient,
}

impl BoardSource {
    pub fn new(config: BoardConfig, client: HttpClient) -> Result<Self> {
        let s = &config.selectors;
        let selectors = Selectors {
            listing: parse_selector(&s.listing)?,
            title: parse_selector(&s.title)?,
            location: parse_optional(&s.location)?,
            description: parse_optional(&s.description)?,
            qualifications: parse_optional(&s.qualifications)?,
            salary: parse_optional(&s.salary)?,
            link: parse_optional(&s.link)?,
        };
        if s.description.is_none() && s.qualifications.is_none() {
            warn!(
                "board '{}' has no description or qualifications selector; only listing text is matched",
                config.name
            );
        }
        Ok(Self {
            config,
            selectors,
            client,
        })
    }

    fn text_of(element: &ElementRef, selector: Option<&Selector>) -> Option<String> {
        let selector = selector?;
        element
            .select(selector)
            .next()
            .map(|el| clean_text(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
    }

    fn link_of(&self, element: &ElementRef) -> Option<String> {
        let selector = self.selectors.link.as_ref()?;
        let href = element.select(selector).next()?.value().attr("href")?;
        if href.starts_with("http") {
            return Some(href.to_string());
        }
        match &self.config.base_url {
            Some(base) => Some(format!("{}{}", base.trim_end_matches('/'), href)),
            None => Some(href.to_string()),
        }
    }

    /// Extracts postings from one listing page. Listings whose link was
    /// already seen on an earlier page of this board are skipped.
    pub fn parse_page(&self, html: &str, seen_links: &mut HashSet<String>) -> Vec<JobPosting> {
        let document = Html::parse_document(html);
        let mut postings = Vec::new();

        for element in document.select(&self.selectors.listing) {
            let title = Self::text_of(&element, Some(&self.selectors.title))
                .unwrap_or_default();
            if title.is_empty() {
                continue;
            }

            if let Some(link) = self.link_of(&element) {
                if !seen_links.insert(link) {
                    continue;
                }
            }

            let full_text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
            let description = Self::text_of(&element, self.selectors.description.as_ref())
                .unwrap_or_else(|| full_text.clone());
            let salary = match &self.selectors.salary {
                Some(selector) => Self::text_of(&element, Some(selector)),
                None => extract_salary(&full_text),
            };

            debug!("found: {}", title);
            postings.push(JobPosting {
                title,
                location: Self::text_of(&element, self.selectors.location.as_ref()).unwrap_or_default(),
                description,
                qualifications: Self::text_of(&element, self.selectors.qualifications.as_ref())
                    .unwrap_or_default(),
                salary,
            });
        }
        postings
    }
}

impl PostingSource for BoardSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, FetchError> {
        let mut seen_links = HashSet::new();
        let mut postings = Vec::new();
        let param = self
            .config
            .query_param
            .as_deref()
            .map(|p| (p, query.keywords.as_str()));

        for url in &self.config.urls {
            info!("{}: fetching {}", self.config.name, url);
            let html = self.client.get_text(url, param)?;
            let page = self.parse_page(&html, &mut seen_links);
            info!("{}: {} posting(s) on {}", self.config.name, page.len(), url);
            postings.extend(page);
        }
        Ok(postings)
    }
}
