//! Configuration loaded from `~/.config/job-hunter/config.toml`.

use anyhow::{Context, Result};
use common::Profile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::categorize::CategoryKeywords;
use crate::retry::RetryPolicy;

/// CSS selectors locating posting fields inside one listing element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSelectors {
    /// One element per posting.
    pub listing: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Falls back to the listing's whole text.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    /// Falls back to a salary pattern found in the listing text.
    #[serde(default)]
    pub salary: Option<String>,
    /// Anchor whose `href` identifies the posting across pages.
    #[serde(default)]
    pub link: Option<String>,
}

/// An HTML job board scraped page by page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub urls: Vec<String>,
    /// Query-string parameter carrying the search keywords, if the board takes one.
    #[serde(default)]
    pub query_param: Option<String>,
    /// Prefix for relative posting links.
    #[serde(default)]
    pub base_url: Option<String>,
    pub selectors: BoardSelectors,
}

impl BoardConfig {
    /// WeWorkRemotely programming categories.
    pub fn weworkremotely() -> Self {
        Self {
            name: "weworkremotely".to_string(),
            urls: vec![
                "https://weworkremotely.com/remote-software-developer-jobs".to_string(),
                "https://weworkremotely.com/categories/remote-full-stack-programming-jobs"
                    .to_string(),
                "https://weworkremotely.com/categories/remote-back-end-programming-jobs"
                    .to_string(),
                "https://weworkremotely.com/categories/remote-front-end-programming-jobs"
                    .to_string(),
            ],
            query_param: None,
            base_url: Some("https://weworkremotely.com".to_string()),
            selectors: BoardSelectors {
                listing: "li.feature, .new-listing-container".to_string(),
                title: ".new-listing__header__title".to_string(),
                location: Some(".new-listing__company-headquarters".to_string()),
                description: None,
                qualifications: None,
                salary: None,
                link: Some(".listing-link--unlocked, ._blank".to_string()),
            },
        }
    }
}

/// A remote JSON feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFeedConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub query_param: Option<String>,
}

/// A JSON feed saved on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    Board(BoardConfig),
    Json(JsonFeedConfig),
    File(FileConfig),
}

impl SourceConfig {
    pub fn name(&self) -> &str {
        match self {
            SourceConfig::Board(c) => &c.name,
            SourceConfig::Json(c) => &c.name,
            SourceConfig::File(c) => &c.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub internships_file: String,
    pub entry_level_file: String,
    /// Prefix file names with the run's start time instead of overwriting.
    pub timestamped: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            internships_file: "internships.csv".to_string(),
            entry_level_file: "entry_level_jobs.csv".to_string(),
            timestamped: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("job-hunter/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterConfig {
    pub profile: Profile,
    pub output: OutputConfig,
    pub http: HttpConfig,
    pub keywords: CategoryKeywords,
    pub sources: Vec<SourceConfig>,
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            output: OutputConfig::default(),
            http: HttpConfig::default(),
            keywords: CategoryKeywords::default(),
            sources: vec![SourceConfig::Board(BoardConfig::weworkremotely())],
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("job-hunter")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Reads a config file. Missing sections take their defaults.
pub fn load_from(path: &Path) -> Result<HunterConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: HunterConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

const DEFAULT_CONFIG_NOTE: &str = r#"# job-hunter configuration
#
# The default weworkremotely board lists titles, locations and links only,
# so each posting is matched against its listing text alone and few will
# satisfy the degree requirement. Add a source that publishes full
# descriptions, for example a JSON feed:
#
# [[sources]]
# kind = "json"
# name = "my-feed"
# url = "https://jobs.example.com/api/postings"
# query_param = "q"
#
# or point a board's `description`/`qualifications` selectors at the
# elements that hold that text.

"#;

/// Default config as written on first run, with a commented header.
pub fn default_config_text() -> Result<String> {
    let body = toml::to_string_pretty(&HunterConfig::default())?;
    Ok(format!("{}{}", DEFAULT_CONFIG_NOTE, body))
}

/// Loads the XDG config, writing the defaults there first if none exists.
pub fn load_or_init() -> Result<HunterConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HunterConfig::default();
        let toml = default_config_text()?;
        fs::write(&path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}
