use std::fs;

use common::JobPosting;
use tracing::info;

use super::{parse_feed, PostingSource, SearchQuery};
use crate::config::FileConfig;
use crate::error::FetchError;

/// Postings saved as a JSON feed on disk. The query is ignored.
pub struct FileSource {
    config: FileConfig,
}

impl FileSource {
    pub fn new(config: FileConfig) -> Self {
        Self { config }
    }
}

impl PostingSource for FileSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn fetch(&self, _query: &SearchQuery) -> Result<Vec<JobPosting>, FetchError> {
        let path = &self.config.path;
        let body = fs::read_to_string(path).map_err(|source| FetchError::Read {
            path: path.clone(),
            source,
        })?;
        let postings = parse_feed(&body, &path.display().to_string())?;
        info!("{}: {} posting(s) from {}", self.config.name, postings.len(), path.display());
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_is_a_fetch_error() {
        let source = FileSource::new(FileConfig {
            name: "missing".to_string(),
            path: PathBuf::from("/definitely/not/here.json"),
        });
        let query = SearchQuery {
            keywords: String::new(),
        };
        assert!(matches!(source.fetch(&query), Err(FetchError::Read { .. })));
    }
}
