//! One batch pass: fetch, filter, categorize, write.

use common::{Category, JobPosting, Profile};
use tracing::{debug, info};

use crate::categorize::Categorizer;
use crate::error::RunError;
use crate::filter;
use crate::output::{self, OutputTargets};
use crate::source::{PostingSource, SearchQuery};

/// Counts from one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub matched: usize,
    pub internships: usize,
    pub entry_level: usize,
    /// Passed the filter but fit neither category.
    pub uncategorized: usize,
}

/// Fetches from every source in order. The first failure stops the run.
pub fn fetch_all(
    sources: &[Box<dyn PostingSource>],
    query: &SearchQuery,
) -> Result<Vec<JobPosting>, RunError> {
    let mut postings = Vec::new();
    for source in sources {
        let fetched = source.fetch(query).map_err(|error| RunError::Fetch {
            source_name: source.name().to_string(),
            error,
        })?;
        postings.extend(fetched);
    }
    Ok(postings)
}

/// Keeps postings that match `profile` and fall into a category.
/// Returns the accepted postings and how many matched but were uncategorized.
pub fn select(
    postings: Vec<JobPosting>,
    profile: &Profile,
    categorizer: &Categorizer,
) -> (Vec<(JobPosting, Category)>, usize) {
    let mut accepted = Vec::new();
    let mut uncategorized = 0;
    for posting in postings {
        if !filter::matches(&posting, profile) {
            debug!("filtered out: {}", posting.title);
            continue;
        }
        match categorizer.categorize(&posting) {
            Some(category) => {
                debug!("{} -> {}", posting.title, category);
                accepted.push((posting, category));
            }
            None => {
                debug!("no category: {}", posting.title);
                uncategorized += 1;
            }
        }
    }
    (accepted, uncategorized)
}

/// Runs the whole pipeline once. Output files are only touched after every
/// source has been fetched successfully.
pub fn run(
    sources: &[Box<dyn PostingSource>],
    profile: &Profile,
    categorizer: &Categorizer,
    targets: &OutputTargets,
) -> Result<RunSummary, RunError> {
    let query = SearchQuery::for_profile(profile);
    info!(
        "searching {} source(s) for '{}' ({})",
        sources.len(),
        query.keywords,
        profile.qualifications
    );

    let postings = fetch_all(sources, &query)?;
    let fetched = postings.len();
    let (accepted, uncategorized) = select(postings, profile, categorizer);
    let matched = accepted.len() + uncategorized;

    let written = output::write(&accepted, targets)?;
    let summary = RunSummary {
        fetched,
        matched,
        internships: written.internships,
        entry_level: written.entry_level,
        uncategorized,
    };
    info!("run finished: {:?}", summary);
    Ok(summary)
}
