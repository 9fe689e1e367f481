//! Job hunter library
//!
//! Fetches postings from job boards, keeps the ones matching a qualification
//! profile and writes them to an internship CSV and an entry-level CSV.

pub mod categorize;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod retry;
pub mod source;
mod text;

pub use categorize::{categorize, Categorizer, CategoryKeywords};
pub use error::{FetchError, OutputError, RunError};
pub use filter::matches;
pub use output::{write, OutputTargets, WriteSummary};
pub use pipeline::{run, RunSummary};
pub use source::{PostingSource, SearchQuery};
