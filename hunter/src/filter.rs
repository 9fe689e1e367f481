//! Qualification filter: does a posting ask for the profile's degree and focus?

use common::{JobPosting, Profile};
use tracing::debug;

use crate::text::Normalized;

/// True when the posting's qualifications or description satisfy both the
/// degree requirement and the domain focus of `profile`.
///
/// Only `qualifications` and `description` are inspected. A posting with
/// neither never matches.
pub fn matches(posting: &JobPosting, profile: &Profile) -> bool {
    let text = Normalized::join(&[&posting.qualifications, &posting.description]);
    if text.is_empty() {
        debug!("'{}' has no qualifications or description", posting.title);
        return false;
    }

    let degree_ok = [&posting.qualifications, &posting.description]
        .iter()
        .any(|field| meets_degree(&Normalized::new(field), profile));
    let focus_ok = profile.focus.is_empty() || text.contains_any(&profile.focus);

    debug!(
        "'{}' degree={} focus={} for profile {}",
        posting.title, degree_ok, focus_ok, profile.name
    );
    degree_ok && focus_ok
}

/// Words allowed between a degree level and its field ("ms or phd in cs").
const LEVEL_WINDOW: usize = 4;

/// Anchors for a level when the profile names no field.
const DEGREE_WORDS: &[&str] = &["degree", "program", "student", "students"];

/// A level synonym only counts next to a field phrase, so "5 ms" or
/// "MS Office" alongside "BS in Computer Science" is not a master's.
fn meets_degree(text: &Normalized, profile: &Profile) -> bool {
    let degree = &profile.degree;
    if text.contains_any(&degree.abbreviations) {
        return true;
    }
    let anchors: Vec<&str> = if degree.fields.is_empty() {
        DEGREE_WORDS.to_vec()
    } else {
        degree.fields.iter().map(String::as_str).collect()
    };
    degree
        .level
        .synonyms()
        .iter()
        .any(|level| text.contains_near(level, &anchors, LEVEL_WINDOW))
}
