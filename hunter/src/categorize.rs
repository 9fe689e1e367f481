//! Sorts accepted postings into internship or entry-level buckets.

use common::{Category, JobPosting};
use serde::{Deserialize, Serialize};

use crate::text::Normalized;

/// Keyword lists behind the categorizer heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryKeywords {
    /// Marks an internship when it appears in the title.
    pub internship: Vec<String>,
    /// Description phrases that describe the role itself as an internship.
    pub internship_description: Vec<String>,
    /// Graduate-level applicant signals (title, description or qualifications).
    pub graduate: Vec<String>,
    /// Junior, non-internship signals in the title.
    pub entry_level: Vec<String>,
    /// Description phrases that describe the role itself as junior.
    pub entry_level_description: Vec<String>,
    /// Seniority signals; only the title is checked.
    pub senior: Vec<String>,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for CategoryKeywords {
    fn default() -> Self {
        Self {
            internship: strings(&[
                "intern",
                "interns",
                "internship",
                "internships",
                "co op",
                "coop",
            ]),
            internship_description: strings(&[
                "this internship",
                "internship program",
                "internship position",
                "internship role",
                "intern position",
                "intern role",
                "summer internship",
                "paid internship",
                "as an intern",
                "co op position",
                "co op program",
            ]),
            graduate: strings(&[
                "graduate",
                "graduate student",
                "graduate students",
                "grad student",
                "new grad",
                "recent graduate",
                "postgraduate",
                "masters",
                "master student",
                "master students",
                "ms in",
                "ms student",
                "ms students",
                "ms program",
                "ms degree",
                "msc",
                "mscs",
                "phd",
                "doctoral",
            ]),
            entry_level: strings(&[
                "entry level",
                "junior",
                "jr",
                "new grad",
                "new graduate",
                "recent graduate",
                "recent grad",
                "early career",
                "graduate program",
                "associate",
                "engineer i",
            ]),
            entry_level_description: strings(&[
                "entry level",
                "new grad program",
                "new graduate program",
                "graduate program",
                "early career program",
                "recent graduates",
                "recent grads",
                "junior role",
                "junior position",
                "0 2 years",
                "no experience required",
            ]),
            senior: strings(&[
                "senior",
                "sr",
                "staff",
                "lead",
                "principal",
                "manager",
                "director",
                "head",
                "architect",
                "vp",
                "chief",
                "distinguished",
            ]),
        }
    }
}

/// Keyword-driven categorizer. Holds no per-posting state.
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    keywords: CategoryKeywords,
}

impl Categorizer {
    pub fn new(keywords: CategoryKeywords) -> Self {
        Self { keywords }
    }

    /// Internship wins over entry-level when both heuristics fire.
    /// `None` means the posting belongs in neither file.
    ///
    /// The title decides first. The description only counts through
    /// phrases about the role itself, so "pair with our interns" or
    /// "mentor junior engineers" says nothing about the posting.
    pub fn categorize(&self, posting: &JobPosting) -> Option<Category> {
        let kw = &self.keywords;
        let title = Normalized::new(&posting.title);
        let description = Normalized::new(&posting.description);
        let senior_title = title.contains_any(&kw.senior);
        let entry_title = title.contains_any(&kw.entry_level);

        let internship = title.contains_any(&kw.internship)
            || (!senior_title
                && !entry_title
                && description.contains_any(&kw.internship_description));
        if internship {
            let everything =
                Normalized::join(&[&posting.title, &posting.description, &posting.qualifications]);
            if everything.contains_any(&kw.graduate) {
                return Some(Category::Internship);
            }
            return None;
        }

        if senior_title {
            return None;
        }
        if entry_title || description.contains_any(&kw.entry_level_description) {
            return Some(Category::EntryLevel);
        }
        None
    }
}

/// Categorizes with the built-in keyword lists.
pub fn categorize(posting: &JobPosting) -> Option<Category> {
    Categorizer::default().categorize(posting)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graduate_intern_is_internship() {
        let p = JobPosting::new("Software Engineering Intern")
            .with_qualifications("MS in Computer Science required")
            .with_description("real-time systems focus");
        assert_eq!(categorize(&p), Some(Category::Internship));
    }

    #[test]
    fn test_undergraduate_intern_is_dropped() {
        let p = JobPosting::new("Summer Intern")
            .with_description("Open to sophomores and juniors in a BS program");
        assert_eq!(categorize(&p), None);
    }

    #[test]
    fn test_junior_role_is_entry_level() {
        let p = JobPosting::new("Junior Software Engineer")
            .with_description("entry level, no real-time requirement");
        assert_eq!(categorize(&p), Some(Category::EntryLevel));
    }

    #[test]
    fn test_new_grad_description_is_entry_level() {
        let p = JobPosting::new("Software Engineer")
            .with_description("Our new grad program for early career engineers");
        assert_eq!(categorize(&p), Some(Category::EntryLevel));
    }

    #[test]
    fn test_mentioning_interns_does_not_make_an_internship() {
        let p = JobPosting::new("Junior Software Engineer")
            .with_qualifications("MS in Computer Science")
            .with_description("Entry level real-time role; you will pair with our summer interns");
        assert_eq!(categorize(&p), Some(Category::EntryLevel));

        let p = JobPosting::new("Software Engineer")
            .with_qualifications("MS in Computer Science")
            .with_description("Real-time tooling; you will supervise two interns");
        assert_eq!(categorize(&p), None);
    }

    #[test]
    fn test_internship_described_in_body() {
        let p = JobPosting::new("Real-Time Software, Summer 2025")
            .with_qualifications("MS in Computer Science")
            .with_description("This internship runs twelve weeks");
        assert_eq!(categorize(&p), Some(Category::Internship));
    }

    #[test]
    fn test_mentoring_juniors_is_not_entry_level() {
        let p = JobPosting::new("Software Engineer")
            .with_qualifications("MS in Computer Science")
            .with_description("Real-time platform work; mentor junior engineers");
        assert_eq!(categorize(&p), None);
    }

    #[test]
    fn test_staff_role_is_dropped() {
        let p = JobPosting::new("Staff Software Engineer")
            .with_qualifications("MS in Computer Science")
            .with_description("Real-time platform work; mentor our interns and junior engineers");
        assert_eq!(categorize(&p), None);
    }

    #[test]
    fn test_internship_beats_entry_level() {
        let p = JobPosting::new("New Grad Internship")
            .with_description("entry level internship for graduate students");
        assert_eq!(categorize(&p), Some(Category::Internship));
    }

    #[test]
    fn test_internal_is_not_intern() {
        let p = JobPosting::new("Junior Engineer, Internal Tools")
            .with_qualifications("MS preferred");
        assert_eq!(categorize(&p), Some(Category::EntryLevel));
    }

    #[test]
    fn test_plain_title_without_signals_is_dropped() {
        let p = JobPosting::new("Software Engineer").with_description("Build services");
        assert_eq!(categorize(&p), None);
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = CategoryKeywords {
            internship: vec!["werkstudent".to_string()],
            ..CategoryKeywords::default()
        };
        let categorizer = Categorizer::new(keywords);
        let p = JobPosting::new("Werkstudent Embedded").with_qualifications("Master student");
        assert_eq!(categorizer.categorize(&p), Some(Category::Internship));
        let p = JobPosting::new("Software Intern").with_qualifications("MS student");
        assert_eq!(categorizer.categorize(&p), None);
    }

    #[test]
    fn test_categorize_is_repeatable() {
        let p = JobPosting::new("Junior Engineer");
        assert_eq!(categorize(&p), categorize(&p));
    }
}
