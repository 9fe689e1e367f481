//! Shared types for the job hunter: postings, categories and the
//! qualification profile postings are filtered against.

use serde::{Deserialize, Serialize};

/// A single job listing as fetched from a source.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct JobPosting {
    pub title: String,
    pub location: String,
    pub description: String,
    pub qualifications: String,
    /// `None` when the listing does not disclose pay.
    pub salary: Option<String>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_qualifications(mut self, qualifications: impl Into<String>) -> Self {
        self.qualifications = qualifications.into();
        self
    }

    pub fn with_salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = Some(salary.into());
        self
    }
}

/// Output bucket for an accepted posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Internship,
    EntryLevel,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Internship => "internship",
            Category::EntryLevel => "entry_level",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Academic degree level a profile requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeLevel {
    Bachelor,
    Master,
    Doctorate,
}

impl DegreeLevel {
    /// Phrasings of this level, already in normalized form
    /// (lowercase, no dots or apostrophes).
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            DegreeLevel::Bachelor => &[
                "bachelor",
                "bachelors",
                "bachelor of science",
                "bachelor of engineering",
                "bs",
                "bsc",
                "beng",
                "bse",
                "undergraduate degree",
            ],
            DegreeLevel::Master => &[
                "master",
                "masters",
                "master of science",
                "master of engineering",
                "ms",
                "msc",
                "meng",
                "mse",
                "graduate degree",
            ],
            DegreeLevel::Doctorate => &[
                "phd",
                "doctorate",
                "doctoral",
                "doctor of philosophy",
            ],
        }
    }
}

/// Degree level plus the field of study it must be in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegreeRequirement {
    pub level: DegreeLevel,
    /// Field-of-study phrases, e.g. "computer science", "cs".
    pub fields: Vec<String>,
    /// Single tokens naming level and field together, e.g. "mscs".
    pub abbreviations: Vec<String>,
}

impl Default for DegreeRequirement {
    fn default() -> Self {
        Self {
            level: DegreeLevel::Master,
            fields: vec![
                "computer science".to_string(),
                "cs".to_string(),
                "comp sci".to_string(),
                "computing science".to_string(),
            ],
            abbreviations: vec![
                "mscs".to_string(),
                "mcs".to_string(),
                "mcompsci".to_string(),
            ],
        }
    }
}

/// Qualification profile postings are filtered against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// Human description of the degree, used in log output.
    pub qualifications: String,
    /// Kind of work sought; doubles as the search keywords.
    pub job_type: String,
    /// Domain-focus phrases; any one of them satisfies the focus requirement.
    pub focus: Vec<String>,
    pub degree: DegreeRequirement,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "mscs-real-time".to_string(),
            qualifications: "Master's of Science in Computer Science".to_string(),
            job_type: "real-time software engineering".to_string(),
            focus: vec![
                "real time".to_string(),
                "realtime".to_string(),
                "rtos".to_string(),
                "real time operating system".to_string(),
                "low latency".to_string(),
            ],
            degree: DegreeRequirement::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Internship.to_string(), "internship");
        assert_eq!(Category::EntryLevel.to_string(), "entry_level");
    }

    #[test]
    fn test_posting_builder_leaves_salary_undisclosed() {
        let posting = JobPosting::new("Junior Engineer").with_location("Remote");
        assert_eq!(posting.title, "Junior Engineer");
        assert_eq!(posting.location, "Remote");
        assert!(posting.salary.is_none());
    }

    #[test]
    fn test_partial_profile_falls_back_to_defaults() {
        let profile: Profile = toml::from_str(
            r#"
            name = "phd-robotics"
            focus = ["robotics"]

            [degree]
            level = "doctorate"
            "#,
        )
        .unwrap();
        assert_eq!(profile.degree.level, DegreeLevel::Doctorate);
        assert_eq!(profile.degree.fields, DegreeRequirement::default().fields);
        assert_eq!(profile.focus, vec!["robotics".to_string()]);
        assert_eq!(profile.job_type, Profile::default().job_type);
    }
}
