//! CSV output: one file per category, fixed column order.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use common::{Category, JobPosting};
use tracing::info;

use crate::config::OutputConfig;
use crate::error::OutputError;

/// Header row of both output files.
pub const COLUMNS: [&str; 5] = ["title", "location", "description", "qualifications", "salary"];

/// Where each category is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTargets {
    pub internships: PathBuf,
    pub entry_level: PathBuf,
}

impl OutputTargets {
    pub fn in_dir(dir: &Path, internships_file: &str, entry_level_file: &str) -> Self {
        Self {
            internships: dir.join(internships_file),
            entry_level: dir.join(entry_level_file),
        }
    }

    /// File names carry a `YYYYMMDD_HHMMSS_` prefix when `config.timestamped` is set.
    pub fn from_config(config: &OutputConfig, started: DateTime<Local>) -> Self {
        if config.timestamped {
            let stamp = started.format("%Y%m%d_%H%M%S");
            Self::in_dir(
                &config.dir,
                &format!("{}_{}", stamp, config.internships_file),
                &format!("{}_{}", stamp, config.entry_level_file),
            )
        } else {
            Self::in_dir(&config.dir, &config.internships_file, &config.entry_level_file)
        }
    }
}

/// Rows written per file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub internships: usize,
    pub entry_level: usize,
}

/// An output file, truncated on open, header row already written.
struct CsvFile<'a> {
    path: &'a Path,
    writer: csv::Writer<File>,
    rows: usize,
}

impl<'a> CsvFile<'a> {
    fn create(path: &'a Path) -> Result<Self, OutputError> {
        let open_error = |source| OutputError::Open {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_error)?;
        }
        let file = File::create(path).map_err(open_error)?;
        let writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        let mut this = Self {
            path,
            writer,
            rows: 0,
        };
        this.write_fields(COLUMNS)?;
        Ok(this)
    }

    fn write_fields(&mut self, fields: [&str; 5]) -> Result<(), OutputError> {
        self.writer
            .write_record(fields)
            .map_err(|source| OutputError::Write {
                path: self.path.to_path_buf(),
                source,
            })
    }

    fn append(&mut self, posting: &JobPosting) -> Result<(), OutputError> {
        self.write_fields([
            posting.title.as_str(),
            posting.location.as_str(),
            posting.description.as_str(),
            posting.qualifications.as_str(),
            posting.salary.as_deref().unwrap_or(""),
        ])?;
        self.rows += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<usize, OutputError> {
        self.writer.flush().map_err(|e| OutputError::Write {
            path: self.path.to_path_buf(),
            source: e.into(),
        })?;
        info!("wrote {} row(s) to {}", self.rows, self.path.display());
        Ok(self.rows)
    }
}

/// Rewrites both target files with the given postings, each in the file of
/// its category. Both files get a header even when they receive no rows.
///
/// Both files are opened before any row is written; the first failure
/// aborts the rest of the write. The two targets must differ.
pub fn write(
    postings: &[(JobPosting, Category)],
    targets: &OutputTargets,
) -> Result<WriteSummary, OutputError> {
    if targets.internships == targets.entry_level {
        return Err(OutputError::SameTarget {
            path: targets.internships.clone(),
        });
    }
    let mut internships = CsvFile::create(&targets.internships)?;
    let mut entry_level = CsvFile::create(&targets.entry_level)?;

    for (posting, category) in postings {
        match category {
            Category::Internship => internships.append(posting)?,
            Category::EntryLevel => entry_level.append(posting)?,
        }
    }

    Ok(WriteSummary {
        internships: internships.finish()?,
        entry_level: entry_level.finish()?,
    })
}
