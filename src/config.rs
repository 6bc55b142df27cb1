//! Run configuration, built once at startup and passed by parameter.
//!
//! Keeping every process-level input (flags, environment fallbacks) in an
//! explicit value means the library pipeline can be driven from tests
//! without touching the real environment.

use crate::error::{SplitError, SplitErrorKind};

/// Which duration source supplies raw samples for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    /// Aggregate timings from one or more JUnit XML reports.
    /// `path` may be a glob pattern; `None` reads a single report from stdin.
    JunitReports { path: Option<String> },
    /// Estimate cost from each file's line count.
    LineCount,
    /// No estimation; every file receives the unit fallback weight, so
    /// buckets balance by file count alone.
    Uniform,
}

/// Complete configuration for one splitting run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Glob pattern selecting candidate test files.
    pub glob: String,
    /// Optional glob pattern removing files from the candidate set.
    pub exclude_glob: Option<String>,
    /// Index of the bucket this container consumes.
    pub index: usize,
    /// Total number of buckets.
    pub total: usize,
    /// Duration source for weight estimation.
    pub source: SourceSelection,
}

impl Config {
    /// Validates the bucket parameters before any scheduling work begins.
    ///
    /// `total` must be at least 1 and `index` must address one of the
    /// `total` buckets. Inputs come from an external CI pipeline that will
    /// not self-correct, so violation is fatal rather than clamped.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.total == 0 || self.index >= self.total {
            return Err(SplitError::new(SplitErrorKind::InvalidBuckets {
                index: self.index,
                total: self.total,
            }));
        }
        Ok(())
    }
}
