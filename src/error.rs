//! Error types for the shardize crate.

use std::backtrace::Backtrace;
use std::fmt;

/// Error type for bucket-splitting operations.
///
/// This error captures failures that can occur while gathering inputs
/// (glob enumeration, report ingestion, line counting) and emitting the
/// selected bucket. Tolerated data gaps — files with no historical sample,
/// stale report entries — never surface here; they are handled inside the
/// reconciler.
#[derive(Debug)]
pub struct SplitError {
    kind: SplitErrorKind,
    backtrace: Backtrace,
}

/// Internal error variants. Not exposed publicly; use `is_xxx()` methods instead.
#[derive(Debug)]
pub(crate) enum SplitErrorKind {
    /// Bucket index/count pair is out of range.
    InvalidBuckets { index: usize, total: usize },
    /// A glob pattern failed to compile.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    /// Enumerating glob matches failed (e.g. unreadable directory).
    Walk(glob::GlobError),
    /// A wildcard-free report path matched no file.
    ReportNotFound { path: String },
    /// Reading a JUnit report failed.
    ReportRead {
        path: String,
        source: std::io::Error,
    },
    /// A JUnit report is not valid XML of the expected shape.
    ReportParse {
        path: String,
        source: quick_xml::DeError,
    },
    /// Reading a candidate test file for line counting failed.
    TestFileRead {
        path: String,
        source: std::io::Error,
    },
    /// I/O error when writing output.
    Io(std::io::Error),
}

impl SplitError {
    /// Creates an error from an error kind, capturing a backtrace.
    pub(crate) fn new(kind: SplitErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::capture(),
        }
    }

    /// Returns true if this error is an out-of-range bucket index/count.
    pub fn is_invalid_buckets(&self) -> bool {
        matches!(self.kind, SplitErrorKind::InvalidBuckets { .. })
    }

    /// Returns true if this error is a malformed glob pattern.
    pub fn is_pattern(&self) -> bool {
        matches!(self.kind, SplitErrorKind::Pattern { .. })
    }

    /// Returns true if this error occurred while walking glob matches.
    pub fn is_walk(&self) -> bool {
        matches!(self.kind, SplitErrorKind::Walk(_))
    }

    /// Returns true if an explicitly requested report was missing.
    pub fn is_report_not_found(&self) -> bool {
        matches!(self.kind, SplitErrorKind::ReportNotFound { .. })
    }

    /// Returns true if this error is due to an unreadable report.
    pub fn is_report_read(&self) -> bool {
        matches!(self.kind, SplitErrorKind::ReportRead { .. })
    }

    /// Returns true if this error is due to malformed report XML.
    pub fn is_report_parse(&self) -> bool {
        matches!(self.kind, SplitErrorKind::ReportParse { .. })
    }

    /// Returns true if this error is due to an unreadable test file.
    pub fn is_test_file_read(&self) -> bool {
        matches!(self.kind, SplitErrorKind::TestFileRead { .. })
    }

    /// Returns true if this error is due to I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, SplitErrorKind::Io(_))
    }

    /// Returns the backtrace captured when this error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for SplitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitErrorKind::InvalidBuckets { index, total } => {
                write!(
                    f,
                    "bucket index {index} and bucket count {total} are \
                     missing or invalid (need 0 <= index < total)"
                )
            }
            SplitErrorKind::Pattern { pattern, source } => {
                write!(f, "invalid glob pattern `{pattern}`: {source}")
            }
            SplitErrorKind::Walk(err) => {
                write!(f, "failed to enumerate glob matches: {err}")
            }
            SplitErrorKind::ReportNotFound { path } => {
                write!(f, "junit report `{path}` does not exist")
            }
            SplitErrorKind::ReportRead { path, source } => {
                write!(f, "failed to read junit report `{path}`: {source}")
            }
            SplitErrorKind::ReportParse { path, source } => {
                write!(f, "failed to parse junit report `{path}`: {source}")
            }
            SplitErrorKind::TestFileRead { path, source } => {
                write!(f, "failed to read test file `{path}`: {source}")
            }
            SplitErrorKind::Io(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Summary of what happened.
        writeln!(f, "{}", self.kind)?;

        // Backtrace (will be empty unless RUST_BACKTRACE is set).
        write!(f, "{}", self.backtrace)
    }
}

impl std::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            SplitErrorKind::InvalidBuckets { .. }
            | SplitErrorKind::ReportNotFound { .. } => None,
            SplitErrorKind::Pattern { source, .. } => Some(source),
            SplitErrorKind::Walk(err) => Some(err),
            SplitErrorKind::ReportRead { source, .. } => Some(source),
            SplitErrorKind::ReportParse { source, .. } => Some(source),
            SplitErrorKind::TestFileRead { source, .. } => Some(source),
            SplitErrorKind::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SplitError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: SplitErrorKind::Io(err),
            backtrace: Backtrace::capture(),
        }
    }
}
