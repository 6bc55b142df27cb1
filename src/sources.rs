//! Duration sources: interchangeable producers of raw timing samples.
//!
//! Every estimation strategy implements one capability — produce raw
//! samples for a file universe — so the reconciler and scheduler never
//! know where weights came from, and new strategies slot in without
//! touching either.

use indexmap::IndexMap;

use crate::config::SourceSelection;
use crate::error::SplitError;
use crate::junit::JunitReports;
use crate::line_count::LineCounts;
use crate::resolve::FileSet;

/// Raw duration samples: file path → observed samples, in first-seen order.
///
/// A file may carry several samples (one per historical run); the
/// reconciler averages them. Values are seconds for historical sources and
/// an abstract cost unit for heuristics.
pub type RawSamples = IndexMap<String, Vec<f64>>;

/// A producer of raw duration samples for a file universe.
pub trait DurationSource {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Collects raw samples. May read files or stdin; never mutates state.
    fn collect(&self, universe: &FileSet) -> Result<RawSamples, SplitError>;

    /// Whether a universe file lacking samples warrants a diagnostic.
    ///
    /// True for historical sources, where a gap means lost data. False
    /// for sources that cover the universe by construction, or supply no
    /// data at all.
    fn warns_on_gaps(&self) -> bool {
        false
    }

    /// Whether samples are wall-clock seconds, making the expected-time
    /// summary line meaningful.
    fn measures_seconds(&self) -> bool {
        false
    }
}

/// The no-data source: yields zero samples, so every file receives the
/// unit fallback weight and buckets balance by file count alone.
pub struct Uniform;

impl DurationSource for Uniform {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn collect(&self, _universe: &FileSet) -> Result<RawSamples, SplitError> {
        Ok(RawSamples::new())
    }
}

/// Builds the duration source selected by the configuration.
pub fn from_selection(selection: &SourceSelection) -> Box<dyn DurationSource> {
    match selection {
        SourceSelection::JunitReports { path } => {
            Box::new(JunitReports::new(path.clone()))
        }
        SourceSelection::LineCount => Box::new(LineCounts),
        SourceSelection::Uniform => Box::new(Uniform),
    }
}
