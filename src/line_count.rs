//! Heuristic duration source: line counts as a proxy for runtime cost.
//!
//! Useful on a fresh project with no historical reports: longer spec files
//! tend to take longer to run. Yields exactly one sample per universe
//! file, so the reconciler never needs a fallback under this source.

use std::fs;

use crate::error::{SplitError, SplitErrorKind};
use crate::resolve::FileSet;
use crate::sources::{DurationSource, RawSamples};

/// Duration source estimating cost from each file's line count.
pub struct LineCounts;

impl DurationSource for LineCounts {
    fn name(&self) -> &'static str {
        "line-count"
    }

    fn collect(&self, universe: &FileSet) -> Result<RawSamples, SplitError> {
        let mut samples = RawSamples::new();
        for file in universe {
            let contents = fs::read(file).map_err(|source| {
                SplitError::new(SplitErrorKind::TestFileRead {
                    path: file.clone(),
                    source,
                })
            })?;
            // Newline bytes, not text lines: cheap, encoding-agnostic, and
            // stable for files without a trailing newline.
            let lines = contents.iter().filter(|&&b| b == b'\n').count();
            samples.insert(file.clone(), vec![lines as f64]);
        }
        Ok(samples)
    }
}
