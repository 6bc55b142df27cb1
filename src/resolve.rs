//! Candidate file set resolution: include glob minus exclude glob.
//!
//! Produces the file universe considered for one splitting run. Patterns
//! support `**` so nested spec directories match the way CI configs expect.
//! Matches arrive in the glob walker's alphabetical order, which keeps the
//! universe (and everything downstream) deterministic across reruns.

use indexmap::IndexSet;

use crate::error::{SplitError, SplitErrorKind};

/// The candidate universe: normalized file paths in enumeration order.
pub type FileSet = IndexSet<String>;

/// Resolves the candidate set from an include pattern and an optional
/// exclude pattern.
///
/// # Errors
///
/// Returns [`SplitError`] if either pattern fails to compile
/// ([`SplitError::is_pattern`]) or a matched directory cannot be read
/// during the walk ([`SplitError::is_walk`]).
pub fn resolve(
    pattern: &str,
    exclude: Option<&str>,
) -> Result<FileSet, SplitError> {
    let mut files = expand(pattern)?;
    if let Some(exclude) = exclude {
        for excluded in expand(exclude)? {
            files.shift_remove(&excluded);
        }
    }
    Ok(files)
}

/// Expands one glob pattern into a set of file paths.
///
/// Directories are skipped: the universe holds test files whose contents
/// the line-count adapter must be able to read.
fn expand(pattern: &str) -> Result<IndexSet<String>, SplitError> {
    let paths = glob::glob(pattern).map_err(|source| {
        SplitError::new(SplitErrorKind::Pattern {
            pattern: pattern.to_string(),
            source,
        })
    })?;

    let mut set = IndexSet::new();
    for entry in paths {
        let path = entry.map_err(|e| SplitError::new(SplitErrorKind::Walk(e)))?;
        if !path.is_file() {
            continue;
        }
        set.insert(path.to_string_lossy().into_owned());
    }
    Ok(set)
}
