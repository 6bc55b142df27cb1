//! Splits test files into buckets of even estimated duration for parallel
//! CI containers.
//!
//! Each container runs the same binary with its own bucket index; all
//! containers compute the identical partition and each consumes exactly
//! one bucket, so no coordination is needed between them.
//!
//! ## Pipeline
//!
//! 1. Resolve the candidate universe (include glob minus exclude glob)
//! 2. Collect raw duration samples from the selected source (JUnit XML
//!    reports, line counts, or nothing)
//! 3. Reconcile samples against the universe into one weight per file
//! 4. Partition the weights into K buckets via greedy largest-first
//!    scheduling
//! 5. Print the selected bucket's files, space-separated, on stdout
//!
//! ## Usage
//!
//! ```no_run
//! use shardize::{Config, SourceSelection};
//!
//! let config = Config {
//!     glob: "spec/**/*_spec.rb".to_string(),
//!     exclude_glob: None,
//!     index: 0,
//!     total: 4,
//!     source: SourceSelection::LineCount,
//! };
//! let mut out = Vec::new();
//! shardize::run(&config, &mut out).unwrap();
//! ```

pub mod config;
mod error;
pub mod junit;
pub mod line_count;
pub mod reconcile;
pub mod resolve;
pub mod schedule;
pub mod sources;

use std::io::Write;

use itertools::Itertools;
use tracing::{debug, info, warn};

pub use crate::config::{Config, SourceSelection};
#[doc(inline)]
pub use crate::error::SplitError;

/// Runs the full splitting pipeline and writes the selected bucket's
/// files, joined by single spaces, as one line to `out`.
///
/// Weight and gap diagnostics go to `tracing` (stderr in the CLI), never
/// to `out`, so the output line stays clean for shell consumption.
///
/// # Errors
///
/// Returns [`SplitError`] for invalid bucket parameters, glob failures,
/// unreadable or malformed reports, unreadable test files during line
/// counting, or an output write failure.
pub fn run(config: &Config, out: &mut dyn Write) -> Result<(), SplitError> {
    config.validate()?;

    let universe =
        resolve::resolve(&config.glob, config.exclude_glob.as_deref())?;
    debug!("{} candidate files", universe.len());

    let source = sources::from_selection(&config.source);
    debug!("estimating durations via {} source", source.name());
    let samples = source.collect(&universe)?;

    let weights =
        reconcile::reconcile(&samples, &universe, source.warns_on_gaps());
    for (file, weight) in &weights {
        info!("{file}: {weight:.1}s");
    }

    let set = schedule::schedule(&weights, config.total);
    if source.measures_seconds() {
        info!("expected test time: {:.1}s", set.weights[config.index]);
    }

    let bucket = &set.buckets[config.index];
    for file in bucket {
        if file.contains(' ') {
            warn!("path `{file}` contains a space, output line is ambiguous");
        }
    }
    writeln!(out, "{}", bucket.iter().join(" "))?;
    Ok(())
}
