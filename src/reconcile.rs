//! Weight reconciliation: raw samples + file universe → canonical weights.
//!
//! Pure in-memory transformation sitting between the duration sources and
//! the scheduler:
//!
//! 1. **Stale drop** — samples for files no longer in the universe are
//!    discarded silently (suites get deleted and renamed as they evolve)
//! 2. **Averaging** — a file with samples weighs the arithmetic mean of
//!    them; the mean keeps expected bucket totals additive, which is what
//!    the scheduler balances
//! 3. **Fallback** — a file without samples weighs the mean of the known
//!    weights, or 1.0 when nothing is known, so files still distribute
//!    by count instead of collapsing to zero weight

use indexmap::IndexMap;
use tracing::warn;

use crate::resolve::FileSet;
use crate::sources::RawSamples;

/// Canonical per-file weights: exactly one entry per universe file, in
/// universe order.
pub type WeightMap = IndexMap<String, f64>;

/// Fallback weight used when no file has any sample.
const UNIT_WEIGHT: f64 = 1.0;

/// Merges raw samples with the universe into a weight map.
///
/// When `warn_on_gaps` is set, every file that falls back to the imputed
/// weight is reported; historical sources set it, sources covering the
/// universe by construction do not.
pub fn reconcile(
    samples: &RawSamples,
    universe: &FileSet,
    warn_on_gaps: bool,
) -> WeightMap {
    // Mean per sampled file still in the universe. Anything else in
    // `samples` is stale and dropped here.
    let mut means: IndexMap<&str, f64> = IndexMap::new();
    for (file, observed) in samples {
        if universe.contains(file) && !observed.is_empty() {
            let mean = observed.iter().sum::<f64>() / observed.len() as f64;
            means.insert(file.as_str(), mean);
        }
    }

    let fallback = if means.is_empty() {
        UNIT_WEIGHT
    } else {
        means.values().sum::<f64>() / means.len() as f64
    };

    let mut weights = WeightMap::with_capacity(universe.len());
    for file in universe {
        match means.get(file.as_str()) {
            Some(&mean) => {
                weights.insert(file.clone(), mean);
            }
            None => {
                if warn_on_gaps {
                    warn!("missing file time for {file}");
                }
                weights.insert(file.clone(), fallback);
            }
        }
    }
    weights
}
