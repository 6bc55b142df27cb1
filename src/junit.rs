//! Historical duration source: JUnit XML report aggregation.
//!
//! Each report document carries `<testsuite filepath="…" time="…">`
//! records. Every record appends one sample to its file's list, so
//! feeding several reports (via a glob pattern) averages timings over
//! repeated runs. Report paths are lexically cleaned so they compare
//! byte-exact against glob-enumerated candidate paths.

use std::fs;
use std::io::Read;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{SplitError, SplitErrorKind};
use crate::resolve::FileSet;
use crate::sources::{DurationSource, RawSamples};

/// Root of a JUnit report document.
#[derive(Debug, Deserialize)]
struct TestSuites {
    #[serde(rename = "testsuite", default)]
    suites: Vec<TestSuite>,
}

/// One test-suite record: the spec file it covers and its elapsed time.
#[derive(Debug, Deserialize)]
struct TestSuite {
    #[serde(rename = "@filepath", default)]
    file: String,
    #[serde(rename = "@time", default)]
    time: f64,
}

/// Duration source reading one or more JUnit XML reports.
pub struct JunitReports {
    /// Report path or glob pattern; `None` reads a single report from stdin.
    path: Option<String>,
}

impl JunitReports {
    pub fn new(path: Option<String>) -> Self {
        Self { path }
    }

    /// Ingests all reports matching the configured pattern.
    fn collect_from_pattern(
        &self,
        pattern: &str,
        samples: &mut RawSamples,
    ) -> Result<(), SplitError> {
        let paths = glob::glob(pattern).map_err(|source| {
            SplitError::new(SplitErrorKind::Pattern {
                pattern: pattern.to_string(),
                source,
            })
        })?;

        let mut matched = false;
        for entry in paths {
            let path =
                entry.map_err(|e| SplitError::new(SplitErrorKind::Walk(e)))?;
            matched = true;
            let path = path.to_string_lossy().into_owned();
            info!("using test times from JUnit report {path}");
            let xml = fs::read_to_string(&path).map_err(|source| {
                SplitError::new(SplitErrorKind::ReportRead {
                    path: path.clone(),
                    source,
                })
            })?;
            ingest(&path, &xml, samples)?;
        }

        if !matched {
            // A wildcard pattern is a search and may legitimately come up
            // empty; a literal path is a claim that the report exists.
            if pattern.contains(&['*', '?', '['][..]) {
                warn!("no JUnit reports match `{pattern}`");
            } else {
                return Err(SplitError::new(SplitErrorKind::ReportNotFound {
                    path: pattern.to_string(),
                }));
            }
        }
        Ok(())
    }

    /// Ingests a single report from stdin.
    fn collect_from_stdin(
        &self,
        samples: &mut RawSamples,
    ) -> Result<(), SplitError> {
        info!("using test times from JUnit report at stdin");
        let mut xml = String::new();
        std::io::stdin().read_to_string(&mut xml).map_err(|source| {
            SplitError::new(SplitErrorKind::ReportRead {
                path: "<stdin>".to_string(),
                source,
            })
        })?;
        // An empty stdin stream is the implicit default when no report was
        // produced yet; treat it as zero records rather than bad XML.
        if xml.trim().is_empty() {
            warn!("stdin is empty, no test times available");
            return Ok(());
        }
        ingest("<stdin>", &xml, samples)
    }
}

impl DurationSource for JunitReports {
    fn name(&self) -> &'static str {
        "junit"
    }

    fn collect(&self, _universe: &FileSet) -> Result<RawSamples, SplitError> {
        let mut samples = RawSamples::new();
        match &self.path {
            Some(pattern) => {
                self.collect_from_pattern(pattern, &mut samples)?;
            }
            None => self.collect_from_stdin(&mut samples)?,
        }
        Ok(samples)
    }

    fn warns_on_gaps(&self) -> bool {
        true
    }

    fn measures_seconds(&self) -> bool {
        true
    }
}

/// Parses one report document and appends its samples.
fn ingest(
    origin: &str,
    xml: &str,
    samples: &mut RawSamples,
) -> Result<(), SplitError> {
    let report: TestSuites = quick_xml::de::from_str(xml).map_err(|source| {
        SplitError::new(SplitErrorKind::ReportParse {
            path: origin.to_string(),
            source,
        })
    })?;

    for suite in report.suites {
        let file = clean_path(&suite.file);
        debug!("adding test time for {file}: {:.3}s", suite.time);
        samples.entry(file).or_default().push(suite.time);
    }
    Ok(())
}

/// Lexically cleans a path: collapses `.` and `..` segments and repeated
/// separators, returning `.` for an empty result. Report paths cleaned
/// this way compare byte-exact against glob output.
fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` above the root stays at the root.
                _ if rooted => {}
                _ => segments.push(".."),
            },
            seg => segments.push(seg),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
