//! End-to-end tests for the splitting pipeline.
//!
//! Each test builds a scratch spec tree (and optionally a JUnit report)
//! in a temp dir, drives `shardize::run` into a byte buffer, and checks
//! the emitted bucket line.

use std::fs;
use std::path::Path;

use shardize::{Config, SourceSelection};
use tempfile::TempDir;

/// Scratch tree with spec files of the given line counts.
fn scratch(files: &[(&str, usize)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for &(name, lines) in files {
        let path = dir.path().join("spec").join(name);
        fs::create_dir_all(path.parent().expect("has parent"))
            .expect("create spec dir");
        fs::write(&path, "it 'works'\n".repeat(lines)).expect("write spec");
    }
    dir
}

/// Writes a JUnit report with absolute file paths into the scratch tree.
fn write_report(dir: &Path, name: &str, times: &[(&str, f64)]) -> String {
    let mut xml = String::from("<testsuites>\n");
    for &(file, time) in times {
        let path = dir.join("spec").join(file);
        xml.push_str(&format!(
            "  <testsuite filepath=\"{}\" time=\"{time}\"/>\n",
            path.display()
        ));
    }
    xml.push_str("</testsuites>\n");
    let report = dir.join(name);
    fs::write(&report, xml).expect("write report");
    report.display().to_string()
}

fn config(dir: &Path, index: usize, total: usize) -> Config {
    Config {
        glob: format!("{}/spec/**/*_spec.rb", dir.display()),
        exclude_glob: None,
        index,
        total,
        source: SourceSelection::Uniform,
    }
}

fn run_to_line(config: &Config) -> String {
    let mut out = Vec::new();
    shardize::run(config, &mut out).expect("run succeeds");
    String::from_utf8(out).expect("utf8 output")
}

fn spec_path(dir: &Path, name: &str) -> String {
    dir.join("spec").join(name).display().to_string()
}

#[test]
fn uniform_weights_split_by_file_count() {
    let dir = scratch(&[
        ("a_spec.rb", 1),
        ("b_spec.rb", 1),
        ("c_spec.rb", 1),
        ("d_spec.rb", 1),
    ]);

    // Equal weights: lexicographic order alternates between buckets.
    let first = run_to_line(&config(dir.path(), 0, 2));
    let second = run_to_line(&config(dir.path(), 1, 2));
    assert_eq!(
        first.trim_end(),
        format!(
            "{} {}",
            spec_path(dir.path(), "a_spec.rb"),
            spec_path(dir.path(), "c_spec.rb")
        )
    );
    assert_eq!(
        second.trim_end(),
        format!(
            "{} {}",
            spec_path(dir.path(), "b_spec.rb"),
            spec_path(dir.path(), "d_spec.rb")
        )
    );
}

#[test]
fn junit_times_isolate_the_dominant_file() {
    let dir = scratch(&[
        ("a_spec.rb", 1),
        ("b_spec.rb", 1),
        ("c_spec.rb", 1),
        ("d_spec.rb", 1),
    ]);
    let report = write_report(
        dir.path(),
        "report.xml",
        &[("a_spec.rb", 100.0), ("b_spec.rb", 1.0), ("c_spec.rb", 1.0)],
    );

    let mut cfg = config(dir.path(), 0, 2);
    cfg.source = SourceSelection::JunitReports {
        path: Some(report),
    };

    // d has no sample; fallback = (100 + 1 + 1) / 3 = 34, so the light
    // bucket fills as d(34), b(1), c(1) while a(100) sits alone.
    let heavy = run_to_line(&cfg);
    assert_eq!(heavy.trim_end(), spec_path(dir.path(), "a_spec.rb"));

    cfg.index = 1;
    let light = run_to_line(&cfg);
    assert_eq!(
        light.trim_end(),
        format!(
            "{} {} {}",
            spec_path(dir.path(), "d_spec.rb"),
            spec_path(dir.path(), "b_spec.rb"),
            spec_path(dir.path(), "c_spec.rb")
        )
    );
}

#[test]
fn stale_report_entries_never_reach_the_output() {
    let dir = scratch(&[("a_spec.rb", 1), ("b_spec.rb", 1)]);
    let report = write_report(
        dir.path(),
        "report.xml",
        &[
            ("a_spec.rb", 2.0),
            // ghost_spec.rb was deleted since this report was recorded.
            ("ghost_spec.rb", 1000.0),
        ],
    );

    let mut cfg = config(dir.path(), 0, 1);
    cfg.source = SourceSelection::JunitReports {
        path: Some(report),
    };

    let line = run_to_line(&cfg);
    assert!(!line.contains("ghost_spec.rb"));
    // a(2.0) leads b (fallback 2.0, tie broken lexicographically).
    assert_eq!(
        line.trim_end(),
        format!(
            "{} {}",
            spec_path(dir.path(), "a_spec.rb"),
            spec_path(dir.path(), "b_spec.rb")
        )
    );
}

#[test]
fn samples_average_across_multiple_reports() {
    let dir = scratch(&[("a_spec.rb", 1), ("b_spec.rb", 1)]);
    // a: mean(9, 1) = 5; b: 4. One report each plus one shared.
    write_report(dir.path(), "run-1.xml", &[("a_spec.rb", 9.0)]);
    write_report(
        dir.path(),
        "run-2.xml",
        &[("a_spec.rb", 1.0), ("b_spec.rb", 4.0)],
    );

    let mut cfg = config(dir.path(), 0, 2);
    cfg.source = SourceSelection::JunitReports {
        path: Some(format!("{}/run-*.xml", dir.path().display())),
    };

    // a (5.0) outweighs b (4.0), so bucket 0 holds a alone.
    assert_eq!(
        run_to_line(&cfg).trim_end(),
        spec_path(dir.path(), "a_spec.rb")
    );
    cfg.index = 1;
    assert_eq!(
        run_to_line(&cfg).trim_end(),
        spec_path(dir.path(), "b_spec.rb")
    );
}

#[test]
fn line_counts_order_the_buckets() {
    let dir = scratch(&[
        ("a_spec.rb", 6),
        ("b_spec.rb", 1),
        ("c_spec.rb", 2),
        ("d_spec.rb", 3),
    ]);

    let mut cfg = config(dir.path(), 0, 2);
    cfg.source = SourceSelection::LineCount;

    // Placement: a(6) → bucket 0; d(3), c(2), b(1) → bucket 1.
    assert_eq!(
        run_to_line(&cfg).trim_end(),
        spec_path(dir.path(), "a_spec.rb")
    );
    cfg.index = 1;
    assert_eq!(
        run_to_line(&cfg).trim_end(),
        format!(
            "{} {} {}",
            spec_path(dir.path(), "d_spec.rb"),
            spec_path(dir.path(), "c_spec.rb"),
            spec_path(dir.path(), "b_spec.rb")
        )
    );
}

#[test]
fn buckets_partition_the_universe() {
    let dir = scratch(&[
        ("a_spec.rb", 4),
        ("b_spec.rb", 9),
        ("c_spec.rb", 2),
        ("d_spec.rb", 7),
        ("e_spec.rb", 1),
    ]);

    let mut seen: Vec<String> = Vec::new();
    for index in 0..3 {
        let mut cfg = config(dir.path(), index, 3);
        cfg.source = SourceSelection::LineCount;
        let line = run_to_line(&cfg);
        for file in line.split_whitespace() {
            assert!(
                !seen.contains(&file.to_string()),
                "{file} assigned to two buckets"
            );
            seen.push(file.to_string());
        }
    }
    seen.sort();

    let mut expected: Vec<String> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|n| spec_path(dir.path(), &format!("{n}_spec.rb")))
        .collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn reruns_emit_byte_identical_output() {
    let dir = scratch(&[
        ("a_spec.rb", 3),
        ("b_spec.rb", 3),
        ("c_spec.rb", 5),
        ("d_spec.rb", 1),
    ]);
    let mut cfg = config(dir.path(), 1, 3);
    cfg.source = SourceSelection::LineCount;

    assert_eq!(run_to_line(&cfg), run_to_line(&cfg));
}

#[test]
fn exclude_glob_trims_the_universe() {
    let dir = scratch(&[
        ("a_spec.rb", 1),
        ("slow/b_spec.rb", 1),
        ("slow/c_spec.rb", 1),
    ]);
    let mut cfg = config(dir.path(), 0, 1);
    cfg.exclude_glob =
        Some(format!("{}/spec/slow/**/*_spec.rb", dir.path().display()));

    assert_eq!(
        run_to_line(&cfg).trim_end(),
        spec_path(dir.path(), "a_spec.rb")
    );
}

#[test]
fn empty_universe_emits_an_empty_line() {
    let dir = scratch(&[]);
    let line = run_to_line(&config(dir.path(), 0, 4));
    assert_eq!(line, "\n");
}

#[test]
fn out_of_range_index_fails_before_any_work() {
    let dir = scratch(&[("a_spec.rb", 1)]);
    let mut out = Vec::new();
    let err = shardize::run(&config(dir.path(), 2, 2), &mut out)
        .expect_err("index == total is invalid");
    assert!(err.is_invalid_buckets());
    assert!(out.is_empty(), "no partial output on fatal errors");
}

#[test]
fn malformed_report_aborts_the_run() {
    let dir = scratch(&[("a_spec.rb", 1)]);
    let report = dir.path().join("report.xml");
    fs::write(&report, "<testsuites><testsuite").expect("write report");

    let mut cfg = config(dir.path(), 0, 1);
    cfg.source = SourceSelection::JunitReports {
        path: Some(report.display().to_string()),
    };
    let mut out = Vec::new();
    let err = shardize::run(&cfg, &mut out).expect_err("bad xml is fatal");
    assert!(err.is_report_parse());
    assert!(out.is_empty());
}
