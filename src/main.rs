use std::io::Write;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use shardize::{Config, SourceSelection};
use tracing_subscriber::EnvFilter;

/// Splits test files into buckets of even estimated duration, so parallel
/// CI containers finish at roughly the same time. Prints the files for
/// this container's bucket, space-separated, on stdout.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Glob pattern to find test files. Single-quote to avoid shell
    /// expansion.
    #[arg(long, default_value = "spec/**/*_spec.rb")]
    glob: String,

    /// Glob pattern to exclude test files. Single-quote to avoid shell
    /// expansion.
    #[arg(long)]
    exclude_glob: Option<String>,

    /// This container's bucket index.
    #[arg(long = "split-index", env = "CIRCLE_NODE_INDEX")]
    index: usize,

    /// Total number of containers.
    #[arg(long = "split-total", env = "CIRCLE_NODE_TOTAL")]
    total: usize,

    /// Use JUnit XML reports for test times.
    #[arg(long)]
    junit: bool,

    /// Path to a JUnit XML report (omit to read from stdin; use a glob
    /// pattern to load multiple reports).
    #[arg(long, requires = "junit")]
    junit_path: Option<String>,

    /// Use line counts to estimate test times.
    #[arg(long, conflicts_with = "junit")]
    line_count: bool,
}

impl Cli {
    fn source(&self) -> SourceSelection {
        if self.junit {
            SourceSelection::JunitReports {
                path: self.junit_path.clone(),
            }
        } else if self.line_count {
            SourceSelection::LineCount
        } else {
            SourceSelection::Uniform
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging. Output goes to stderr so the bucket
    // line on stdout remains clean for piping into a test runner.
    let level = cli.verbose.tracing_level_filter();
    let filter = EnvFilter::new(format!("warn,shardize={level}"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config {
        glob: cli.glob.clone(),
        exclude_glob: cli.exclude_glob.clone(),
        index: cli.index,
        total: cli.total,
        source: cli.source(),
    };

    // Lock stdout once up front rather than on each write call.
    // Stdout must outlive the lock, so we bind it here first.
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    shardize::run(&config, &mut out)?;
    out.flush()?;
    Ok(())
}
