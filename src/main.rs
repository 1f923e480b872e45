//! zondep - build.zig.zon dependency freshness checker
//!
//! Scans a Zig project for `build.zig.zon` manifests and reports whether each
//! URL-pinned dependency is current relative to its upstream origin.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use zondep::checker::Checker;
use zondep::cli::CliArgs;
use zondep::output::{create_formatter, OutputConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("zondep v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.root.display());
    }

    let checker = Checker::new(args.clone())?;

    // A failed scan exits with the same code as per-URL resolution failures,
    // distinct from "outdated only".
    let report = match checker.run().await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.update);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Exit codes: 0 everything current, 1 at least one dependency outdated,
    // 2 the scan failed or at least one URL failed to resolve.
    let summary = report.summary();
    if summary.failed > 0 {
        Ok(ExitCode::from(2))
    } else if summary.outdated > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
