//! Human-readable text output

use crate::checker::{CheckReport, Outcome};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for terminal display
pub struct TextFormatter {
    verbosity: Verbosity,
    show_update_urls: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, show_update_urls: bool) -> Self {
        Self {
            verbosity,
            show_update_urls,
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()> {
        for result in &report.results {
            match &result.outcome {
                Outcome::Resolved(dep) if dep.is_up_to_date() => {
                    if self.verbosity != Verbosity::Quiet {
                        writeln!(writer, "{}", format!("{} up to date.", dep).green())?;
                    }
                }
                Outcome::Resolved(dep) => {
                    writeln!(
                        writer,
                        "{}",
                        format!(
                            "{} is not up to date. Latest version is '{}', but it is pinned to '{}'.",
                            dep, dep.latest, dep.pinned_to
                        )
                        .red()
                    )?;
                    if self.show_update_urls {
                        writeln!(writer, "{}", dep.url_for(&dep.latest).yellow())?;
                    }
                }
                Outcome::Failed(e) => {
                    writeln!(writer, "{}", format!("{}: {}", result.url, e).red())?;
                }
            }

            if self.verbosity == Verbosity::Verbose {
                writeln!(writer, "  from {}", result.file.display())?;
            }
        }

        if self.verbosity != Verbosity::Quiet {
            let summary = report.summary();
            writeln!(writer)?;
            writeln!(
                writer,
                "{} checked: {} up to date, {} outdated, {} failed",
                summary.total, summary.up_to_date, summary.outdated, summary.failed
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckResult;
    use crate::error::SourceError;
    use crate::source::ResolvedDependency;
    use std::path::PathBuf;

    fn render(formatter: &TextFormatter, report: &CheckReport) -> String {
        let mut buffer = Vec::new();
        formatter.format(report, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn result(outcome: Outcome) -> CheckResult {
        CheckResult {
            file: PathBuf::from("build.zig.zon"),
            url: "git://github.com/acme/widget#abc123,".to_string(),
            outcome,
        }
    }

    fn up_to_date_report() -> CheckReport {
        CheckReport {
            results: vec![result(Outcome::Resolved(ResolvedDependency::new(
                "acme/widget",
                "https://github.com/acme/widget",
                "abc123",
                "abc123",
            )))],
        }
    }

    fn outdated_report() -> CheckReport {
        CheckReport {
            results: vec![result(Outcome::Resolved(ResolvedDependency::new(
                "acme/widget",
                "https://github.com/acme/widget",
                "abc123",
                "def456",
            )))],
        }
    }

    #[test]
    fn test_up_to_date_line() {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(Verbosity::Normal, false);
        let output = render(&formatter, &up_to_date_report());
        assert!(output.contains("acme/widget up to date."));
        assert!(output.contains("1 checked: 1 up to date, 0 outdated, 0 failed"));
    }

    #[test]
    fn test_outdated_line() {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(Verbosity::Normal, false);
        let output = render(&formatter, &outdated_report());
        assert!(output.contains(
            "acme/widget is not up to date. Latest version is 'def456', but it is pinned to 'abc123'."
        ));
        assert!(!output.contains("https://github.com/acme/widget#def456"));
    }

    #[test]
    fn test_outdated_with_update_url() {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(Verbosity::Normal, true);
        let output = render(&formatter, &outdated_report());
        assert!(output.contains("https://github.com/acme/widget#def456"));
    }

    #[test]
    fn test_quiet_hides_up_to_date_and_summary() {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(Verbosity::Quiet, false);
        let output = render(&formatter, &up_to_date_report());
        assert!(output.is_empty());
    }

    #[test]
    fn test_quiet_still_reports_outdated() {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(Verbosity::Quiet, false);
        let output = render(&formatter, &outdated_report());
        assert!(output.contains("is not up to date"));
        assert!(!output.contains("checked:"));
    }

    #[test]
    fn test_failed_line() {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(Verbosity::Normal, false);
        let report = CheckReport {
            results: vec![CheckResult {
                file: PathBuf::from("build.zig.zon"),
                url: "https://not-a-known-host.example/x/y".to_string(),
                outcome: Outcome::Failed(SourceError::unrecognized(
                    "https://not-a-known-host.example/x/y",
                )),
            }],
        };
        let output = render(&formatter, &report);
        assert!(output.contains("no known dependency source recognizes"));
        assert!(output.contains("0 up to date, 0 outdated, 1 failed"));
    }

    #[test]
    fn test_verbose_shows_provenance() {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(Verbosity::Verbose, false);
        let output = render(&formatter, &up_to_date_report());
        assert!(output.contains("from build.zig.zon"));
    }
}
