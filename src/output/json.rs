//! JSON output for machine processing

use crate::checker::{CheckReport, CheckSummary, Outcome};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter
pub struct JsonFormatter {
    show_update_urls: bool,
}

/// Serializable view of the whole report
#[derive(Serialize)]
struct JsonReport<'a> {
    results: Vec<JsonResult<'a>>,
    summary: CheckSummary,
}

/// Serializable view of one per-URL result
#[derive(Serialize)]
struct JsonResult<'a> {
    file: String,
    url: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependency: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinned_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(show_update_urls: bool) -> Self {
        Self { show_update_urls }
    }

    fn build<'a>(&self, report: &'a CheckReport) -> JsonReport<'a> {
        let results = report
            .results
            .iter()
            .map(|result| {
                let file = result.file.display().to_string();
                match &result.outcome {
                    Outcome::Resolved(dep) => JsonResult {
                        file,
                        url: &result.url,
                        status: if dep.is_up_to_date() {
                            "up-to-date"
                        } else {
                            "outdated"
                        },
                        dependency: Some(&dep.name),
                        pinned_to: Some(&dep.pinned_to),
                        latest: Some(&dep.latest),
                        latest_url: (self.show_update_urls && !dep.is_up_to_date())
                            .then(|| dep.url_for(&dep.latest)),
                        error: None,
                    },
                    Outcome::Failed(e) => JsonResult {
                        file,
                        url: &result.url,
                        status: "failed",
                        dependency: None,
                        pinned_to: None,
                        latest: None,
                        latest_url: None,
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect();

        JsonReport {
            results,
            summary: report.summary(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &CheckReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = self.build(report);
        serde_json::to_writer_pretty(&mut *writer, &json)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckResult;
    use crate::error::SourceError;
    use crate::source::ResolvedDependency;
    use serde_json::Value;
    use std::path::PathBuf;

    fn render(formatter: &JsonFormatter, report: &CheckReport) -> Value {
        let mut buffer = Vec::new();
        formatter.format(report, &mut buffer).unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    fn sample_report() -> CheckReport {
        CheckReport {
            results: vec![
                CheckResult {
                    file: PathBuf::from("build.zig.zon"),
                    url: "git://github.com/acme/widget#abc123,".to_string(),
                    outcome: Outcome::Resolved(ResolvedDependency::new(
                        "acme/widget",
                        "https://github.com/acme/widget",
                        "abc123",
                        "def456",
                    )),
                },
                CheckResult {
                    file: PathBuf::from("build.zig.zon"),
                    url: "https://not-a-known-host.example/x/y".to_string(),
                    outcome: Outcome::Failed(SourceError::unrecognized(
                        "https://not-a-known-host.example/x/y",
                    )),
                },
            ],
        }
    }

    #[test]
    fn test_json_schema() {
        let formatter = JsonFormatter::new(false);
        let json = render(&formatter, &sample_report());

        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0]["status"], "outdated");
        assert_eq!(results[0]["dependency"], "acme/widget");
        assert_eq!(results[0]["pinned_to"], "abc123");
        assert_eq!(results[0]["latest"], "def456");
        assert!(results[0].get("latest_url").is_none());
        assert!(results[0].get("error").is_none());

        assert_eq!(results[1]["status"], "failed");
        assert!(results[1]["error"]
            .as_str()
            .unwrap()
            .contains("no known dependency source recognizes"));

        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["outdated"], 1);
        assert_eq!(json["summary"]["failed"], 1);
    }

    #[test]
    fn test_json_includes_latest_url_when_requested() {
        let formatter = JsonFormatter::new(true);
        let json = render(&formatter, &sample_report());

        assert_eq!(
            json["results"][0]["latest_url"],
            "https://github.com/acme/widget#def456"
        );
    }

    #[test]
    fn test_json_up_to_date_has_no_latest_url() {
        let formatter = JsonFormatter::new(true);
        let report = CheckReport {
            results: vec![CheckResult {
                file: PathBuf::from("build.zig.zon"),
                url: "git://github.com/acme/widget#abc123,".to_string(),
                outcome: Outcome::Resolved(ResolvedDependency::new(
                    "acme/widget",
                    "https://github.com/acme/widget",
                    "abc123",
                    "abc123",
                )),
            }],
        };
        let json = render(&formatter, &report);

        assert_eq!(json["results"][0]["status"], "up-to-date");
        assert!(json["results"][0].get("latest_url").is_none());
    }
}
