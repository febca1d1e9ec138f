//! Report generation for analysis findings.
//!
//! Groups a finding sequence by severity and by sheet and serializes the
//! result to JSON or HTML. Strictly a consumer of the engine's output; the
//! analysis never depends on anything here.

use crate::error::{Error, Result};
use crate::finding::{Finding, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

/// Findings grouped for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Name of the analyzed file.
    pub file_name: String,
    /// Total number of findings.
    pub total_findings: usize,
    /// Findings grouped by severity, ascending.
    pub by_severity: BTreeMap<Severity, Vec<Finding>>,
    /// Findings grouped by sheet name.
    pub by_sheet: BTreeMap<String, Vec<Finding>>,
}

/// Group findings by severity and by sheet.
pub fn generate_report(file_name: impl Into<String>, findings: &[Finding]) -> AnalysisReport {
    let mut by_severity: BTreeMap<Severity, Vec<Finding>> = BTreeMap::new();
    let mut by_sheet: BTreeMap<String, Vec<Finding>> = BTreeMap::new();

    for finding in findings {
        by_severity
            .entry(finding.severity)
            .or_default()
            .push(finding.clone());
        by_sheet
            .entry(finding.sheet_name.clone())
            .or_default()
            .push(finding.clone());
    }

    AnalysisReport {
        file_name: file_name.into(),
        total_findings: findings.len(),
        by_severity,
        by_sheet,
    }
}

/// Serialize a report to JSON.
pub fn to_json(report: &AnalysisReport, pretty: bool) -> Result<String> {
    let result = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    result.map_err(|e| Error::XmlParse(format!("JSON serialization error: {}", e)))
}

/// Render a report as a standalone HTML page.
pub fn to_html(report: &AnalysisReport) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!(
        "<title>Workbook Analysis Report - {}</title>\n",
        escape_html(&report.file_name)
    ));
    html.push_str(
        "<style>\n\
         body { font-family: Arial, sans-serif; margin: 20px; }\n\
         .critical { color: darkred; }\n\
         .error { color: red; }\n\
         .warning { color: orange; }\n\
         .info { color: blue; }\n\
         </style>\n</head>\n<body>\n",
    );
    html.push_str("<h1>Workbook Analysis Report</h1>\n");
    html.push_str(&format!("<h2>File: {}</h2>\n", escape_html(&report.file_name)));
    html.push_str(&format!(
        "<p>Total findings: {}</p>\n",
        report.total_findings
    ));

    html.push_str("<h3>Findings by Severity</h3>\n");
    // Highest impact first.
    for (severity, findings) in report.by_severity.iter().rev() {
        html.push_str(&format!(
            "<div class=\"{}\">\n<h4>{} ({})</h4>\n<ul>\n",
            severity,
            capitalize(severity.as_str()),
            findings.len()
        ));
        for finding in findings {
            html.push_str(&format!("<li>{}</li>\n", format_finding(finding)));
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("<h3>Findings by Worksheet</h3>\n");
    for (sheet, findings) in &report.by_sheet {
        html.push_str(&format!(
            "<div>\n<h4>{} ({})</h4>\n<ul>\n",
            escape_html(sheet),
            findings.len()
        ));
        for finding in findings {
            html.push_str(&format!("<li>{}</li>\n", format_finding(finding)));
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn format_finding(finding: &Finding) -> String {
    let location = if finding.is_cell_level() {
        format!("Cell {}{}", finding.column, finding.row)
    } else {
        "Sheet level".to_string()
    };
    let fix = match &finding.fix_suggestion {
        Some(suggestion) => format!("<br>Suggestion: {}", escape_html(suggestion)),
        None => String::new(),
    };
    format!(
        "{} - {}: {}{}",
        location,
        finding.kind,
        escape_html(&finding.details),
        fix
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{FindingKind, Location};

    fn sample_findings() -> Vec<Finding> {
        vec![
            Finding::new(
                &Location::cell("Sheet1", "A", 1),
                FindingKind::LongString,
                Severity::Error,
                "String length (40000) exceeds Excel limit (32767)",
            )
            .with_fix("Split the string into multiple cells"),
            Finding::new(
                &Location::cell("Sheet1", "B", 2),
                FindingKind::SpecialCharacter,
                Severity::Warning,
                "String contains zero-width character",
            )
            .with_fix("Remove or replace zero-width characters"),
            Finding::new(
                &Location::sheet_level("Sheet2"),
                FindingKind::InvalidSheetName,
                Severity::Error,
                "Sheet name contains invalid characters: [",
            ),
        ]
    }

    #[test]
    fn test_generate_report_groups() {
        let report = generate_report("test.xlsx", &sample_findings());

        assert_eq!(report.total_findings, 3);
        assert_eq!(report.by_sheet.len(), 2);
        assert_eq!(report.by_severity[&Severity::Error].len(), 2);
        assert_eq!(report.by_severity[&Severity::Warning].len(), 1);
        assert!(!report.by_severity.contains_key(&Severity::Critical));
    }

    #[test]
    fn test_json_export() {
        let report = generate_report("test.xlsx", &sample_findings());
        let json = to_json(&report, true).unwrap();

        // Round-trip through serde_json to check it is well-formed.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["file_name"], "test.xlsx");
        assert_eq!(value["total_findings"], 3);
        assert_eq!(value["by_severity"]["error"][0]["kind"], "Long string");
        assert_eq!(value["by_sheet"]["Sheet1"][1]["column"], "B");
        // Absent suggestions are omitted, not null.
        assert!(value["by_sheet"]["Sheet2"][0]
            .get("fix_suggestion")
            .is_none());

        let compact = to_json(&report, false).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_html_export() {
        let report = generate_report("test.xlsx", &sample_findings());
        let html = to_html(&report);

        assert!(html.contains("<title>Workbook Analysis Report - test.xlsx</title>"));
        assert!(html.contains("Error (2)"));
        assert!(html.contains("Warning (1)"));
        assert!(html.contains("Cell A1 - Long string"));
        assert!(html.contains("Sheet level - Invalid sheet name"));
        assert!(html.contains("Suggestion: Split the string"));
    }

    #[test]
    fn test_html_escapes_details() {
        let findings = vec![Finding::new(
            &Location::sheet_level("<Sheet>"),
            FindingKind::InvalidSheetName,
            Severity::Error,
            "Sheet name contains invalid characters: <, >",
        )];
        let html = to_html(&generate_report("x.xlsx", &findings));
        assert!(html.contains("&lt;Sheet&gt;"));
        assert!(!html.contains("<Sheet>"));
    }

    #[test]
    fn test_empty_report() {
        let report = generate_report("clean.xlsx", &[]);
        assert_eq!(report.total_findings, 0);
        assert!(report.by_severity.is_empty());
        assert!(report.by_sheet.is_empty());
    }
}
