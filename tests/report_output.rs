//! Report generation and export tests.

use sheetvet::{generate_report, report, Finding, FindingKind, Location, Severity};
use std::fs;

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
        .with_fix("Remove special characters"),
        Finding::new(
            &Location::sheet_level("Sheet2"),
            FindingKind::SheetNameTooLong,
            Severity::Error,
            "Sheet name length (45) exceeds Excel limit (31)",
        ),
    ]
}

#[test]
fn report_groups_by_severity_and_sheet() {
    let findings = sample_findings();
    let report = generate_report("test.xlsx", &findings);

    assert_eq!(report.total_findings, 3);
    assert_eq!(report.by_sheet.len(), 2);
    assert_eq!(report.by_severity[&Severity::Error].len(), 2);
    assert_eq!(report.by_severity[&Severity::Warning].len(), 1);
    assert_eq!(report.by_sheet["Sheet1"].len(), 2);
    assert_eq!(report.by_sheet["Sheet2"].len(), 1);
}

#[test]
fn json_export_roundtrips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    let report_data = generate_report("test.xlsx", &sample_findings());
    fs::write(&path, report::to_json(&report_data, true).unwrap()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(value["file_name"], "test.xlsx");
    assert_eq!(value["total_findings"], 3);
    assert_eq!(
        value["by_severity"]["warning"][0]["details"],
        "String contains zero-width character"
    );
    assert_eq!(value["by_sheet"]["Sheet1"][0]["row"], 1);
}

#[test]
fn html_export_contains_sections_and_suggestions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.html");

    let report_data = generate_report("test.xlsx", &sample_findings());
    fs::write(&path, report::to_html(&report_data)).unwrap();

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.contains("Workbook Analysis Report"));
    assert!(html.contains("test.xlsx"));
    assert!(html.contains("Error (2)"));
    assert!(html.contains("Warning (1)"));
    assert!(html.contains("Cell A1"));
    assert!(html.contains("Suggestion: Split the string into multiple cells"));
    // Sheet-level findings render without a cell coordinate.
    assert!(html.contains("Sheet level - Sheet name too long"));
}
