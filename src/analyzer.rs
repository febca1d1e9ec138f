//! Analysis engine: the ordered scan pipeline over one container.
//!
//! One `analyze` call runs the stages in a fixed order: corruption gate,
//! shared-string-table scan, worksheet scan, then the style and
//! data-validation extension points. Each stage is a function from the
//! container view to a sequence of findings; the engine concatenates them.
//! Only the gate aborts — every later stage degrades to per-part findings.

use crate::container::PackageReader;
use crate::error::Result;
use crate::finding::{AnalysisContext, Finding, FindingKind, Location, Severity};
use crate::limits;
use crate::progress::{NullProgress, ProgressSink, StderrProgress};
use crate::validate;
use crate::xmlutil::{in_main_ns, parse_cell_reference};
use quick_xml::events::Event;
use quick_xml::NsReader;
use std::path::Path;

/// Synthetic sheet name for shared-string-table findings.
const SHARED_STRINGS_SHEET: &str = "Shared strings";

/// Analyze a spreadsheet container and return all findings in scan order.
///
/// Fails with [`Error::NotFound`](crate::Error::NotFound) when the path does
/// not exist and [`Error::CorruptArchive`](crate::Error::CorruptArchive) when
/// the container signature or ZIP index is invalid. Everything else is
/// reported as findings, including CRITICAL ones for unparsable parts.
///
/// The verbose flag only routes progress narration to stderr; it has zero
/// effect on which findings are produced or their ordering.
///
/// # Example
///
/// ```no_run
/// use sheetvet::analyze;
///
/// let findings = analyze("workbook.xlsx", false)?;
/// for finding in &findings {
///     println!("{}: {}", finding.kind, finding.details);
/// }
/// # Ok::<(), sheetvet::Error>(())
/// ```
pub fn analyze(path: impl AsRef<Path>, verbose: bool) -> Result<Vec<Finding>> {
    let ctx = AnalysisContext {
        verbose,
        ..Default::default()
    };
    if verbose {
        run(path.as_ref(), ctx, &mut StderrProgress)
    } else {
        run(path.as_ref(), ctx, &mut NullProgress)
    }
}

/// Analyze with a caller-supplied progress sink.
///
/// The sink receives narration lines as stages run; it never influences the
/// returned findings.
pub fn analyze_with_progress(
    path: impl AsRef<Path>,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Finding>> {
    let ctx = AnalysisContext {
        verbose: true,
        ..Default::default()
    };
    run(path.as_ref(), ctx, sink)
}

fn run(
    path: &Path,
    mut ctx: AnalysisContext,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Finding>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    sink.message(&format!("Analyzing: {}", file_name));

    // Existence/corruption gate: the only stage whose failure aborts.
    let reader = PackageReader::open(path)?;
    sink.message("File structure is valid");

    let mut findings = Vec::new();

    let (string_findings, long_string_index) = scan_shared_strings(&reader, sink);
    ctx.long_string_index = long_string_index;
    findings.extend(string_findings);

    findings.extend(scan_worksheets(&reader, sink));
    findings.extend(scan_styles(&reader, &ctx, sink));
    findings.extend(scan_data_validations(&reader, &ctx, sink));

    sink.message(&format!(
        "Analysis complete. Found {} issues.",
        findings.len()
    ));
    Ok(findings)
}

/// Scan the shared-string table, if the part exists.
///
/// Returns the stage findings plus the index of the last over-length entry,
/// which the engine caches in the run context. A parse failure replaces the
/// stage output with one CRITICAL finding and the run continues.
fn scan_shared_strings(
    reader: &PackageReader,
    sink: &mut dyn ProgressSink,
) -> (Vec<Finding>, Option<usize>) {
    if !reader.has_entry(limits::SHARED_STRINGS_PART) {
        return (Vec::new(), None);
    }
    sink.message("Scanning shared string table...");

    let location = Location::sheet_level(SHARED_STRINGS_SHEET);
    let parse_failed = |message: String| {
        vec![Finding::new(
            &location,
            FindingKind::XmlParseError,
            Severity::Critical,
            format!("Shared strings table XML parsing failed: {}", message),
        )
        .with_fix("The file may be corrupted. Try recreating it or recovering from backup")]
    };

    let xml = match reader.read_xml(limits::SHARED_STRINGS_PART) {
        Ok(xml) => xml,
        Err(e) => return (parse_failed(e.to_string()), None),
    };

    match scan_string_table(&xml, &location) {
        Ok((findings, long_string_index)) => (findings, long_string_index),
        Err(e) => (parse_failed(e.to_string()), None),
    }
}

/// Walk the `si` entries of a shared-string table in document order and
/// check each entry's concatenated text runs, excluding phonetic annotations.
fn scan_string_table(xml: &str, location: &Location) -> Result<(Vec<Finding>, Option<usize>)> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut findings = Vec::new();
    let mut long_string_index = None;
    let mut index = 0usize;
    let mut in_entry = false;
    let mut in_phonetic = false;
    let mut in_text = false;
    let mut current = String::new();

    loop {
        match reader.read_resolved_event()? {
            (res, Event::Start(e)) if in_main_ns(&res) => match e.local_name().as_ref() {
                b"si" => {
                    in_entry = true;
                    current.clear();
                }
                // Phonetic runs annotate the entry; they are not cell text.
                b"rPh" if in_entry => in_phonetic = true,
                b"t" if in_entry && !in_phonetic => in_text = true,
                _ => {}
            },
            // A self-closing entry is empty but still occupies an index.
            (res, Event::Empty(e))
                if in_main_ns(&res) && e.local_name().as_ref() == b"si" =>
            {
                index += 1;
            }
            (_, Event::Text(e)) => {
                if in_text {
                    current.push_str(&e.unescape().unwrap_or_default());
                }
            }
            (res, Event::End(e)) if in_main_ns(&res) => match e.local_name().as_ref() {
                b"si" => {
                    let entry = validate::check_shared_string_entry(&current, index, location);
                    if entry.iter().any(|f| f.kind == FindingKind::LongString) {
                        long_string_index = Some(index);
                    }
                    findings.extend(entry);
                    index += 1;
                    in_entry = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    Ok((findings, long_string_index))
}

/// Scan every worksheet part in archive order.
///
/// A parse failure in one sheet yields exactly one CRITICAL finding for that
/// sheet and does not abort the remaining sheets. Sheet-name findings come
/// from the workbook part and survive a cell-scan failure.
fn scan_worksheets(reader: &PackageReader, sink: &mut dyn ProgressSink) -> Vec<Finding> {
    let sheet_parts: Vec<(String, u32)> = reader
        .entry_names()
        .into_iter()
        .filter_map(|name| worksheet_index(&name).map(|n| (name, n)))
        .collect();
    sink.message(&format!("Found {} worksheet parts", sheet_parts.len()));

    let mut findings = Vec::new();
    for (part, number) in sheet_parts {
        let resolved = resolve_sheet_name(reader, number);
        let sheet_name = resolved
            .clone()
            .unwrap_or_else(|| format!("Sheet{}", number));
        sink.message(&format!("Analyzing sheet {}", sheet_name));

        if let Some(name) = &resolved {
            findings.extend(validate::validate_sheet_name(name));
        }

        match scan_sheet_cells(reader, &part, &sheet_name) {
            Ok(cell_findings) => findings.extend(cell_findings),
            Err(e) => findings.push(
                Finding::new(
                    &Location::sheet_level(&sheet_name),
                    FindingKind::XmlParseError,
                    Severity::Critical,
                    format!("Worksheet XML parsing failed: {}", e),
                )
                .with_fix("The worksheet may be corrupted. Try recreating it"),
            ),
        }
    }
    findings
}

/// Extract the numeric index from a worksheet part name, or `None` for
/// entries that do not match `xl/worksheets/sheet{N}.xml`.
fn worksheet_index(name: &str) -> Option<u32> {
    name.strip_prefix(limits::WORKSHEET_PREFIX)?
        .strip_suffix(limits::WORKSHEET_SUFFIX)?
        .parse()
        .ok()
}

/// Resolve a human-readable sheet name by cross-referencing `sheetId` in the
/// workbook part. Returns `None` on any failure; callers decide the
/// placeholder.
fn resolve_sheet_name(reader: &PackageReader, number: u32) -> Option<String> {
    let xml = reader.read_xml(limits::WORKBOOK_PART).ok()?;
    let mut xml_reader = NsReader::from_str(&xml);
    xml_reader.config_mut().trim_text(true);

    let wanted = number.to_string();
    loop {
        match xml_reader.read_resolved_event().ok()? {
            (res, Event::Start(e)) | (res, Event::Empty(e))
                if in_main_ns(&res) && e.local_name().as_ref() == b"sheet" =>
            {
                let mut name = None;
                let mut sheet_id = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => name = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"sheetId" => {
                            sheet_id = Some(String::from_utf8_lossy(&attr.value).into_owned())
                        }
                        _ => {}
                    }
                }
                if sheet_id.as_deref() == Some(wanted.as_str()) {
                    return name;
                }
            }
            (_, Event::Eof) => return None,
            _ => {}
        }
    }
}

/// Scan every cell of one worksheet part for string-content violations.
///
/// Inline strings are checked always; a direct `v` value is only treated as
/// string content when the cell's declared type is `str`. An absent or empty
/// type attribute is the schema's numeric default and is skipped, and `s`
/// cells hold shared-string indices already covered by the table scan.
fn scan_sheet_cells(
    reader: &PackageReader,
    part: &str,
    sheet_name: &str,
) -> Result<Vec<Finding>> {
    let xml = reader.read_xml(part)?;
    let mut xml_reader = NsReader::from_str(&xml);
    xml_reader.config_mut().trim_text(true);

    let mut findings = Vec::new();
    let mut cell_ref = String::new();
    let mut cell_type = String::new();
    let mut in_cell = false;
    let mut in_inline = false;
    let mut in_inline_text = false;
    let mut in_value = false;
    let mut inline_text = String::new();
    let mut value_text = String::new();

    loop {
        match xml_reader.read_resolved_event()? {
            (res, Event::Start(e)) if in_main_ns(&res) => match e.local_name().as_ref() {
                b"c" => {
                    in_cell = true;
                    cell_ref.clear();
                    cell_type.clear();
                    inline_text.clear();
                    value_text.clear();
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"r" => {
                                cell_ref = String::from_utf8_lossy(&attr.value).into_owned()
                            }
                            b"t" => {
                                cell_type = String::from_utf8_lossy(&attr.value).into_owned()
                            }
                            _ => {}
                        }
                    }
                }
                b"is" if in_cell => in_inline = true,
                b"t" if in_inline => in_inline_text = true,
                b"v" if in_cell => in_value = true,
                _ => {}
            },
            (_, Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default();
                if in_inline_text {
                    inline_text.push_str(&text);
                } else if in_value {
                    value_text.push_str(&text);
                }
            }
            (res, Event::End(e)) if in_main_ns(&res) => match e.local_name().as_ref() {
                b"c" => {
                    let location = cell_location(sheet_name, &cell_ref);
                    if !inline_text.is_empty() {
                        findings.extend(validate::check_string_content(&inline_text, &location));
                    }
                    if cell_type == "str" && !value_text.is_empty() {
                        findings.extend(validate::check_string_content(&value_text, &location));
                    }
                    in_cell = false;
                }
                b"is" => {
                    in_inline = false;
                    in_inline_text = false;
                }
                b"t" => in_inline_text = false,
                b"v" => in_value = false,
                _ => {}
            },
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    Ok(findings)
}

/// Build the location for a cell finding, falling back to a sheet-level
/// location when the reference cannot be decoded.
fn cell_location(sheet_name: &str, cell_ref: &str) -> Location {
    match parse_cell_reference(cell_ref) {
        Some(cell) => Location::cell(sheet_name, cell.column, cell.row),
        None => Location::sheet_level(sheet_name),
    }
}

/// Style scan extension point.
///
/// The rules reserved for this stage are listed in
/// [`limits::RESERVED_RULES`]; none are wired yet, so the stage only narrates
/// and produces no findings.
fn scan_styles(
    reader: &PackageReader,
    _ctx: &AnalysisContext,
    sink: &mut dyn ProgressSink,
) -> Vec<Finding> {
    if reader.has_entry(limits::STYLES_PART) {
        sink.message(&format!(
            "Styles scan: {} reserved rules pending",
            limits::RESERVED_RULES.len()
        ));
    }
    Vec::new()
}

/// Data-validation scan extension point; no rules wired yet.
fn scan_data_validations(
    _reader: &PackageReader,
    _ctx: &AnalysisContext,
    sink: &mut dyn ProgressSink,
) -> Vec<Finding> {
    sink.message("Data validation scan: no rules wired");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worksheet_index() {
        assert_eq!(worksheet_index("xl/worksheets/sheet1.xml"), Some(1));
        assert_eq!(worksheet_index("xl/worksheets/sheet12.xml"), Some(12));
        assert_eq!(worksheet_index("xl/worksheets/sheetX.xml"), None);
        assert_eq!(worksheet_index("xl/workbook.xml"), None);
        assert_eq!(worksheet_index("xl/worksheets/sheet1.xml.rels"), None);
    }

    #[test]
    fn test_cell_location_fallback() {
        let loc = cell_location("Sheet1", "C7");
        assert_eq!(loc.column, "C");
        assert_eq!(loc.row, 7);

        let loc = cell_location("Sheet1", "");
        assert_eq!(loc.row, 0);
        assert!(loc.column.is_empty());
    }

    #[test]
    fn test_scan_string_table_clean() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
    <si><t>Hello</t></si>
    <si><t>World</t></si>
    <si><r><t>Rich</t></r><r><t>Text</t></r></si>
</sst>"#;

        let location = Location::sheet_level(SHARED_STRINGS_SHEET);
        let (findings, long_index) = scan_string_table(xml, &location).unwrap();
        assert!(findings.is_empty());
        assert_eq!(long_index, None);
    }

    #[test]
    fn test_scan_string_table_tracks_last_long_index() {
        let long = "x".repeat(40_000);
        let xml = format!(
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <si><t>{}</t></si>
    <si><t>short</t></si>
    <si><t>{}</t></si>
</sst>"#,
            long, long
        );

        let location = Location::sheet_level(SHARED_STRINGS_SHEET);
        let (findings, long_index) = scan_string_table(&xml, &location).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(long_index, Some(2));
        assert!(findings[0].details.starts_with("String index 0"));
        assert!(findings[1].details.starts_with("String index 2"));
        assert!(findings
            .iter()
            .all(|f| f.sheet_name == SHARED_STRINGS_SHEET && f.row == 0 && f.column.is_empty()));
    }

    #[test]
    fn test_scan_string_table_empty_entries_and_phonetic_runs() {
        // A self-closing entry still occupies an index, and phonetic-run text
        // is annotation rather than entry text.
        let long = "x".repeat(40_000);
        let xml = format!(
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <si/>
    <si><t>東京</t><rPh sb="0" eb="2"><t>{}</t></rPh></si>
    <si><t>{}</t></si>
</sst>"#,
            long, long
        );

        let location = Location::sheet_level(SHARED_STRINGS_SHEET);
        let (findings, long_index) = scan_string_table(&xml, &location).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(long_index, Some(2));
        assert!(findings[0].details.starts_with("String index 2"));
    }

    #[test]
    fn test_scan_string_table_ignores_foreign_namespace() {
        // si/t in a foreign namespace must not be scanned.
        let long = "x".repeat(40_000);
        let xml = format!(
            r#"<sst xmlns="http://example.com/not-spreadsheetml">
    <si><t>{}</t></si>
</sst>"#,
            long
        );

        let location = Location::sheet_level(SHARED_STRINGS_SHEET);
        let (findings, long_index) = scan_string_table(&xml, &location).unwrap();
        assert!(findings.is_empty());
        assert_eq!(long_index, None);
    }

    #[test]
    fn test_scan_string_table_prefixed_namespace() {
        // Namespace matching is prefix-agnostic.
        let long = "x".repeat(40_000);
        let xml = format!(
            r#"<x:sst xmlns:x="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <x:si><x:t>{}</x:t></x:si>
</x:sst>"#,
            long
        );

        let location = Location::sheet_level(SHARED_STRINGS_SHEET);
        let (findings, long_index) = scan_string_table(&xml, &location).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(long_index, Some(0));
    }

    #[test]
    fn test_scan_string_table_parse_error() {
        // Mismatched end tag.
        let xml = "<sst xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\"><si><t>ok</si></t></sst>";
        let location = Location::sheet_level(SHARED_STRINGS_SHEET);
        assert!(scan_string_table(xml, &location).is_err());
    }
}
