//! Finding records: the uniform unit of analysis output.

use serde::{Deserialize, Serialize, Serializer};

/// Impact level of a finding, ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; reserved for future rules.
    Info,
    /// Cosmetic or heuristic issue, unlikely to corrupt the file.
    Warning,
    /// Limit violation with a clear remediation.
    Error,
    /// An entire embedded part is unusable.
    Critical,
}

impl Severity {
    /// Lowercase tag used in serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category tag of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// Cell or shared string exceeds the maximum string length.
    LongString,
    /// Text contains a zero-width code point.
    SpecialCharacter,
    /// Sheet name exceeds the maximum length.
    SheetNameTooLong,
    /// Sheet name contains disallowed characters or boundary apostrophes.
    InvalidSheetName,
    /// Formula text exceeds the maximum length.
    FormulaTooLong,
    /// Formula open-parenthesis count exceeds the nesting limit.
    ExcessiveNesting,
    /// Hyperlink URL exceeds the maximum length.
    HyperlinkTooLong,
    /// Font size exceeds the maximum.
    FontSizeTooLarge,
    /// Column width exceeds the maximum.
    ColumnWidthTooLarge,
    /// Row height exceeds the maximum.
    RowHeightTooLarge,
    /// An embedded XML part failed to parse.
    XmlParseError,
}

impl FindingKind {
    /// Human-readable tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::LongString => "Long string",
            FindingKind::SpecialCharacter => "Special character",
            FindingKind::SheetNameTooLong => "Sheet name too long",
            FindingKind::InvalidSheetName => "Invalid sheet name",
            FindingKind::FormulaTooLong => "Formula too long",
            FindingKind::ExcessiveNesting => "Excessive function nesting",
            FindingKind::HyperlinkTooLong => "Hyperlink too long",
            FindingKind::FontSizeTooLarge => "Font size too large",
            FindingKind::ColumnWidthTooLarge => "Column width too large",
            FindingKind::RowHeightTooLarge => "Row height too large",
            FindingKind::XmlParseError => "XML parsing error",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FindingKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Where a finding was detected.
///
/// Row and column are either both meaningful (cell-level) or both zero/empty
/// (sheet- or table-level); the constructors maintain that invariant.
#[derive(Debug, Clone)]
pub struct Location {
    /// Sheet name, or a synthetic placeholder such as "Shared strings".
    pub sheet: String,
    /// 1-based row, 0 when not cell-specific.
    pub row: u32,
    /// Column letters, empty when not cell-specific.
    pub column: String,
}

impl Location {
    /// A sheet- or table-level location (no specific cell).
    pub fn sheet_level(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            row: 0,
            column: String::new(),
        }
    }

    /// A cell-level location.
    pub fn cell(sheet: impl Into<String>, column: impl Into<String>, row: u32) -> Self {
        Self {
            sheet: sheet.into(),
            row,
            column: column.into(),
        }
    }
}

/// One reported issue: kind, location, severity, and optional remediation.
///
/// Findings are created once at detection time and never mutated; details
/// always include the offending measured value and the limit exceeded.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Sheet name, or a synthetic placeholder for table-level findings.
    pub sheet_name: String,
    /// 1-based row, 0 when not cell-specific.
    pub row: u32,
    /// Column letters, empty when not cell-specific.
    pub column: String,
    /// Category tag.
    pub kind: FindingKind,
    /// Human-readable explanation.
    pub details: String,
    /// Impact level.
    pub severity: Severity,
    /// Remediation hint, absent when no established remedy exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<String>,
}

impl Finding {
    /// Create a finding at the given location, without a fix suggestion.
    pub fn new(
        location: &Location,
        kind: FindingKind,
        severity: Severity,
        details: impl Into<String>,
    ) -> Self {
        Self {
            sheet_name: location.sheet.clone(),
            row: location.row,
            column: location.column.clone(),
            kind,
            details: details.into(),
            severity,
            fix_suggestion: None,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_fix(mut self, suggestion: impl Into<String>) -> Self {
        self.fix_suggestion = Some(suggestion.into());
        self
    }

    /// Whether this finding points at a specific cell.
    pub fn is_cell_level(&self) -> bool {
        self.row > 0 && !self.column.is_empty()
    }
}

/// Transient per-run analysis state.
///
/// Reset at the start of each engine run, never persisted.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    /// Whether progress narration was requested for this run.
    pub verbose: bool,
    /// Index of the last over-length shared-string entry seen, kept for
    /// cross-referencing by later stages.
    pub long_string_index: Option<usize>,
}
