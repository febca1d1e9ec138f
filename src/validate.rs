//! Stateless constraint validators.
//!
//! Each function takes a value plus location context and returns zero or more
//! findings. None of them touch the container; they are usable on their own,
//! outside the scanning engine.

use crate::finding::{Finding, FindingKind, Location, Severity};
use crate::limits;

/// Check cell or shared-string text against string constraints.
///
/// Flags text longer than [`limits::MAX_STRING_LENGTH`] characters (ERROR)
/// and the presence of zero-width code points (WARNING). The checks are
/// independent; one string can trigger both.
pub fn check_string_content(text: &str, location: &Location) -> Vec<Finding> {
    let mut findings = Vec::new();

    let length = text.chars().count();
    if length > limits::MAX_STRING_LENGTH {
        findings.push(
            Finding::new(
                location,
                FindingKind::LongString,
                Severity::Error,
                format!(
                    "String length ({}) exceeds Excel limit ({})",
                    length,
                    limits::MAX_STRING_LENGTH
                ),
            )
            .with_fix("Split the string into multiple cells or store in external resource"),
        );
    }

    if text.chars().any(|c| limits::ZERO_WIDTH_CHARS.contains(&c)) {
        findings.push(
            Finding::new(
                location,
                FindingKind::SpecialCharacter,
                Severity::Warning,
                "String contains zero-width character",
            )
            .with_fix("Remove or replace zero-width characters"),
        );
    }

    findings
}

/// Check one shared-string table entry, tagging details with its index.
///
/// Same rules as [`check_string_content`]; the detail text names the entry
/// index because table-level findings have no cell coordinate to point at.
pub fn check_shared_string_entry(text: &str, index: usize, location: &Location) -> Vec<Finding> {
    let mut findings = Vec::new();

    let length = text.chars().count();
    if length > limits::MAX_STRING_LENGTH {
        findings.push(
            Finding::new(
                location,
                FindingKind::LongString,
                Severity::Error,
                format!(
                    "String index {} length ({}) exceeds Excel limit ({})",
                    index,
                    length,
                    limits::MAX_STRING_LENGTH
                ),
            )
            .with_fix("Split the string into multiple cells or store in external resource"),
        );
    }

    if text.chars().any(|c| limits::ZERO_WIDTH_CHARS.contains(&c)) {
        findings.push(
            Finding::new(
                location,
                FindingKind::SpecialCharacter,
                Severity::Warning,
                format!("String index {} contains zero-width character", index),
            )
            .with_fix("Remove or replace zero-width characters"),
        );
    }

    findings
}

/// Check a sheet name against naming constraints.
///
/// Flags over-length names, disallowed characters (one finding listing every
/// offending character found), and leading or trailing apostrophes.
pub fn validate_sheet_name(name: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let location = Location::sheet_level(name);

    let length = name.chars().count();
    if length > limits::MAX_SHEET_NAME_LENGTH {
        findings.push(
            Finding::new(
                &location,
                FindingKind::SheetNameTooLong,
                Severity::Error,
                format!(
                    "Sheet name length ({}) exceeds Excel limit ({})",
                    length,
                    limits::MAX_SHEET_NAME_LENGTH
                ),
            )
            .with_fix(format!(
                "Shorten the sheet name to at most {} characters",
                limits::MAX_SHEET_NAME_LENGTH
            )),
        );
    }

    let found: Vec<String> = limits::INVALID_SHEET_CHARS
        .iter()
        .filter(|c| name.contains(**c))
        .map(|c| c.to_string())
        .collect();
    if !found.is_empty() {
        findings.push(
            Finding::new(
                &location,
                FindingKind::InvalidSheetName,
                Severity::Error,
                format!("Sheet name contains invalid characters: {}", found.join(", ")),
            )
            .with_fix("Remove the characters \\ / ? * [ ] from the sheet name"),
        );
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        findings.push(
            Finding::new(
                &location,
                FindingKind::InvalidSheetName,
                Severity::Error,
                "Sheet name cannot start or end with apostrophe",
            )
            .with_fix("Remove the leading or trailing apostrophe"),
        );
    }

    findings
}

/// Check formula text against length and nesting constraints.
///
/// Nesting is approximated by the open-parenthesis count; this is
/// deliberately conservative and involves no formula parsing.
pub fn validate_formula(formula: &str, location: &Location) -> Vec<Finding> {
    let mut findings = Vec::new();

    let length = formula.chars().count();
    if length > limits::MAX_FORMULA_LENGTH {
        findings.push(Finding::new(
            location,
            FindingKind::FormulaTooLong,
            Severity::Error,
            format!(
                "Formula length ({}) exceeds Excel limit ({})",
                length,
                limits::MAX_FORMULA_LENGTH
            ),
        ));
    }

    let open_parens = formula.chars().filter(|c| *c == '(').count();
    if open_parens > limits::MAX_NESTED_FUNCTIONS {
        findings.push(Finding::new(
            location,
            FindingKind::ExcessiveNesting,
            Severity::Error,
            format!(
                "Formula open-parenthesis count ({}) exceeds nesting limit ({})",
                open_parens,
                limits::MAX_NESTED_FUNCTIONS
            ),
        ));
    }

    findings
}

/// Check a hyperlink URL against the length constraint.
pub fn validate_hyperlink(url: &str, location: &Location) -> Vec<Finding> {
    let length = url.chars().count();
    if length > limits::MAX_HYPERLINK_LENGTH {
        vec![Finding::new(
            location,
            FindingKind::HyperlinkTooLong,
            Severity::Error,
            format!(
                "Hyperlink length ({}) exceeds Excel limit ({})",
                length,
                limits::MAX_HYPERLINK_LENGTH
            ),
        )]
    } else {
        Vec::new()
    }
}

/// Numeric style value categories checked by [`validate_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Font size in points.
    FontSize,
    /// Column width in character units.
    ColumnWidth,
    /// Row height in points.
    RowHeight,
}

/// Check a numeric style value against the limit for its kind.
pub fn validate_style(kind: StyleKind, value: f64, sheet_name: &str) -> Vec<Finding> {
    let location = Location::sheet_level(sheet_name);

    let (finding_kind, label, limit) = match kind {
        StyleKind::FontSize => (FindingKind::FontSizeTooLarge, "Font size", limits::MAX_FONT_SIZE),
        StyleKind::ColumnWidth => (
            FindingKind::ColumnWidthTooLarge,
            "Column width",
            limits::MAX_COLUMN_WIDTH,
        ),
        StyleKind::RowHeight => (
            FindingKind::RowHeightTooLarge,
            "Row height",
            limits::MAX_ROW_HEIGHT,
        ),
    };

    if value > limit {
        vec![Finding::new(
            &location,
            finding_kind,
            Severity::Error,
            format!("{} {} exceeds Excel limit ({})", label, value, limit),
        )]
    } else {
        Vec::new()
    }
}
