//! XML structural utilities: namespace matching and cell references.

use quick_xml::name::{Namespace, ResolveResult};

use crate::limits::MAIN_NS;

/// A decoded cell reference: column letters plus 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    /// Column letters (e.g. "AB").
    pub column: String,
    /// 1-based row number.
    pub row: u32,
}

/// Decode a cell reference such as `AB123` into column letters and row number.
///
/// The column is the maximal leading run of ASCII-alphabetic characters and
/// the row is the maximal trailing run of decimal digits. Returns `None` when
/// either run is empty or the row does not fit in `u32`; callers fall back to
/// a sheet-level location in that case.
///
/// # Example
///
/// ```
/// use sheetvet::xmlutil::parse_cell_reference;
///
/// let cell = parse_cell_reference("AB123").unwrap();
/// assert_eq!(cell.column, "AB");
/// assert_eq!(cell.row, 123);
/// ```
pub fn parse_cell_reference(cell_ref: &str) -> Option<CellRef> {
    let column: String = cell_ref
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    let digits = cell_ref
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if column.is_empty() || digits == 0 {
        return None;
    }

    let row: u32 = cell_ref[cell_ref.len() - digits..].parse().ok()?;
    Some(CellRef { column, row })
}

/// Check whether a resolved element namespace is the SpreadsheetML main
/// namespace, regardless of the prefix used in the source document.
pub(crate) fn in_main_ns(resolution: &ResolveResult) -> bool {
    matches!(resolution, ResolveResult::Bound(Namespace(ns)) if *ns == MAIN_NS.as_bytes())
}
