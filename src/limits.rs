//! Excel file format limits and container constants.
//!
//! Pure data: every constraint the validators and scan stages check against,
//! plus the fixed part paths and namespaces of the spreadsheet package.

/// Maximum number of characters in a single cell string.
pub const MAX_STRING_LENGTH: usize = 32_767;

/// Maximum number of rows per worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns per worksheet (column XFD).
pub const MAX_COLUMNS: u32 = 16_384;

/// Maximum column width in character units.
pub const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Maximum row height in points.
pub const MAX_ROW_HEIGHT: f64 = 409.0;

/// Maximum font size in points.
pub const MAX_FONT_SIZE: f64 = 409.0;

/// Maximum number of characters in a formula.
pub const MAX_FORMULA_LENGTH: usize = 8_192;

/// Maximum number of characters in a sheet name.
pub const MAX_SHEET_NAME_LENGTH: usize = 31;

/// Maximum number of characters in a hyperlink URL.
pub const MAX_HYPERLINK_LENGTH: usize = 2_079;

/// Maximum number of cell styles per workbook.
pub const MAX_CELL_STYLES: u32 = 64_000;

/// Maximum number of distinct RGB colors.
pub const MAX_COLORS: u32 = 16_777_216;

/// Maximum number of conditional formats per worksheet.
pub const MAX_CONDITIONAL_FORMATS: u32 = 64;

/// Maximum number of filter conditions per filter.
pub const MAX_FILTER_CONDITIONS: u32 = 2;

/// Maximum number of sort conditions per sort.
pub const MAX_SORT_CONDITIONS: u32 = 64;

/// Maximum function nesting depth in a formula.
pub const MAX_NESTED_FUNCTIONS: usize = 64;

/// Maximum number of arguments to a function.
pub const MAX_ARGUMENTS: u32 = 255;

/// Maximum number of sheets per workbook.
pub const MAX_SHEETS: u32 = 255;

/// Characters that may not appear in a sheet name.
pub const INVALID_SHEET_CHARS: [char; 6] = ['\\', '/', '?', '*', '[', ']'];

/// Zero-width code points that render invisibly but corrupt cell text.
pub const ZERO_WIDTH_CHARS: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// SpreadsheetML main namespace URI.
pub const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// OPC package relationships namespace URI.
pub const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

/// ZIP file magic bytes: PK\x03\x04
pub const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Shared string table part path.
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Workbook part path.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Style definitions part path.
pub const STYLES_PART: &str = "xl/styles.xml";

/// Worksheet part path prefix; full paths are `xl/worksheets/sheet{N}.xml`.
pub const WORKSHEET_PREFIX: &str = "xl/worksheets/sheet";

/// Worksheet part path suffix.
pub const WORKSHEET_SUFFIX: &str = ".xml";

/// Constraint slots present in this table but not yet wired to a scan stage.
///
/// The style and data-validation stages of the engine are attachment points
/// for these; each slot names the limit a future rule will enforce.
pub const RESERVED_RULES: [&str; 4] = [
    "conditional-format-count",
    "filter-condition-count",
    "sort-condition-count",
    "cell-style-count",
];
