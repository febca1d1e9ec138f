//! # sheetvet
//!
//! Pre-flight structural validation for XLSX workbooks.
//!
//! sheetvet inspects a spreadsheet container (the ZIP-packaged Office Open
//! XML document set) and reports structural or content violations that would
//! make the file non-conformant, corrupt, or likely to misbehave in
//! spreadsheet applications: over-length strings, zero-width characters,
//! invalid sheet names, and unparsable embedded parts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetvet::analyze;
//!
//! let findings = analyze("workbook.xlsx", false)?;
//! if findings.is_empty() {
//!     println!("No issues found");
//! }
//! for finding in &findings {
//!     println!("[{}] {}: {}", finding.severity, finding.kind, finding.details);
//! }
//! # Ok::<(), sheetvet::Error>(())
//! ```
//!
//! ## Reusable validators
//!
//! The constraint checks are plain functions usable without a container:
//!
//! ```
//! use sheetvet::validate::validate_sheet_name;
//!
//! assert!(validate_sheet_name("Totals 2026").is_empty());
//! assert!(!validate_sheet_name("bad[name]").is_empty());
//! ```
//!
//! Document-level issues never abort a run; they are returned as
//! [`Finding`]s, including CRITICAL ones for unparsable XML parts. Only a
//! missing file or a corrupt container aborts with an [`Error`].

pub mod analyzer;
pub mod container;
pub mod error;
pub mod finding;
pub mod limits;
pub mod progress;
pub mod report;
pub mod validate;
pub mod xmlutil;

// Re-exports
pub use analyzer::{analyze, analyze_with_progress};
pub use container::PackageReader;
pub use error::{Error, Result};
pub use finding::{AnalysisContext, Finding, FindingKind, Location, Severity};
pub use progress::{FnSink, NullProgress, ProgressSink, StderrProgress};
pub use report::{generate_report, AnalysisReport};
pub use validate::StyleKind;
pub use xmlutil::{parse_cell_reference, CellRef};
