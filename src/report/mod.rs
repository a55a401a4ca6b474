//! Report content for display and export.
//!
//! Builders turn a calculator's input and result into a [`Report`] whose
//! values are already formatted. Laying the report out on a page is left to
//! the caller.

mod document;
mod format;

pub use document::{
    DISCLAIMER, INPUT_SECTION_TITLE, RESULTS_SECTION_TITLE, Report, ReportKind, ReportRow,
    ReportSection, death_report, ipp_report, ita_report,
};
pub use format::{
    CURRENCY_SUFFIX, MISSING_DATE, format_currency, format_date, format_date_time,
    format_percentage,
};
