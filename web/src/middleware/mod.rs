pub(crate) mod error_report;
