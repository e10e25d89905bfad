//! Reports module - status-grouped totals and spreadsheet export.

mod reports_builder;
mod reports_export;
mod reports_model;

pub use reports_builder::build_report;
pub use reports_export::{export_file_name, write_projects_csv, EXPORT_COLUMNS};
pub use reports_model::{BuyerTotals, CostingTotals, ProjectReport, StatusTotals, SupplierTotals};
