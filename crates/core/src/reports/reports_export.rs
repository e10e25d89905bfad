//! Flat spreadsheet export of project records.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{CURRENCY_DECIMAL_PLACES, REPORT_DATE_FORMAT};
use crate::errors::{Error, Result};
use crate::projects::Project;

/// Header row of the export, one entry per column.
pub const EXPORT_COLUMNS: [&str; 53] = [
    // Project
    "Project No",
    "Project Name",
    "Project Date",
    // Supplier proforma invoice
    "Supplier Name",
    "Supplier Invoice No",
    "Supplier Invoice Amt",
    "Supplier Credit Note",
    "Supplier Final Invoice",
    // Supplier advance payment
    "Loan Amount",
    "Advance Payment Date",
    "Advance Reference",
    "TWL Contribution (Adv)",
    "Total Payment (Adv)",
    "Balance Amount (Adv)",
    // Supplier balance payment
    "Supplier Balance Amt",
    "Supplier Balance Date",
    "Supplier Balance Ref",
    "TWL Contribution (Bal)",
    "Total Payment (Bal)",
    // Supplier summary
    "Supplier Total Amt",
    "Supplier Cancel Amt",
    "Supplier Balance Pay",
    // Buyer proforma invoice
    "Buyer Name",
    "Buyer Invoice No",
    "Buyer Invoice Date",
    "TWL Invoice Amount",
    "Buyer Credit Note",
    "Bank Interest",
    "Freight Charges",
    "Commission",
    "Buyer Final Invoice",
    // Buyer advance payment
    "Buyer Advance TWL",
    "Buyer Advance Balance",
    "Buyer Advance Date",
    "Buyer Advance Ref",
    // Buyer balance payment
    "Buyer Balance TWL",
    "Buyer Balance Date",
    "Buyer Balance Ref",
    // Buyer summary
    "Buyer Total Received",
    "Buyer Cancel",
    "Buyer Balance Received",
    // Costing
    "Costing Supplier Inv",
    "Costing TWL Invoice",
    "Profit",
    "In Going",
    "Out Going",
    "CAL Charges",
    "Other",
    "Foreign Bank Charges",
    "Loan Interest",
    "Freight Charges (Cost)",
    "Total Expenses",
    "NET PROFIT",
];

fn money(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(REPORT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn project_row(project: &Project) -> Vec<String> {
    let s = &project.supplier;
    let b = &project.buyer;
    let c = &project.costing;

    vec![
        project.project_no.clone(),
        project.project_name.clone(),
        date(Some(project.project_date)),
        text(&s.proforma_invoice.supplier_name),
        text(&s.proforma_invoice.invoice_number),
        money(s.proforma_invoice.invoice_amount),
        money(s.proforma_invoice.credit_note),
        money(s.proforma_invoice.final_invoice_amount),
        money(s.advance_payment.loan_amount),
        date(s.advance_payment.payment_date),
        text(&s.advance_payment.reference_number),
        money(s.advance_payment.twl_contribution),
        money(s.advance_payment.total_payment),
        money(s.advance_payment.balance_amount),
        money(s.balance_payment.amount),
        date(s.balance_payment.date),
        text(&s.balance_payment.reference),
        money(s.balance_payment.twl_contribution),
        money(s.balance_payment.total_payment),
        money(s.summary.total_amount),
        money(s.summary.cancel_amount),
        money(s.summary.balance_payment),
        text(&b.proforma_invoice.buyer_name),
        text(&b.proforma_invoice.invoice_no),
        date(b.proforma_invoice.invoice_date),
        money(b.proforma_invoice.twl_invoice_amount),
        money(b.proforma_invoice.credit_note),
        money(b.proforma_invoice.bank_interest),
        money(b.proforma_invoice.freight_charges),
        money(b.proforma_invoice.commission),
        money(b.proforma_invoice.final_invoice_amount),
        money(b.advance_payment.twl_received),
        money(b.advance_payment.balance_amount),
        date(b.advance_payment.date),
        text(&b.advance_payment.reference),
        money(b.balance_payment.twl_received),
        date(b.balance_payment.date),
        text(&b.balance_payment.reference),
        money(b.summary.total_received),
        money(b.summary.cancel),
        money(b.summary.balance_received),
        money(c.supplier_invoice_amount),
        money(c.twl_invoice_amount),
        money(c.profit),
        money(c.in_going),
        money(c.out_going),
        money(c.cal_charges),
        money(c.other),
        money(c.foreign_bank_charges),
        money(c.loan_interest),
        money(c.freight_charges),
        money(c.total),
        money(c.net_profit),
    ]
}

/// Writes a header row and one row per project. Callers pass recomputed
/// records in the order they should appear.
pub fn write_projects_csv(projects: &[Project]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;
    for project in projects {
        writer.write_record(project_row(project))?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Export(e.error().to_string()))
}

/// Attachment name for an export produced on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("TWL_Projects_Report_{}.csv", today.format(REPORT_DATE_FORMAT))
}
