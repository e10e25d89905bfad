//! Project domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::input_format::{deserialize_amount, deserialize_option_date, normalize_text};
use crate::errors::{Error, Result, ValidationError};

/// Reporting status of a project. Only aggregate reports look at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Active,
    Inactive,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("active") => Ok(ProjectStatus::Active),
            s if s.eq_ignore_ascii_case("inactive") => Ok(ProjectStatus::Inactive),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown project status '{}'",
                other
            )))),
        }
    }
}

// ---------------------------------------------------------------------------
// Supplier ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierProformaInvoice {
    pub supplier_name: Option<String>,
    pub invoice_number: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub invoice_amount: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub credit_note: Decimal,
    /// Derived: invoice amount less credit note.
    #[serde(deserialize_with = "deserialize_amount")]
    pub final_invoice_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierAdvancePayment {
    #[serde(deserialize_with = "deserialize_amount")]
    pub loan_amount: Decimal,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub payment_date: Option<NaiveDate>,
    pub reference_number: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub twl_contribution: Decimal,
    /// Derived: loan amount plus TWL contribution.
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_payment: Decimal,
    /// Derived: final invoice amount less the advance total.
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierBalancePayment {
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub date: Option<NaiveDate>,
    pub reference: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub twl_contribution: Decimal,
    /// Derived: amount plus TWL contribution.
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_payment: Decimal,
}

/// Entirely derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierSummary {
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_amount: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub cancel_amount: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance_payment: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierLedger {
    pub proforma_invoice: SupplierProformaInvoice,
    pub advance_payment: SupplierAdvancePayment,
    pub balance_payment: SupplierBalancePayment,
    pub summary: SupplierSummary,
    /// Derived: same as `summary.total_amount`. Kept for clients that read
    /// the ledger-level total.
    #[serde(deserialize_with = "deserialize_amount")]
    pub payment_total: Decimal,
}

// ---------------------------------------------------------------------------
// Buyer ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerProformaInvoice {
    pub buyer_name: Option<String>,
    pub invoice_no: Option<String>,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub credit_note: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub bank_interest: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub freight_charges: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub twl_invoice_amount: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub commission: Decimal,
    /// Derived: TWL invoice less credit note plus interest, freight and commission.
    #[serde(deserialize_with = "deserialize_amount")]
    pub final_invoice_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerAdvancePayment {
    #[serde(deserialize_with = "deserialize_amount")]
    pub twl_received: Decimal,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub date: Option<NaiveDate>,
    pub reference: Option<String>,
    /// Derived: final invoice amount less the advance received.
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerBalancePayment {
    #[serde(deserialize_with = "deserialize_amount")]
    pub twl_received: Decimal,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub date: Option<NaiveDate>,
    pub reference: Option<String>,
}

/// Entirely derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerSummary {
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_received: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub cancel: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance_received: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerLedger {
    pub proforma_invoice: BuyerProformaInvoice,
    pub advance_payment: BuyerAdvancePayment,
    pub balance_payment: BuyerBalancePayment,
    pub summary: BuyerSummary,
    /// Derived: same as `summary.total_received`.
    #[serde(deserialize_with = "deserialize_amount")]
    pub payment_total: Decimal,
}

// ---------------------------------------------------------------------------
// Costing
// ---------------------------------------------------------------------------

/// Costing view of a project.
///
/// `supplier_invoice_amount` and `twl_invoice_amount` are entered separately
/// from the ledger invoices and are never linked to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Costing {
    #[serde(deserialize_with = "deserialize_amount")]
    pub supplier_invoice_amount: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub twl_invoice_amount: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub in_going: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub out_going: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub cal_charges: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub other: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub foreign_bank_charges: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub loan_interest: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub freight_charges: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub profit: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub net_profit: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub profit_percentage: Decimal,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Domain model representing a trading project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_name: String,
    pub project_no: String,
    pub project_date: NaiveDate,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub supplier: SupplierLedger,
    #[serde(default)]
    pub buyer: BuyerLedger,
    #[serde(default)]
    pub costing: Costing,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Project {
    /// Validates identity fields of an already assembled record.
    pub fn validate(&self) -> Result<()> {
        validate_identity(&self.project_name, &self.project_no)
    }

    /// Trims every free-text field and drops blank ones.
    pub fn normalize_text_fields(&mut self) {
        self.project_name = self.project_name.trim().to_string();
        self.project_no = self.project_no.trim().to_string();

        let s = &mut self.supplier;
        s.proforma_invoice.supplier_name = normalize_text(s.proforma_invoice.supplier_name.take());
        s.proforma_invoice.invoice_number =
            normalize_text(s.proforma_invoice.invoice_number.take());
        s.advance_payment.reference_number =
            normalize_text(s.advance_payment.reference_number.take());
        s.balance_payment.reference = normalize_text(s.balance_payment.reference.take());

        let b = &mut self.buyer;
        b.proforma_invoice.buyer_name = normalize_text(b.proforma_invoice.buyer_name.take());
        b.proforma_invoice.invoice_no = normalize_text(b.proforma_invoice.invoice_no.take());
        b.advance_payment.reference = normalize_text(b.advance_payment.reference.take());
        b.balance_payment.reference = normalize_text(b.balance_payment.reference.take());
    }
}

fn validate_identity(project_name: &str, project_no: &str) -> Result<()> {
    if project_name.trim().is_empty() {
        return Err(ValidationError::MissingField("projectName".to_string()).into());
    }
    if project_no.trim().is_empty() {
        return Err(ValidationError::MissingField("projectNo".to_string()).into());
    }
    Ok(())
}

/// Input model for creating a new project.
///
/// Derived values present in the nested sub-records are accepted by the
/// deserializer but always overwritten by recomputation before persisting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub project_name: String,
    pub project_no: String,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub project_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    pub supplier: SupplierLedger,
    pub buyer: BuyerLedger,
    pub costing: Costing,
}

impl NewProject {
    /// Validates the required identity fields
    pub fn validate(&self) -> Result<()> {
        validate_identity(&self.project_name, &self.project_no)?;
        if self.project_date.is_none() {
            return Err(ValidationError::MissingField("projectDate".to_string()).into());
        }
        Ok(())
    }

    /// Builds the domain record. Derived fields still need recomputing.
    pub fn into_project(self, id: String, now: NaiveDateTime) -> Result<Project> {
        self.validate()?;
        let project_date = self
            .project_date
            .ok_or_else(|| ValidationError::MissingField("projectDate".to_string()))?;
        let mut project = Project {
            id,
            project_name: self.project_name,
            project_no: self.project_no,
            project_date,
            status: self.status.unwrap_or_default(),
            supplier: self.supplier,
            buyer: self.buyer,
            costing: self.costing,
            created_at: now,
            updated_at: now,
        };
        project.normalize_text_fields();
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_status_parsing() {
        assert_eq!("Active".parse::<ProjectStatus>().unwrap(), ProjectStatus::Active);
        assert_eq!("inactive".parse::<ProjectStatus>().unwrap(), ProjectStatus::Inactive);
        assert!("Archived".parse::<ProjectStatus>().is_err());
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
    }

    #[test]
    fn test_new_project_deserializes_lenient_amounts() {
        let payload = json!({
            "projectName": "Rice shipment",
            "projectNo": "P-001",
            "projectDate": "2024-05-01T00:00:00.000Z",
            "supplier": {
                "proformaInvoice": { "invoiceAmount": "1000", "creditNote": null },
                "advancePayment": { "loanAmount": "not a number", "paymentDate": "" }
            },
            "costing": { "inGoing": 12.5 }
        });

        let new_project: NewProject = serde_json::from_value(payload).unwrap();
        assert_eq!(new_project.supplier.proforma_invoice.invoice_amount, dec!(1000));
        assert_eq!(new_project.supplier.proforma_invoice.credit_note, Decimal::ZERO);
        assert_eq!(new_project.supplier.advance_payment.loan_amount, Decimal::ZERO);
        assert_eq!(new_project.supplier.advance_payment.payment_date, None);
        assert_eq!(new_project.buyer, BuyerLedger::default());
        assert_eq!(new_project.costing.in_going, dec!(12.5));
        assert_eq!(
            new_project.project_date,
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn test_new_project_validation_reports_missing_fields() {
        let mut input = NewProject {
            project_name: "Cement".to_string(),
            project_no: "P-002".to_string(),
            project_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.project_no = "   ".to_string();
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("projectNo"));

        input.project_no = "P-002".to_string();
        input.project_date = None;
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("projectDate"));

        input.project_name = String::new();
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("projectName"));
    }

    #[test]
    fn test_into_project_trims_text_and_defaults_status() {
        let mut input = NewProject {
            project_name: "  Steel coils ".to_string(),
            project_no: " P-003 ".to_string(),
            project_date: NaiveDate::from_ymd_opt(2024, 2, 2),
            ..Default::default()
        };
        input.supplier.proforma_invoice.supplier_name = Some("  Acme Mills ".to_string());
        input.buyer.proforma_invoice.buyer_name = Some("   ".to_string());

        let now = chrono::Utc::now().naive_utc();
        let project = input.into_project("id-1".to_string(), now).unwrap();
        assert_eq!(project.project_name, "Steel coils");
        assert_eq!(project.project_no, "P-003");
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(
            project.supplier.proforma_invoice.supplier_name.as_deref(),
            Some("Acme Mills")
        );
        assert_eq!(project.buyer.proforma_invoice.buyer_name, None);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_project_serializes_camel_case_amounts_as_numbers() {
        let costing = Costing {
            net_profit: dec!(-300),
            ..Default::default()
        };
        let value = serde_json::to_value(&costing).unwrap();
        assert_eq!(value["netProfit"], json!(-300.0));
        assert!(value.get("foreignBankCharges").is_some());
    }
}
