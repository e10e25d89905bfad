//! Partial updates for projects.
//!
//! Only base fields are patchable. Derived fields have no counterpart here, so
//! a caller cannot set them; unknown keys such as `finalInvoiceAmount` are
//! ignored during deserialization.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::input_format::{
    deserialize_option_date, deserialize_patch_amount, deserialize_patch_date,
    deserialize_patch_text, normalize_text,
};
use super::projects_model::{BuyerLedger, Costing, Project, ProjectStatus, SupplierLedger};

fn apply_amount(target: &mut Decimal, patch: Option<Decimal>) {
    if let Some(value) = patch {
        *target = value;
    }
}

fn apply_text(target: &mut Option<String>, patch: Option<Option<String>>) {
    if let Some(value) = patch {
        *target = normalize_text(value);
    }
}

fn apply_date(target: &mut Option<NaiveDate>, patch: Option<Option<NaiveDate>>) {
    if let Some(value) = patch {
        *target = value;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierProformaInvoiceUpdate {
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub supplier_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub invoice_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub invoice_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub credit_note: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierAdvancePaymentUpdate {
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub loan_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_date")]
    pub payment_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub reference_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub twl_contribution: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierBalancePaymentUpdate {
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_date")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub reference: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub twl_contribution: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierUpdate {
    pub proforma_invoice: Option<SupplierProformaInvoiceUpdate>,
    pub advance_payment: Option<SupplierAdvancePaymentUpdate>,
    pub balance_payment: Option<SupplierBalancePaymentUpdate>,
}

impl SupplierUpdate {
    pub fn apply_to(self, ledger: &mut SupplierLedger) {
        if let Some(p) = self.proforma_invoice {
            let target = &mut ledger.proforma_invoice;
            apply_text(&mut target.supplier_name, p.supplier_name);
            apply_text(&mut target.invoice_number, p.invoice_number);
            apply_amount(&mut target.invoice_amount, p.invoice_amount);
            apply_amount(&mut target.credit_note, p.credit_note);
        }
        if let Some(p) = self.advance_payment {
            let target = &mut ledger.advance_payment;
            apply_amount(&mut target.loan_amount, p.loan_amount);
            apply_date(&mut target.payment_date, p.payment_date);
            apply_text(&mut target.reference_number, p.reference_number);
            apply_amount(&mut target.twl_contribution, p.twl_contribution);
        }
        if let Some(p) = self.balance_payment {
            let target = &mut ledger.balance_payment;
            apply_amount(&mut target.amount, p.amount);
            apply_date(&mut target.date, p.date);
            apply_text(&mut target.reference, p.reference);
            apply_amount(&mut target.twl_contribution, p.twl_contribution);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerProformaInvoiceUpdate {
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub buyer_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub invoice_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_date")]
    pub invoice_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub credit_note: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub bank_interest: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub freight_charges: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub twl_invoice_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub commission: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerPaymentUpdate {
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub twl_received: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_date")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub reference: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerUpdate {
    pub proforma_invoice: Option<BuyerProformaInvoiceUpdate>,
    pub advance_payment: Option<BuyerPaymentUpdate>,
    pub balance_payment: Option<BuyerPaymentUpdate>,
}

impl BuyerUpdate {
    pub fn apply_to(self, ledger: &mut BuyerLedger) {
        if let Some(p) = self.proforma_invoice {
            let target = &mut ledger.proforma_invoice;
            apply_text(&mut target.buyer_name, p.buyer_name);
            apply_text(&mut target.invoice_no, p.invoice_no);
            apply_date(&mut target.invoice_date, p.invoice_date);
            apply_amount(&mut target.credit_note, p.credit_note);
            apply_amount(&mut target.bank_interest, p.bank_interest);
            apply_amount(&mut target.freight_charges, p.freight_charges);
            apply_amount(&mut target.twl_invoice_amount, p.twl_invoice_amount);
            apply_amount(&mut target.commission, p.commission);
        }
        if let Some(p) = self.advance_payment {
            let target = &mut ledger.advance_payment;
            apply_amount(&mut target.twl_received, p.twl_received);
            apply_date(&mut target.date, p.date);
            apply_text(&mut target.reference, p.reference);
        }
        if let Some(p) = self.balance_payment {
            let target = &mut ledger.balance_payment;
            apply_amount(&mut target.twl_received, p.twl_received);
            apply_date(&mut target.date, p.date);
            apply_text(&mut target.reference, p.reference);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostingUpdate {
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub supplier_invoice_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub twl_invoice_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub in_going: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub out_going: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub cal_charges: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub other: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub foreign_bank_charges: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub loan_interest: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch_amount")]
    pub freight_charges: Option<Decimal>,
}

impl CostingUpdate {
    pub fn apply_to(self, costing: &mut Costing) {
        apply_amount(&mut costing.supplier_invoice_amount, self.supplier_invoice_amount);
        apply_amount(&mut costing.twl_invoice_amount, self.twl_invoice_amount);
        apply_amount(&mut costing.in_going, self.in_going);
        apply_amount(&mut costing.out_going, self.out_going);
        apply_amount(&mut costing.cal_charges, self.cal_charges);
        apply_amount(&mut costing.other, self.other);
        apply_amount(&mut costing.foreign_bank_charges, self.foreign_bank_charges);
        apply_amount(&mut costing.loan_interest, self.loan_interest);
        apply_amount(&mut costing.freight_charges, self.freight_charges);
    }
}

/// Input model for updating a project. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectUpdate {
    pub project_name: Option<String>,
    pub project_no: Option<String>,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub project_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    pub supplier: Option<SupplierUpdate>,
    pub buyer: Option<BuyerUpdate>,
    pub costing: Option<CostingUpdate>,
}

impl ProjectUpdate {
    /// Merges the base-field changes into `project`. Derived fields are left
    /// stale; the caller recomputes before persisting.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.project_name {
            project.project_name = name.trim().to_string();
        }
        if let Some(no) = self.project_no {
            project.project_no = no.trim().to_string();
        }
        if let Some(date) = self.project_date {
            project.project_date = date;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(supplier) = self.supplier {
            supplier.apply_to(&mut project.supplier);
        }
        if let Some(buyer) = self.buyer {
            buyer.apply_to(&mut project.buyer);
        }
        if let Some(costing) = self.costing {
            costing.apply_to(&mut project.costing);
        }
    }

    /// The project number this update would assign, if it changes it.
    pub fn new_project_no(&self) -> Option<&str> {
        self.project_no.as_deref().map(str::trim)
    }
}
