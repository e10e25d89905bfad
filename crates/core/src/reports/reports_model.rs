use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::projects::Project;

/// Supplier-side sums. Everything except `loan_amount` is a derived field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierTotals {
    pub final_invoice_amount: Decimal,
    pub loan_amount: Decimal,
    pub advance_total_payment: Decimal,
    pub advance_balance_amount: Decimal,
    pub balance_total_payment: Decimal,
    pub total_amount: Decimal,
    pub cancel_amount: Decimal,
    pub balance_payment: Decimal,
}

/// Buyer-side sums. `twl_received` adds the advance and balance receipts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerTotals {
    pub final_invoice_amount: Decimal,
    pub advance_balance_amount: Decimal,
    pub twl_received: Decimal,
    pub total_received: Decimal,
    pub cancel: Decimal,
    pub balance_received: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostingTotals {
    pub profit: Decimal,
    pub total: Decimal,
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotals {
    pub project_count: usize,
    pub supplier: SupplierTotals,
    pub buyer: BuyerTotals,
    pub costing: CostingTotals,
}

/// Recomputed projects plus their totals grouped by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub projects: Vec<Project>,
    pub active: StatusTotals,
    pub inactive: StatusTotals,
    pub grand_total: StatusTotals,
}
