//! Derived-field calculation for projects.
//!
//! Every derived value on a [`Project`] is produced here and nowhere else. The
//! create path, the update path and report export all call [`recompute`], so
//! the stored, returned and exported figures always come from the same
//! formulas.
//!
//! Arithmetic runs at full decimal precision on base fields. Results are
//! rounded to [`CURRENCY_DECIMAL_PLACES`] only when written to a derived field,
//! and no formula ever reads a previously stored derived field, which makes
//! recomputation idempotent.
//!
//! Nothing here rejects input. Negative derived values (over-credited
//! invoices, overpaid balances, losses) are valid results and are never
//! clamped. Additions and subtractions saturate at the limits of [`Decimal`]
//! instead of overflowing, so a record built outside the input boundary still
//! recomputes.

use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

use super::projects_model::{BuyerLedger, Costing, Project, SupplierLedger};
use crate::constants::{BUYER_CANCEL_AMOUNT, CURRENCY_DECIMAL_PLACES, PERCENTAGE_DECIMAL_PLACES};

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

fn sum(values: &[Decimal]) -> Decimal {
    values
        .iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(*value))
}

/// Returns the project with every derived field populated.
pub fn recompute(mut project: Project) -> Project {
    recompute_in_place(&mut project);
    project
}

/// Populates every derived field of `project` in place.
///
/// Groups run in a fixed order (supplier, buyer, costing) but none of them
/// reads another group's output.
pub fn recompute_in_place(project: &mut Project) {
    calculate_supplier(&mut project.supplier);
    calculate_buyer(&mut project.buyer);
    calculate_costing(&mut project.costing);
    debug!(
        "Recomputed project {}: supplier balance {}, buyer balance {}, net profit {}",
        project.project_no,
        project.supplier.summary.balance_payment,
        project.buyer.summary.balance_received,
        project.costing.net_profit
    );
}

/// Supplier ledger: invoice, two-installment payments and summary.
pub fn calculate_supplier(ledger: &mut SupplierLedger) {
    let invoice = &ledger.proforma_invoice;
    let advance = &ledger.advance_payment;
    let balance = &ledger.balance_payment;

    let final_invoice_amount = invoice.invoice_amount.saturating_sub(invoice.credit_note);
    let advance_total = advance.loan_amount.saturating_add(advance.twl_contribution);
    let advance_balance = final_invoice_amount.saturating_sub(advance_total);
    let balance_total = balance.amount.saturating_add(balance.twl_contribution);
    let total_amount = advance_total.saturating_add(balance_total);
    let cancel_amount = invoice.credit_note.saturating_sub(total_amount);
    let balance_payment = final_invoice_amount.saturating_sub(total_amount);

    ledger.proforma_invoice.final_invoice_amount = round_currency(final_invoice_amount);
    ledger.advance_payment.total_payment = round_currency(advance_total);
    ledger.advance_payment.balance_amount = round_currency(advance_balance);
    ledger.balance_payment.total_payment = round_currency(balance_total);
    ledger.summary.total_amount = round_currency(total_amount);
    ledger.summary.cancel_amount = round_currency(cancel_amount);
    ledger.summary.balance_payment = round_currency(balance_payment);
    ledger.payment_total = ledger.summary.total_amount;
}

/// Buyer ledger.
///
/// Bank interest, freight and commission are added to the TWL invoice amount.
/// That is the business definition of the buyer's final invoice.
pub fn calculate_buyer(ledger: &mut BuyerLedger) {
    let invoice = &ledger.proforma_invoice;

    let final_invoice_amount = sum(&[
        invoice.twl_invoice_amount.saturating_sub(invoice.credit_note),
        invoice.bank_interest,
        invoice.freight_charges,
        invoice.commission,
    ]);
    let advance_received = ledger.advance_payment.twl_received;
    let advance_balance = final_invoice_amount.saturating_sub(advance_received);
    let total_received = advance_received.saturating_add(ledger.balance_payment.twl_received);
    let balance_received = final_invoice_amount.saturating_sub(total_received);

    ledger.proforma_invoice.final_invoice_amount = round_currency(final_invoice_amount);
    ledger.advance_payment.balance_amount = round_currency(advance_balance);
    ledger.summary.total_received = round_currency(total_received);
    ledger.summary.cancel = BUYER_CANCEL_AMOUNT;
    ledger.summary.balance_received = round_currency(balance_received);
    ledger.payment_total = ledger.summary.total_received;
}

/// Costing: profit, itemised expenses, net profit and margin.
pub fn calculate_costing(costing: &mut Costing) {
    let profit = costing
        .supplier_invoice_amount
        .saturating_sub(costing.twl_invoice_amount);
    let total = sum(&[
        costing.in_going,
        costing.out_going,
        costing.cal_charges,
        costing.other,
        costing.foreign_bank_charges,
        costing.loan_interest,
        costing.freight_charges,
    ]);
    let net_profit = profit.saturating_sub(total);
    let profit_percentage = profit_percentage(profit, costing.supplier_invoice_amount);

    costing.profit = round_currency(profit);
    costing.total = round_currency(total);
    costing.net_profit = round_currency(net_profit);
    costing.profit_percentage = profit_percentage;
}

/// `profit / supplier_invoice_amount * 100`, or zero when there is no
/// positive supplier invoice to divide by.
fn profit_percentage(profit: Decimal, supplier_invoice_amount: Decimal) -> Decimal {
    if supplier_invoice_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    profit
        .checked_div(supplier_invoice_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| {
            pct.round_dp_with_strategy(
                PERCENTAGE_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            )
        })
        .unwrap_or(Decimal::ZERO)
}
