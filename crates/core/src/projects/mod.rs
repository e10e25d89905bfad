//! Projects module - trading project ledgers, derived-field calculation and services.

mod input_format;
mod projects_calculator;
mod projects_filter;
mod projects_model;
mod projects_service;
mod projects_traits;
mod projects_update;

#[cfg(test)]
mod projects_service_tests;

pub use input_format::coerce_amount;
pub use projects_calculator::{
    calculate_buyer, calculate_costing, calculate_supplier, recompute, recompute_in_place,
};
pub use projects_filter::{sort_projects, ProjectFilter, ProjectSort};
pub use projects_model::{
    BuyerAdvancePayment, BuyerBalancePayment, BuyerLedger, BuyerProformaInvoice, BuyerSummary,
    Costing, NewProject, Project, ProjectStatus, SupplierAdvancePayment, SupplierBalancePayment,
    SupplierLedger, SupplierProformaInvoice, SupplierSummary,
};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectMutation, ProjectRepositoryTrait, ProjectServiceTrait};
pub use projects_update::{
    BuyerPaymentUpdate, BuyerProformaInvoiceUpdate, BuyerUpdate, CostingUpdate, ProjectUpdate,
    SupplierAdvancePaymentUpdate, SupplierBalancePaymentUpdate, SupplierProformaInvoiceUpdate,
    SupplierUpdate,
};
