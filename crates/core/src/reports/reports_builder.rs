use super::reports_model::{ProjectReport, StatusTotals};
use crate::projects::{Project, ProjectStatus};
use rust_decimal::Decimal;

fn accumulate(total: &mut Decimal, value: Decimal) {
    *total = total.saturating_add(value);
}

impl StatusTotals {
    /// Adds one project's figures. Percentages are never summed.
    pub fn add(&mut self, project: &Project) {
        let s = &project.supplier;
        let b = &project.buyer;
        let c = &project.costing;

        self.project_count += 1;

        let supplier = &mut self.supplier;
        accumulate(
            &mut supplier.final_invoice_amount,
            s.proforma_invoice.final_invoice_amount,
        );
        accumulate(&mut supplier.loan_amount, s.advance_payment.loan_amount);
        accumulate(
            &mut supplier.advance_total_payment,
            s.advance_payment.total_payment,
        );
        accumulate(
            &mut supplier.advance_balance_amount,
            s.advance_payment.balance_amount,
        );
        accumulate(
            &mut supplier.balance_total_payment,
            s.balance_payment.total_payment,
        );
        accumulate(&mut supplier.total_amount, s.summary.total_amount);
        accumulate(&mut supplier.cancel_amount, s.summary.cancel_amount);
        accumulate(&mut supplier.balance_payment, s.summary.balance_payment);

        let buyer = &mut self.buyer;
        accumulate(
            &mut buyer.final_invoice_amount,
            b.proforma_invoice.final_invoice_amount,
        );
        accumulate(
            &mut buyer.advance_balance_amount,
            b.advance_payment.balance_amount,
        );
        accumulate(&mut buyer.twl_received, b.advance_payment.twl_received);
        accumulate(&mut buyer.twl_received, b.balance_payment.twl_received);
        accumulate(&mut buyer.total_received, b.summary.total_received);
        accumulate(&mut buyer.cancel, b.summary.cancel);
        accumulate(&mut buyer.balance_received, b.summary.balance_received);

        let costing = &mut self.costing;
        accumulate(&mut costing.profit, c.profit);
        accumulate(&mut costing.total, c.total);
        accumulate(&mut costing.net_profit, c.net_profit);
    }
}

/// Groups already recomputed projects by status and sums them.
pub fn build_report(projects: Vec<Project>) -> ProjectReport {
    let mut report = ProjectReport::default();
    for project in &projects {
        match project.status {
            ProjectStatus::Active => report.active.add(project),
            ProjectStatus::Inactive => report.inactive.add(project),
        }
        report.grand_total.add(project);
    }
    report.projects = projects;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BuyerTotals;
    use crate::projects::{recompute, BuyerLedger, Costing, SupplierLedger};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn project(no: &str, status: ProjectStatus, costing: Costing) -> Project {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        recompute(Project {
            id: no.to_string(),
            project_name: no.to_string(),
            project_no: no.to_string(),
            project_date: now.date(),
            status,
            supplier: SupplierLedger::default(),
            buyer: BuyerLedger::default(),
            costing,
            created_at: now,
            updated_at: now,
        })
    }

    fn costing(supplier_invoice: Decimal, twl_invoice: Decimal, other: Decimal) -> Costing {
        Costing {
            supplier_invoice_amount: supplier_invoice,
            twl_invoice_amount: twl_invoice,
            other,
            ..Default::default()
        }
    }

    #[test]
    fn test_net_profit_totals_by_status() {
        // net profits: 150, -40.25, 300.50
        let a = project("A", ProjectStatus::Active, costing(dec!(1200), dec!(1000), dec!(50)));
        let b = project("B", ProjectStatus::Active, costing(dec!(500), dec!(520), dec!(20.25)));
        let mut c = project("C", ProjectStatus::Inactive, costing(dec!(800), dec!(499.50), dec!(0)));
        c.supplier.proforma_invoice.invoice_amount = dec!(400);
        c.supplier.advance_payment.loan_amount = dec!(100);
        c.buyer.advance_payment.twl_received = dec!(60);
        c.buyer.balance_payment.twl_received = dec!(40);
        let c = recompute(c);

        let report = build_report(vec![a, b, c]);

        assert_eq!(report.projects.len(), 3);
        assert_eq!(report.active.project_count, 2);
        assert_eq!(report.inactive.project_count, 1);
        assert_eq!(report.grand_total.project_count, 3);

        assert_eq!(report.active.costing.net_profit, dec!(109.75));
        assert_eq!(report.inactive.costing.net_profit, dec!(300.50));
        assert_eq!(report.grand_total.costing.net_profit, dec!(410.25));
        assert_eq!(report.grand_total.costing.profit, dec!(480.50));
        assert_eq!(report.grand_total.costing.total, dec!(70.25));

        assert_eq!(report.inactive.supplier.final_invoice_amount, dec!(400));
        assert_eq!(report.inactive.supplier.loan_amount, dec!(100));
        assert_eq!(report.grand_total.supplier.balance_payment, dec!(300));
        assert_eq!(report.grand_total.buyer.twl_received, dec!(100));
        assert_eq!(report.grand_total.buyer.total_received, dec!(100));
        assert_eq!(report.active.buyer, BuyerTotals::default());
    }

    #[test]
    fn test_empty_report_is_all_zero() {
        let report = build_report(Vec::new());
        assert_eq!(report, ProjectReport::default());
    }

    #[test]
    fn test_grand_total_equals_sum_of_groups() {
        let projects = vec![
            project("A", ProjectStatus::Inactive, costing(dec!(10), dec!(3), dec!(1))),
            project("B", ProjectStatus::Active, costing(dec!(7), dec!(9), dec!(2))),
        ];
        let report = build_report(projects);

        assert_eq!(
            report.grand_total.costing.net_profit,
            report.active.costing.net_profit + report.inactive.costing.net_profit
        );
        assert_eq!(report.grand_total.costing.net_profit, dec!(2));
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let projects = vec![
            project("A", ProjectStatus::Active, costing(Decimal::MAX, dec!(0), dec!(0))),
            project("B", ProjectStatus::Active, costing(Decimal::MAX, dec!(0), dec!(0))),
            project("C", ProjectStatus::Inactive, costing(Decimal::MIN, dec!(0), dec!(0))),
        ];

        let report = build_report(projects);

        assert_eq!(report.active.costing.profit, Decimal::MAX);
        assert_eq!(report.inactive.costing.profit, Decimal::MIN);
        assert_eq!(report.grand_total.project_count, 3);
    }
}
