use super::*;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock repository
// ============================================================================

#[derive(Default)]
struct MockProjectRepository {
    projects: Mutex<Vec<Project>>,
}

impl MockProjectRepository {
    fn stored(&self, id: &str) -> Option<Project> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl ProjectRepositoryTrait for MockProjectRepository {
    fn list(&self) -> Result<Vec<Project>> {
        Ok(self.projects.lock().unwrap().clone())
    }

    fn get_by_id(&self, project_id: &str) -> Result<Project> {
        self.stored(project_id)
            .ok_or_else(|| DatabaseError::NotFound(project_id.to_string()).into())
    }

    fn find_by_project_no(&self, project_no: &str) -> Result<Option<Project>> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.project_no == project_no)
            .cloned())
    }

    async fn insert(&self, project: Project) -> Result<Project> {
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn update_with(&self, project_id: &str, mutation: ProjectMutation) -> Result<Project> {
        let mut projects = self.projects.lock().unwrap();
        let slot = projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| Error::from(DatabaseError::NotFound(project_id.to_string())))?;
        let mut project = slot.clone();
        mutation(&mut project)?;
        *slot = project.clone();
        Ok(project)
    }

    async fn delete(&self, project_id: &str) -> Result<usize> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != project_id);
        Ok(before - projects.len())
    }
}

fn setup() -> (Arc<MockProjectRepository>, ProjectService) {
    let repository = Arc::new(MockProjectRepository::default());
    let service = ProjectService::new(repository.clone());
    (repository, service)
}

fn new_project(no: &str, name: &str) -> NewProject {
    let mut input = NewProject {
        project_name: name.to_string(),
        project_no: no.to_string(),
        project_date: NaiveDate::from_ymd_opt(2024, 4, 1),
        ..Default::default()
    };
    input.supplier.proforma_invoice.invoice_amount = dec!(1000);
    input.supplier.proforma_invoice.credit_note = dec!(50);
    input.supplier.advance_payment.loan_amount = dec!(600);
    input.costing.supplier_invoice_amount = dec!(1200);
    input.costing.twl_invoice_amount = dec!(1000);
    input.costing.other = dec!(50);
    input
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_project_recomputes_before_persisting() {
    let (repository, service) = setup();
    let mut input = new_project("P-1", "Rice");
    input.costing.net_profit = dec!(999999);

    let created = service.create_project(input).await.unwrap();

    assert_eq!(created.status, ProjectStatus::Active);
    assert_eq!(created.supplier.proforma_invoice.final_invoice_amount, dec!(950));
    assert_eq!(created.supplier.advance_payment.balance_amount, dec!(350));
    assert_eq!(created.costing.net_profit, dec!(150));

    let stored = repository.stored(&created.id).unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_create_project_rejects_missing_fields() {
    let (repository, service) = setup();
    let mut input = new_project("P-1", "Rice");
    input.project_date = None;

    let err = service.create_project(input).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingField(ref f)) if f == "projectDate"
    ));
    assert!(repository.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_project_rejects_duplicate_project_no() {
    let (_, service) = setup();
    service.create_project(new_project("P-1", "Rice")).await.unwrap();

    let err = service
        .create_project(new_project(" P-1 ", "Other rice"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ConstraintViolation(_)));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_project_merges_and_recomputes() {
    let (_, service) = setup();
    let created = service.create_project(new_project("P-1", "Rice")).await.unwrap();

    let update: ProjectUpdate = serde_json::from_value(serde_json::json!({
        "supplier": { "advancePayment": { "twlContribution": 100 } },
        "costing": { "loanInterest": "25" }
    }))
    .unwrap();
    let updated = service.update_project(&created.id, update).await.unwrap();

    assert_eq!(updated.project_name, "Rice");
    assert_eq!(updated.supplier.advance_payment.loan_amount, dec!(600));
    assert_eq!(updated.supplier.advance_payment.total_payment, dec!(700));
    assert_eq!(updated.supplier.advance_payment.balance_amount, dec!(250));
    assert_eq!(updated.costing.total, dec!(75));
    assert_eq!(updated.costing.net_profit, dec!(125));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_project_rejects_blank_name() {
    let (repository, service) = setup();
    let created = service.create_project(new_project("P-1", "Rice")).await.unwrap();

    let update = ProjectUpdate {
        project_name: Some("   ".to_string()),
        ..Default::default()
    };
    let err = service.update_project(&created.id, update).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(repository.stored(&created.id).unwrap().project_name, "Rice");
}

#[tokio::test]
async fn test_update_project_number_collision() {
    let (_, service) = setup();
    let first = service.create_project(new_project("P-1", "Rice")).await.unwrap();
    service.create_project(new_project("P-2", "Sugar")).await.unwrap();

    let taken = ProjectUpdate {
        project_no: Some("P-2".to_string()),
        ..Default::default()
    };
    let err = service.update_project(&first.id, taken).await.unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)));

    let unchanged = ProjectUpdate {
        project_no: Some("P-1".to_string()),
        status: Some(ProjectStatus::Inactive),
        ..Default::default()
    };
    let updated = service.update_project(&first.id, unchanged).await.unwrap();
    assert_eq!(updated.status, ProjectStatus::Inactive);
}

#[tokio::test]
async fn test_update_missing_project_is_not_found() {
    let (_, service) = setup();
    let err = service
        .update_project("missing", ProjectUpdate::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Read, delete, report, export
// ============================================================================

#[tokio::test]
async fn test_get_project_recomputes_stale_records() {
    let (repository, service) = setup();
    let created = service.create_project(new_project("P-1", "Rice")).await.unwrap();
    {
        let mut projects = repository.projects.lock().unwrap();
        projects[0].costing.net_profit = dec!(1);
    }

    let fetched = service.get_project(&created.id).unwrap();
    assert_eq!(fetched.costing.net_profit, dec!(150));
}

#[tokio::test]
async fn test_delete_project() {
    let (_, service) = setup();
    let created = service.create_project(new_project("P-1", "Rice")).await.unwrap();

    service.delete_project(&created.id).await.unwrap();
    assert!(service.get_project(&created.id).unwrap_err().is_not_found());

    let err = service.delete_project(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_projects_applies_filter() {
    let (_, service) = setup();
    service.create_project(new_project("P-1", "Rice")).await.unwrap();
    service.create_project(new_project("P-2", "Sugar")).await.unwrap();

    let filter = ProjectFilter {
        search: Some("sug".to_string()),
        ..Default::default()
    };
    let projects = service.get_projects(&filter).unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_no, "P-2");
}

#[tokio::test]
async fn test_report_and_export() {
    let (_, service) = setup();
    service.create_project(new_project("P-1", "Rice")).await.unwrap();
    let mut inactive = new_project("P-2", "Sugar");
    inactive.status = Some(ProjectStatus::Inactive);
    service.create_project(inactive).await.unwrap();

    let report = service.get_report(&ProjectFilter::default()).unwrap();
    assert_eq!(report.grand_total.project_count, 2);
    assert_eq!(report.active.project_count, 1);
    assert_eq!(report.grand_total.costing.net_profit, dec!(300));
    assert_eq!(report.inactive.supplier.final_invoice_amount, dec!(950));

    let csv = String::from_utf8(service.export_projects_csv(&ProjectFilter::default()).unwrap())
        .unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_export_without_projects_is_not_found() {
    let (_, service) = setup();
    let err = service
        .export_projects_csv(&ProjectFilter::default())
        .unwrap_err();
    assert!(err.is_not_found());

    let report = service.get_report(&ProjectFilter::default()).unwrap();
    assert_eq!(report.grand_total.project_count, 0);
    assert_eq!(report.grand_total.costing.net_profit, Decimal::ZERO);
}
