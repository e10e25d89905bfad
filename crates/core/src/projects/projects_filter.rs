//! Listing filter and sort order for projects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input_format::deserialize_option_date;
use super::projects_model::{Project, ProjectStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectSort {
    #[default]
    DateDesc,
    DateAsc,
    ProfitDesc,
    ProfitAsc,
    NameAsc,
    NameDesc,
}

/// Query filter for project listings, reports and exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectFilter {
    pub search: Option<String>,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub date_from: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_option_date")]
    pub date_to: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    pub sort: Option<ProjectSort>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if project.project_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if project.project_date > to {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => matches_search(project, &term.to_lowercase()),
            _ => true,
        }
    }

    /// Filters and sorts `projects`. Profit sorts expect recomputed records.
    pub fn apply(&self, projects: Vec<Project>) -> Vec<Project> {
        let mut selected: Vec<Project> = projects.into_iter().filter(|p| self.matches(p)).collect();
        sort_projects(&mut selected, self.sort.unwrap_or_default());
        selected
    }
}

fn matches_search(project: &Project, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(&project.project_name)
        || contains(&project.project_no)
        || project
            .supplier
            .proforma_invoice
            .supplier_name
            .as_deref()
            .is_some_and(contains)
        || project
            .buyer
            .proforma_invoice
            .buyer_name
            .as_deref()
            .is_some_and(contains)
}

/// Stable sort; ties keep repository order.
pub fn sort_projects(projects: &mut [Project], sort: ProjectSort) {
    match sort {
        ProjectSort::DateDesc => projects.sort_by(|a, b| b.project_date.cmp(&a.project_date)),
        ProjectSort::DateAsc => projects.sort_by(|a, b| a.project_date.cmp(&b.project_date)),
        ProjectSort::ProfitDesc => {
            projects.sort_by(|a, b| b.costing.net_profit.cmp(&a.costing.net_profit))
        }
        ProjectSort::ProfitAsc => {
            projects.sort_by(|a, b| a.costing.net_profit.cmp(&b.costing.net_profit))
        }
        ProjectSort::NameAsc => projects.sort_by_cached_key(|p| p.project_name.to_lowercase()),
        ProjectSort::NameDesc => {
            projects.sort_by_cached_key(|p| p.project_name.to_lowercase());
            projects.reverse();
        }
    }
}
