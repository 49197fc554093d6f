use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait ProjectRepo: Sync + Send {
    async fn get_project(&self, user: &str, project_id: i32)
        -> Result<Project, ProjectRepoError>;

    async fn get_all_projects(&self, user: &str) -> Result<Vec<Project>, ProjectRepoError>;

    async fn create_new_project(
        &self,
        user: &str,
        new_project: NewProject,
    ) -> Result<Project, ProjectRepoError>;

    /// Applies the fields present in `update` and leaves the rest untouched.
    async fn update_project(
        &self,
        user: &str,
        project_id: i32,
        update: ProjectUpdate,
    ) -> Result<Project, ProjectRepoError>;

    /// Deletes the project along with its forecast line items, expenses and
    /// draw trackers.
    async fn delete_project(&self, user: &str, project_id: i32)
        -> Result<Project, ProjectRepoError>;
}

#[derive(Error, Debug)]
pub enum ProjectRepoError {
    #[error("Project with id {0} not found")]
    ProjectNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub target_completion_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub total_sqft: Option<i32>,
    pub total_budget: Option<Decimal>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub total_sqft: Option<i32>,
    #[serde(default)]
    pub total_budget: Option<Decimal>,
}

impl NewProject {
    pub const fn new(
        name: String,
        address: Option<String>,
        start_date: Option<NaiveDate>,
        target_completion_date: Option<NaiveDate>,
        status: ProjectStatus,
        total_sqft: Option<i32>,
        total_budget: Option<Decimal>,
    ) -> NewProject {
        NewProject {
            name,
            address,
            start_date,
            target_completion_date,
            status,
            total_sqft,
            total_budget,
        }
    }

    pub fn to_project(self, id: i32) -> Project {
        Project {
            id,
            name: self.name,
            address: self.address,
            start_date: self.start_date,
            target_completion_date: self.target_completion_date,
            status: self.status,
            total_sqft: self.total_sqft,
            total_budget: self.total_budget,
        }
    }
}

/// Partial update payload. `None` means "leave unchanged"; fields cannot be
/// nulled out through an update.
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub target_completion_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    pub total_sqft: Option<i32>,
    pub total_budget: Option<Decimal>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.start_date.is_none()
            && self.target_completion_date.is_none()
            && self.status.is_none()
            && self.total_sqft.is_none()
            && self.total_budget.is_none()
    }

    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(address) = self.address {
            project.address = Some(address);
        }
        if let Some(start_date) = self.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(target) = self.target_completion_date {
            project.target_completion_date = Some(target);
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(total_sqft) = self.total_sqft {
            project.total_sqft = Some(total_sqft);
        }
        if let Some(total_budget) = self.total_budget {
            project.total_budget = Some(total_budget);
        }
    }
}
