use crate::project_repo::ProjectRepoError::ProjectNotFound;
use crate::project_repo::{
    NewProject, Project, ProjectRepo, ProjectRepoError, ProjectStatus, ProjectUpdate,
};
use crate::sqlx_repo::SQLxRepo;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::QueryBuilder;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct ProjectEntry {
    id: i32,
    #[allow(dead_code)]
    user_id: String,
    name: String,
    address: Option<String>,
    start_date: Option<NaiveDate>,
    target_completion_date: Option<NaiveDate>,
    status: ProjectStatus,
    total_sqft: Option<i32>,
    total_budget: Option<Decimal>,
}

impl From<ProjectEntry> for Project {
    fn from(value: ProjectEntry) -> Self {
        Project {
            id: value.id,
            name: value.name,
            address: value.address,
            start_date: value.start_date,
            target_completion_date: value.target_completion_date,
            status: value.status,
            total_sqft: value.total_sqft,
            total_budget: value.total_budget,
        }
    }
}

#[async_trait]
impl ProjectRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_project(
        &self,
        user: &str,
        project_id: i32,
    ) -> Result<Project, ProjectRepoError> {
        let entry: Option<ProjectEntry> =
            sqlx::query_as("SELECT * FROM projects WHERE id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get project {}", project_id))?;
        entry.ok_or(ProjectNotFound(project_id)).map(|p| p.into())
    }

    #[instrument(skip(self))]
    async fn get_all_projects(&self, user: &str) -> Result<Vec<Project>, ProjectRepoError> {
        let entries: Vec<ProjectEntry> =
            sqlx::query_as("SELECT * FROM projects WHERE user_id = $1 ORDER BY id")
                .bind(user)
                .fetch_all(&self.pool)
                .await
                .with_context(|| format!("Unable to get projects for user {}", user))?;
        Ok(entries.into_iter().map(|p| p.into()).collect())
    }

    #[instrument(skip(self, new_project))]
    async fn create_new_project(
        &self,
        user: &str,
        new_project: NewProject,
    ) -> Result<Project, ProjectRepoError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO projects(user_id, name, address, start_date, target_completion_date, status, total_sqft, total_budget) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(user)
        .bind(&new_project.name)
        .bind(&new_project.address)
        .bind(new_project.start_date)
        .bind(new_project.target_completion_date)
        .bind(new_project.status)
        .bind(new_project.total_sqft)
        .bind(new_project.total_budget)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert project")?;

        Ok(new_project.to_project(id))
    }

    #[instrument(skip(self, update))]
    async fn update_project(
        &self,
        user: &str,
        project_id: i32,
        update: ProjectUpdate,
    ) -> Result<Project, ProjectRepoError> {
        if update.is_empty() {
            return self.get_project(user, project_id).await;
        }

        let mut query_builder = QueryBuilder::new("UPDATE projects SET ");
        let mut assignments = query_builder.separated(", ");
        if let Some(name) = update.name {
            assignments.push("name = ").push_bind_unseparated(name);
        }
        if let Some(address) = update.address {
            assignments.push("address = ").push_bind_unseparated(address);
        }
        if let Some(start_date) = update.start_date {
            assignments
                .push("start_date = ")
                .push_bind_unseparated(start_date);
        }
        if let Some(target) = update.target_completion_date {
            assignments
                .push("target_completion_date = ")
                .push_bind_unseparated(target);
        }
        if let Some(status) = update.status {
            assignments.push("status = ").push_bind_unseparated(status);
        }
        if let Some(total_sqft) = update.total_sqft {
            assignments
                .push("total_sqft = ")
                .push_bind_unseparated(total_sqft);
        }
        if let Some(total_budget) = update.total_budget {
            assignments
                .push("total_budget = ")
                .push_bind_unseparated(total_budget);
        }
        query_builder
            .push(" WHERE id = ")
            .push_bind(project_id)
            .push(" AND user_id = ")
            .push_bind(user)
            .push(" RETURNING id, user_id, name, address, start_date, target_completion_date, status, total_sqft, total_budget");

        let entry: Option<ProjectEntry> = query_builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to update project {}", project_id))?;
        entry.ok_or(ProjectNotFound(project_id)).map(|p| p.into())
    }

    #[instrument(skip(self))]
    async fn delete_project(
        &self,
        user: &str,
        project_id: i32,
    ) -> Result<Project, ProjectRepoError> {
        let entry: Option<ProjectEntry> = sqlx::query_as(
            "DELETE FROM projects WHERE id = $1 AND user_id = $2 \
             RETURNING id, user_id, name, address, start_date, target_completion_date, status, total_sqft, total_budget",
        )
        .bind(project_id)
        .bind(user)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete project {}", project_id))?;
        entry.ok_or(ProjectNotFound(project_id)).map(|p| p.into())
    }
}
