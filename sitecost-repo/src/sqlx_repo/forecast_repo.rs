use crate::forecast_repo::ForecastRepoError::{ForecastItemNotFound, ProjectNotFound};
use crate::forecast_repo::{
    ForecastLineItem, ForecastRepo, ForecastRepoError, ForecastStatus, NewForecastLineItem,
};
use crate::sqlx_repo::SQLxRepo;
use anyhow::Context;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::QueryBuilder;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct ForecastLineItemEntry {
    id: i32,
    #[allow(dead_code)]
    user_id: String,
    project_id: i32,
    category: String,
    description: Option<String>,
    estimated_cost: Decimal,
    actual_cost: Decimal,
    unit: Option<String>,
    notes: Option<String>,
    progress_percent: i32,
    status: ForecastStatus,
}

impl From<ForecastLineItemEntry> for ForecastLineItem {
    fn from(value: ForecastLineItemEntry) -> Self {
        ForecastLineItem {
            id: value.id,
            project_id: value.project_id,
            category: value.category,
            description: value.description,
            estimated_cost: value.estimated_cost,
            actual_cost: value.actual_cost,
            unit: value.unit,
            notes: value.notes,
            progress_percent: value.progress_percent,
            status: value.status,
        }
    }
}

#[async_trait]
impl ForecastRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_forecast_item(
        &self,
        user: &str,
        item_id: i32,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        let entry: Option<ForecastLineItemEntry> =
            sqlx::query_as("SELECT * FROM forecast_line_items WHERE id = $1 AND user_id = $2")
                .bind(item_id)
                .bind(user)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get forecast line item {}", item_id))?;
        entry.ok_or(ForecastItemNotFound(item_id)).map(|f| f.into())
    }

    #[instrument(skip(self))]
    async fn get_all_forecast_items(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<ForecastLineItem>, ForecastRepoError> {
        let mut query_builder =
            QueryBuilder::new("SELECT * FROM forecast_line_items WHERE user_id = ");
        query_builder.push_bind(user);
        if let Some(project_id) = project_id {
            query_builder
                .push(" AND project_id = ")
                .push_bind(project_id);
        }
        query_builder.push(" ORDER BY id");

        let entries: Vec<ForecastLineItemEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Unable to get forecast line items for user {}", user))?;
        Ok(entries.into_iter().map(|f| f.into()).collect())
    }

    #[instrument(skip(self, new_item))]
    async fn create_new_forecast_item(
        &self,
        user: &str,
        new_item: NewForecastLineItem,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        if !self.project_owned(user, new_item.project_id).await? {
            return Err(ProjectNotFound(new_item.project_id));
        }

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO forecast_line_items(user_id, project_id, category, description, estimated_cost, actual_cost, unit, notes, progress_percent, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
        )
        .bind(user)
        .bind(new_item.project_id)
        .bind(&new_item.category)
        .bind(&new_item.description)
        .bind(new_item.estimated_cost)
        .bind(new_item.actual_cost)
        .bind(&new_item.unit)
        .bind(&new_item.notes)
        .bind(new_item.progress_percent)
        .bind(new_item.status)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert forecast line item")?;

        Ok(new_item.to_forecast_item(id))
    }

    #[instrument(skip(self, updated_item))]
    async fn update_forecast_item(
        &self,
        user: &str,
        item_id: i32,
        updated_item: NewForecastLineItem,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        if !self.project_owned(user, updated_item.project_id).await? {
            return Err(ProjectNotFound(updated_item.project_id));
        }

        let result = sqlx::query(
            "UPDATE forecast_line_items SET project_id = $1, category = $2, description = $3, estimated_cost = $4, actual_cost = $5, unit = $6, notes = $7, progress_percent = $8, status = $9 \
             WHERE user_id = $10 AND id = $11",
        )
        .bind(updated_item.project_id)
        .bind(&updated_item.category)
        .bind(&updated_item.description)
        .bind(updated_item.estimated_cost)
        .bind(updated_item.actual_cost)
        .bind(&updated_item.unit)
        .bind(&updated_item.notes)
        .bind(updated_item.progress_percent)
        .bind(updated_item.status)
        .bind(user)
        .bind(item_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to update forecast line item {}", item_id))?;

        if result.rows_affected() == 0 {
            Err(ForecastItemNotFound(item_id))
        } else {
            Ok(updated_item.to_forecast_item(item_id))
        }
    }

    #[instrument(skip(self))]
    async fn delete_forecast_item(
        &self,
        user: &str,
        item_id: i32,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        let entry: Option<ForecastLineItemEntry> = sqlx::query_as(
            "DELETE FROM forecast_line_items WHERE user_id = $1 AND id = $2 \
             RETURNING id, user_id, project_id, category, description, estimated_cost, actual_cost, unit, notes, progress_percent, status",
        )
        .bind(user)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete forecast line item {}", item_id))?;
        entry.ok_or(ForecastItemNotFound(item_id)).map(|f| f.into())
    }
}
