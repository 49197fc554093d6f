use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait ForecastRepo: Sync + Send {
    async fn get_forecast_item(
        &self,
        user: &str,
        item_id: i32,
    ) -> Result<ForecastLineItem, ForecastRepoError>;

    async fn get_all_forecast_items(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<ForecastLineItem>, ForecastRepoError>;

    async fn create_new_forecast_item(
        &self,
        user: &str,
        new_item: NewForecastLineItem,
    ) -> Result<ForecastLineItem, ForecastRepoError>;

    /// Full replace with a create-shaped payload.
    async fn update_forecast_item(
        &self,
        user: &str,
        item_id: i32,
        updated_item: NewForecastLineItem,
    ) -> Result<ForecastLineItem, ForecastRepoError>;

    async fn delete_forecast_item(
        &self,
        user: &str,
        item_id: i32,
    ) -> Result<ForecastLineItem, ForecastRepoError>;
}

#[derive(Error, Debug)]
pub enum ForecastRepoError {
    #[error("Forecast line item with id {0} not found")]
    ForecastItemNotFound(i32),
    #[error("Project with id {0} not found")]
    ProjectNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "forecast_status", rename_all = "snake_case")]
pub enum ForecastStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ForecastLineItem {
    pub id: i32,
    pub project_id: i32,
    pub category: String,
    pub description: Option<String>,
    pub estimated_cost: Decimal,
    pub actual_cost: Decimal,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub progress_percent: i32,
    pub status: ForecastStatus,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct NewForecastLineItem {
    pub project_id: i32,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub estimated_cost: Decimal,
    #[serde(default)]
    pub actual_cost: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub progress_percent: i32,
    #[serde(default)]
    pub status: ForecastStatus,
}

impl NewForecastLineItem {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        project_id: i32,
        category: String,
        description: Option<String>,
        estimated_cost: Decimal,
        actual_cost: Decimal,
        unit: Option<String>,
        notes: Option<String>,
        progress_percent: i32,
        status: ForecastStatus,
    ) -> NewForecastLineItem {
        NewForecastLineItem {
            project_id,
            category,
            description,
            estimated_cost,
            actual_cost,
            unit,
            notes,
            progress_percent,
            status,
        }
    }

    pub fn to_forecast_item(self, id: i32) -> ForecastLineItem {
        ForecastLineItem {
            id,
            project_id: self.project_id,
            category: self.category,
            description: self.description,
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
            unit: self.unit,
            notes: self.notes,
            progress_percent: self.progress_percent,
            status: self.status,
        }
    }
}
