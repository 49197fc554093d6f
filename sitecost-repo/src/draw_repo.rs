use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait DrawRepo: Sync + Send {
    async fn get_draw(&self, user: &str, draw_id: i32) -> Result<DrawTracker, DrawRepoError>;

    async fn get_all_draws(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<DrawTracker>, DrawRepoError>;

    async fn create_new_draw(
        &self,
        user: &str,
        new_draw: NewDrawTracker,
    ) -> Result<DrawTracker, DrawRepoError>;

    /// Full replace with a create-shaped payload.
    async fn update_draw(
        &self,
        user: &str,
        draw_id: i32,
        updated_draw: NewDrawTracker,
    ) -> Result<DrawTracker, DrawRepoError>;

    async fn delete_draw(&self, user: &str, draw_id: i32) -> Result<DrawTracker, DrawRepoError>;
}

#[derive(Error, Debug)]
pub enum DrawRepoError {
    #[error("Draw tracker with id {0} not found")]
    DrawNotFound(i32),
    #[error("Project with id {0} not found")]
    ProjectNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct DrawTracker {
    pub id: i32,
    pub project_id: i32,
    pub cash_on_hand: Decimal,
    pub last_draw_date: Option<NaiveDate>,
    pub draw_triggered: bool,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct NewDrawTracker {
    pub project_id: i32,
    pub cash_on_hand: Decimal,
    #[serde(default)]
    pub last_draw_date: Option<NaiveDate>,
    #[serde(default)]
    pub draw_triggered: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewDrawTracker {
    pub const fn new(
        project_id: i32,
        cash_on_hand: Decimal,
        last_draw_date: Option<NaiveDate>,
        draw_triggered: bool,
        notes: Option<String>,
    ) -> NewDrawTracker {
        NewDrawTracker {
            project_id,
            cash_on_hand,
            last_draw_date,
            draw_triggered,
            notes,
        }
    }

    pub fn to_draw_tracker(self, id: i32) -> DrawTracker {
        DrawTracker {
            id,
            project_id: self.project_id,
            cash_on_hand: self.cash_on_hand,
            last_draw_date: self.last_draw_date,
            draw_triggered: self.draw_triggered,
            notes: self.notes,
        }
    }
}
