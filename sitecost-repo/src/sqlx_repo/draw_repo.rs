use crate::draw_repo::DrawRepoError::{DrawNotFound, ProjectNotFound};
use crate::draw_repo::{DrawRepo, DrawRepoError, DrawTracker, NewDrawTracker};
use crate::sqlx_repo::SQLxRepo;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::QueryBuilder;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct DrawTrackerEntry {
    id: i32,
    #[allow(dead_code)]
    user_id: String,
    project_id: i32,
    cash_on_hand: Decimal,
    last_draw_date: Option<NaiveDate>,
    draw_triggered: bool,
    notes: Option<String>,
}

impl From<DrawTrackerEntry> for DrawTracker {
    fn from(value: DrawTrackerEntry) -> Self {
        DrawTracker {
            id: value.id,
            project_id: value.project_id,
            cash_on_hand: value.cash_on_hand,
            last_draw_date: value.last_draw_date,
            draw_triggered: value.draw_triggered,
            notes: value.notes,
        }
    }
}

#[async_trait]
impl DrawRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_draw(&self, user: &str, draw_id: i32) -> Result<DrawTracker, DrawRepoError> {
        let entry: Option<DrawTrackerEntry> =
            sqlx::query_as("SELECT * FROM draw_tracker WHERE id = $1 AND user_id = $2")
                .bind(draw_id)
                .bind(user)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get draw tracker {}", draw_id))?;
        entry.ok_or(DrawNotFound(draw_id)).map(|d| d.into())
    }

    #[instrument(skip(self))]
    async fn get_all_draws(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<DrawTracker>, DrawRepoError> {
        let mut query_builder = QueryBuilder::new("SELECT * FROM draw_tracker WHERE user_id = ");
        query_builder.push_bind(user);
        if let Some(project_id) = project_id {
            query_builder
                .push(" AND project_id = ")
                .push_bind(project_id);
        }
        query_builder.push(" ORDER BY id");

        let entries: Vec<DrawTrackerEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Unable to get draw trackers for user {}", user))?;
        Ok(entries.into_iter().map(|d| d.into()).collect())
    }

    #[instrument(skip(self, new_draw))]
    async fn create_new_draw(
        &self,
        user: &str,
        new_draw: NewDrawTracker,
    ) -> Result<DrawTracker, DrawRepoError> {
        if !self.project_owned(user, new_draw.project_id).await? {
            return Err(ProjectNotFound(new_draw.project_id));
        }

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO draw_tracker(user_id, project_id, cash_on_hand, last_draw_date, draw_triggered, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(user)
        .bind(new_draw.project_id)
        .bind(new_draw.cash_on_hand)
        .bind(new_draw.last_draw_date)
        .bind(new_draw.draw_triggered)
        .bind(&new_draw.notes)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert draw tracker")?;

        Ok(new_draw.to_draw_tracker(id))
    }

    #[instrument(skip(self, updated_draw))]
    async fn update_draw(
        &self,
        user: &str,
        draw_id: i32,
        updated_draw: NewDrawTracker,
    ) -> Result<DrawTracker, DrawRepoError> {
        if !self.project_owned(user, updated_draw.project_id).await? {
            return Err(ProjectNotFound(updated_draw.project_id));
        }

        let result = sqlx::query(
            "UPDATE draw_tracker SET project_id = $1, cash_on_hand = $2, last_draw_date = $3, draw_triggered = $4, notes = $5 \
             WHERE user_id = $6 AND id = $7",
        )
        .bind(updated_draw.project_id)
        .bind(updated_draw.cash_on_hand)
        .bind(updated_draw.last_draw_date)
        .bind(updated_draw.draw_triggered)
        .bind(&updated_draw.notes)
        .bind(user)
        .bind(draw_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to update draw tracker {}", draw_id))?;

        if result.rows_affected() == 0 {
            Err(DrawNotFound(draw_id))
        } else {
            Ok(updated_draw.to_draw_tracker(draw_id))
        }
    }

    #[instrument(skip(self))]
    async fn delete_draw(&self, user: &str, draw_id: i32) -> Result<DrawTracker, DrawRepoError> {
        let entry: Option<DrawTrackerEntry> = sqlx::query_as(
            "DELETE FROM draw_tracker WHERE user_id = $1 AND id = $2 \
             RETURNING id, user_id, project_id, cash_on_hand, last_draw_date, draw_triggered, notes",
        )
        .bind(user)
        .bind(draw_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete draw tracker {}", draw_id))?;
        entry.ok_or(DrawNotFound(draw_id)).map(|d| d.into())
    }
}
