mod draw_repo;
mod expense_repo;
mod forecast_repo;
mod project_repo;

use crate::draw_repo::DrawRepo;
use crate::expense_repo::ExpenseRepo;
use crate::forecast_repo::ForecastRepo;
use crate::project_repo::ProjectRepo;
use crate::HealthCheck;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::instrument;

pub struct SQLxRepo {
    pool: Pool<Postgres>,
}

impl SQLxRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxRepo {
        SQLxRepo { pool }
    }

    /// Ownership gate for child rows: the referenced project must exist and
    /// belong to `user`.
    #[instrument(skip(self))]
    async fn project_owned(&self, user: &str, project_id: i32) -> Result<bool, anyhow::Error> {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    /// A linked forecast line item must exist for `user` on the same project.
    #[instrument(skip(self))]
    async fn forecast_item_on_project(
        &self,
        user: &str,
        item_id: i32,
        project_id: i32,
    ) -> Result<bool, anyhow::Error> {
        let found: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM forecast_line_items WHERE id = $1 AND user_id = $2 AND project_id = $3",
        )
        .bind(item_id)
        .bind(user)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl HealthCheck for SQLxRepo {
    async fn check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

pub async fn create_repos(
    database_url: String,
    max_pool_size: u32,
) -> (
    Arc<dyn ProjectRepo>,
    Arc<dyn ForecastRepo>,
    Arc<dyn ExpenseRepo>,
    Arc<dyn DrawRepo>,
    Arc<dyn HealthCheck>,
) {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(&database_url)
        .await
        .unwrap();

    let repo = Arc::new(SQLxRepo::new(pool));
    (
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo,
    )
}
