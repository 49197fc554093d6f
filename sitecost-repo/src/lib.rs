use async_trait::async_trait;

pub mod draw_repo;
pub mod expense_repo;
pub mod forecast_repo;
pub mod project_repo;

// implementation modules
pub mod mem_repo;
pub mod sqlx_repo;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> bool;
}
