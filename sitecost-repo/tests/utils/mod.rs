use serde::Deserialize;
use sitecost_repo::draw_repo::DrawRepo;
use sitecost_repo::expense_repo::ExpenseRepo;
use sitecost_repo::forecast_repo::ForecastRepo;
use sitecost_repo::project_repo::ProjectRepo;
use sitecost_repo::HealthCheck;
use std::fs;
use std::sync::Arc;
use uuid::Uuid;

pub mod generator;

#[derive(Deserialize)]
struct TestConfig {
    database_url: String,
}

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

pub type Repos = (
    Arc<dyn ProjectRepo>,
    Arc<dyn ForecastRepo>,
    Arc<dyn ExpenseRepo>,
    Arc<dyn DrawRepo>,
    Arc<dyn HealthCheck>,
);

/// Builds the repos under test. The SQLx backend needs a database configured
/// in `config_test.toml`; when the file is absent those cases return `None`
/// and the test skips itself.
pub async fn build_repos(repo_type: RepoType) -> Option<Repos> {
    match repo_type {
        RepoType::SQLx => {
            let config = fs::read_to_string("config_test.toml").ok()?;
            let config: TestConfig = toml::from_str(config.as_str()).unwrap();
            Some(sitecost_repo::sqlx_repo::create_repos(config.database_url, 1).await)
        }
        RepoType::Mem => Some(sitecost_repo::mem_repo::create_repos()),
    }
}

/// Fresh user id per test so runs against a shared database stay isolated.
pub fn test_user() -> String {
    "test-user-".to_owned() + &Uuid::new_v4().to_string()
}
