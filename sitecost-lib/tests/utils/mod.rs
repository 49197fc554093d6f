use rstest::*;
use sitecost_lib::auth::UserId;
use sitecost_repo::draw_repo::DrawRepo;
use sitecost_repo::expense_repo::ExpenseRepo;
use sitecost_repo::forecast_repo::ForecastRepo;
use sitecost_repo::project_repo::ProjectRepo;
use sitecost_repo::HealthCheck;
use std::sync::Arc;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

pub mod mock;

pub type Repos = (
    Arc<dyn ProjectRepo>,
    Arc<dyn ForecastRepo>,
    Arc<dyn ExpenseRepo>,
    Arc<dyn DrawRepo>,
    Arc<dyn HealthCheck>,
);

macro_rules! build_app {
    ($repos:ident, $user_id:expr) => {{
        let (project_repo, forecast_repo, expense_repo, draw_repo, health_check) = $repos;
        let app = App::new()
            .app_data(Data::new(project_repo))
            .app_data(Data::new(forecast_repo))
            .app_data(Data::new(expense_repo))
            .app_data(Data::new(draw_repo))
            .app_data(Data::new(health_check))
            .wrap(sitecost_lib::tracing::create_middleware())
            .service(
                sitecost_lib::project::project_service()
                    .wrap(MockAuthentication { user_id: $user_id.clone() }),
            )
            .service(
                sitecost_lib::forecast::forecast_service()
                    .wrap(MockAuthentication { user_id: $user_id.clone() }),
            )
            .service(
                sitecost_lib::expense::expense_service()
                    .wrap(MockAuthentication { user_id: $user_id.clone() }),
            )
            .service(
                sitecost_lib::draw::draw_service()
                    .wrap(MockAuthentication { user_id: $user_id.clone() }),
            )
            .service(sitecost_lib::health::health_service());
        tracing::info!("Built app");
        app
    }};
}

macro_rules! create_project {
    (&$service:ident, $new_project:ident) => {{
        let request = TestRequest::post()
            .uri("/projects")
            .set_json(&$new_project)
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when creating project",
            response.status()
        );
        test::read_body_json(response).await
    }};
}

pub fn test_user() -> UserId {
    "test-user-".to_owned() + &Uuid::new_v4().to_string()
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos() -> Repos {
    sitecost_repo::mem_repo::create_repos()
}
