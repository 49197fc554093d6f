extern crate futures_util;
extern crate rstest;
extern crate serde_json;

use std::str::FromStr;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::{read_body_json, TestRequest};
use actix_web::web::Data;
use actix_web::App;
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::utils::mock::MockAuthentication;
use sitecost_repo::draw_repo::{DrawTracker, NewDrawTracker};
use sitecost_repo::project_repo::{NewProject, Project, ProjectStatus};
use utils::repos;
use utils::tracing_setup;
use utils::Repos;

#[macro_use]
mod utils;

fn sample_project() -> NewProject {
    NewProject::new(
        "Hillside spec home".to_string(),
        None,
        None,
        None,
        ProjectStatus::InProgress,
        None,
        None,
    )
}

fn sample_draw(project_id: i32) -> NewDrawTracker {
    NewDrawTracker::new(
        project_id,
        Decimal::from_str("68250.00").unwrap(),
        Some(NaiveDate::from_str("2024-05-30").unwrap()),
        false,
        Some("post-framing draw".to_string()),
    )
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_create_api_response(_tracing_setup: &(), repos: Repos) {
    let user_id = utils::test_user();
    let app = build_app!(repos, user_id);
    let service = test::init_service(app).await;

    let new_project = sample_project();
    let project: Project = create_project!(&service, new_project);

    let new_draw = sample_draw(project.id);
    let request = TestRequest::post()
        .uri("/draws")
        .set_json(&new_draw)
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response_draw: DrawTracker = read_body_json(response).await;
    assert_eq!(response_draw.project_id, project.id);
    assert_eq!(response_draw.cash_on_hand, new_draw.cash_on_hand);
    assert_eq!(response_draw.last_draw_date, new_draw.last_draw_date);
    assert!(!response_draw.draw_triggered);
    assert_eq!(response_draw.notes, new_draw.notes);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_create_for_unknown_project(_tracing_setup: &(), repos: Repos) {
    let user_id = utils::test_user();
    let app = build_app!(repos, user_id);
    let service = test::init_service(app).await;

    let new_draw = sample_draw(999);
    let request = TestRequest::post()
        .uri("/draws")
        .set_json(&new_draw)
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_update_draw(_tracing_setup: &(), repos: Repos) {
    let user_id = utils::test_user();
    let app = build_app!(repos, user_id);
    let service = test::init_service(app).await;

    let new_project = sample_project();
    let project: Project = create_project!(&service, new_project);

    let new_draw = sample_draw(project.id);
    let request = TestRequest::post()
        .uri("/draws")
        .set_json(&new_draw)
        .to_request();
    let response = test::call_service(&service, request).await;
    let draw: DrawTracker = read_body_json(response).await;

    let mut update = sample_draw(project.id);
    update.draw_triggered = true;
    update.cash_on_hand = Decimal::from_str("12480.00").unwrap();
    let request = TestRequest::put()
        .uri(format!("/draws/{}", draw.id).as_str())
        .set_json(&update)
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());

    let updated_draw: DrawTracker = read_body_json(response).await;
    assert_eq!(updated_draw.id, draw.id);
    assert!(updated_draw.draw_triggered);
    assert_eq!(updated_draw.cash_on_hand, update.cash_on_hand);
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_delete_draw(_tracing_setup: &(), repos: Repos) {
    let user_id = utils::test_user();
    let app = build_app!(repos, user_id);
    let service = test::init_service(app).await;

    let new_project = sample_project();
    let project: Project = create_project!(&service, new_project);

    let new_draw = sample_draw(project.id);
    let request = TestRequest::post()
        .uri("/draws")
        .set_json(&new_draw)
        .to_request();
    let response = test::call_service(&service, request).await;
    let draw: DrawTracker = read_body_json(response).await;

    let request = TestRequest::delete()
        .uri(format!("/draws/{}", draw.id).as_str())
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body, serde_json::json!({ "deleted": true }));
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_health_endpoint(_tracing_setup: &(), repos: Repos) {
    let user_id = utils::test_user();
    let app = build_app!(repos, user_id);
    let service = test::init_service(app).await;

    let request = TestRequest::get().uri("/health").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}
