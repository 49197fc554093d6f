mod utils;

use rstest::rstest;
use sitecost_repo::forecast_repo::{ForecastRepoError, ForecastStatus};
use utils::generator::{
    generate_new_expense_with_link, generate_new_forecast_item, generate_new_project,
};
use utils::RepoType;

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_create_and_get_forecast_item(#[case] repo_type: RepoType) {
    let Some((project_repo, forecast_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        eprintln!("config_test.toml not found, skipping");
        return;
    };
    let user = utils::test_user();

    let project = project_repo
        .create_new_project(&user, generate_new_project())
        .await
        .unwrap();

    let new_item = generate_new_forecast_item(project.id);
    let item_id = forecast_repo
        .create_new_forecast_item(&user, new_item.clone())
        .await
        .unwrap()
        .id;

    let stored_item = forecast_repo.get_forecast_item(&user, item_id).await.unwrap();
    assert_eq!(stored_item.project_id, project.id);
    assert_eq!(stored_item.category, new_item.category);
    assert_eq!(stored_item.description, new_item.description);
    assert_eq!(stored_item.estimated_cost, new_item.estimated_cost);
    assert_eq!(stored_item.actual_cost, new_item.actual_cost);
    assert_eq!(stored_item.unit, new_item.unit);
    assert_eq!(stored_item.progress_percent, new_item.progress_percent);
    assert_eq!(stored_item.status, new_item.status);
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_create_against_missing_project(#[case] repo_type: RepoType) {
    let Some((_, forecast_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        eprintln!("config_test.toml not found, skipping");
        return;
    };
    let user = utils::test_user();

    let result = forecast_repo
        .create_new_forecast_item(&user, generate_new_forecast_item(987654))
        .await;
    assert!(matches!(
        result,
        Err(ForecastRepoError::ProjectNotFound(987654))
    ));
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_create_against_foreign_project(#[case] repo_type: RepoType) {
    let Some((project_repo, forecast_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        eprintln!("config_test.toml not found, skipping");
        return;
    };
    let owner = utils::test_user();
    let intruder = utils::test_user();

    let project = project_repo
        .create_new_project(&owner, generate_new_project())
        .await
        .unwrap();

    let result = forecast_repo
        .create_new_forecast_item(&intruder, generate_new_forecast_item(project.id))
        .await;
    assert!(matches!(result, Err(ForecastRepoError::ProjectNotFound(_))));
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_list_filtered_by_project(#[case] repo_type: RepoType) {
    let Some((project_repo, forecast_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        eprintln!("config_test.toml not found, skipping");
        return;
    };
    let user = utils::test_user();

    let first = project_repo
        .create_new_project(&user, generate_new_project())
        .await
        .unwrap();
    let second = project_repo
        .create_new_project(&user, generate_new_project())
        .await
        .unwrap();

    forecast_repo
        .create_new_forecast_item(&user, generate_new_forecast_item(first.id))
        .await
        .unwrap();
    forecast_repo
        .create_new_forecast_item(&user, generate_new_forecast_item(first.id))
        .await
        .unwrap();
    forecast_repo
        .create_new_forecast_item(&user, generate_new_forecast_item(second.id))
        .await
        .unwrap();

    let all_items = forecast_repo.get_all_forecast_items(&user, None).await.unwrap();
    assert_eq!(all_items.len(), 3);

    let first_items = forecast_repo
        .get_all_forecast_items(&user, Some(first.id))
        .await
        .unwrap();
    assert_eq!(first_items.len(), 2);
    assert!(first_items.iter().all(|item| item.project_id == first.id));
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_update_replaces_item(#[case] repo_type: RepoType) {
    let Some((project_repo, forecast_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        eprintln!("config_test.toml not found, skipping");
        return;
    };
    let user = utils::test_user();

    let project = project_repo
        .create_new_project(&user, generate_new_project())
        .await
        .unwrap();
    let item = forecast_repo
        .create_new_forecast_item(&user, generate_new_forecast_item(project.id))
        .await
        .unwrap();

    let mut update = generate_new_forecast_item(project.id);
    update.progress_percent = 60;
    update.status = ForecastStatus::InProgress;
    let updated = forecast_repo
        .update_forecast_item(&user, item.id, update.clone())
        .await
        .unwrap();

    assert_eq!(updated.id, item.id);
    assert_eq!(updated.category, update.category);
    assert_eq!(updated.progress_percent, 60);
    assert_eq!(updated.status, ForecastStatus::InProgress);

    let stored = forecast_repo.get_forecast_item(&user, item.id).await.unwrap();
    assert_eq!(stored, updated);
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_update_invalid_item(#[case] repo_type: RepoType) {
    let Some((project_repo, forecast_repo, _, _, _)) = utils::build_repos(repo_type).await else {
        eprintln!("config_test.toml not found, skipping");
        return;
    };
    let user = utils::test_user();

    let project = project_repo
        .create_new_project(&user, generate_new_project())
        .await
        .unwrap();

    let result = forecast_repo
        .update_forecast_item(&user, 654321, generate_new_forecast_item(project.id))
        .await;
    assert!(matches!(
        result,
        Err(ForecastRepoError::ForecastItemNotFound(654321))
    ));
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_delete_unlinks_expenses(#[case] repo_type: RepoType) {
    let Some((project_repo, forecast_repo, expense_repo, _, _)) =
        utils::build_repos(repo_type).await
    else {
        eprintln!("config_test.toml not found, skipping");
        return;
    };
    let user = utils::test_user();

    let project = project_repo
        .create_new_project(&user, generate_new_project())
        .await
        .unwrap();
    let item = forecast_repo
        .create_new_forecast_item(&user, generate_new_forecast_item(project.id))
        .await
        .unwrap();
    let expense = expense_repo
        .create_new_expense(&user, generate_new_expense_with_link(project.id, item.id))
        .await
        .unwrap();

    forecast_repo.delete_forecast_item(&user, item.id).await.unwrap();

    let result = forecast_repo.get_forecast_item(&user, item.id).await;
    assert!(matches!(
        result,
        Err(ForecastRepoError::ForecastItemNotFound(_))
    ));

    let stored_expense = expense_repo.get_expense(&user, expense.id).await.unwrap();
    assert_eq!(stored_expense.forecast_line_item_id, None);
}
