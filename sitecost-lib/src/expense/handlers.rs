use crate::auth::UserId;
use crate::error::HandlerError;
use crate::forecast::ProjectFilter;
use actix_web::{web, HttpResponse, Responder};
use sitecost_repo::expense_repo::{ExpenseRepo, NewExpense};
use std::sync::Arc;

#[get("/{expense_id}")]
pub async fn get_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    user_id: web::ReqData<UserId>,
    expense_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let expense = expense_repo
        .get_expense(&user_id.into_inner(), expense_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[get("")]
pub async fn get_all_expenses(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    user_id: web::ReqData<UserId>,
    filter: web::Query<ProjectFilter>,
) -> Result<impl Responder, HandlerError> {
    let expenses = expense_repo
        .get_all_expenses(&user_id.into_inner(), filter.project_id)
        .await?;
    Ok(HttpResponse::Ok().json(expenses))
}

#[post("")]
pub async fn create_new_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    user_id: web::ReqData<UserId>,
    new_expense: web::Json<NewExpense>,
) -> Result<impl Responder, HandlerError> {
    let expense = expense_repo
        .create_new_expense(&user_id.into_inner(), new_expense.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[put("/{expense_id}")]
pub async fn update_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    user_id: web::ReqData<UserId>,
    expense_id: web::Path<i32>,
    updated_expense: web::Json<NewExpense>,
) -> Result<impl Responder, HandlerError> {
    let expense = expense_repo
        .update_expense(
            &user_id.into_inner(),
            expense_id.into_inner(),
            updated_expense.into_inner(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[delete("/{expense_id}")]
pub async fn delete_expense(
    expense_repo: web::Data<Arc<dyn ExpenseRepo>>,
    user_id: web::ReqData<UserId>,
    expense_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    expense_repo
        .delete_expense(&user_id.into_inner(), expense_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}
