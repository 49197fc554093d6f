use crate::auth::UserId;
use crate::error::HandlerError;
use crate::forecast::ProjectFilter;
use actix_web::{web, HttpResponse, Responder};
use sitecost_repo::forecast_repo::{ForecastRepo, NewForecastLineItem};
use std::sync::Arc;

#[get("/{item_id}")]
pub async fn get_forecast_item(
    forecast_repo: web::Data<Arc<dyn ForecastRepo>>,
    user_id: web::ReqData<UserId>,
    item_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let item = forecast_repo
        .get_forecast_item(&user_id.into_inner(), item_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

#[get("")]
pub async fn get_all_forecast_items(
    forecast_repo: web::Data<Arc<dyn ForecastRepo>>,
    user_id: web::ReqData<UserId>,
    filter: web::Query<ProjectFilter>,
) -> Result<impl Responder, HandlerError> {
    let items = forecast_repo
        .get_all_forecast_items(&user_id.into_inner(), filter.project_id)
        .await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("")]
pub async fn create_new_forecast_item(
    forecast_repo: web::Data<Arc<dyn ForecastRepo>>,
    user_id: web::ReqData<UserId>,
    new_item: web::Json<NewForecastLineItem>,
) -> Result<impl Responder, HandlerError> {
    let item = forecast_repo
        .create_new_forecast_item(&user_id.into_inner(), new_item.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/{item_id}")]
pub async fn update_forecast_item(
    forecast_repo: web::Data<Arc<dyn ForecastRepo>>,
    user_id: web::ReqData<UserId>,
    item_id: web::Path<i32>,
    updated_item: web::Json<NewForecastLineItem>,
) -> Result<impl Responder, HandlerError> {
    let item = forecast_repo
        .update_forecast_item(
            &user_id.into_inner(),
            item_id.into_inner(),
            updated_item.into_inner(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/{item_id}")]
pub async fn delete_forecast_item(
    forecast_repo: web::Data<Arc<dyn ForecastRepo>>,
    user_id: web::ReqData<UserId>,
    item_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    forecast_repo
        .delete_forecast_item(&user_id.into_inner(), item_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}
