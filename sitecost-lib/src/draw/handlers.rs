use crate::auth::UserId;
use crate::error::HandlerError;
use crate::forecast::ProjectFilter;
use actix_web::{web, HttpResponse, Responder};
use sitecost_repo::draw_repo::{DrawRepo, NewDrawTracker};
use std::sync::Arc;

#[get("/{draw_id}")]
pub async fn get_draw(
    draw_repo: web::Data<Arc<dyn DrawRepo>>,
    user_id: web::ReqData<UserId>,
    draw_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let draw = draw_repo
        .get_draw(&user_id.into_inner(), draw_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(draw))
}

#[get("")]
pub async fn get_all_draws(
    draw_repo: web::Data<Arc<dyn DrawRepo>>,
    user_id: web::ReqData<UserId>,
    filter: web::Query<ProjectFilter>,
) -> Result<impl Responder, HandlerError> {
    let draws = draw_repo
        .get_all_draws(&user_id.into_inner(), filter.project_id)
        .await?;
    Ok(HttpResponse::Ok().json(draws))
}

#[post("")]
pub async fn create_new_draw(
    draw_repo: web::Data<Arc<dyn DrawRepo>>,
    user_id: web::ReqData<UserId>,
    new_draw: web::Json<NewDrawTracker>,
) -> Result<impl Responder, HandlerError> {
    let draw = draw_repo
        .create_new_draw(&user_id.into_inner(), new_draw.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(draw))
}

#[put("/{draw_id}")]
pub async fn update_draw(
    draw_repo: web::Data<Arc<dyn DrawRepo>>,
    user_id: web::ReqData<UserId>,
    draw_id: web::Path<i32>,
    updated_draw: web::Json<NewDrawTracker>,
) -> Result<impl Responder, HandlerError> {
    let draw = draw_repo
        .update_draw(
            &user_id.into_inner(),
            draw_id.into_inner(),
            updated_draw.into_inner(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(draw))
}

#[delete("/{draw_id}")]
pub async fn delete_draw(
    draw_repo: web::Data<Arc<dyn DrawRepo>>,
    user_id: web::ReqData<UserId>,
    draw_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    draw_repo
        .delete_draw(&user_id.into_inner(), draw_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}
