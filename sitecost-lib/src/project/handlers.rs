use crate::auth::UserId;
use crate::error::HandlerError;
use actix_web::{web, HttpResponse, Responder};
use sitecost_repo::project_repo::{NewProject, ProjectRepo, ProjectUpdate};
use std::sync::Arc;

#[get("/{project_id}")]
pub async fn get_project(
    project_repo: web::Data<Arc<dyn ProjectRepo>>,
    user_id: web::ReqData<UserId>,
    project_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let project = project_repo
        .get_project(&user_id.into_inner(), project_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[get("")]
pub async fn get_all_projects(
    project_repo: web::Data<Arc<dyn ProjectRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let projects = project_repo
        .get_all_projects(&user_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[post("")]
pub async fn create_new_project(
    project_repo: web::Data<Arc<dyn ProjectRepo>>,
    user_id: web::ReqData<UserId>,
    new_project: web::Json<NewProject>,
) -> Result<impl Responder, HandlerError> {
    let project = project_repo
        .create_new_project(&user_id.into_inner(), new_project.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(project))
}

#[put("/{project_id}")]
pub async fn update_project(
    project_repo: web::Data<Arc<dyn ProjectRepo>>,
    user_id: web::ReqData<UserId>,
    project_id: web::Path<i32>,
    update: web::Json<ProjectUpdate>,
) -> Result<impl Responder, HandlerError> {
    let project = project_repo
        .update_project(
            &user_id.into_inner(),
            project_id.into_inner(),
            update.into_inner(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[delete("/{project_id}")]
pub async fn delete_project(
    project_repo: web::Data<Arc<dyn ProjectRepo>>,
    user_id: web::ReqData<UserId>,
    project_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    project_repo
        .delete_project(&user_id.into_inner(), project_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
