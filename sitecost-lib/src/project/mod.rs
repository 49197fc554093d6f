use actix_web::{web, Scope};

mod handlers;

pub fn project_service() -> Scope {
    web::scope("/projects")
        .service(handlers::create_new_project)
        .service(handlers::get_all_projects)
        .service(handlers::get_project)
        .service(handlers::update_project)
        .service(handlers::delete_project)
}
