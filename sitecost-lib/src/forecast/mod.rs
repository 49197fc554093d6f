use actix_web::{web, Scope};
use serde::Deserialize;

mod handlers;

/// Optional query filter shared by the child-resource listings.
#[derive(Deserialize, Debug)]
pub struct ProjectFilter {
    pub project_id: Option<i32>,
}

pub fn forecast_service() -> Scope {
    web::scope("/forecast-items")
        .service(handlers::create_new_forecast_item)
        .service(handlers::get_all_forecast_items)
        .service(handlers::get_forecast_item)
        .service(handlers::update_forecast_item)
        .service(handlers::delete_forecast_item)
}
