use actix_web::{web, Scope};

mod handlers;

pub fn draw_service() -> Scope {
    web::scope("/draws")
        .service(handlers::create_new_draw)
        .service(handlers::get_all_draws)
        .service(handlers::get_draw)
        .service(handlers::update_draw)
        .service(handlers::delete_draw)
}
