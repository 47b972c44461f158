use actix_web::{middleware::DefaultHeaders, web};

use crate::api::handlers::owner_handlers::{
    delete_owner, fallback, get_all_owners, get_owner, save_owner, status, update_owner,
};

pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET,POST,PUT,PATCH,DELETE,OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

pub fn owner_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/status")
            .route(web::get().to(status))
            .default_service(web::to(fallback))
    );

    cfg.service(
        web::resource("/owner")
            .route(web::get().to(get_owner))
            .route(web::post().to(save_owner))
            .route(web::patch().to(update_owner))
            .route(web::delete().to(delete_owner))
            .default_service(web::to(fallback))
    );

    cfg.service(
        web::resource("/owners")
            .route(web::get().to(get_all_owners))
            .default_service(web::to(fallback))
    );

    // Must stay last: it matches every path.
    cfg.service(
        web::resource("/{tail:.*}")
            .to(fallback)
    );
}
