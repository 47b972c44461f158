use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use pets_service::{
    api::state::AppState,
    infrastructure::{database::mongo_context::MongoContext, MongoOwnerRepository, S3Presigner},
    routes::{cors_headers, owner_routes},
    utils::config::AppConfig,
};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::global();

    let mongo_context = match MongoContext::init(&config.database_url, &config.database_name).await {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let presigner = match S3Presigner::from_config(config) {
        Ok(presigner) => presigner,
        Err(e) => {
            log::error!("Failed to configure object storage: {}", e);
            std::process::exit(1);
        }
    };

    let owners = MongoOwnerRepository::new(&mongo_context, &config.table_name);
    let app_state = AppState::new(Arc::new(owners), Arc::new(presigner));

    log::info!("Owner API listening on http://{}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors_headers())
            .configure(owner_routes)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
