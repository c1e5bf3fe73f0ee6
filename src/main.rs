use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;

mod comment;
mod database;
mod middleware;
mod router;
mod utils;

use comment::service::CommentService;
use comment::store::CommentStore;
use middleware::not_found::not_found;
use router::index::routes;
use utils::config::AppConfig;

#[get("/")]
async fn default(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Movie comments service",
        "service": config.service_name,
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let mongo_client = database::connect_to_mongo(&config)
        .await
        .map_err(std::io::Error::other)?;

    let comment_service = CommentService::new(&mongo_client, &config.database_name);
    if let Err(e) = comment_service.ensure_indexes().await {
        warn!("Could not create comment indexes: {}", e);
    }
    let store: web::Data<dyn CommentStore> =
        web::Data::from(Arc::new(comment_service) as Arc<dyn CommentStore>);

    let bind_addr = (config.host.clone(), config.port);
    info!("Starting server on http://{}:{}", bind_addr.0, bind_addr.1);

    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(config.clone())
            .app_data(store.clone())
            .configure(routes)
            .service(default)
            .default_service(web::to(not_found))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
