use crate::comment::index::comment_routes;
use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(comment_routes);
}
