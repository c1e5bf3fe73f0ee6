use super::controller::{
    create_comment, delete_comment, get_comments_by_movie, get_comments_by_movie_id,
    update_comment,
};
use crate::middleware::auth::verify_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/comments")
            .service(
                web::resource("")
                    .route(web::post().to(create_comment))
                    .wrap(HttpAuthentication::with_fn(verify_token)),
            )
            .route("/movie/{movie_id}", web::get().to(get_comments_by_movie))
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_comment))
                    .route(web::patch().to(update_comment))
                    .route(web::delete().to(delete_comment))
                    .wrap(HttpAuthentication::with_fn(verify_token)),
            ),
    )
    .service(
        web::scope("/api/movies")
            .route("/{movie_id}/comments", web::get().to(get_comments_by_movie_id)),
    );
}
