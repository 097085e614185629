/// Route registration, shared by the server binary and the test harness
use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(handlers::register))
                .route("/login", web::post().to(handlers::login))
                .route("/profile", web::get().to(handlers::get_profile))
                .route("/verify", web::post().to(handlers::verify_token)),
        )
        .service(
            // "/me" must register ahead of "/{id}" so the literal segment
            // wins the match.
            web::scope("/api/users")
                .service(
                    web::resource("/me")
                        .route(web::get().to(handlers::get_current_user))
                        .route(web::put().to(handlers::update_current_user)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(handlers::get_user))
                        .route(web::put().to(handlers::update_user)),
                ),
        )
        .service(
            web::scope("/api/posts")
                .service(
                    web::resource("")
                        .route(web::get().to(handlers::get_posts))
                        .route(web::post().to(handlers::create_post)),
                )
                .service(
                    web::resource("/user/{id}").route(web::get().to(handlers::get_user_posts)),
                )
                .service(web::resource("/{id}").route(web::get().to(handlers::get_post)))
                .service(web::resource("/{id}/like").route(web::put().to(handlers::like_post))),
        );
}
