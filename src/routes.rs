/// Route table
///
/// Registered as a `ServiceConfig` function so the exact production
/// routing is exercisable from tests. Scope order matters: actix does
/// not backtrack once a scope prefix matches, so the guarded auth
/// routes live inside the `/api/v1/auth` scope (as a nested scope with
/// the auth middleware) instead of behind the broader `/api/v1` scope
/// that the auth prefix would shadow.
use crate::handlers;
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check endpoints
        .route("/api/v1/health", web::get().to(handlers::health_summary))
        .route(
            "/api/v1/health/live",
            web::get().to(handlers::liveness_check),
        )
        // Authentication: public token endpoints plus the guarded
        // logout / account-deletion pair
        .service(
            web::scope("/api/v1/auth")
                .route("/signup", web::post().to(handlers::signup))
                .route("/token", web::post().to(handlers::login))
                .route("/token/refresh", web::post().to(handlers::refresh_token))
                .service(
                    web::scope("")
                        .wrap(JwtAuthMiddleware)
                        .route("/logout", web::post().to(handlers::logout))
                        .route("/me", web::delete().to(handlers::delete_account)),
                ),
        )
        // Everything else requires a valid access token
        .service(
            web::scope("/api/v1")
                .wrap(JwtAuthMiddleware)
                .service(
                    web::scope("/my-profile").service(
                        web::resource("")
                            .route(web::get().to(handlers::get_my_profile))
                            .route(web::put().to(handlers::update_my_profile)),
                    ),
                )
                .service(
                    web::scope("/neighbors")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::list_neighbors))
                                .route(web::post().to(handlers::create_profile)),
                        )
                        .service(
                            web::resource("/{profile_id}")
                                .route(web::get().to(handlers::get_neighbor))
                                .route(web::delete().to(handlers::delete_neighbor)),
                        ),
                )
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::list_posts))
                                .route(web::post().to(handlers::create_post)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(handlers::get_post))
                                .route(web::put().to(handlers::update_post))
                                .route(web::delete().to(handlers::delete_post)),
                        ),
                )
                .service(
                    web::scope("/events")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::list_events))
                                .route(web::post().to(handlers::create_event)),
                        )
                        .route(
                            "/{event_id}/volunteers",
                            web::get().to(handlers::get_event_volunteers),
                        )
                        .service(
                            web::resource("/{event_id}")
                                .route(web::get().to(handlers::get_event))
                                .route(web::put().to(handlers::update_event))
                                .route(web::delete().to(handlers::delete_event)),
                        ),
                )
                .service(
                    web::scope("/volunteers")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::list_volunteers))
                                .route(web::post().to(handlers::create_volunteer)),
                        )
                        .service(
                            web::resource("/{volunteer_id}")
                                .route(web::get().to(handlers::get_volunteer))
                                .route(web::put().to(handlers::update_volunteer))
                                .route(web::delete().to(handlers::delete_volunteer)),
                        ),
                )
                .route(
                    "/join-event/{event_id}",
                    web::post().to(handlers::join_event),
                ),
        );
}
