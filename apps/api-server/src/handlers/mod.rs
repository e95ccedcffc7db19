//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod content;
mod health;
mod pages;
mod posts;
mod slugs;
mod tags;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/content/{slug}", web::get().to(content::resolve))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Editor tooling
            .route("/slugs/check", web::post().to(slugs::check))
            // Content management
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/pages")
                    .route("", web::get().to(pages::list))
                    .route("", web::post().to(pages::create))
                    .route("/{id}", web::get().to(pages::get))
                    .route("/{id}", web::put().to(pages::update))
                    .route("/{id}", web::delete().to(pages::delete)),
            )
            .service(
                web::scope("/tags")
                    .route("", web::get().to(tags::list))
                    .route("", web::post().to(tags::create))
                    .route("/{id}", web::get().to(tags::get))
                    .route("/{id}", web::put().to(tags::update))
                    .route("/{id}", web::delete().to(tags::delete)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::get().to(categories::get))
                    .route("/{id}", web::put().to(categories::update))
                    .route("/{id}", web::delete().to(categories::delete)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("", web::post().to(users::create))
                    .route("/{id}", web::get().to(users::get))
                    .route("/{id}", web::put().to(users::update))
                    .route("/{id}", web::delete().to(users::delete)),
            ),
    );
}
