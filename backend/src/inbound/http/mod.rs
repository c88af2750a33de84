//! HTTP inbound adapter exposing REST endpoints.

pub mod about;
pub mod auth;
pub mod cache_control;
pub mod content;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` handler on `cfg`.
///
/// Fixed paths come first so the generic `/{collection}` routes only see
/// collection names.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(health::heartbeat)
        .service(users::login)
        .service(users::current_user)
        .service(users::update_profile)
        .service(users::change_password)
        .service(uploads::upload)
        .service(about::get_about)
        .service(about::update_about)
        .service(content::snapshot)
        .service(content::blog_by_slug)
        .service(content::reset)
        .service(content::list)
        .service(content::create)
        .service(content::update)
        .service(content::remove);
}
