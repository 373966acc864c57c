//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod diaries;
pub mod error;
pub mod health;
pub mod members;
pub mod response;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;
use error::{json_error_handler, method_not_allowed, path_error_handler, query_error_handler};

/// Register extractor error handlers and every API route on `cfg`.
///
/// Each path is a `web::resource` whose default service answers unsupported
/// methods with 405. Handler state ([`state::HttpState`] and
/// [`health::HealthState`]) must be registered by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::resource("/health/ready")
                .route(web::get().to(health::ready))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/health/live")
                .route(web::get().to(health::live))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(diaries::DIARIES_PATH)
                .route(web::post().to(diaries::write_diary))
                .route(web::get().to(diaries::list_diaries))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/v1/diaries/{id}")
                .route(web::get().to(diaries::get_diary))
                .route(web::put().to(diaries::update_diary))
                .route(web::delete().to(diaries::delete_diary))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/v1/members/me")
                .route(web::get().to(members::current_member))
                .default_service(web::to(method_not_allowed)),
        );
}
