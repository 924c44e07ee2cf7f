//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the user routes and the JSON extractor configuration.
///
/// The e-mail route is registered ahead of `/users/{id}` so lookups by
/// address are never parsed as identifiers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user_by_email)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user);
}
