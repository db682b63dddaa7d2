use crate::config::Config;
use actix_cors::Cors;
use actix_web::http::{header, Method};

/**
 * cors
 * Known frontends get their origin echoed back with credentials allowed.
 * Development mode (or a "*" entry) opens the API to any origin.
 */
pub fn cors(config: &Config) -> Cors {
    let base = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT_LANGUAGE,
        ])
        .supports_credentials()
        .max_age(3600);

    if config.is_development() || config.allowed_origins.iter().any(|o| o == "*") {
        return base.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .fold(base, |cors, origin| cors.allowed_origin(origin))
}
