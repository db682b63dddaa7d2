use crate::catalog::Catalog;
use crate::i18n::{negotiate, Language};
use crate::models::{
    ApiError, CategoriesResponse, HealthCheckResponse, ProductQueryParams, ProductsResponse,
    WhyBoycottResponse,
};
use crate::query::{self, PageRequest, ProductFilter};
use actix_web::error::QueryPayloadError;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder, ResponseError};
use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Failures surfaced to clients as `{error, message, traceId}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiFailure {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ResponseError for ApiFailure {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiFailure::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiFailure::NotFound(_) => StatusCode::NOT_FOUND,
            ApiFailure::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = Uuid::new_v4().to_string();
        let error = match self {
            ApiFailure::BadRequest(_) => "Bad request",
            ApiFailure::NotFound(_) => "Not found",
            ApiFailure::Internal(_) => "Internal server error",
        };

        if self.status_code().is_server_error() {
            log::error!("[{}] {:?}", trace_id, self);
        } else {
            log::debug!("[{}] {}: {}", trace_id, error, self);
        }

        HttpResponse::build(self.status_code()).json(ApiError {
            error: error.to_string(),
            message: self.to_string(),
            trace_id,
        })
    }
}

/**
 * get_language_from_request
 * Language negotiated from the Accept-Language header; en when absent or unsupported.
 */
fn get_language_from_request(req: &HttpRequest) -> Language {
    negotiate(
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|h| h.to_str().ok()),
    )
}

fn json_ok<T: Serialize>(body: &T) -> Result<HttpResponse, ApiFailure> {
    let body = serde_json::to_string(body).context("Failed to serialize response body")?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiFailure::BadRequest(err.to_string()).into()
}

#[utoipa::path(
    tag = "Health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthCheckResponse)
    )
)]
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthCheckResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(
        ProductQueryParams,
        ("Accept-Language" = Option<String>, Header, description = "Language preference: ar, bn, en, es, fr, id, tr, ur")
    ),
    responses(
        (status = 200, description = "List of products", body = ProductsResponse),
        (status = 400, description = "Malformed query string", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    )
)]
pub async fn get_products(
    req: HttpRequest,
    query: web::Query<ProductQueryParams>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, ApiFailure> {
    let lang = get_language_from_request(&req);
    let params = query.into_inner();
    let filter = ProductFilter::new(params.category_id.as_deref(), params.country.as_deref());
    let page = PageRequest::from_query(params.page.as_deref(), params.limit.as_deref());

    log::debug!(
        "GET /products lang={} filter={:?} page={} limit={}",
        lang,
        filter,
        page.page,
        page.limit
    );

    json_ok(&query::get_products(catalog.get_ref(), lang, &filter, page))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    params(
        ("Accept-Language" = Option<String>, Header, description = "Language preference: ar, bn, en, es, fr, id, tr, ur")
    ),
    responses(
        (status = 200, description = "List of categories", body = CategoriesResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    )
)]
pub async fn get_categories(
    req: HttpRequest,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, ApiFailure> {
    let lang = get_language_from_request(&req);
    json_ok(&query::list_categories(catalog.get_ref(), lang))
}

#[utoipa::path(
    get,
    path = "/why-boycott",
    tag = "Why Boycott",
    params(
        ("Accept-Language" = Option<String>, Header, description = "Language preference: ar, bn, en, es, fr, id, tr, ur")
    ),
    responses(
        (status = 200, description = "List of boycott reasons", body = WhyBoycottResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    )
)]
pub async fn get_why_boycott(
    req: HttpRequest,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, ApiFailure> {
    let lang = get_language_from_request(&req);
    json_ok(&query::list_why_boycott(catalog.get_ref(), lang))
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiFailure> {
    Err(ApiFailure::NotFound(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}

/// Registers the API routes. The 404 fallback is installed on the `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(health_check)
        .route("/products", web::get().to(get_products))
        .route("/categories", web::get().to(get_categories))
        .route("/why-boycott", web::get().to(get_why_boycott));
}
