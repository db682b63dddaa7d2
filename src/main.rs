mod catalog;
mod config;
mod cors;
mod handlers;
mod i18n;
mod models;
mod query;

use crate::catalog::Catalog;
use crate::config::Config;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use utoipa::openapi::server::Server;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Boycott API",
        version = "1.0.0",
        description = "Backend API providing data about alternatives to non-ethical products"
    ),
    paths(
        handlers::health_check,
        handlers::get_products,
        handlers::get_categories,
        handlers::get_why_boycott
    ),
    components(schemas(
        models::Alternative,
        models::ApiError,
        models::CategoriesResponse,
        models::HealthCheckResponse,
        models::PaginationMeta,
        models::ProductsResponse,
        models::TranslatedCategory,
        models::TranslatedProduct,
        models::TranslatedReason,
        models::WhyBoycottResponse
    )),
    tags(
        (name = "Products"),
        (name = "Categories"),
        (name = "Why Boycott"),
        (name = "Health")
    )
)]
struct ApiDoc;

fn api_doc(config: &Config) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(config.base_url())]);
    doc
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    dotenv::from_filename(format!("{}/.env.local", manifest_dir)).ok();
    dotenv::from_filename(format!("{}/.env", manifest_dir)).ok();
    dotenv::from_filename(".env.local").ok();
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.data_dir)
        .with_context(|| format!("Failed to load catalog from {}", config.data_dir.display()))?;
    let catalog = web::Data::new(catalog);
    let openapi = api_doc(&config);

    let bind_address = config.bind_address();
    log::info!("Starting Boycott API server at http://{}", bind_address);
    log::info!(
        "API documentation available at {}/api-docs/",
        config.base_url()
    );

    let server_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .wrap(Logger::default())
            .wrap(cors::cors(&server_config))
            .service(
                SwaggerUi::new("/api-docs/{_:.*}").url("/api-docs/swagger.json", openapi.clone()),
            )
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
