use dotenvy::dotenv;
use std::sync::Arc;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use application::PostService;
use data::post_repository::{InMemoryPostRepository, PostRepository, PostgresPostRepository};
use infrastructure::{
    config::AppConfig,
    database::{create_pool, run_migrations},
    logging::init_logging,
};
use presentation::http_handlers;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    init_logging();

    let config = AppConfig::from_env();

    tracing::info!("Starting posts server...");
    tracing::info!("HTTP server will listen on {}", config.http_addr());
    tracing::info!("CORS allowed origins: {}", config.cors_allowed_origins);

    let post_repo: Arc<dyn PostRepository> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(database_url, config.database_max_connections).await?;

            tracing::info!("Running database migrations...");
            run_migrations(&pool).await?;

            Arc::new(PostgresPostRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, posts are kept in memory");
            Arc::new(InMemoryPostRepository::new())
        }
    };

    let post_service = Arc::new(PostService::new(post_repo));
    tracing::info!("Store holds {} posts", post_service.count_posts().await?);

    tracing::info!("Services initialized successfully");

    run_http_server(config, post_service).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

/// Configure CORS for the HTTP server with allowed origins from .env
fn configure_cors(allowed_origins: &str) -> actix_cors::Cors {
    use actix_cors::Cors;
    use actix_web::http::header;

    let origins: Vec<&str> = allowed_origins.split(',').map(|s| s.trim()).collect();

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    for origin in origins {
        if !origin.is_empty() {
            cors = cors.allowed_origin(origin);
            tracing::debug!("Added allowed CORS origin: {}", origin);
        }
    }

    cors
}

async fn run_http_server(config: AppConfig, post_service: Arc<PostService>) -> anyhow::Result<()> {
    use actix_web::{middleware::Logger, web, App, HttpServer};

    let addr = config.http_addr();
    let cors_allowed_origins = config.cors_allowed_origins;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&cors_allowed_origins))
            .app_data(web::Data::new(post_service.clone()))
            .configure(http_handlers::configure_routes)
    })
    .bind(&addr)?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    Ok(())
}
