use kanban::{
    config::{
        session::{load_session_key, validate_production_config, CookieConfig},
        AppConfig,
    },
    db,
    middleware::add_security_headers,
    routes, AppState,
};

use axum::middleware;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kanban=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    validate_production_config();

    // Database connection
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(
        pool,
        &config.base_url,
        CookieConfig::from_env(),
        load_session_key(),
    )?;

    let app = routes::build_router(app_state).layer(middleware::from_fn_with_state(
        config.is_production(),
        add_security_headers,
    ));

    let addr = config.socket_addr()?;
    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Pages reach the API at {}", config.base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
