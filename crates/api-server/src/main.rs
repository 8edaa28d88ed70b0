use application::CommentsApp;
use config::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!("Starting comentarios API server");
    info!("Using database: {}", config.database_path);

    let app = CommentsApp::new(&config.database_path)?;
    if config.seed_demo_data {
        app.seed_demo_data().await?;
    }

    let router = routes::router(Arc::new(app));

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API Server listening on http://{}", bind_address);
    info!("   POST   /api/comentarios                    - Create comment");
    info!("   GET    /api/comentarios/                   - List comments");
    info!("   GET    /api/comentarios/:id                - Get comment");
    info!("   PUT    /api/comentarios/:id                - Update comment");
    info!("   DELETE /api/comentarios/:id                - Delete comment");
    info!("   GET    /api/comentarios/curso/:cursoId     - Comments of a course");
    info!("   GET    /api/comentarios/usuario/:usuarioId - Comments of a user");
    info!("   GET    /health                             - Health check");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
}
