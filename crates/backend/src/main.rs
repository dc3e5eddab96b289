pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod reports;
pub mod routes;
pub mod shared;
pub mod system;

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    let config_path = shared::config::find_config_file();
    let config = shared::config::load_config(config_path.as_deref())?;

    system::tracing::initialize(&config.logging)?;
    match &config_path {
        Some(path) => tracing::info!("Configuration loaded from {}", path.display()),
        None => tracing::info!("config.toml not found, using embedded defaults"),
    }

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        let status = response.status();
        let duration = start.elapsed();
        if status.is_success() {
            tracing::info!("{:>5}ms | {} {:>6} {}", duration.as_millis(), status.as_u16(), method, uri);
        } else {
            tracing::warn!("{:>5}ms | {} {:>6} {}", duration.as_millis(), status.as_u16(), method, uri);
        }
        response
    }

    let db_path = shared::config::get_database_path(&config);
    let db = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let state = shared::state::AppState::new(db, Arc::new(config));
    let server = state.config.server.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(state)
        .fallback_service(ServeDir::new(&server.static_dir))
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {e}"))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    server.port
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
