use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use edutaskmap_server::config::Config;
use edutaskmap_server::handlers;
use edutaskmap_server::linkmeta::MetadataFetcher;
use edutaskmap_server::state::AppState;
use edutaskmap_server::store::TaskStore;

#[tokio::main]
async fn main() {
    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "edutaskmap_server=info,tower_http=info".parse().unwrap());

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 EduTaskMap server starting...");

    let config = Config::from_env();
    info!("📝 Configuration loaded");

    // CORS: permissive in dev, restrictive in production.
    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        tracing::warn!("🔒 CORS: restrictive (production mode). Cross-origin requests will be denied.");
        CorsLayer::new()
    };

    let fetcher =
        MetadataFetcher::new(config.fetch_timeout).expect("Failed to build HTTP client");
    info!(
        "🔗 Metadata fetcher ready (timeout: {:?})",
        config.fetch_timeout
    );

    let app_state = AppState {
        tasks: TaskStore::new(),
        fetcher: Arc::new(fetcher),
    };

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = Router::new()
        // Health check + metrics
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        // Link preview
        .route(
            "/link-preview",
            get(handlers::link_preview::get_link_preview),
        )
        // Task routes (nested under class)
        .route(
            "/classes/:class_id/tasks",
            post(handlers::tasks::create_task),
        )
        .route("/classes/:class_id/tasks", get(handlers::tasks::list_tasks))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer)
        .layer(cors)
        .with_state(app_state);

    let addr = config.server_addr();
    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
