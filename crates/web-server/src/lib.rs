use axum::{routing::get, Router};
use database::CandidateRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: CandidateRepository,
}

/// Builds the application router over the given state.
///
/// Kept separate from `run_server` so the route table can be constructed
/// against any repository (and inspected in tests) without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/v1/candidates",
            get(handlers::list_candidates).post(handlers::create_candidate),
        )
        .route("/api/v1/candidates/search", get(handlers::search_candidates))
        .route(
            "/api/v1/candidates/:id",
            get(handlers::get_candidate)
                .put(handlers::update_candidate)
                .patch(handlers::patch_candidate)
                .delete(handlers::delete_candidate),
        )
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config()?;
    let db_pool = database::connect(&config.database).await?;
    database::run_migrations(&db_pool).await?;
    let repo = CandidateRepository::new(db_pool);

    let app_state = Arc::new(AppState { repo });
    let app = app(app_state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
