// Salon Directory - Preview Server
// Serves a built output directory plus a small JSON API over its snapshots

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use clap::Parser;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use salon_directory::sink::{BUSINESS_SNAPSHOT, CATEGORY_SNAPSHOT, CITY_SNAPSHOT, STATE_SNAPSHOT};
use salon_directory::{ProcessedBusiness, ProcessedCategory, ProcessedCity, ProcessedState};

#[derive(Parser)]
#[command(name = "directory-preview", about = "Preview a generated salon directory locally")]
struct Args {
    /// Built output directory
    #[arg(default_value = "public")]
    dir: PathBuf,
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    output_dir: Arc<PathBuf>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Stats response
#[derive(Serialize)]
struct StatsResponse {
    businesses: usize,
    cities: usize,
    states: usize,
    categories: usize,
    businesses_without_state: usize,
}

async fn read_snapshot<T: DeserializeOwned>(state: &AppState, file: &str) -> Result<Vec<T>, String> {
    let path = state.output_dir.join(file);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("Failed to parse {:?}: {}", path, e))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/stats - Entity counts from the snapshots
async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    let loaded = async {
        let businesses: Vec<ProcessedBusiness> = read_snapshot(&state, BUSINESS_SNAPSHOT).await?;
        let cities: Vec<ProcessedCity> = read_snapshot(&state, CITY_SNAPSHOT).await?;
        let states: Vec<ProcessedState> = read_snapshot(&state, STATE_SNAPSHOT).await?;
        let categories: Vec<ProcessedCategory> = read_snapshot(&state, CATEGORY_SNAPSHOT).await?;

        Ok::<_, String>(StatsResponse {
            businesses: businesses.len(),
            cities: cities.len(),
            states: states.len(),
            categories: categories.len(),
            businesses_without_state: businesses.iter().filter(|b| b.state_id.is_none()).count(),
        })
    }
    .await;

    match loaded {
        Ok(stats) => (StatusCode::OK, Json(ApiResponse::ok(stats))).into_response(),
        Err(e) => {
            warn!("Error getting stats: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StatsResponse>::err(e)),
            )
                .into_response()
        }
    }
}

/// GET /api/businesses/:slug - One business snapshot
async fn get_business(State(state): State<AppState>, Path(slug): Path<String>) -> impl IntoResponse {
    match read_snapshot::<ProcessedBusiness>(&state, BUSINESS_SNAPSHOT).await {
        Ok(businesses) => match businesses.into_iter().find(|b| b.slug == slug) {
            Some(business) => (StatusCode::OK, Json(ApiResponse::ok(business))).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ProcessedBusiness>::err(format!("No business with slug {}", slug))),
            )
                .into_response(),
        },
        Err(e) => {
            warn!("Error getting business {}: {}", slug, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProcessedBusiness>::err(e)),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    if !args.dir.join("index.html").exists() {
        eprintln!("❌ No generated site found in {:?}", args.dir);
        eprintln!("   Run: salon-directory build --archive <data.zip> --out {:?}", args.dir);
        std::process::exit(1);
    }

    let state = AppState {
        output_dir: Arc::new(args.dir.clone()),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .route("/businesses/:slug", get(get_business))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&args.dir))
        .layer(CorsLayer::permissive());

    let listener = match tokio::net::TcpListener::bind(&args.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("❌ Failed to bind to {}: {}", args.addr, e);
            std::process::exit(1);
        }
    };

    info!("🌐 Previewing {:?} at http://{}", args.dir, args.addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
