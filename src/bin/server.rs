use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use cutlist::allocator::Allocator;
use cutlist::inventory;
use cutlist::summary::{self, CutGroup};
use cutlist::types::{DemandItem, Error, StockSpec};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct OptimizeRequest {
    /// Stock classes; ignored when `inventory` is given.
    #[serde(default)]
    stock: Vec<StockSpec>,
    #[serde(default)]
    inventory: Option<InventoryRequest>,
    cuts: Vec<CutRequest>,
}

#[derive(Deserialize, Serialize)]
struct InventoryRequest {
    total_length: f64,
    stock_length: f64,
}

#[derive(Deserialize, Serialize)]
struct CutRequest {
    length: f64,
    qty: u32,
    label: String,
    #[serde(default)]
    job: String,
    #[serde(default)]
    sequence: String,
}

#[derive(Serialize)]
struct OptimizeResponse {
    layouts: Vec<LayoutResponse>,
    pool_size: usize,
    used_count: usize,
    unplaced: u32,
    total_waste: f64,
}

#[derive(Serialize)]
struct LayoutResponse {
    stock_length: f64,
    groups: Vec<CutGroup>,
    waste: f64,
    utilization: f64,
}

fn error_response(e: Error) -> (StatusCode, String) {
    let status = match &e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::InternalConsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

async fn optimize(
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let pool = match &req.inventory {
        Some(inv) => inventory::build_pool_from_inventory(inv.total_length, inv.stock_length),
        None => inventory::build_pool(&req.stock),
    }
    .map_err(error_response)?;

    let demands: Vec<DemandItem> = req
        .cuts
        .into_iter()
        .map(|c| DemandItem {
            length: c.length,
            qty: c.qty,
            label: c.label,
            job: c.job,
            sequence: c.sequence,
        })
        .collect();

    let result = Allocator::new(pool, demands)
        .allocate()
        .map_err(error_response)?;

    let mut layouts = Vec::with_capacity(result.layouts.len());
    for l in &result.layouts {
        let s = summary::summarize(l).map_err(error_response)?;
        let utilization = summary::utilization(l).map_err(error_response)?;
        layouts.push(LayoutResponse {
            stock_length: s.stock_length,
            groups: s.groups,
            waste: s.waste,
            utilization,
        });
    }

    Ok(Json(OptimizeResponse {
        pool_size: result.layouts.len(),
        used_count: result.used_count(),
        unplaced: result.unplaced,
        total_waste: result.total_waste(),
        layouts,
    }))
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN")
        .ok()
        .map(|dsn| sentry::init(dsn));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
