mod error;
mod optimize;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, http::Method, routing::post, serve};
use courier_geocoding::{address_normalizer::AddressNormalizer, public::public_geocoder};
use courier_matrix_providers::{
    travel_matrix_client::TravelMatrixClient, travel_matrix_provider::TravelMatrixProvider,
};
use courier_optimizer::planner::route_planner::RoutePlanner;
use mimalloc::MiMalloc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::{optimize::optimize_handler, state::AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let depot = std::env::var("COURIER_DEPOT_ADDRESS")
        .context("COURIER_DEPOT_ADDRESS must name the depot address")?;
    let normalizer = AddressNormalizer::new(std::env::var("COURIER_REGION").ok());
    let planner = RoutePlanner::new(
        public_geocoder(),
        TravelMatrixClient::default(),
        TravelMatrixProvider::default(),
    )
    .with_normalizer(normalizer);

    let state = Arc::new(AppState { planner, depot });

    let app = router(state);

    let addr = std::env::var("COURIER_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");

    serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/optimize", post(optimize_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
