//! Pizzeria - pizza order-taking service.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use pizzeria::domain::Money;
use pizzeria::store::{CatalogStore, PgStore};
use pizzeria::{OrderFlowError, OrderForm, OrderSummary, OrderWorkflow};

#[derive(Clone)]
struct AppState {
    workflow: Arc<OrderWorkflow<PgStore>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    let state = AppState {
        workflow: Arc::new(OrderWorkflow::new(PgStore::new(db))),
    };

    let app = Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({"status": "healthy", "service": "pizzeria"})) }),
        )
        .route("/api/v1/menu", get(menu))
        .route("/api/v1/orders", post(submit_order))
        .route("/api/v1/orders/:id/confirmation", get(confirmation))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "5001".to_string());
    tracing::info!("Pizzeria listening on 0.0.0.0:{}", port);
    axum::serve(
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?,
        app,
    )
    .await?;
    Ok(())
}

/// Workflow failures mapped onto user-visible responses; storage detail is
/// logged, never surfaced.
struct ApiError(OrderFlowError);

impl From<OrderFlowError> for ApiError {
    fn from(e: OrderFlowError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            OrderFlowError::MissingField(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            OrderFlowError::InvalidPromo => (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string()),
            OrderFlowError::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            OrderFlowError::Storage(detail) => {
                tracing::error!(error = %detail, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

#[derive(Serialize)]
struct MenuEntry {
    id: Uuid,
    name: String,
    price: Money,
    image: &'static str,
}

async fn menu(State(s): State<AppState>) -> std::result::Result<Json<Vec<MenuEntry>>, ApiError> {
    let pizzas = s.workflow.store().list_pizzas().await?;
    let entries = pizzas
        .into_iter()
        .map(|p| MenuEntry {
            id: p.id,
            image: pizza_image(&p.name),
            name: p.name,
            price: p.price,
        })
        .collect();
    Ok(Json(entries))
}

#[derive(Serialize)]
struct OrderCreated {
    order_id: Uuid,
}

async fn submit_order(
    State(s): State<AppState>,
    Json(form): Json<OrderForm>,
) -> std::result::Result<(StatusCode, Json<OrderCreated>), ApiError> {
    let order_id = s.workflow.submit(form).await?;
    Ok((StatusCode::CREATED, Json(OrderCreated { order_id })))
}

async fn confirmation(
    State(s): State<AppState>,
    Path(id): Path<Uuid>,
) -> std::result::Result<Json<OrderSummary>, ApiError> {
    Ok(Json(s.workflow.confirmation(id).await?))
}

/// Static pizza-name-to-image mapping for the menu view.
fn pizza_image(name: &str) -> &'static str {
    match name {
        "Margherita" => "margherita.png",
        "Pepperoni" => "pepperoni.png",
        "Hawaiian" => "hawaiian.png",
        "Vegetarian" => "vegetarian.png",
        "Supreme" => "supreme.png",
        "BBQ Chicken" => "bbq_chicken.png",
        "Meat Lovers" => "meat_lovers.png",
        "Buffalo" => "buffalo.png",
        _ => "default.png",
    }
}
