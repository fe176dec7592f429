use axum::{Router, extract::State, response::Json, routing::get};
use pizza_restaurant_service::RestaurantStore;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [Pizza]),
        (status = 500, description = "Internal server error", body = ApiErrorsResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<Pizza>>, ApiError> {
    let pizzas = state
        .db
        .run(|conn| RestaurantStore::new(conn).list_pizzas())
        .await?;

    Ok(Json(pizzas.into_iter().map(Pizza::from).collect()))
}
