use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use pizza_restaurant_service::RestaurantStore;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizza),
        (status = 400, description = "Unknown restaurant or pizza, or invalid price", body = ApiErrorsResponse),
        (status = 500, description = "Internal server error", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizza>), ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::BadRequest(vec![rejection.body_text()]))?;

    let created = state
        .db
        .run(move |conn| RestaurantStore::new(conn).create_restaurant_pizza(payload.into()))
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
