use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use pizza_restaurant_service::{RestaurantStore, StoreError};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

// Ids are integers; anything else cannot name a restaurant.
fn parse_restaurant_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::RestaurantNotFound)
}

fn restaurant_not_found(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(_) => ApiError::RestaurantNotFound,
        err => err.into(),
    }
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [Restaurant]),
        (status = 500, description = "Internal server error", body = ApiErrorsResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = state
        .db
        .run(|conn| RestaurantStore::new(conn).list_restaurants())
        .await?;

    Ok(Json(restaurants.into_iter().map(Restaurant::from).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorsResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let id = parse_restaurant_id(&restaurant_id)?;

    let detail = state
        .db
        .run(move |conn| RestaurantStore::new(conn).get_restaurant(id))
        .await
        .map_err(restaurant_not_found)?;

    Ok(Json(detail.into()))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizzas deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorsResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_restaurant_id(&restaurant_id)?;

    state
        .db
        .run(move |conn| RestaurantStore::new(conn).delete_restaurant(id))
        .await
        .map_err(restaurant_not_found)?;

    Ok(StatusCode::NO_CONTENT)
}
