use pizza_restaurant_service::models as db;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Restaurant {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Address of the restaurant
    pub address: String,
}

impl From<db::Restaurant> for Restaurant {
    fn from(r: db::Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Pizza {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Free-text ingredient list
    pub ingredients: String,
}

impl From<db::Pizza> for Pizza {
    fn from(p: db::Pizza) -> Self {
        Self {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaItem {
    pub id: i32,
    /// Price of the pizza at this restaurant
    pub price: i32,
    pub pizza_id: i32,
    pub pizza: Pizza,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    /// Pizzas served by the restaurant, with their prices
    pub restaurant_pizzas: Vec<RestaurantPizzaItem>,
}

impl From<db::RestaurantDetail> for RestaurantDetail {
    fn from(detail: db::RestaurantDetail) -> Self {
        Self {
            id: detail.restaurant.id,
            name: detail.restaurant.name,
            address: detail.restaurant.address,
            restaurant_pizzas: detail
                .restaurant_pizzas
                .into_iter()
                .map(|(rp, pizza)| RestaurantPizzaItem {
                    id: rp.id,
                    price: rp.price,
                    pizza_id: rp.pizza_id,
                    pizza: pizza.into(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30, inclusive
    pub price: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub pizza_id: Option<i64>,
}

impl From<CreateRestaurantPizzaRequest> for db::CreateRestaurantPizza {
    fn from(payload: CreateRestaurantPizzaRequest) -> Self {
        Self {
            price: payload.price,
            restaurant_id: payload.restaurant_id,
            pizza_id: payload.pizza_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
    pub restaurant: Restaurant,
    pub pizza: Pizza,
}

impl From<db::RestaurantPizzaDetail> for RestaurantPizza {
    fn from(detail: db::RestaurantPizzaDetail) -> Self {
        Self {
            id: detail.restaurant_pizza.id,
            price: detail.restaurant_pizza.price,
            restaurant_id: detail.restaurant_pizza.restaurant_id,
            pizza_id: detail.restaurant_pizza.pizza_id,
            restaurant: detail.restaurant.into(),
            pizza: detail.pizza.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorsResponse {
    /// Error messages
    pub errors: Vec<String>,
}
