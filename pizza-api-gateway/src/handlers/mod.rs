pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{Router, response::Json, routing::get};
use pizza_restaurant_service::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::models::WelcomeResponse;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse),
    ),
    tag = "root"
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Pizza API!".to_string(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        welcome,
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::models::WelcomeResponse,
            crate::models::Restaurant,
            crate::models::RestaurantDetail,
            crate::models::RestaurantPizzaItem,
            crate::models::Pizza,
            crate::models::CreateRestaurantPizzaRequest,
            crate::models::RestaurantPizza,
            crate::models::ApiErrorResponse,
            crate::models::ApiErrorsResponse
        )
    ),
    tags(
        (name = "root", description = "Service landing endpoint"),
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Priced restaurant pizza endpoints")
    ),
    info(
        title = "Pizza Restaurant API",
        description = "Restaurants, pizzas and the prices restaurants charge for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use diesel::connection::SimpleConnection;
    use pizza_restaurant_service::seed::seed;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    // Seeded rows:
    //   restaurants 1 "Karen's Pizza Shack", 2 "Sanjay's Pizza", 3 "Kiki's Pizza"
    //   pizzas 1 "Emma", 2 "Geri", 3 "Melanie"
    //   restaurant_pizzas 1 (r1, p1, 1), 2 (r1, p2, 4), 3 (r2, p3, 5), 4 (r3, p1, 12)
    async fn setup_app() -> Router {
        app(AppState {
            db: setup_database().await,
        })
    }

    async fn setup_database() -> Database {
        let db = Database::in_memory().unwrap();
        db.run(|conn| seed(conn)).await.unwrap();
        db
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<Value>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap())
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::delete(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_welcome() {
        let app = setup_app().await;
        let (status, body) = send(&app, get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Some(json!({ "message": "Welcome to the Pizza API!" })));
    }

    #[tokio::test]
    async fn test_list_restaurants() {
        let app = setup_app().await;
        let (status, body) = send(&app, get_request("/restaurants")).await;

        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(
            body[0],
            json!({ "id": 1, "name": "Karen's Pizza Shack", "address": "address1" })
        );
    }

    #[tokio::test]
    async fn test_get_restaurant() {
        let app = setup_app().await;
        let (status, body) = send(&app, get_request("/restaurants/1")).await;

        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["name"], "Karen's Pizza Shack");
        assert_eq!(body["address"], "address1");
        assert_eq!(
            body["restaurant_pizzas"],
            json!([
                {
                    "id": 1,
                    "price": 1,
                    "pizza_id": 1,
                    "pizza": { "id": 1, "name": "Emma", "ingredients": "Dough, Tomato Sauce, Cheese" }
                },
                {
                    "id": 2,
                    "price": 4,
                    "pizza_id": 2,
                    "pizza": { "id": 2, "name": "Geri", "ingredients": "Dough, Tomato Sauce, Cheese, Pepperoni" }
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_get_restaurant_not_found() {
        let app = setup_app().await;

        for uri in ["/restaurants/999", "/restaurants/not-a-number"] {
            let (status, body) = send(&app, get_request(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, Some(json!({ "error": "Restaurant not found" })));
        }
    }

    #[tokio::test]
    async fn test_delete_restaurant() {
        let app = setup_app().await;

        let (status, body) = send(&app, delete_request("/restaurants/1")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, None);

        let (status, _) = send(&app, get_request("/restaurants/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, get_request("/restaurants")).await;
        assert_eq!(body.unwrap().as_array().unwrap().len(), 2);

        // Other restaurants keep their pizzas.
        let (_, body) = send(&app, get_request("/restaurants/3")).await;
        assert_eq!(body.unwrap()["restaurant_pizzas"][0]["id"], 4);

        let (status, body) = send(&app, delete_request("/restaurants/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Some(json!({ "error": "Restaurant not found" })));
    }

    #[tokio::test]
    async fn test_list_pizzas() {
        let app = setup_app().await;
        let (status, body) = send(&app, get_request("/pizzas")).await;

        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(
            body[2],
            json!({
                "id": 3,
                "name": "Melanie",
                "ingredients": "Dough, Sauce, Ricotta, Red peppers, Mustard"
            })
        );
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza() {
        let app = setup_app().await;
        let (status, body) = send(
            &app,
            post_json(
                "/restaurant_pizzas",
                json!({ "price": 15, "restaurant_id": 1, "pizza_id": 2 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            Some(json!({
                "id": 5,
                "price": 15,
                "restaurant_id": 1,
                "pizza_id": 2,
                "restaurant": { "id": 1, "name": "Karen's Pizza Shack", "address": "address1" },
                "pizza": { "id": 2, "name": "Geri", "ingredients": "Dough, Tomato Sauce, Cheese, Pepperoni" }
            }))
        );

        let (_, body) = send(&app, get_request("/restaurants/1")).await;
        assert_eq!(body.unwrap()["restaurant_pizzas"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_invalid_price() {
        let app = setup_app().await;

        for body in [
            json!({ "price": 45, "restaurant_id": 1, "pizza_id": 2 }),
            json!({ "price": 0, "restaurant_id": 1, "pizza_id": 2 }),
            json!({ "restaurant_id": 1, "pizza_id": 2 }),
        ] {
            let (status, body) = send(&app, post_json("/restaurant_pizzas", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, Some(json!({ "errors": ["validation errors"] })));
        }

        let (_, body) = send(&app, get_request("/restaurants/1")).await;
        assert_eq!(body.unwrap()["restaurant_pizzas"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_missing_parents() {
        let app = setup_app().await;

        let cases = [
            (
                json!({ "price": 10, "restaurant_id": 999, "pizza_id": 1 }),
                "Restaurant not found",
            ),
            (
                json!({ "price": 10, "restaurant_id": 1, "pizza_id": 999 }),
                "Pizza not found",
            ),
            (json!({ "price": 10 }), "Restaurant not found"),
            (json!({ "price": 10, "restaurant_id": 1 }), "Pizza not found"),
        ];
        for (request, message) in cases {
            let (status, body) = send(&app, post_json("/restaurant_pizzas", request)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, Some(json!({ "errors": [message] })));
        }

        let (_, body) = send(&app, get_request("/pizzas")).await;
        assert_eq!(body.unwrap().as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_values_beyond_i32() {
        let app = setup_app().await;

        let cases = [
            (
                json!({ "price": 3000000000i64, "restaurant_id": 1, "pizza_id": 2 }),
                "validation errors",
            ),
            (
                json!({ "price": -3000000000i64, "restaurant_id": 1, "pizza_id": 2 }),
                "validation errors",
            ),
            (
                json!({ "price": 10, "restaurant_id": 3000000000i64, "pizza_id": 2 }),
                "Restaurant not found",
            ),
            (
                json!({ "price": 10, "restaurant_id": 1, "pizza_id": 3000000000i64 }),
                "Pizza not found",
            ),
        ];
        for (request, message) in cases {
            let (status, body) = send(&app, post_json("/restaurant_pizzas", request)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, Some(json!({ "errors": [message] })));
        }

        let (_, body) = send(&app, get_request("/restaurants/1")).await;
        assert_eq!(body.unwrap()["restaurant_pizzas"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_persistence_failure() {
        let db = setup_database().await;
        db.run(|conn| {
            conn.batch_execute(
                "CREATE TRIGGER reject_restaurant_pizzas BEFORE INSERT ON restaurant_pizzas \
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )?;
            Ok(())
        })
        .await
        .unwrap();
        let app = app(AppState { db });

        let (status, body) = send(
            &app,
            post_json(
                "/restaurant_pizzas",
                json!({ "price": 15, "restaurant_id": 1, "pizza_id": 2 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, Some(json!({ "errors": ["disk full"] })));

        let (status, body) = send(&app, get_request("/restaurants/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["restaurant_pizzas"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_malformed_body() {
        let app = setup_app().await;

        let request = Request::post("/restaurant_pizzas")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ price: 10"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.unwrap()["errors"].as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            post_json(
                "/restaurant_pizzas",
                json!({ "price": "ten", "restaurant_id": 1, "pizza_id": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let app = setup_app().await;
        let (status, body) = send(&app, get_request("/api-docs/openapi.json")).await;

        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["info"]["title"], "Pizza Restaurant API");
        assert!(body["paths"].get("/restaurant_pizzas").is_some());
        assert!(body["paths"].get("/restaurants/{id}").is_some());
    }
}
