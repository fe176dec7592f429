use diesel::{insert_into, prelude::*, SqliteConnection};
use tracing::debug;

use crate::error::{Entity, StoreError, ValidationError};
use crate::models::{
    CreateRestaurantPizza, NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Price, Restaurant,
    RestaurantDetail, RestaurantPizza, RestaurantPizzaDetail,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub struct RestaurantStore<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> RestaurantStore<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn list_restaurants(&mut self) -> Result<Vec<Restaurant>, StoreError> {
        let results = restaurants::table
            .select(Restaurant::as_select())
            .order(restaurants::id.asc())
            .load(self.conn)?;
        Ok(results)
    }

    /// Loads a restaurant together with every pizza it prices.
    pub fn get_restaurant(&mut self, restaurant_id: i32) -> Result<RestaurantDetail, StoreError> {
        let restaurant = find_restaurant(self.conn, restaurant_id)?;

        let restaurant_pizzas = RestaurantPizza::belonging_to(&restaurant)
            .inner_join(pizzas::table)
            .select((RestaurantPizza::as_select(), Pizza::as_select()))
            .order(restaurant_pizzas::id.asc())
            .load::<(RestaurantPizza, Pizza)>(self.conn)?;

        Ok(RestaurantDetail {
            restaurant,
            restaurant_pizzas,
        })
    }

    /// Deletes the restaurant's associations, then the restaurant, in one transaction.
    pub fn delete_restaurant(&mut self, restaurant_id: i32) -> Result<(), StoreError> {
        self.conn.transaction::<_, StoreError, _>(|conn| {
            let restaurant = find_restaurant(conn, restaurant_id)?;

            let removed = diesel::delete(
                restaurant_pizzas::table
                    .filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
            )
            .execute(conn)?;
            diesel::delete(restaurants::table.find(restaurant.id)).execute(conn)?;

            debug!(restaurant_id, removed, "deleted restaurant");
            Ok(())
        })
    }

    pub fn list_pizzas(&mut self) -> Result<Vec<Pizza>, StoreError> {
        let results = pizzas::table
            .select(Pizza::as_select())
            .order(pizzas::id.asc())
            .load(self.conn)?;
        Ok(results)
    }

    /// Resolves both parents, validates the price and inserts the association.
    ///
    /// Nothing is written unless every step succeeds.
    pub fn create_restaurant_pizza(
        &mut self,
        payload: CreateRestaurantPizza,
    ) -> Result<RestaurantPizzaDetail, StoreError> {
        self.conn.transaction::<_, StoreError, _>(|conn| {
            let restaurant_id = row_id(payload.restaurant_id, Entity::Restaurant)?;
            let restaurant = find_restaurant(conn, restaurant_id)?;

            let pizza_id = row_id(payload.pizza_id, Entity::Pizza)?;
            let pizza = find_pizza(conn, pizza_id)?;

            let price = Price::try_from(payload.price.ok_or(ValidationError::MissingPrice)?)?;
            let new_restaurant_pizza = NewRestaurantPizza::new(price, &restaurant, &pizza);

            let restaurant_pizza = insert_into(restaurant_pizzas::table)
                .values(&new_restaurant_pizza)
                .returning(RestaurantPizza::as_returning())
                .get_result(conn)?;

            debug!(
                id = restaurant_pizza.id,
                restaurant_id, pizza_id, "created restaurant pizza"
            );
            Ok(RestaurantPizzaDetail {
                restaurant_pizza,
                restaurant,
                pizza,
            })
        })
    }

    pub fn create_restaurant(&mut self, name: &str, address: &str) -> Result<Restaurant, StoreError> {
        let new_restaurant = NewRestaurant::new(name, address)?;
        let restaurant = insert_into(restaurants::table)
            .values(&new_restaurant)
            .returning(Restaurant::as_returning())
            .get_result(self.conn)?;
        Ok(restaurant)
    }

    pub fn create_pizza(&mut self, name: &str, ingredients: &str) -> Result<Pizza, StoreError> {
        let pizza = insert_into(pizzas::table)
            .values(&NewPizza {
                name: name.to_string(),
                ingredients: ingredients.to_string(),
            })
            .returning(Pizza::as_returning())
            .get_result(self.conn)?;
        Ok(pizza)
    }
}

// An id that is absent or outside the key range cannot name a row.
fn row_id(id: Option<i64>, entity: Entity) -> Result<i32, StoreError> {
    id.and_then(|id| i32::try_from(id).ok())
        .ok_or(StoreError::NotFound(entity))
}

fn find_restaurant(conn: &mut SqliteConnection, id: i32) -> Result<Restaurant, StoreError> {
    restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound(Entity::Restaurant))
}

fn find_pizza(conn: &mut SqliteConnection, id: i32) -> Result<Pizza, StoreError> {
    pizzas::table
        .find(id)
        .select(Pizza::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound(Entity::Pizza))
}
