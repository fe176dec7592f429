use diesel::{prelude::*, sql_query, SqliteConnection};
use tracing::info;

use crate::models::CreateRestaurantPizza;
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::{RestaurantStore, StoreError};

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const RESTAURANT_PIZZAS: &[(usize, usize, i32)] = &[(0, 0, 1), (0, 1, 4), (1, 2, 5), (2, 0, 12)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces every row with the fixed seed data, restarting ids at 1.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        sql_query("DELETE FROM sqlite_sequence").execute(conn)?;

        let mut store = RestaurantStore::new(conn);
        let restaurants = RESTAURANTS
            .iter()
            .map(|(name, address)| store.create_restaurant(name, address))
            .collect::<Result<Vec<_>, _>>()?;
        let pizzas = PIZZAS
            .iter()
            .map(|(name, ingredients)| store.create_pizza(name, ingredients))
            .collect::<Result<Vec<_>, _>>()?;

        for &(r, p, price) in RESTAURANT_PIZZAS {
            store.create_restaurant_pizza(CreateRestaurantPizza {
                price: Some(price.into()),
                restaurant_id: Some(restaurants[r].id.into()),
                pizza_id: Some(pizzas[p].id.into()),
            })?;
        }

        let summary = SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            restaurant_pizzas: RESTAURANT_PIZZAS.len(),
        };
        info!(?summary, "seeded database");
        Ok(summary)
    })
}
