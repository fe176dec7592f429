use diesel::prelude::*;

use crate::error::ValidationError;
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    name: String,
    address: String,
}

impl NewRestaurant {
    pub fn new(name: &str, address: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        let address = address.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if address.is_empty() {
            return Err(ValidationError::EmptyField("address"));
        }

        Ok(Self {
            name: name.to_string(),
            address: address.to_string(),
        })
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// A menu price, always within `Price::MIN..=Price::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i32);

impl Price {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 30;

    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::PriceOutOfRange(value.into()))
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        i32::try_from(value)
            .map_err(|_| ValidationError::PriceOutOfRange(value))
            .and_then(Price::new)
    }
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(price: Price, restaurant: &Restaurant, pizza: &Pizza) -> Self {
        Self {
            price: price.get(),
            restaurant_id: restaurant.id,
            pizza_id: pizza.id,
        }
    }
}

/// Raw association input; absent keys fail lookup or validation.
///
/// Values are taken as `i64` so that numbers outside the column range still
/// reach the range check or the lookup instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRestaurantPizza {
    pub price: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub pizza_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub restaurant_pizzas: Vec<(RestaurantPizza, Pizza)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantPizzaDetail {
    pub restaurant_pizza: RestaurantPizza,
    pub restaurant: Restaurant,
    pub pizza: Pizza,
}
