use std::env;

use pizza_restaurant_service::database_url;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5555";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
}

impl Config {
    /// Reads `DATABASE_URL` and `BIND_ADDRESS`, loading `.env` first.
    pub fn from_env() -> Self {
        let database_url = database_url();
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        Self {
            database_url,
            bind_address,
        }
    }
}
