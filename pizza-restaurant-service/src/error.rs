use std::fmt;

use diesel::ConnectionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Restaurant,
    Pizza,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Restaurant => write!(f, "Restaurant"),
            Entity::Pizza => write!(f, "Pizza"),
        }
    }
}

/// Field-level failures raised while building an insertable row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("validation errors")]
    PriceOutOfRange(i64),
    #[error("validation errors")]
    MissingPrice,
    #[error("validation errors")]
    EmptyField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(Entity),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Database(#[from] diesel::result::Error),
    #[error("Database unavailable: {0}")]
    Connection(String),
}

impl From<ConnectionError> for StoreError {
    fn from(err: ConnectionError) -> Self {
        StoreError::Connection(err.to_string())
    }
}
