//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::products::models::ProductUuid;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("unknown user")]
    UnknownUser,

    #[error("user has no shipping address")]
    MissingAddress,

    #[error("unknown product: {0}")]
    UnknownProduct(ProductUuid),

    #[error("order not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Short label for metrics and logs; `None` for faults that are not a
    /// rejection of the request.
    #[must_use]
    pub const fn rejection_reason(&self) -> Option<&'static str> {
        match self {
            Self::Malformed(_) => Some("malformed"),
            Self::UnknownUser => Some("unknown_user"),
            Self::MissingAddress => Some("missing_address"),
            Self::UnknownProduct(_) => Some("unknown_product"),
            Self::NotFound | Self::Sql(_) => None,
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
