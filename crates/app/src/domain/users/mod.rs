//! Users
//!
//! Read-only lookup of shoppers and their stored shipping address. Account
//! management lives elsewhere.

pub mod models;
pub mod repositories;

pub use repositories::{InMemoryUsersRepository, PgUsersRepository, UsersRepository};
