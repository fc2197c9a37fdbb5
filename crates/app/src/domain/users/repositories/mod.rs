//! User Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::domain::users::models::User;

mod memory;
mod pg;

pub use memory::InMemoryUsersRepository;
pub use pg::PgUsersRepository;

/// Lookup of users by account email.
#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Find the user with the given email, including their stored address.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}
