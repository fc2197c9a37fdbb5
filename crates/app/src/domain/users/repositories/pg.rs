//! Postgres Users Repository

use async_trait::async_trait;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::Db,
    domain::users::models::{Address, User, UserUuid},
};

use super::UsersRepository;

const FIND_USER_BY_EMAIL_SQL: &str = include_str!("../sql/find_user_by_email.sql");

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    db: Db,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(self.db.pool())
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        // Users without an address come back with NULL address columns.
        let address = match row.try_get::<Option<String>, _>("full_name")? {
            Some(full_name) => Some(Address {
                full_name,
                contact_number: row.try_get("contact_number")?,
                country: row.try_get("country")?,
                city: row.try_get("city")?,
                address_line: row.try_get("address_line")?,
                address_line_second: row.try_get("address_line_second")?,
            }),
            None => None,
        };

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            address,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestDb, fixtures};

    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn finds_user_with_address() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = PgUsersRepository::new(Db::new(test_db.pool().clone()));

        let uuid = fixtures::insert_user(test_db.pool(), "ada@example.com", true).await?;

        let user = repository
            .find_user_by_email("ada@example.com")
            .await?
            .ok_or("user not found")?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.address, Some(fixtures::address()));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn finds_user_without_address() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = PgUsersRepository::new(Db::new(test_db.pool().clone()));

        fixtures::insert_user(test_db.pool(), "grace@example.com", false).await?;

        let user = repository
            .find_user_by_email("grace@example.com")
            .await?
            .ok_or("user not found")?;

        assert!(user.address.is_none());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn unknown_email_is_none() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = PgUsersRepository::new(Db::new(test_db.pool().clone()));

        assert!(
            repository
                .find_user_by_email("nobody@example.com")
                .await?
                .is_none()
        );

        Ok(())
    }
}
