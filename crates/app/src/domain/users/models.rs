//! User Models

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Shipping address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub full_name: String,
    pub contact_number: String,
    pub country: String,
    pub city: String,
    pub address_line: String,
    pub address_line_second: Option<String>,
}

/// User Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub address: Option<Address>,
}
