//! Shopper Session

use serde::{Deserialize, Serialize};

/// Shipping address stored on the shopper's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Recipient name
    pub full_name: String,

    /// Recipient phone number
    pub contact_number: String,

    /// Country
    pub country: String,

    /// City
    pub city: String,

    /// First address line
    pub address_line: String,

    /// Second address line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_second: Option<String>,
}

/// The authenticated shopper, as handed over by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shopper {
    /// Account email, used by the order service to resolve the user
    pub email: String,

    /// Stored shipping address, if the shopper has set one
    pub address: Option<Address>,
}
