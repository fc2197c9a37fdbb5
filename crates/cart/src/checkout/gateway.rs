//! Order service client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;
use thiserror::Error;

use super::request::{OrderConfirmation, OrderRequest};

/// Failures submitting an order.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The order service could not be reached.
    #[error("could not reach the order service")]
    Network(#[source] reqwest::Error),

    /// The order service refused the order; `message` is shown to the shopper.
    #[error("{message}")]
    Rejected {
        /// HTTP status returned by the order service
        status: u16,

        /// Reason given by the order service
        message: String,
    },

    /// The confirmation body could not be decoded.
    #[error("unexpected response from the order service")]
    Decode(#[source] reqwest::Error),
}

/// Submits checkout requests to the order service.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit an order and wait for its confirmation.
    async fn submit(&self, request: &OrderRequest) -> Result<OrderConfirmation, GatewayError>;
}

/// [`OrderGateway`] talking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    base_url: String,
    http: Client,
}

impl HttpOrderGateway {
    /// Create a gateway for the order service at `base_url`,
    /// e.g. `"http://localhost:8698"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a gateway using an existing HTTP client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// The order creation endpoint.
    pub fn orders_url(&self) -> String {
        format!("{}/orders/add", self.base_url)
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit(&self, request: &OrderRequest) -> Result<OrderConfirmation, GatewayError> {
        let response = self
            .http
            .post(self.orders_url())
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(GatewayError::Network)?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
            });
        }

        response.json().await.map_err(GatewayError::Decode)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    brief: String,
}

/// Pull the human-readable reason out of an error response body.
fn rejection_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && !parsed.error.brief.is_empty()
    {
        return Some(parsed.error.brief);
    }

    let trimmed = body.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
