//! REST client for the hotel backend.
//!
//! Wraps `GET /api/hotels`, `GET /api/rooms` and `POST /api/bookings`
//! using [`reqwest`]. Catalog reads go through the configured
//! [`RetryPolicy`]; booking submission is sent exactly once.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use staydesk_core::catalog::{Hotel, Room};
use staydesk_core::types::DbId;

use crate::retry::RetryPolicy;
use crate::{BookingProvider, CatalogProvider};

/// Message used when a failed booking response carries no `error` field.
pub const DEFAULT_BOOKING_ERROR: &str = "Booking failed";

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request did not complete within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The backend's `error` message, or the raw body.
        message: String,
    },

    /// The body was not the JSON shape we expect.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

impl ProviderError {
    /// Whether repeating the same request might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Request(e) => e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

/// Body of `POST /api/bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: DbId,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// What the backend told us about an accepted booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingReceipt {
    /// Backend-assigned id, if the response carried one.
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateBookingResponse {
    booking: Option<RemoteBooking>,
}

#[derive(Debug, Deserialize)]
struct RemoteBooking {
    id: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for one backend instance.
pub struct BackendApi {
    client: reqwest::Client,
    api_base: String,
    retry: RetryPolicy,
}

impl BackendApi {
    /// Create a client for `api_base` (e.g. `http://localhost:3001`) whose
    /// requests time out after `timeout`.
    pub fn new(
        api_base: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_base, retry))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_base: &str, retry: RetryPolicy) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            retry,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch a JSON list, retrying transient failures.
    ///
    /// A body that is not a JSON array is treated as an empty list.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}{}", self.api_base, path);
        let (client, url) = (&self.client, url.as_str());
        let body: serde_json::Value = self
            .retry
            .run(path, move || async move {
                let response = client.get(url).send().await?;
                Self::parse_response(response, None).await
            })
            .await?;

        if !body.is_array() {
            tracing::warn!(path, "Backend returned a non-array list body");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(body)?)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, otherwise turn the
    /// body into a [`ProviderError::Api`].
    ///
    /// The message is the body's `error` field when present. A JSON body
    /// without one, or an empty body, yields `fallback` (or the status line
    /// when there is none); any other body is passed through as text.
    async fn ensure_success(
        response: reqwest::Response,
        fallback: Option<&str>,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error: Some(error) }) if !error.trim().is_empty() => Some(error),
            Ok(_) => None,
            Err(_) if body.trim().is_empty() => None,
            Err(_) => Some(body),
        };
        Err(ProviderError::Api {
            status: status.as_u16(),
            message: message
                .or_else(|| fallback.map(str::to_string))
                .unwrap_or_else(|| status.to_string()),
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        fallback: Option<&str>,
    ) -> Result<T, ProviderError> {
        let response = Self::ensure_success(response, fallback).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CatalogProvider for BackendApi {
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>, ProviderError> {
        self.get_list("/api/hotels").await
    }

    async fn fetch_rooms(&self) -> Result<Vec<Room>, ProviderError> {
        self.get_list("/api/rooms").await
    }
}

#[async_trait]
impl BookingProvider for BackendApi {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingReceipt, ProviderError> {
        let response = self
            .client
            .post(format!("{}/api/bookings", self.api_base))
            .json(request)
            .send()
            .await?;

        let parsed: CreateBookingResponse =
            Self::parse_response(response, Some(DEFAULT_BOOKING_ERROR)).await?;

        let id = parsed
            .booking
            .and_then(|b| b.id)
            .and_then(|id| match id {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
        Ok(BookingReceipt { id })
    }
}
