//! HTTP client for the booking API.
//!
//! Used by the CLI commands to talk to a running server. The base URL comes
//! from `ROOMBOOK_URL` (default: `http://127.0.0.1:8000/api/v1`).

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::ErrorBody;
use crate::models::*;

/// Default URL for a locally running server.
const DEFAULT_URL: &str = "http://127.0.0.1:8000/api/v1";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client for the booking API.
#[derive(Debug, Clone)]
pub struct BookingClient {
    base_url: String,
    client: Client,
}

impl BookingClient {
    pub fn from_env() -> Self {
        let base_url = std::env::var("ROOMBOOK_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Handle response that may return empty body (204 No Content).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Server(format!("{}: {}", status, message)),
        }
    }

    // ============================================================
    // Rooms
    // ============================================================

    pub async fn list_rooms(&self) -> Result<Vec<Room>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/rooms").send().await?;
        self.handle_response(response).await
    }

    pub async fn list_available_rooms(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<Room>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/rooms/available")
            .query(query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Reservations
    // ============================================================

    pub async fn create_reservation(
        &self,
        input: &CreateReservationInput,
    ) -> Result<Reservation, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/reservations")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn cancel_reservation(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/reservations/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    pub async fn list_reservations(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/reservations")
            .query(filter)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
