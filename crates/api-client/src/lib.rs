//! # Odonto API Client
//!
//! HTTP client for the clinic backend used by the authentication flows and
//! the diagnostics screen. The backend is an opaque request/response
//! boundary: every call carries the configured timeout and fails into one of
//! three categories, each with its own user-facing message.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors at the backend boundary
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The server answered with an error status; the code and body are kept
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request went out but no usable response came back
    #[error("no response from server: {0}")]
    Network(String),

    /// The request could not be constructed or sent at all
    #[error("request could not be prepared: {0}")]
    Request(String),
}

impl ApiClientError {
    /// Message shown to the operator for this category of failure
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiClientError::Status { .. } => "El servidor rechazó la solicitud.",
            ApiClientError::Network(_) => "No se pudo conectar con el servidor.",
            ApiClientError::Request(_) => "No se pudo preparar la solicitud.",
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            ApiClientError::Request(error.to_string())
        } else {
            ApiClientError::Network(error.to_string())
        }
    }
}

/// Registration payload for `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Credentials for `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Whatever the auth endpoints answer with; the portal only relies on the
/// token when one is present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Client for the clinic backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiClientError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiClientError> {
        self.execute(self.http.post(self.endpoint("/auth/register")).json(request))
            .await
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiClientError> {
        self.execute(self.http.post(self.endpoint("/auth/login")).json(request))
            .await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<AuthResponse, ApiClientError> {
        self.execute(self.http.post(self.endpoint("/auth/logout"))).await
    }

    /// `GET /auth/verify` with a bearer token
    pub async fn verify_token(&self, token: &str) -> Result<AuthResponse, ApiClientError> {
        self.execute(
            self.http
                .get(self.endpoint("/auth/verify"))
                .bearer_auth(token),
        )
        .await
    }

    /// `GET /api/User/obtenerUsuarios` — diagnostics listing, kept opaque
    pub async fn fetch_users(&self) -> Result<serde_json::Value, ApiClientError> {
        self.execute(self.http.get(self.endpoint("/api/User/obtenerUsuarios")))
            .await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "backend returned error status");
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ApiClient::new("https://api.example.com/", Duration::from_secs(10)).unwrap();
        assert_eq!(
            client.endpoint("/auth/login"),
            "https://api.example.com/auth/login"
        );
    }

    #[test]
    fn test_each_category_has_a_distinct_user_message() {
        let status = ApiClientError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        let network = ApiClientError::Network("timed out".to_string());
        let request = ApiClientError::Request("bad header".to_string());

        let messages = [
            status.user_message(),
            network.user_message(),
            request.user_message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn test_status_error_keeps_code_and_body() {
        let err = ApiClientError::Status {
            status: 422,
            body: "{\"message\":\"correo en uso\"}".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("422"));
        assert!(rendered.contains("correo en uso"));
    }

    #[test]
    fn test_auth_response_tolerates_unknown_shapes() {
        let parsed: AuthResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.token.is_none());

        let parsed: AuthResponse =
            serde_json::from_str("{\"token\":\"abc\",\"extra\":1}").unwrap();
        assert_eq!(parsed.token.as_deref(), Some("abc"));
    }
}
