//! Thin REST client for the Appwrite backend.
//!
//! Covers the pieces the storage app needs: email OTP tokens, sessions and
//! documents. Admin calls authenticate with the project API key; session
//! calls forward the user's session secret instead.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

mod account;
mod databases;
pub mod error;
pub mod models;
mod query;

pub use account::Accounts;
pub use databases::Databases;
pub use error::AppwriteError;
pub use models::{Account, Document, DocumentList, Session, Token};
pub use query::{Id, Query};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct AppwriteOptions {
    /// Base API url, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl AppwriteOptions {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Shared handle to one Appwrite project.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    options: AppwriteOptions,
    http: Client,
}

impl AppwriteClient {
    pub fn new(options: AppwriteOptions) -> Result<Self, AppwriteError> {
        let http = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { options, http })
    }

    pub fn account(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    pub fn databases(&self) -> Databases<'_> {
        Databases::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.options.endpoint.trim_end_matches('/'), path)
    }

    /// Request authenticated with the server API key.
    pub(crate) fn admin(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("X-Appwrite-Project", &self.options.project_id)
            .header("X-Appwrite-Key", &self.options.api_key)
    }

    /// Request acting as the user that owns `session_secret`.
    pub(crate) fn session(&self, method: Method, path: &str, session_secret: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("X-Appwrite-Project", &self.options.project_id)
            .header("X-Appwrite-Session", session_secret)
    }
}

pub(crate) async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AppwriteError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = AppwriteError::from_response(status.as_u16(), &body);
        tracing::debug!(error = %err, "Appwrite request rejected");
        return Err(err);
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub(crate) async fn send_empty(request: RequestBuilder) -> Result<(), AppwriteError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppwriteError::from_response(status.as_u16(), &body));
    }

    Ok(())
}
