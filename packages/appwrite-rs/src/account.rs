use reqwest::Method;
use serde_json::json;

use crate::{send, send_empty, Account, AppwriteClient, AppwriteError, Session, Token};

/// Account and session endpoints.
pub struct Accounts<'a> {
    client: &'a AppwriteClient,
}

impl<'a> Accounts<'a> {
    pub(crate) fn new(client: &'a AppwriteClient) -> Self {
        Self { client }
    }

    /// Email a one-time passcode. `user_id` becomes the account id if no
    /// account with this email exists yet.
    pub async fn create_email_token(&self, user_id: &str, email: &str) -> Result<Token, AppwriteError> {
        let request = self
            .client
            .admin(Method::POST, "/account/tokens/email")
            .json(&json!({ "userId": user_id, "email": email }));
        send(request).await
    }

    /// Exchange a user id and passcode for a session.
    pub async fn create_session(&self, user_id: &str, secret: &str) -> Result<Session, AppwriteError> {
        let request = self
            .client
            .admin(Method::POST, "/account/sessions/token")
            .json(&json!({ "userId": user_id, "secret": secret }));
        send(request).await
    }

    /// Account that owns the session.
    pub async fn get(&self, session_secret: &str) -> Result<Account, AppwriteError> {
        let request = self.client.session(Method::GET, "/account", session_secret);
        send(request).await
    }

    /// Delete a session; pass `"current"` for the one the secret belongs to.
    pub async fn delete_session(&self, session_secret: &str, session_id: &str) -> Result<(), AppwriteError> {
        let path = format!("/account/sessions/{session_id}");
        let request = self.client.session(Method::DELETE, &path, session_secret);
        send_empty(request).await
    }
}
