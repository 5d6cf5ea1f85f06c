// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Workflows live in domains/ and reach the backend through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAccountService)

use anyhow::Result;
use appwrite::{Account, DocumentList, Document, Query, Session, Token};
use async_trait::async_trait;
use serde_json::Value;

// =============================================================================
// Account Service Trait (Infrastructure - identities, OTP, sessions)
// =============================================================================

#[async_trait]
pub trait BaseAccountService: Send + Sync {
    /// Issue an email OTP bound to `user_id`
    async fn create_email_token(&self, user_id: &str, email: &str) -> Result<Token>;

    /// Exchange a user id and passcode for a session
    async fn create_session(&self, user_id: &str, secret: &str) -> Result<Session>;

    /// Resolve the account behind a session secret
    async fn get_account(&self, session_secret: &str) -> Result<Account>;

    /// Delete the session identified by `session_secret`
    async fn delete_current_session(&self, session_secret: &str) -> Result<()>;
}

// =============================================================================
// Document Store Trait (Infrastructure - collections of JSON documents)
// =============================================================================

#[async_trait]
pub trait BaseDocumentStore: Send + Sync {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<Value>>;

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document<Value>>;
}
