use anyhow::Result;
use appwrite::{Account, AppwriteClient, Document, DocumentList, Query, Session, Token};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::kernel::{BaseAccountService, BaseDocumentStore};

// =============================================================================
// AppwriteClient Adapter (implements BaseAccountService + BaseDocumentStore)
// =============================================================================

/// Wrapper around AppwriteClient that implements the kernel traits
pub struct AppwriteAdapter(pub Arc<AppwriteClient>);

impl AppwriteAdapter {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseAccountService for AppwriteAdapter {
    async fn create_email_token(&self, user_id: &str, email: &str) -> Result<Token> {
        Ok(self.0.account().create_email_token(user_id, email).await?)
    }

    async fn create_session(&self, user_id: &str, secret: &str) -> Result<Session> {
        Ok(self.0.account().create_session(user_id, secret).await?)
    }

    async fn get_account(&self, session_secret: &str) -> Result<Account> {
        Ok(self.0.account().get(session_secret).await?)
    }

    async fn delete_current_session(&self, session_secret: &str) -> Result<()> {
        Ok(self
            .0
            .account()
            .delete_session(session_secret, "current")
            .await?)
    }
}

#[async_trait]
impl BaseDocumentStore for AppwriteAdapter {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<Value>> {
        Ok(self
            .0
            .databases()
            .list_documents(database_id, collection_id, queries)
            .await?)
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document<Value>> {
        Ok(self
            .0
            .databases()
            .create_document(database_id, collection_id, document_id, &data)
            .await?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Where user records live in the document store
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub database_id: String,
    pub users_collection_id: String,
}

/// Server dependencies accessible to workflows (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub accounts: Arc<dyn BaseAccountService>,
    pub documents: Arc<dyn BaseDocumentStore>,
    pub directory: DirectoryConfig,
    pub avatar_placeholder_url: String,
    /// Emit the `Secure` attribute on session cookies. Only off for local HTTP dev.
    pub cookie_secure: bool,
}

impl ServerDeps {
    pub fn new(
        accounts: Arc<dyn BaseAccountService>,
        documents: Arc<dyn BaseDocumentStore>,
        directory: DirectoryConfig,
        avatar_placeholder_url: String,
        cookie_secure: bool,
    ) -> Self {
        Self {
            accounts,
            documents,
            directory,
            avatar_placeholder_url,
            cookie_secure,
        }
    }

    /// Both kernel traits backed by one shared Appwrite client
    pub fn from_appwrite(
        client: Arc<AppwriteClient>,
        directory: DirectoryConfig,
        avatar_placeholder_url: String,
        cookie_secure: bool,
    ) -> Self {
        let adapter = Arc::new(AppwriteAdapter::new(client));
        Self::new(
            adapter.clone(),
            adapter,
            directory,
            avatar_placeholder_url,
            cookie_secure,
        )
    }
}
