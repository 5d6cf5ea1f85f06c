use anyhow::Result;
use appwrite::{Document, Id, Query};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::kernel::ServerDeps;

/// Directory record for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Document id in the users collection (not the account id)
    #[serde(rename = "$id")]
    pub id: String,
    pub account_id: String,
    pub full_name: String,
    pub email: String,
    pub avatar: String,
}

/// Fields written when a record is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    pub account_id: String,
}

// =============================================================================
// Directory Queries - ALL document access for users goes through here
// =============================================================================

impl UserRecord {
    /// Exact-match lookup on the email attribute. Case and whitespace are
    /// preserved as given.
    pub async fn find_by_email(email: &str, deps: &ServerDeps) -> Result<Option<Self>> {
        debug!(email = %email, "Looking up user by email");
        Self::find_one(Query::equal("email", [email]), deps).await
    }

    pub async fn find_by_account_id(account_id: &str, deps: &ServerDeps) -> Result<Option<Self>> {
        debug!(account_id = %account_id, "Looking up user by account id");
        Self::find_one(Query::equal("accountId", [account_id]), deps).await
    }

    /// Write a new record under a fresh document id
    pub async fn create(new_user: NewUser, deps: &ServerDeps) -> Result<Self> {
        let data = serde_json::to_value(&new_user)?;
        let document = deps
            .documents
            .create_document(
                &deps.directory.database_id,
                &deps.directory.users_collection_id,
                &Id::unique(),
                data,
            )
            .await?;

        Self::from_document(document)
    }

    async fn find_one(query: Query, deps: &ServerDeps) -> Result<Option<Self>> {
        let result = deps
            .documents
            .list_documents(
                &deps.directory.database_id,
                &deps.directory.users_collection_id,
                &[query, Query::limit(1)],
            )
            .await?;

        result.first().map(Self::from_document).transpose()
    }

    fn from_document(document: Document<Value>) -> Result<Self> {
        let fields: NewUser = serde_json::from_value(document.data)?;
        Ok(Self {
            id: document.id,
            account_id: fields.account_id,
            full_name: fields.full_name,
            email: fields.email,
            avatar: fields.avatar,
        })
    }
}
