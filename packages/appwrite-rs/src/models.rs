//! Response shapes returned by the Appwrite REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email OTP token. `user_id` is the account the passcode is bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    /// Only populated for server (API key) callers.
    #[serde(default)]
    pub secret: String,
    pub expire: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub secret: String,
    pub expire: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_verification: bool,
}

/// A stored document: system attributes plus the collection's own fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

impl<T> DocumentList<T> {
    /// First matching document, if the result set is non-empty.
    pub fn first(self) -> Option<Document<T>> {
        if self.total == 0 {
            return None;
        }
        self.documents.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Profile {
        full_name: String,
        email: String,
    }

    #[test]
    fn test_document_flattens_collection_fields() {
        let raw = json!({
            "$id": "doc_1",
            "$collectionId": "users",
            "$databaseId": "main",
            "$createdAt": "2024-05-01T10:00:00.000+00:00",
            "$updatedAt": "2024-05-01T10:00:00.000+00:00",
            "$permissions": [],
            "fullName": "A B",
            "email": "a@x.com"
        });

        let doc: Document<Profile> = serde_json::from_value(raw).unwrap();
        assert_eq!(doc.id, "doc_1");
        assert_eq!(doc.collection_id, "users");
        assert_eq!(doc.data.full_name, "A B");
        assert_eq!(doc.data.email, "a@x.com");
        assert!(doc.created_at.is_some());
    }

    #[test]
    fn test_first_respects_total() {
        let empty: DocumentList<serde_json::Value> = DocumentList {
            total: 0,
            documents: vec![],
        };
        assert!(empty.first().is_none());
    }

    #[test]
    fn test_token_parses_offset_timestamp() {
        let token: Token = serde_json::from_value(json!({
            "$id": "tok_1",
            "$createdAt": "2024-05-01T10:00:00.000+00:00",
            "userId": "acc_123",
            "secret": "",
            "expire": "2024-05-01T10:15:00.000+00:00",
            "phrase": ""
        }))
        .unwrap();

        assert_eq!(token.user_id, "acc_123");
        assert!(token.secret.is_empty());
    }
}
