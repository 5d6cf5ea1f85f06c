use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use crate::{send, AppwriteClient, AppwriteError, Document, DocumentList, Query};

/// Document endpoints.
pub struct Databases<'a> {
    client: &'a AppwriteClient,
}

impl<'a> Databases<'a> {
    pub(crate) fn new(client: &'a AppwriteClient) -> Self {
        Self { client }
    }

    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<T>, AppwriteError> {
        let path = format!("/databases/{database_id}/collections/{collection_id}/documents");
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_string()))
            .collect();

        let request = self.client.admin(Method::GET, &path).query(&params);
        send(request).await
    }

    pub async fn create_document<D: Serialize, T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<Document<T>, AppwriteError> {
        let path = format!("/databases/{database_id}/collections/{collection_id}/documents");
        let request = self
            .client
            .admin(Method::POST, &path)
            .json(&json!({ "documentId": document_id, "data": data }));
        send(request).await
    }
}
