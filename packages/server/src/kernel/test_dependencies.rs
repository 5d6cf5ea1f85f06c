// TestDependencies - mock implementations for testing
//
// In-memory stand-ins for the Appwrite account and document APIs that can be
// injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use appwrite::{Account, AppwriteError, Document, DocumentList, Query, Session, Token};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{BaseAccountService, BaseDocumentStore, DirectoryConfig, ServerDeps};

/// Passcode every mock OTP is issued with unless overridden
pub const MOCK_PASSCODE: &str = "123456";

pub const MOCK_DATABASE_ID: &str = "test-db";
pub const MOCK_USERS_COLLECTION_ID: &str = "test-users";
pub const MOCK_AVATAR_URL: &str = "https://example.org/avatar.png";

/// Rejection shaped like a real backend response
fn api_error(status: u16, kind: &str, message: &str) -> anyhow::Error {
    AppwriteError::Api {
        status,
        code: status,
        kind: kind.to_string(),
        message: message.to_string(),
    }
    .into()
}

// =============================================================================
// Mock Account Service
// =============================================================================

/// Arguments captured from a create_email_token call
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCall {
    pub user_id: String,
    pub email: String,
}

pub struct MockAccountService {
    /// Account ids handed out instead of the requested one (front first)
    issued_ids: Mutex<VecDeque<String>>,
    token_failures: Mutex<VecDeque<String>>,
    passcode: Mutex<String>,
    /// account id -> outstanding passcode
    pending: Mutex<HashMap<String, String>>,
    /// account id -> email the OTP was sent to
    emails: Mutex<HashMap<String, String>>,
    /// session secret -> (session id, account id)
    sessions: Mutex<HashMap<String, (String, String)>>,
    token_calls: Mutex<Vec<TokenCall>>,
    session_calls: Mutex<Vec<(String, String)>>,
    delete_failures: Mutex<VecDeque<String>>,
    account_failures: Mutex<VecDeque<anyhow::Error>>,
    next_session: Mutex<u32>,
}

impl MockAccountService {
    pub fn new() -> Self {
        Self {
            issued_ids: Mutex::new(VecDeque::new()),
            token_failures: Mutex::new(VecDeque::new()),
            passcode: Mutex::new(MOCK_PASSCODE.to_string()),
            pending: Mutex::new(HashMap::new()),
            emails: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
            token_calls: Mutex::new(Vec::new()),
            session_calls: Mutex::new(Vec::new()),
            delete_failures: Mutex::new(VecDeque::new()),
            account_failures: Mutex::new(VecDeque::new()),
            next_session: Mutex::new(0),
        }
    }

    /// Hand out these account ids (in order) instead of echoing the requested id.
    /// An empty string simulates a token without a user id.
    pub fn with_account_ids(self, ids: &[&str]) -> Self {
        self.issued_ids
            .lock()
            .unwrap()
            .extend(ids.iter().map(|id| id.to_string()));
        self
    }

    /// Fail the next OTP issuance with this message
    pub fn with_token_failure(self, message: &str) -> Self {
        self.token_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
        self
    }

    /// Fail the next session deletion with this message
    pub fn with_delete_failure(self, message: &str) -> Self {
        self.delete_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
        self
    }

    /// Fail the next account lookup. A `status` of 0 is a transport failure
    /// with no backend response.
    pub fn with_account_failure(self, status: u16, message: &str) -> Self {
        let error = match status {
            0 => anyhow!(message.to_string()),
            _ => api_error(status, "general_server_error", message),
        };
        self.account_failures.lock().unwrap().push_back(error);
        self
    }

    pub fn with_passcode(self, passcode: &str) -> Self {
        *self.passcode.lock().unwrap() = passcode.to_string();
        self
    }

    /// Register a live session without going through OTP
    pub fn with_session(self, secret: &str, account_id: &str) -> Self {
        self.sessions.lock().unwrap().insert(
            secret.to_string(),
            (format!("sess_{}", account_id), account_id.to_string()),
        );
        self
    }

    pub fn token_calls(&self) -> Vec<TokenCall> {
        self.token_calls.lock().unwrap().clone()
    }

    pub fn session_calls(&self) -> Vec<(String, String)> {
        self.session_calls.lock().unwrap().clone()
    }

    pub fn has_session(&self, secret: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(secret)
    }
}

impl Default for MockAccountService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAccountService for MockAccountService {
    async fn create_email_token(&self, user_id: &str, email: &str) -> Result<Token> {
        self.token_calls.lock().unwrap().push(TokenCall {
            user_id: user_id.to_string(),
            email: email.to_string(),
        });

        if let Some(message) = self.token_failures.lock().unwrap().pop_front() {
            return Err(anyhow!(message));
        }

        let account_id = self
            .issued_ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| user_id.to_string());

        if !account_id.is_empty() {
            let passcode = self.passcode.lock().unwrap().clone();
            self.pending
                .lock()
                .unwrap()
                .insert(account_id.clone(), passcode);
            self.emails
                .lock()
                .unwrap()
                .insert(account_id.clone(), email.to_string());
        }

        Ok(Token {
            id: format!("tok_{}", account_id),
            user_id: account_id,
            secret: String::new(),
            expire: Utc::now() + Duration::minutes(15),
        })
    }

    async fn create_session(&self, user_id: &str, secret: &str) -> Result<Session> {
        self.session_calls
            .lock()
            .unwrap()
            .push((user_id.to_string(), secret.to_string()));

        let mut pending = self.pending.lock().unwrap();
        let valid = pending
            .get(user_id)
            .is_some_and(|expected| expected == secret);
        if !valid {
            return Err(api_error(
                401,
                "user_invalid_token",
                "Invalid token passed in the request.",
            ));
        }
        pending.remove(user_id);
        drop(pending);

        let n = {
            let mut next = self.next_session.lock().unwrap();
            *next += 1;
            *next
        };
        let session_id = format!("sess_{}", n);
        let session_secret = format!("secret_{}", n);

        self.sessions.lock().unwrap().insert(
            session_secret.clone(),
            (session_id.clone(), user_id.to_string()),
        );

        Ok(Session {
            id: session_id,
            user_id: user_id.to_string(),
            secret: session_secret,
            expire: Utc::now() + Duration::days(365),
        })
    }

    async fn get_account(&self, session_secret: &str) -> Result<Account> {
        if let Some(error) = self.account_failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        let sessions = self.sessions.lock().unwrap();
        let (_, account_id) = sessions
            .get(session_secret)
            .ok_or_else(|| {
                api_error(
                    401,
                    "general_unauthorized_scope",
                    "User (role: guests) missing scope (account)",
                )
            })?;

        let email = self
            .emails
            .lock()
            .unwrap()
            .get(account_id)
            .cloned()
            .unwrap_or_default();

        Ok(Account {
            id: account_id.clone(),
            name: String::new(),
            email,
            email_verification: true,
        })
    }

    async fn delete_current_session(&self, session_secret: &str) -> Result<()> {
        if let Some(message) = self.delete_failures.lock().unwrap().pop_front() {
            return Err(anyhow!(message));
        }

        self.sessions
            .lock()
            .unwrap()
            .remove(session_secret)
            .map(|_| ())
            .ok_or_else(|| {
                api_error(
                    404,
                    "user_session_not_found",
                    "The current user session could not be found.",
                )
            })
    }
}

// =============================================================================
// Mock Document Store
// =============================================================================

pub struct MockDocumentStore {
    /// collection id -> documents
    collections: Mutex<HashMap<String, Vec<Document<Value>>>>,
    create_failures: Mutex<VecDeque<String>>,
    list_failures: Mutex<VecDeque<String>>,
    list_calls: Mutex<Vec<Vec<Query>>>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            create_failures: Mutex::new(VecDeque::new()),
            list_failures: Mutex::new(VecDeque::new()),
            list_calls: Mutex::new(Vec::new()),
        }
    }

    /// Seed a document
    pub fn with_document(self, collection_id: &str, document_id: &str, data: Value) -> Self {
        self.collections
            .lock()
            .unwrap()
            .entry(collection_id.to_string())
            .or_default()
            .push(Document {
                id: document_id.to_string(),
                collection_id: collection_id.to_string(),
                database_id: MOCK_DATABASE_ID.to_string(),
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
                data,
            });
        self
    }

    pub fn with_create_failure(self, message: &str) -> Self {
        self.create_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
        self
    }

    pub fn with_list_failure(self, message: &str) -> Self {
        self.list_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
        self
    }

    pub fn documents(&self, collection_id: &str) -> Vec<Document<Value>> {
        self.collections
            .lock()
            .unwrap()
            .get(collection_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn list_calls(&self) -> Vec<Vec<Query>> {
        self.list_calls.lock().unwrap().clone()
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(doc: &Document<Value>, query: &Query) -> bool {
    match (query.method(), query.attribute()) {
        ("equal", Some(attribute)) => doc
            .data
            .get(attribute)
            .is_some_and(|field| query.values().contains(field)),
        _ => true,
    }
}

#[async_trait]
impl BaseDocumentStore for MockDocumentStore {
    async fn list_documents(
        &self,
        _database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<Value>> {
        self.list_calls.lock().unwrap().push(queries.to_vec());

        if let Some(message) = self.list_failures.lock().unwrap().pop_front() {
            return Err(anyhow!(message));
        }

        let limit = queries
            .iter()
            .find(|q| q.method() == "limit")
            .and_then(|q| q.values().first())
            .and_then(Value::as_u64)
            .map(|n| n as usize);

        let found: Vec<Document<Value>> = self
            .documents(collection_id)
            .into_iter()
            .filter(|doc| queries.iter().all(|q| matches(doc, q)))
            .collect();

        let total = found.len() as u64;
        let documents = match limit {
            Some(n) => found.into_iter().take(n).collect(),
            None => found,
        };

        Ok(DocumentList { total, documents })
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Document<Value>> {
        if let Some(message) = self.create_failures.lock().unwrap().pop_front() {
            return Err(anyhow!(message));
        }

        let now = Utc::now();
        let document = Document {
            id: document_id.to_string(),
            collection_id: collection_id.to_string(),
            database_id: database_id.to_string(),
            created_at: Some(now),
            updated_at: Some(now),
            data,
        };

        self.collections
            .lock()
            .unwrap()
            .entry(collection_id.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock services plus the ServerDeps built from them.
///
/// Keep the handle around to inspect recorded calls after running a workflow.
pub struct TestDependencies {
    pub accounts: Arc<MockAccountService>,
    pub documents: Arc<MockDocumentStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_mocks(MockAccountService::new(), MockDocumentStore::new())
    }

    pub fn with_mocks(accounts: MockAccountService, documents: MockDocumentStore) -> Self {
        Self {
            accounts: Arc::new(accounts),
            documents: Arc::new(documents),
        }
    }

    pub fn directory() -> DirectoryConfig {
        DirectoryConfig {
            database_id: MOCK_DATABASE_ID.to_string(),
            users_collection_id: MOCK_USERS_COLLECTION_ID.to_string(),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.accounts.clone(),
            self.documents.clone(),
            Self::directory(),
            MOCK_AVATAR_URL.to_string(),
            true,
        )
    }

    /// Users currently stored in the mock directory
    pub fn users(&self) -> Vec<Document<Value>> {
        self.documents.documents(MOCK_USERS_COLLECTION_ID)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
