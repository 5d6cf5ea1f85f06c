//! Test harness that drives the full router against mock backend services.
//!
//! Each test gets fresh in-memory account and document mocks, so tests are
//! independent and need no running backend.

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        Method, Request, StatusCode,
    },
    Router,
};
use serde_json::Value;
use server_core::kernel::{MockAccountService, MockDocumentStore, TestDependencies};
use server_core::server::{build_app, AppOptions};
use test_context::AsyncTestContext;
use tower::ServiceExt;

/// Response captured from the router
pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookies: Vec<String>,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` pair of the first Set-Cookie for `name`
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let prefix = format!("{}=", name);
        self.set_cookies
            .iter()
            .find(|c| c.starts_with(&prefix))
            .and_then(|c| c.split(';').next())
            .map(|pair| pair[prefix.len()..].to_string())
    }
}

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let res = ctx.post("/api/auth/sign-in", json!({ "email": "a@x.com" }), None).await;
/// }
/// ```
pub struct TestHarness {
    /// Mock services - inspect these after a request
    pub deps: TestDependencies,
    router: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_mocks(MockAccountService::new(), MockDocumentStore::new())
    }

    pub fn with_mocks(accounts: MockAccountService, documents: MockDocumentStore) -> Self {
        Self::build(accounts, documents, false)
    }

    /// Harness with the per-IP limiter on the auth routes
    pub fn with_rate_limit() -> Self {
        Self::build(MockAccountService::new(), MockDocumentStore::new(), true)
    }

    fn build(
        accounts: MockAccountService,
        documents: MockDocumentStore,
        rate_limit_enabled: bool,
    ) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let deps = TestDependencies::with_mocks(accounts, documents);
        let router = build_app(
            deps.server_deps(),
            AppOptions {
                rate_limit_enabled,
                allowed_origins: vec![],
            },
        );

        Self { deps, router }
    }

    pub async fn post(&self, path: &str, body: Value, session: Option<&str>) -> TestResponse {
        self.send(Method::POST, path, Some(body), session, None).await
    }

    /// POST as if relayed by a proxy for `client_ip`
    pub async fn post_forwarded(&self, path: &str, body: Value, client_ip: &str) -> TestResponse {
        self.send(Method::POST, path, Some(body), None, Some(client_ip))
            .await
    }

    pub async fn get(&self, path: &str, session: Option<&str>) -> TestResponse {
        self.send(Method::GET, path, None, session, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
        forwarded_for: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(secret) = session {
            builder = builder.header(COOKIE, format!("appwrite-session={}", secret));
        }
        if let Some(client_ip) = forwarded_for {
            builder = builder.header("x-forwarded-for", client_ip);
        }

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            set_cookies,
            body,
        }
    }
}
