//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use chrono::{Duration, Utc};
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use linkshare_api::AppState;
use linkshare_auth::JwtEncoder;
use linkshare_core::config::AppConfig;
use linkshare_database::Stores;
use linkshare_database::memory::{MemoryLinkStore, MemoryOrganizationStore};
use linkshare_database::store::LinkStore;
use linkshare_entity::identity::UserRole;
use linkshare_storage::LocalStorageProvider;

const BOUNDARY: &str = "linkshare-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory link records, for seeding fixtures
    pub links: Arc<MemoryLinkStore>,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
    _storage_dir: TempDir,
}

/// A signed-in test user
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User id
    pub id: Uuid,
    /// Session token
    pub token: String,
}

impl TestApp {
    /// Create a new test application over in-memory stores
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default config
    pub async fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let storage_dir = TempDir::new().expect("Failed to create storage dir");
        let mut config = AppConfig::default();
        configure(&mut config);
        config.storage.root_path = storage_dir.path().to_string_lossy().into_owned();

        let links = Arc::new(MemoryLinkStore::new());
        let stores = Stores {
            links: links.clone(),
            organizations: Arc::new(MemoryOrganizationStore::new()),
        };
        let storage = LocalStorageProvider::new(&config.storage.root_path)
            .await
            .expect("Failed to init storage");

        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::new(config.clone(), stores, Arc::new(storage));
        let router = linkshare_api::build_app(state);

        Self {
            router,
            links,
            config,
            encoder,
            _storage_dir: storage_dir,
        }
    }

    /// A new user with a valid session token
    pub fn user(&self) -> TestUser {
        self.user_with_role(UserRole::User)
    }

    /// A new platform admin with a valid session token
    pub fn admin(&self) -> TestUser {
        self.user_with_role(UserRole::Admin)
    }

    fn user_with_role(&self, role: UserRole) -> TestUser {
        let id = Uuid::new_v4();
        let token = self
            .encoder
            .issue(id, Some("user@test.com"), role)
            .expect("Failed to issue token");
        TestUser { id, token }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a raw body with the given content type
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: &'static str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, content_type);

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// GET with the session token in a cookie instead of a header
    pub async fn get_with_cookie(&self, path: &str, token: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .header(
                header::COOKIE,
                format!("{}={token}", self.config.auth.session_cookie),
            )
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload a file through the multipart endpoint
    pub async fn upload(
        &self,
        token: &str,
        file_name: &str,
        content: &[u8],
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload a file and return its link id
    pub async fn share(
        &self,
        owner: &TestUser,
        file_name: &str,
        content: &[u8],
        max_views: i32,
        with_organization: bool,
    ) -> String {
        let max_views = max_views.to_string();
        let org = with_organization.to_string();
        let response = self
            .upload(
                &owner.token,
                file_name,
                content,
                &[
                    ("max_views", max_views.as_str()),
                    ("share_with_organization", org.as_str()),
                ],
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {:?}",
            response.json()
        );
        response.json()["data"]["linkId"]
            .as_str()
            .expect("No linkId in upload response")
            .to_string()
    }

    /// Move a link's expiry into the past without touching its views
    pub async fn expire(&self, link_id: &str) {
        let mut link = self
            .links
            .find_by_link_id(link_id)
            .await
            .expect("Store failed")
            .expect("Link not found");
        link.expires_at = Utc::now() - Duration::minutes(1);
        self.links.insert(link);
    }

    /// Create an organization and return its secret key
    pub async fn create_organization(&self, admin: &TestUser, max_members: i32) -> String {
        let response = self
            .request(
                "POST",
                "/api/organization",
                Some(serde_json::json!({
                    "action": "create",
                    "name": "Test Org",
                    "maxMembers": max_members,
                })),
                Some(&admin.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.json());
        response.json()["data"]["secretKey"]
            .as_str()
            .expect("No secretKey for the admin")
            .to_string()
    }

    /// Join an organization by key
    pub async fn join_organization(&self, user: &TestUser, secret_key: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/organization",
            Some(serde_json::json!({ "action": "join", "secretKey": secret_key })),
            Some(&user.token),
        )
        .await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub body: Bytes,
}

impl TestResponse {
    /// Parsed JSON body, or `Null`
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// The `error` code of an error payload
    pub fn error_code(&self) -> Option<String> {
        self.json()["error"].as_str().map(str::to_string)
    }

    /// A response header as text
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
