#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use campus_crud_api::{
    app,
    auth::{JwtKeys, Role},
    database::{
        Article, DatabaseError, Entity, EntityId, HelpRequest, MemoryRepository, MenuItem, MenuItemReview,
        Organization, RecommendationRequest, Repositories, Repository,
    },
};

pub const TEST_SECRET: &str = "integration-test-secret";

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The full router over in-memory repositories, driven without a socket
pub struct TestApp {
    router: Router,
    keys: Arc<JwtKeys>,
    pub repos: Repositories,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_repos(Repositories::in_memory())
    }

    pub fn with_repos(repos: Repositories) -> Self {
        init_tracing();
        let keys = Arc::new(JwtKeys::from_secret(TEST_SECRET, 1).expect("test keys"));
        let router = app(repos.clone(), Arc::clone(&keys));
        Self { router, keys, repos }
    }

    pub fn user_token(&self) -> String {
        self.keys.issue("user@ucsb.edu", Role::User).expect("user token")
    }

    pub fn admin_token(&self) -> String {
        self.keys.issue("admin@ucsb.edu", Role::Admin).expect("admin token")
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, token, None).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}

/// In-memory repository that counts every call, to prove the gate runs first
pub struct CountingRepository<E> {
    inner: MemoryRepository<E>,
    calls: AtomicUsize,
}

impl<E: Entity> CountingRepository<E> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryRepository::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for CountingRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError> {
        self.touch();
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<E>, DatabaseError> {
        self.touch();
        self.inner.find_by_id(id).await
    }

    async fn save(&self, entity: E) -> Result<E, DatabaseError> {
        self.touch();
        self.inner.save(entity).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), DatabaseError> {
        self.touch();
        self.inner.delete(id).await
    }
}

/// A counting repository behind every entity
pub struct CountingRepos {
    pub articles: Arc<CountingRepository<Article>>,
    pub recommendation_requests: Arc<CountingRepository<RecommendationRequest>>,
    pub menu_items: Arc<CountingRepository<MenuItem>>,
    pub organizations: Arc<CountingRepository<Organization>>,
    pub menu_item_reviews: Arc<CountingRepository<MenuItemReview>>,
    pub help_requests: Arc<CountingRepository<HelpRequest>>,
}

impl CountingRepos {
    pub fn new() -> Self {
        Self {
            articles: CountingRepository::new(),
            recommendation_requests: CountingRepository::new(),
            menu_items: CountingRepository::new(),
            organizations: CountingRepository::new(),
            menu_item_reviews: CountingRepository::new(),
            help_requests: CountingRepository::new(),
        }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            articles: self.articles.clone(),
            recommendation_requests: self.recommendation_requests.clone(),
            menu_items: self.menu_items.clone(),
            organizations: self.organizations.clone(),
            menu_item_reviews: self.menu_item_reviews.clone(),
            help_requests: self.help_requests.clone(),
            pool: None,
        }
    }

    pub fn total_calls(&self) -> usize {
        self.articles.calls()
            + self.recommendation_requests.calls()
            + self.menu_items.calls()
            + self.organizations.calls()
            + self.menu_item_reviews.calls()
            + self.help_requests.calls()
    }
}

pub fn assert_not_found(res: &TestResponse, message: &str) {
    assert_eq!(res.status, StatusCode::NOT_FOUND, "body: {}", res.body);
    assert_eq!(res.body["type"], "EntityNotFoundException");
    assert_eq!(res.body["message"], message);
}
