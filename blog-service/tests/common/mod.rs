use std::sync::Arc;

use auth::Authenticator;
use auth::CredentialSecret;
use auth::JwtHandler;
use auth::PasswordCost;
use auth::PasswordHasher;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use blog_service::outbound::repositories::InMemoryCategoryRepository;
use blog_service::outbound::repositories::InMemoryPostRepository;
use blog_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secret = CredentialSecret::new(TEST_SECRET).expect("Test secret is not empty");
        // Minimal argon2 cost keeps the suite fast.
        let hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Valid test cost");
        let authenticator = Arc::new(Authenticator::new(&secret).with_password_hasher(hasher));

        let users = Arc::new(InMemoryUserRepository::new());
        let state = AppState::new(
            Arc::clone(&users),
            Arc::new(InMemoryCategoryRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            authenticator,
        );

        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(&secret),
            users,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register an account and return `(user_id, token)`.
    pub async fn register(&self, telephone: &str, password: &str) -> (u64, String) {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "name": "tester",
                "telephone": telephone,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["user"]["id"].as_u64().expect("user id"),
            body["data"]["token"].as_str().expect("token").to_string(),
        )
    }

    /// Create a category and return its id.
    pub async fn create_category(&self, name: &str) -> u64 {
        let response = self
            .post("/categories")
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_u64().expect("category id")
    }

    /// Create a post and return its JSON representation.
    pub async fn create_post(&self, token: &str, category_id: u64, title: &str) -> Value {
        let response = self
            .post("/posts")
            .bearer_auth(token)
            .json(&json!({
                "category_id": category_id,
                "title": title,
                "content": "hello world"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}
