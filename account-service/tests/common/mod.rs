use std::sync::Arc;

use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use auth::AuthorizationGuard;
use auth::Claims;
use auth::RequestAuthenticator;
use auth::Role;
use auth::TokenConfig;
use auth::TokenService;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenService>,
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

        let tokens = Arc::new(TokenService::new(&TokenConfig::new(TEST_SECRET)));
        let guard = AuthorizationGuard::new(RequestAuthenticator::new(Arc::clone(&tokens)));

        let account_repository = Arc::new(InMemoryAccountRepository::new());
        let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
            account_repository,
            Arc::clone(&tokens),
        ));

        let router = create_router(account_service, guard);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account and return the response body
    pub async fn register(&self, email: &str, password: &str, role: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "email": email,
                "password": password,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Mint an access token directly, bypassing registration
    pub fn access_token_for(&self, role: Role) -> String {
        self.tokens
            .issue_access(&Claims::new("fixture-user", "fixture@example.com", role))
            .expect("Failed to issue token")
    }
}
