use std::sync::Arc;

use auth::TokenIssuer;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::inbound::http::session::CookiePolicy;
use identity_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_TOKEN_TTL_SECONDS: i64 = 900;

/// Test application that spawns a real server over the in-memory repository
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub user_repository: Arc<InMemoryUserRepository>,
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

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let auth_service = Arc::new(AuthService::new(Arc::clone(&user_repository)));
        let token_issuer = Arc::new(TokenIssuer::new(TEST_JWT_SECRET, TEST_TOKEN_TTL_SECONDS));
        let cookie_policy = CookiePolicy {
            secure: false,
            max_age_seconds: TEST_TOKEN_TTL_SECONDS,
        };

        let router = create_router(auth_service, token_issuer, cookie_policy);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            user_repository,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with an explicit session cookie,
    /// bypassing the client's cookie store
    pub fn get_with_session(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header(reqwest::header::COOKIE, format!("token={}", token))
    }
}
