#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use auth::TokenIssuer;
use auth_service::domain::auth::models::AuthSettings;
use auth_service::domain::auth::service::AuthService;
use auth_service::domain::errors::RepositoryError;
use auth_service::domain::password_reset::models::PasswordReset;
use auth_service::domain::password_reset::models::PasswordResetId;
use auth_service::domain::password_reset::ports::PasswordResetRepository;
use auth_service::domain::session::models::Session;
use auth_service::domain::session::models::SessionId;
use auth_service::domain::session::ports::RefreshTokenCache;
use auth_service::domain::session::ports::SessionRepository;
use auth_service::domain::user::models::EmailAddress;
use auth_service::domain::user::models::User;
use auth_service::domain::user::models::UserId;
use auth_service::domain::user::ports::UserRepository;
use auth_service::inbound::http::cookies::CookieSettings;
use auth_service::inbound::http::router::create_router;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub type TestAuthService = AuthService<
    InMemoryUserRepository,
    InMemorySessionRepository,
    InMemoryPasswordResetRepository,
    InMemoryRefreshTokenCache,
>;

/// Users keyed by id; the email uniqueness check plays the role of `users_email_key`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn set_active(&self, id: &UserId, is_active: bool) {
        if let Some(user) = self.users.lock().unwrap().get_mut(id) {
            user.is_active = is_active;
        }
    }

    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Duplicate("users_email_key".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = User {
                    updated_at: Utc::now(),
                    ..user
                };
                Ok(existing.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(id).ok_or(RepositoryError::NotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }
}

/// Session log that can be told to fail or stall its writes.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<Session>>,
    fail_writes: AtomicBool,
    write_delay: Mutex<Option<StdDuration>>,
}

impl InMemorySessionRepository {
    pub fn all(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn delay_writes(&self, delay: StdDuration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: Session) -> Result<Session, RepositoryError> {
        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database("session table unavailable".to_string()));
        }
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Session>, RepositoryError> {
        let mut sessions: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn delete(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| &s.id != id);
        if sessions.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, RepositoryError> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryPasswordResetRepository {
    resets: Mutex<HashMap<PasswordResetId, PasswordReset>>,
}

impl InMemoryPasswordResetRepository {
    pub fn all(&self) -> Vec<PasswordReset> {
        self.resets.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl PasswordResetRepository for InMemoryPasswordResetRepository {
    async fn create(&self, reset: PasswordReset) -> Result<PasswordReset, RepositoryError> {
        self.resets.lock().unwrap().insert(reset.id, reset.clone());
        Ok(reset)
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordReset>, RepositoryError> {
        Ok(self
            .resets
            .lock()
            .unwrap()
            .values()
            .find(|r| r.token_hash == token_hash)
            .cloned())
    }

    async fn mark_as_used(&self, id: &PasswordResetId) -> Result<(), RepositoryError> {
        match self.resets.lock().unwrap().get_mut(id) {
            Some(reset) if !reset.used => {
                reset.used = true;
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    async fn delete_expired(&self) -> Result<u64, RepositoryError> {
        let now = Utc::now();
        let mut resets = self.resets.lock().unwrap();
        let before = resets.len();
        resets.retain(|_, r| !r.is_expired(now));
        Ok((before - resets.len()) as u64)
    }
}

/// Key/value cache with the same key layout and expiry as the Redis adapter.
#[derive(Default)]
pub struct InMemoryRefreshTokenCache {
    entries: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

impl InMemoryRefreshTokenCache {
    fn key(user_id: &UserId) -> String {
        format!("refresh_token:{}", user_id)
    }

    pub fn token_for(&self, user_id: &UserId) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(&Self::key(user_id))
            .map(|(token, _)| token.clone())
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            (value.to_string(), Utc::now() + Duration::hours(1)),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl RefreshTokenCache for InMemoryRefreshTokenCache {
    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        ttl: Duration,
    ) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .unwrap()
            .insert(Self::key(user_id), (token.to_string(), Utc::now() + ttl));
        Ok(())
    }

    async fn get_refresh_token(&self, user_id: &UserId) -> Result<Option<String>, RepositoryError> {
        let now = Utc::now();
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&Self::key(user_id))
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(token, _)| token.clone()))
    }

    async fn delete_refresh_token(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.entries.lock().unwrap().remove(&Self::key(user_id));
        Ok(())
    }

    async fn delete_all_user_refresh_tokens(
        &self,
        user_id: &UserId,
    ) -> Result<u64, RepositoryError> {
        let prefix = Self::key(user_id);
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(&prefix));
        Ok((before - entries.len()) as u64)
    }
}

/// Service wired to in-memory adapters, with handles kept for inspection.
pub struct TestServices {
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub resets: Arc<InMemoryPasswordResetRepository>,
    pub cache: Arc<InMemoryRefreshTokenCache>,
    pub token_issuer: Arc<TokenIssuer>,
    pub service: Arc<TestAuthService>,
}

impl TestServices {
    pub fn new() -> Self {
        Self::with_settings(AuthSettings::default())
    }

    pub fn with_settings(settings: AuthSettings) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let resets = Arc::new(InMemoryPasswordResetRepository::default());
        let cache = Arc::new(InMemoryRefreshTokenCache::default());
        let token_issuer = Arc::new(TokenIssuer::new(
            TEST_SECRET,
            Duration::minutes(15),
            Duration::days(7),
        ));

        let service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&sessions),
            Arc::clone(&resets),
            Arc::clone(&cache),
            Arc::clone(&token_issuer),
            settings,
        ));

        Self {
            users,
            sessions,
            resets,
            cache,
            token_issuer,
            service,
        }
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub services: TestServices,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let services = TestServices::new();

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(
            services.service.clone(),
            CookieSettings { secure: false },
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            services,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
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

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}
