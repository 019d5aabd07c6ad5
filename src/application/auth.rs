//! Mock authentication against hardcoded demo accounts
//!
//! Any password is accepted for the two built-in accounts; signup creates a
//! fresh user unless the email collides with a demo account. The session is
//! persisted through the kv store so a restart can restore it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::errors::AuthError;
use crate::domain::entities::User;
use crate::domain::traits::{CurrentActor, Notifier, Scheduler, Store};

const LOGIN_DELAY: Duration = Duration::from_millis(800);
const SIGNUP_DELAY: Duration = Duration::from_millis(1000);
const AUTH_KEY: &str = "auth";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AuthState {
    user: Option<User>,
    token: Option<String>,
}

/// Demo authentication service
pub struct AuthService {
    state: Mutex<AuthState>,
    store: Arc<dyn Store>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn Store>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            state: Mutex::new(AuthState::default()),
            store,
            notifier,
            scheduler,
        }
    }

    /// Restore a persisted session, if one exists
    pub async fn restore(&self) -> Result<Option<User>, AuthError> {
        let raw = self
            .store
            .get(AUTH_KEY)
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let state: AuthState =
            serde_json::from_str(&raw).map_err(|e| AuthError::Session(e.to_string()))?;
        let user = state.user.clone();
        *self.lock() = state;
        Ok(user)
    }

    /// Sign in with a demo account after a simulated network delay
    pub async fn login(&self, email: &str, _password: &str) -> Result<User, AuthError> {
        self.scheduler.sleep(LOGIN_DELAY).await;

        let user = match email {
            "john@example.com" => User::new("1", "John Doe", email),
            "jane@example.com" => User::new("2", "Jane Smith", email),
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = format!("mock-jwt-token-for-{}", first_name(&user.name));
        self.install(user.clone(), token).await?;
        tracing::info!("Logged in as {}", user.email);
        Ok(user)
    }

    /// Create a fresh account after a simulated network delay
    pub async fn signup(&self, name: &str, email: &str, _password: &str) -> Result<User, AuthError> {
        self.scheduler.sleep(SIGNUP_DELAY).await;

        if email == "john@example.com" || email == "jane@example.com" {
            return Err(AuthError::EmailExists);
        }

        let user = User::new(uuid::Uuid::new_v4().to_string(), name, email);
        self.install(user.clone(), "mock-jwt-token-for-new-user".to_string())
            .await?;
        tracing::info!("Signed up as {}", user.email);
        Ok(user)
    }

    /// Clear the session and notify the user
    pub async fn logout(&self) {
        *self.lock() = AuthState::default();
        if let Err(e) = self.persist(AuthState::default()).await {
            tracing::warn!("Failed to persist logout: {}", e);
        }
        self.notifier.success("Logged out successfully");
    }

    pub fn is_authenticated(&self) -> bool {
        let state = self.lock();
        state.user.is_some() && state.token.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    async fn install(&self, user: User, token: String) -> Result<(), AuthError> {
        let state = AuthState {
            user: Some(user),
            token: Some(token),
        };
        *self.lock() = state.clone();
        self.persist(state).await
    }

    async fn persist(&self, state: AuthState) -> Result<(), AuthError> {
        let raw = serde_json::to_string(&state).map_err(|e| AuthError::Session(e.to_string()))?;
        self.store
            .set(AUTH_KEY, &raw)
            .await
            .map_err(|e| AuthError::Session(e.to_string()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CurrentActor for AuthService {
    fn current_user(&self) -> Option<User> {
        self.lock().user.clone()
    }
}

fn first_name(name: &str) -> String {
    name.split_whitespace()
        .next()
        .unwrap_or(name)
        .to_lowercase()
}
