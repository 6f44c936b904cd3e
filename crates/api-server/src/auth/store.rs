//! In-memory user accounts and the current session
//!
//! Credentials are compared in plaintext; there is one process-wide
//! "current user", as in a single-operator demo.

use thiserror::Error;
use tokio::sync::RwLock;

use td_core::wire::UserProfile;

const DEFAULT_ROLE: &str = "User";

#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password: String,
    pub role: String,
    pub profile_picture: Option<String>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            role: self.role.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already registered")]
    EmailTaken,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Not logged in")]
    NotLoggedIn,
}

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub profile_picture: Option<String>,
}

struct Inner {
    users: Vec<User>,
    current: Option<u64>,
}

pub struct UserStore {
    inner: RwLock<Inner>,
}

impl UserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                users,
                current: None,
            }),
        }
    }

    /// Store holding the two demo accounts
    pub fn seeded() -> Self {
        Self::new(vec![
            User {
                id: 1,
                email: "admin@test.com".into(),
                password: "Admin@123".into(),
                role: "Admin".into(),
                profile_picture: None,
            },
            User {
                id: 2,
                email: "user@test.com".into(),
                password: "User@123".into(),
                role: DEFAULT_ROLE.into(),
                profile_picture: None,
            },
        ])
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter()
            .find(|u| u.email == email.trim() && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        let profile = user.profile();
        inner.current = Some(profile.id);
        Ok(profile)
    }

    /// Create an account and make it the current user
    pub async fn register(&self, reg: Registration) -> Result<UserProfile, AuthError> {
        let email = reg.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidInput(
                "Please enter a valid email address".into(),
            ));
        }
        if reg.password.is_empty() {
            return Err(AuthError::InvalidInput("Password is required".into()));
        }

        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: inner.users.len() as u64 + 1,
            email,
            password: reg.password,
            role: reg
                .role
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            profile_picture: reg.profile_picture.filter(|p| !p.is_empty()),
        };
        let profile = user.profile();
        inner.users.push(user);
        inner.current = Some(profile.id);
        Ok(profile)
    }

    pub async fn logout(&self) {
        self.inner.write().await.current = None;
    }

    pub async fn current_user(&self) -> Result<UserProfile, AuthError> {
        let inner = self.inner.read().await;
        inner
            .current
            .and_then(|id| inner.users.iter().find(|u| u.id == id))
            .map(User::profile)
            .ok_or(AuthError::NotLoggedIn)
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
