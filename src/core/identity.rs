//! Identity provider - who is signed in.
//!
//! Saving and loading templates need a signed-in user. [`LocalIdentity`]
//! keeps accounts in memory and is what the binary and the tests use; a
//! hosted auth service would implement [`IdentityProvider`] instead.

use crate::errors::{Error, Result};
use std::collections::HashMap;
use tracing::{info, warn};

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable user identifier, stored as the owner of catalog rows
    pub id: String,
    /// Sign-in email
    pub email: String,
}

/// Session management.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<&User>;
    /// Signs in with email and password.
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<User>;
    /// Registers a new account and signs it in.
    async fn sign_up(&mut self, email: &str, password: &str, confirm: &str) -> Result<User>;
    /// Ends the session. Signing out while signed out is fine.
    async fn sign_out(&mut self) -> Result<()>;
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

/// In-memory accounts and a single session.
///
/// For a single local operator only: passwords are held in memory as typed
/// and nothing is persisted.
#[derive(Debug, Default)]
pub struct LocalIdentity {
    accounts: HashMap<String, Account>,
    session: Option<User>,
}

impl LocalIdentity {
    /// Creates a provider with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account without signing it in.
    pub fn register(&mut self, user: User, password: impl Into<String>) {
        let key = normalize_email(&user.email);
        self.accounts.insert(
            key,
            Account {
                user,
                password: password.into(),
            },
        );
    }

    /// First `local-N` id not already held by a registered account.
    fn next_user_id(&self) -> String {
        (self.accounts.len() + 1..)
            .map(|n| format!("local-{n}"))
            .find(|id| !self.accounts.values().any(|account| account.user.id == *id))
            .unwrap_or_default()
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> Result<User> {
        let account = self
            .accounts
            .get(&normalize_email(email))
            .filter(|account| account.password == password)
            .ok_or_else(|| {
                warn!("Failed sign-in attempt for {}", email);
                Error::InvalidCredentials
            })?;
        let user = account.user.clone();
        info!("User {} signed in", user.id);
        self.session = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&mut self, email: &str, password: &str, confirm: &str) -> Result<User> {
        if password != confirm {
            return Err(Error::PasswordMismatch);
        }
        let key = normalize_email(email);
        if key.is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::InvalidCredentials);
        }
        if self.accounts.contains_key(&key) {
            return Err(Error::AccountExists { email: key });
        }

        let user = User {
            id: self.next_user_id(),
            email: key,
        };
        self.register(user.clone(), password);
        info!("Registered user {}", user.id);
        self.session = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&mut self) -> Result<()> {
        if let Some(user) = self.session.take() {
            info!("User {} signed out", user.id);
        }
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_account() -> LocalIdentity {
        let mut identity = LocalIdentity::new();
        identity.register(
            User {
                id: "u1".to_string(),
                email: "aid@example.org".to_string(),
            },
            "secret123",
        );
        identity
    }

    #[tokio::test]
    async fn test_sign_in_and_out() -> Result<()> {
        let mut identity = provider_with_account();
        assert!(identity.current_user().is_none());

        let user = identity.sign_in(" AID@example.org ", "secret123").await?;
        assert_eq!(user.id, "u1");
        assert_eq!(identity.current_user(), Some(&user));

        identity.sign_out().await?;
        assert!(identity.current_user().is_none());
        identity.sign_out().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let mut identity = provider_with_account();
        let result = identity.sign_in("aid@example.org", "nope").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
        assert!(identity.current_user().is_none());

        let unknown = identity.sign_in("who@example.org", "secret123").await;
        assert!(matches!(unknown, Err(Error::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_up_ids_skip_configured_ids() -> Result<()> {
        let mut identity = LocalIdentity::new();
        identity.register(
            User {
                id: "local-2".to_string(),
                email: "admin@example.org".to_string(),
            },
            "secret123",
        );
        identity.register(
            User {
                id: "local-3".to_string(),
                email: "clerk@example.org".to_string(),
            },
            "secret123",
        );

        let first = identity.sign_up("a@example.org", "abcdef", "abcdef").await?;
        let second = identity.sign_up("b@example.org", "abcdef", "abcdef").await?;
        assert_eq!(first.id, "local-4");
        assert_eq!(second.id, "local-5");
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_up_rules() -> Result<()> {
        let mut identity = provider_with_account();

        let mismatch = identity.sign_up("new@example.org", "abcdef", "abcdeg").await;
        assert!(matches!(mismatch, Err(Error::PasswordMismatch)));

        let short = identity.sign_up("new@example.org", "abc", "abc").await;
        assert!(matches!(short, Err(Error::InvalidCredentials)));

        let duplicate = identity
            .sign_up("aid@example.org", "abcdef", "abcdef")
            .await;
        assert!(matches!(duplicate, Err(Error::AccountExists { .. })));

        let user = identity.sign_up("New@Example.org", "abcdef", "abcdef").await?;
        assert_eq!(user.email, "new@example.org");
        assert_eq!(identity.current_user(), Some(&user));

        identity.sign_out().await?;
        identity.sign_in("new@example.org", "abcdef").await?;
        Ok(())
    }
}
