//! Preconfigured local account loaded from environment variables.
//!
//! `PLANNER_USER_EMAIL` and `PLANNER_USER_PASSWORD` name an account the local
//! identity provider knows at startup; `PLANNER_USER_ID` optionally fixes the
//! id stored as the owner of saved templates. Without email and password no
//! account is configured and the planner runs signed out.

use crate::core::identity::{LocalIdentity, User};

/// Id used when `PLANNER_USER_ID` is not set.
pub const DEFAULT_USER_ID: &str = "local-admin";

/// Account credentials read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Owner id
    pub user_id: String,
    /// Sign-in email
    pub email: String,
    /// Sign-in password
    pub password: String,
}

/// Builds an account from raw values. Email and password must both be
/// non-blank; a blank id falls back to [`DEFAULT_USER_ID`].
#[must_use]
pub fn account_from_values(
    user_id: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Option<AccountConfig> {
    let email = email.filter(|e| !e.trim().is_empty())?;
    let password = password.filter(|p| !p.is_empty())?;
    let user_id = user_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    Some(AccountConfig {
        user_id,
        email: email.trim().to_string(),
        password,
    })
}

/// Reads the configured account from `PLANNER_USER_*`.
#[must_use]
pub fn configured_account() -> Option<AccountConfig> {
    account_from_values(
        std::env::var("PLANNER_USER_ID").ok(),
        std::env::var("PLANNER_USER_EMAIL").ok(),
        std::env::var("PLANNER_USER_PASSWORD").ok(),
    )
}

/// A local identity provider that knows `account`, if one is given.
#[must_use]
pub fn local_identity(account: Option<&AccountConfig>) -> LocalIdentity {
    let mut identity = LocalIdentity::new();
    if let Some(account) = account {
        identity.register(
            User {
                id: account.user_id.clone(),
                email: account.email.clone(),
            },
            account.password.clone(),
        );
    }
    identity
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::identity::IdentityProvider;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_account_requires_email_and_password() {
        assert!(account_from_values(None, None, some("secret1")).is_none());
        assert!(account_from_values(None, some("a@b.org"), None).is_none());
        assert!(account_from_values(None, some("  "), some("secret1")).is_none());
    }

    #[test]
    fn test_account_id_defaults() {
        let account = account_from_values(some(" "), some(" a@b.org "), some("secret1")).unwrap();
        assert_eq!(account.user_id, DEFAULT_USER_ID);
        assert_eq!(account.email, "a@b.org");

        let account = account_from_values(some("u-7"), some("a@b.org"), some("secret1")).unwrap();
        assert_eq!(account.user_id, "u-7");
    }

    #[tokio::test]
    async fn test_local_identity_signs_in_configured_account() {
        let account = account_from_values(some("u-7"), some("a@b.org"), some("secret1")).unwrap();
        let mut identity = local_identity(Some(&account));
        let user = identity.sign_in("a@b.org", "secret1").await.unwrap();
        assert_eq!(user.id, "u-7");

        let mut empty = local_identity(None);
        assert!(empty.sign_in("a@b.org", "secret1").await.is_err());
    }
}
