use std::sync::Arc;

use async_trait::async_trait;
use pkg_client::{ApiClient, ApiError};
use pkg_types::auth::{AuthUser, LoginResponse};
use pkg_types::role::Role;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::store::CredentialStore;

/// The client's cached belief about who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub authenticated: bool,
    pub role: Role,
    /// Profile from the last sign-in. Not persisted, so `None` after a
    /// reload.
    pub user: Option<AuthUser>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    fn restored(role: Role) -> Self {
        Self {
            authenticated: true,
            role,
            user: None,
        }
    }
}

/// Verifies credentials with the backend.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

#[async_trait]
impl Authenticator for ApiClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.login(email, password).await
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not save credentials: {0:#}")]
    Storage(anyhow::Error),
}

/// Builds sessions from, and writes sessions to, a [`CredentialStore`].
#[derive(Clone)]
pub struct SessionResolver {
    store: Arc<dyn CredentialStore>,
}

impl SessionResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Token and raw role, only when both are present and non-blank.
    fn stored_pair(&self) -> Option<(String, String)> {
        let creds = match self.store.load() {
            Ok(c) => c,
            Err(e) => {
                warn!("Ignoring unreadable credential store: {:#}", e);
                return None;
            }
        };
        match (creds.token, creds.role) {
            (Some(token), Some(role)) if !token.trim().is_empty() && !role.trim().is_empty() => {
                Some((token, role))
            }
            _ => None,
        }
    }

    /// Rebuild the session from persisted credentials. Local only.
    pub fn resolve(&self) -> Session {
        match self.stored_pair() {
            Some((_, role)) => Session::restored(Role::parse(&role)),
            None => Session::signed_out(),
        }
    }

    /// Bearer token for building an API client, if signed in.
    pub fn token(&self) -> Option<String> {
        self.stored_pair().map(|(token, _)| token)
    }

    /// Exchange credentials with the backend and persist the result.
    ///
    /// On any failure the store is left as it was.
    pub async fn sign_in(
        &self,
        authenticator: &dyn Authenticator,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError> {
        let resp = authenticator.authenticate(email, password).await?;
        if resp.access_token.trim().is_empty() {
            warn!("Backend accepted {} but returned an empty token", email);
            return Err(ApiError::Authentication.into());
        }

        let role = resp.user.parsed_role();
        // Keep the backend's own role string; a blank one would read back
        // as signed out, so store the parsed role instead.
        let stored_role = match resp.user.role.to_lowercase() {
            raw if raw.trim().is_empty() => role.as_str().to_string(),
            raw => raw,
        };
        self.store
            .save(&resp.access_token, &stored_role)
            .map_err(SessionError::Storage)?;

        info!("Signed in as {} ({})", email, role);
        Ok(Session {
            authenticated: true,
            role,
            user: Some(resp.user),
        })
    }

    /// Forget the persisted credentials. Never fails; a store that cannot be
    /// cleared is logged.
    pub fn sign_out(&self) -> Session {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear credentials: {:#}", e);
        } else {
            info!("Signed out");
        }
        Session::signed_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryCredentialStore, StoredCredentials};
    use pkg_constants::session::{ROLE_KEY, TOKEN_KEY};

    struct FixedBackend {
        token: &'static str,
        role: &'static str,
    }

    #[async_trait]
    impl Authenticator for FixedBackend {
        async fn authenticate(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
            if password != "secret" {
                return Err(ApiError::Authentication);
            }
            Ok(LoginResponse {
                access_token: self.token.to_string(),
                user: AuthUser {
                    id: 7,
                    username: "ada".to_string(),
                    email: email.to_string(),
                    role: self.role.to_string(),
                },
            })
        }
    }

    struct BrokenStore;

    impl CredentialStore for BrokenStore {
        fn load(&self) -> anyhow::Result<StoredCredentials> {
            anyhow::bail!("disk on fire")
        }
        fn save(&self, _token: &str, _role: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        fn clear(&self) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    fn resolver_with(entries: &[(&'static str, &'static str)]) -> (SessionResolver, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::with_entries(entries.iter().copied()));
        (SessionResolver::new(store.clone()), store)
    }

    #[test]
    fn test_resolve_normalizes_role() {
        let (resolver, _) = resolver_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "ADMIN")]);
        let session = resolver.resolve();
        assert!(session.authenticated);
        assert_eq!(session.role, Role::Admin);
        assert_eq!(resolver.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (resolver, _) = resolver_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "librarian")]);
        assert_eq!(resolver.resolve(), resolver.resolve());
    }

    #[test]
    fn test_partial_or_blank_credentials_are_signed_out() {
        for entries in [
            vec![(TOKEN_KEY, "abc")],
            vec![(ROLE_KEY, "admin")],
            vec![(TOKEN_KEY, ""), (ROLE_KEY, "admin")],
            vec![(TOKEN_KEY, "abc"), (ROLE_KEY, " ")],
            vec![],
        ] {
            let (resolver, _) = resolver_with(&entries);
            assert_eq!(resolver.resolve(), Session::signed_out());
            assert_eq!(resolver.token(), None);
        }
    }

    #[test]
    fn test_unknown_role_still_authenticated() {
        let (resolver, _) = resolver_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "janitor")]);
        let session = resolver.resolve();
        assert!(session.authenticated);
        assert_eq!(session.role, Role::Unknown);
    }

    #[test]
    fn test_unreadable_store_resolves_signed_out() {
        let resolver = SessionResolver::new(Arc::new(BrokenStore));
        assert_eq!(resolver.resolve(), Session::signed_out());
    }

    #[tokio::test]
    async fn test_sign_in_persists_token_and_lowercase_role() {
        let (resolver, store) = resolver_with(&[]);
        let backend = FixedBackend { token: "tok", role: "LIBRARIAN" };

        let session = resolver.sign_in(&backend, "ada@example.com", "secret").await.unwrap();
        assert!(session.authenticated);
        assert_eq!(session.role, Role::Librarian);
        assert_eq!(session.user.as_ref().map(|u| u.id), Some(7));

        let stored = store.load().unwrap();
        assert_eq!(stored.token.as_deref(), Some("tok"));
        assert_eq!(stored.role.as_deref(), Some("librarian"));

        let reloaded = resolver.resolve();
        assert!(reloaded.authenticated);
        assert_eq!(reloaded.role, Role::Librarian);
        assert_eq!(reloaded.user, None);
    }

    #[tokio::test]
    async fn test_sign_in_keeps_unrecognised_role_string() {
        let (resolver, store) = resolver_with(&[]);
        let backend = FixedBackend { token: "tok", role: "Member" };

        let session = resolver.sign_in(&backend, "ada@example.com", "secret").await.unwrap();
        assert_eq!(session.role, Role::Unknown);
        assert_eq!(store.load().unwrap().role.as_deref(), Some("member"));

        let reloaded = resolver.resolve();
        assert!(reloaded.authenticated);
        assert_eq!(reloaded.role, Role::Unknown);
    }

    #[tokio::test]
    async fn test_sign_in_with_blank_role_stays_signed_in() {
        let (resolver, store) = resolver_with(&[]);
        let backend = FixedBackend { token: "tok", role: "" };

        resolver.sign_in(&backend, "ada@example.com", "secret").await.unwrap();
        assert_eq!(store.load().unwrap().role.as_deref(), Some("unknown"));
        assert!(resolver.resolve().authenticated);
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_store_untouched() {
        let (resolver, store) = resolver_with(&[(TOKEN_KEY, "old"), (ROLE_KEY, "admin")]);
        let backend = FixedBackend { token: "tok", role: "admin" };

        let err = resolver.sign_in(&backend, "ada@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, SessionError::Api(ApiError::Authentication)));
        assert_eq!(store.load().unwrap().token.as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let (resolver, store) = resolver_with(&[]);
        let backend = FixedBackend { token: "", role: "admin" };

        let err = resolver.sign_in(&backend, "ada@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, SessionError::Api(ApiError::Authentication)));
        assert_eq!(store.load().unwrap(), StoredCredentials::default());
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let resolver = SessionResolver::new(Arc::new(BrokenStore));
        let backend = FixedBackend { token: "tok", role: "admin" };

        let err = resolver.sign_in(&backend, "ada@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
    }

    #[test]
    fn test_sign_out_then_resolve_is_signed_out() {
        let (resolver, _) = resolver_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "admin")]);
        assert_eq!(resolver.sign_out(), Session::signed_out());
        assert!(!resolver.resolve().authenticated);
    }

    #[test]
    fn test_sign_out_cannot_fail() {
        let resolver = SessionResolver::new(Arc::new(BrokenStore));
        assert_eq!(resolver.sign_out(), Session::signed_out());
    }
}
