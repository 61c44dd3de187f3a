use std::sync::Arc;

use anyhow::{anyhow, bail};
use pkg_client::ApiClient;
use pkg_session::nav::{self, Access, Route};
use pkg_session::{FileCredentialStore, Session, SessionResolver};

use crate::config::Settings;
use crate::output::OutputFormat;

/// Everything a command needs: where the backend is, who is signed in, and
/// how to print.
pub struct Ctx {
    pub server: String,
    pub resolver: SessionResolver,
    pub output: OutputFormat,
}

impl Ctx {
    pub fn new(settings: Settings, output: OutputFormat) -> Self {
        let store = FileCredentialStore::new(settings.credentials);
        Self {
            server: settings.server,
            resolver: SessionResolver::new(Arc::new(store)),
            output,
        }
    }

    pub fn session(&self) -> Session {
        self.resolver.resolve()
    }

    /// Client for the sign-in exchange; carries no token.
    pub fn anonymous_client(&self) -> anyhow::Result<ApiClient> {
        Ok(ApiClient::new(&self.server)?)
    }

    /// Check the session may open `route`, then build a client carrying the
    /// session's token.
    pub fn client_for(&self, route: Route) -> anyhow::Result<ApiClient> {
        let session = self.session();
        match nav::authorize(&session, route) {
            Access::Granted => {}
            Access::SignIn => bail!("not signed in; run `lmsctl login` first"),
            Access::Redirect(landing) => bail!(
                "{} is not available to role '{}'; try {} ({}) instead",
                route.label(),
                session.role,
                landing.label(),
                landing.path()
            ),
        }
        let token = self
            .resolver
            .token()
            .ok_or_else(|| anyhow!("not signed in; run `lmsctl login` first"))?;
        Ok(ApiClient::new(&self.server)?.with_token(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_session::CredentialStore;

    // Nothing listens on the discard port of a TEST-NET address; a request
    // escaping the gate would fail rather than reach a backend.
    const OFFLINE_SERVER: &str = "http://192.0.2.1:9";

    fn ctx_with(dir: &tempfile::TempDir, creds: Option<(&str, &str)>) -> Ctx {
        let path = dir.path().join("credentials.json");
        if let Some((token, role)) = creds {
            FileCredentialStore::new(&path).save(token, role).unwrap();
        }
        Ctx::new(
            Settings {
                server: OFFLINE_SERVER.to_string(),
                credentials: path,
            },
            OutputFormat::Table,
        )
    }

    #[test]
    fn librarian_is_redirected_away_from_admin_screens() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_with(&dir, Some(("tok", "librarian")));

        let err = ctx.client_for(Route::Members).unwrap_err().to_string();
        assert!(err.contains("Members is not available to role 'librarian'"), "{}", err);
        assert!(err.contains("/dashboard"), "{}", err);

        assert!(ctx.client_for(Route::BorrowReturn).is_ok());
    }

    #[test]
    fn signed_out_user_is_sent_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_with(&dir, None);

        let err = ctx.client_for(Route::Books).unwrap_err().to_string();
        assert!(err.contains("not signed in"), "{}", err);
    }

    #[test]
    fn admin_gets_a_client_carrying_the_token() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_with(&dir, Some(("tok-admin", "ADMIN")));

        let client = ctx.client_for(Route::Reports).unwrap();
        assert!(client.has_token());
        assert_eq!(client.base_url(), OFFLINE_SERVER);
        assert_eq!(ctx.resolver.token().as_deref(), Some("tok-admin"));
        assert!(!ctx.anonymous_client().unwrap().has_token());
    }
}
