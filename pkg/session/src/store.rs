use std::collections::BTreeMap;
use std::sync::Mutex;

use pkg_constants::session::{ROLE_KEY, TOKEN_KEY};

/// Raw contents of the credential store. Either value may be missing if
/// the store was edited by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl StoredCredentials {
    pub(crate) fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            token: map.get(TOKEN_KEY).cloned(),
            role: map.get(ROLE_KEY).cloned(),
        }
    }

    pub(crate) fn to_map(token: &str, role: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            (TOKEN_KEY.to_string(), token.to_string()),
            (ROLE_KEY.to_string(), role.to_string()),
        ])
    }
}

/// Durable backing store for the session.
///
/// Token and role are only ever written or cleared together; there is no
/// single-key setter.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> anyhow::Result<StoredCredentials>;

    fn save(&self, token: &str, role: &str) -> anyhow::Result<()>;

    fn clear(&self) -> anyhow::Result<()>;
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with arbitrary raw entries, e.g. a token with no role.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> anyhow::Result<StoredCredentials> {
        Ok(StoredCredentials::from_map(&*self.lock()?))
    }

    fn save(&self, token: &str, role: &str) -> anyhow::Result<()> {
        *self.lock()? = StoredCredentials::to_map(token, role);
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        let mut entries = self.lock()?;
        entries.remove(TOKEN_KEY);
        entries.remove(ROLE_KEY);
        Ok(())
    }
}
