//! File-based credential storage.
//!
//! Stores the credential map as one JSON object in a single file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::store::{CredentialStore, StoredCredentials};

/// Credential store backed by a JSON file such as `~/.lms/credentials.json`.
///
/// Saves go through a temporary file and a rename, so a reader sees either
/// the old pair or the new pair, never one key without the other.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Create `path` readable by the owner only and write `content` to it. The
/// mode is set at creation, so the token is never world-readable.
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // A leftover temp file would keep its old mode.
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> anyhow::Result<StoredCredentials> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredCredentials::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read credentials from {}", self.path.display())
                });
            }
        };
        let map: BTreeMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse credentials in {}", self.path.display()))?;
        Ok(StoredCredentials::from_map(&map))
    }

    fn save(&self, token: &str, role: &str) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(&StoredCredentials::to_map(token, role))?;
        let tmp = self.temp_path();
        let result = write_private(&tmp, content.as_bytes())
            .with_context(|| format!("failed to write {}", tmp.display()))
            .and_then(|()| {
                std::fs::rename(&tmp, &self.path)
                    .with_context(|| format!("failed to replace {}", self.path.display()))
            });
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp);
            return result;
        }

        debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed credentials at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.load().unwrap(), StoredCredentials::default());
        store.clear().unwrap();
    }

    #[test]
    fn save_then_load_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");
        let store = FileCredentialStore::new(&path);

        store.save("abc", "admin").unwrap();
        assert!(path.exists());
        assert!(!store.temp_path().exists());

        let reopened = FileCredentialStore::new(&path);
        let creds = reopened.load().unwrap();
        assert_eq!(creds.token.as_deref(), Some("abc"));
        assert_eq!(creds.role.as_deref(), Some("admin"));

        reopened.clear().unwrap();
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn credentials_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        store.save("abc", "admin").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn stale_temp_file_does_not_leak_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        std::fs::write(store.temp_path(), "stale").unwrap();
        std::fs::set_permissions(store.temp_path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save("abc", "admin").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().token.as_deref(), Some("abc"));
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        // A non-empty directory at the target makes the rename fail.
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.save("abc", "admin").is_err());
        assert!(!store.temp_path().exists());
        assert!(path.is_dir());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(FileCredentialStore::new(&path).load().is_err());
    }
}
