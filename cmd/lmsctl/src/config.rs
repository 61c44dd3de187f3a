use std::path::{Path, PathBuf};

use pkg_constants::network::DEFAULT_API_ADDR;
use pkg_constants::paths::{CONFIG_DIR, CONFIG_FILENAME, CREDENTIALS_FILENAME};
use pkg_types::config::{CtlConfigFile, load_config_file};
use tracing::debug;

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: String,
    pub credentials: PathBuf,
}

fn lms_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
}

pub fn default_config_path() -> PathBuf {
    lms_dir().join(CONFIG_FILENAME)
}

pub fn default_credentials_path() -> PathBuf {
    lms_dir().join(CREDENTIALS_FILENAME)
}

/// Merge: CLI args > config file > defaults.
pub fn load_settings(
    config_path: &Path,
    server: Option<String>,
    credentials: Option<PathBuf>,
) -> anyhow::Result<Settings> {
    let file_cfg: CtlConfigFile = load_config_file(config_path)?;
    debug!("Config file: {}", config_path.display());

    let server = server
        .or(file_cfg.server)
        .unwrap_or_else(|| DEFAULT_API_ADDR.to_string());
    let credentials = credentials
        .or(file_cfg.credentials.map(PathBuf::from))
        .unwrap_or_else(default_credentials_path);

    Ok(Settings {
        server,
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_and_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server: http://library.internal:8080\ncredentials: /tmp/creds.json\n").unwrap();

        let from_file = load_settings(&path, None, None).unwrap();
        assert_eq!(from_file.server, "http://library.internal:8080");
        assert_eq!(from_file.credentials, PathBuf::from("/tmp/creds.json"));

        let from_flags = load_settings(
            &path,
            Some("http://localhost:9999".to_string()),
            Some(PathBuf::from("/tmp/other.json")),
        )
        .unwrap();
        assert_eq!(from_flags.server, "http://localhost:9999");
        assert_eq!(from_flags.credentials, PathBuf::from("/tmp/other.json"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("absent.yaml"), None, None).unwrap();
        assert_eq!(settings.server, DEFAULT_API_ADDR);
        assert_eq!(settings.credentials, default_credentials_path());
    }
}
