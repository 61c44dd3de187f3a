use std::path::Path;

use serde::{Deserialize, Serialize};

/// CLI configuration file (YAML).
///
/// Example `~/.lms/config.yaml`:
/// ```yaml
/// server: https://library.example.com
/// credentials: /home/me/.lms/credentials.json
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CtlConfigFile {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default, alias = "credentials-file")]
    pub credentials: Option<String>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(
    path: impl AsRef<Path>,
) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path.as_ref()) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}
