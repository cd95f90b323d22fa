use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problem, reported before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing provider API key: pass --api-key or set CONFAB_API_KEY")]
    MissingApiKey,
}

/// Resolve the data directory: flag/env value, or the platform default.
pub fn data_dir(cli_value: Option<PathBuf>) -> PathBuf {
    cli_value.unwrap_or_else(confab_store::default_root)
}

/// The API key is required; clap already applied flag > env precedence.
pub fn require_api_key(value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)
}

/// Mask a credential for display: keep the last four characters.
pub fn masked(key: &str) -> String {
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_required() {
        assert!(matches!(
            require_api_key(None),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            require_api_key(Some("   ".into())),
            Err(ConfigError::MissingApiKey)
        ));
        assert_eq!(require_api_key(Some("sk-123".into())).unwrap(), "sk-123");
    }

    #[test]
    fn masked_keeps_tail_only() {
        assert_eq!(masked("ff-abcdef123456"), "***3456");
        assert_eq!(masked("abc"), "***abc");
    }

    #[test]
    fn data_dir_prefers_explicit() {
        let dir = data_dir(Some(PathBuf::from("/tmp/confab-test")));
        assert_eq!(dir, PathBuf::from("/tmp/confab-test"));
        assert!(!data_dir(None).as_os_str().is_empty());
    }
}
