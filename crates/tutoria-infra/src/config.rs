//! Configuration loader for Tutoria.
//!
//! Reads `config.toml` from the data directory (`~/.tutoria/` in
//! production) and deserializes it into [`TutorConfig`]. Falls back to the
//! defaults when the file is missing or malformed.

use std::path::Path;

use tutoria_types::config::TutorConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`TutorConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> TutorConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return TutorConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return TutorConfig::default();
        }
    };

    match toml::from_str::<TutorConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            TutorConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, TutorConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
[backend]
base_url = "https://tutor.example.test"
timeout_secs = 15

[budget]
max_messages = 6
max_chars = 2000
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.backend.base_url, "https://tutor.example.test");
        assert_eq!(config.backend.timeout_secs, 15);
        assert_eq!(config.budget.max_messages, 6);
        assert_eq!(config.budget.max_chars, 2000);
    }

    #[tokio::test]
    async fn load_config_partial_toml_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "[budget]\nmax_messages = 4\n",
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.budget.max_messages, 4);
        assert_eq!(config.budget.max_chars, 8_000);
        assert_eq!(config.backend.timeout_secs, 60);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, TutorConfig::default());
    }
}
