//! Credential resolution.
//!
//! An API token can come from a local secrets file or from the environment
//! of a hosted deployment. Both are modeled as sources of the single
//! capability "fetch named secret" and tried in a defined fallback order.
//!
//! Secret values never appear in logs or errors; resolution diagnostics name
//! the secret and the satisfying source only.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Dotted name of the market-data API token.
pub const TIINGO_API_KEY: &str = "tiingo.api_key";

/// Errors from secret loading and resolution.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Secret not found: {0}")]
    Missing(String),

    #[error("Secrets file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Secrets file parse error: {0}")]
    Parse(String),
}

/// A source of named secrets.
///
/// Names are dotted paths such as `tiingo.api_key`; each source maps them to
/// its own storage convention.
pub trait SecretSource: Send + Sync {
    /// Fetch a secret by name.
    fn fetch(&self, name: &str) -> Option<String>;

    /// Get the source name, for diagnostics.
    fn name(&self) -> &str;
}

/// TOML secrets file, e.g.
///
/// ```toml
/// [tiingo]
/// api_key = "..."
/// ```
pub struct FileSecrets {
    values: HashMap<String, String>,
}

impl FileSecrets {
    /// Load a secrets file.
    pub fn load(path: &Path) -> Result<Self, SecretError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Result<Self, SecretError> {
        let table: toml::Table =
            toml::from_str(raw).map_err(|e| SecretError::Parse(e.to_string()))?;

        let mut values = HashMap::new();
        for (section, value) in table {
            match value {
                toml::Value::Table(inner) => {
                    for (key, value) in inner {
                        if let toml::Value::String(s) = value {
                            values.insert(format!("{}.{}", section, key), s);
                        }
                    }
                }
                toml::Value::String(s) => {
                    values.insert(section, s);
                }
                _ => {}
            }
        }

        Ok(Self { values })
    }
}

impl SecretSource for FileSecrets {
    fn fetch(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn name(&self) -> &str {
        "secrets file"
    }
}

/// Process environment source. Hosted deployments inject secrets as
/// environment variables: `tiingo.api_key` maps to `REGIME_TIINGO_API_KEY`.
pub struct EnvSecrets {
    prefix: String,
}

impl EnvSecrets {
    /// Create a source with the given variable prefix.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn var_name(&self, name: &str) -> String {
        format!(
            "{}_{}",
            self.prefix,
            name.replace('.', "_").to_uppercase()
        )
    }
}

impl Default for EnvSecrets {
    fn default() -> Self {
        Self::new("REGIME")
    }
}

impl SecretSource for EnvSecrets {
    fn fetch(&self, name: &str) -> Option<String> {
        std::env::var(self.var_name(name)).ok()
    }

    fn name(&self) -> &str {
        "environment"
    }
}

/// Ordered chain of secret sources.
pub struct SecretChain {
    sources: Vec<Box<dyn SecretSource>>,
}

impl SecretChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Build the standard chain: local secrets file (when present) first,
    /// then the environment.
    pub fn standard(secrets_file: &Path) -> Result<Self, SecretError> {
        let mut chain = Self::new();
        if secrets_file.exists() {
            chain.push(FileSecrets::load(secrets_file)?);
        }
        chain.push(EnvSecrets::default());
        Ok(chain)
    }

    /// Append a source; earlier sources win.
    pub fn push(&mut self, source: impl SecretSource + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Resolve a secret, trying sources in order.
    pub fn resolve(&self, name: &str) -> Result<String, SecretError> {
        for source in &self.sources {
            if let Some(value) = source.fetch(name) {
                debug!(secret = %name, source = %source.name(), "secret resolved");
                return Ok(value);
            }
        }
        Err(SecretError::Missing(name.to_string()))
    }
}

impl Default for SecretChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_secrets_dotted_names() {
        let secrets = FileSecrets::parse(
            r#"
            [tiingo]
            api_key = "file-token"

            top_level = "value"
            "#,
        )
        .unwrap();

        assert_eq!(secrets.fetch(TIINGO_API_KEY).as_deref(), Some("file-token"));
        assert_eq!(secrets.fetch("top_level").as_deref(), Some("value"));
        assert!(secrets.fetch("tiingo.missing").is_none());
    }

    #[test]
    fn test_file_secrets_bad_toml() {
        assert!(matches!(
            FileSecrets::parse("not [ valid"),
            Err(SecretError::Parse(_))
        ));
    }

    #[test]
    fn test_env_var_name_mapping() {
        let env = EnvSecrets::new("REGIME");
        assert_eq!(env.var_name("tiingo.api_key"), "REGIME_TIINGO_API_KEY");
    }

    #[test]
    fn test_chain_fallback_order() {
        let mut chain = SecretChain::new();
        chain.push(
            FileSecrets::parse("[tiingo]\napi_key = \"from-file\"\n").unwrap(),
        );
        std::env::set_var("CHAIN_TEST_TIINGO_API_KEY", "from-env");
        chain.push(EnvSecrets::new("CHAIN_TEST"));

        // First source wins.
        assert_eq!(chain.resolve(TIINGO_API_KEY).unwrap(), "from-file");

        // A name only the second source knows falls through.
        std::env::set_var("CHAIN_TEST_OTHER_TOKEN", "env-only");
        assert_eq!(chain.resolve("other.token").unwrap(), "env-only");

        std::env::remove_var("CHAIN_TEST_TIINGO_API_KEY");
        std::env::remove_var("CHAIN_TEST_OTHER_TOKEN");
    }

    #[test]
    fn test_missing_secret_names_only_the_key() {
        let chain = SecretChain::new();
        let err = chain.resolve(TIINGO_API_KEY).unwrap_err();

        assert_eq!(err.to_string(), "Secret not found: tiingo.api_key");
    }
}
