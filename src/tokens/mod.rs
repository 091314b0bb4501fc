use crate::utils::error::{PluginError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub use crate::domain::ports::TokenProvider;

/// A named credential scope registered at configure time. The refresh daemon
/// keeps the underlying token alive; this side only records which names are
/// valid and which scopes they were declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBinding {
    pub name: String,
    pub scopes: Vec<String>,
}

/// Registered token bindings plus the provider that serves current values.
/// `get` reads the provider on every call so rotated tokens are picked up
/// immediately.
pub struct TokenManager {
    bindings: HashMap<String, TokenBinding>,
    provider: Arc<dyn TokenProvider>,
}

impl TokenManager {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            bindings: HashMap::new(),
            provider,
        }
    }

    pub fn register(&mut self, name: &str, scopes: &[&str]) {
        self.bindings.insert(
            name.to_string(),
            TokenBinding {
                name: name.to_string(),
                scopes: scopes.iter().map(|s| s.to_string()).collect(),
            },
        );
    }

    /// Parses the `oauth2.tokens` setting, format
    /// `name=scope1,scope2:name2=scope3`, and registers each binding.
    pub fn register_bindings(&mut self, spec: &str) -> Result<()> {
        for part in spec.split(':') {
            let (name, scopes) = part.split_once('=').ok_or_else(|| PluginError::Config {
                message: format!("Malformed token binding '{}', expected name=scopes", part),
            })?;
            if name.is_empty() {
                return Err(PluginError::Config {
                    message: format!("Malformed token binding '{}', empty name", part),
                });
            }
            let scopes: Vec<&str> = scopes.split(',').collect();
            self.register(name, &scopes);
        }
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn binding(&self, name: &str) -> Option<&TokenBinding> {
        self.bindings.get(name)
    }

    /// Current token for a registered binding, read fresh from the provider.
    pub fn get(&self, name: &str) -> Result<String> {
        if !self.bindings.contains_key(name) {
            return Err(PluginError::Token {
                message: format!("Token '{}' was never registered", name),
            });
        }
        self.provider.current(name)
    }
}

/// In-memory tokens, for tests and hosts that inject values directly.
#[derive(Default)]
pub struct StaticTokenProvider {
    tokens: Mutex<HashMap<String, String>>,
}

impl StaticTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into(), value.into());
    }
}

impl TokenProvider for StaticTokenProvider {
    fn current(&self, name: &str) -> Result<String> {
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
            .ok_or_else(|| PluginError::Token {
                message: format!("No token available for '{}'", name),
            })
    }
}

/// Tokens materialized as files by the platform's refresh daemon, one
/// `<name>.token` file per binding. Read on every call; the daemon rewrites
/// the files as tokens rotate.
pub struct FileTokenProvider {
    dir: PathBuf,
}

impl FileTokenProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TokenProvider for FileTokenProvider {
    fn current(&self, name: &str) -> Result<String> {
        let path = self.dir.join(format!("{}.token", name));
        let value = std::fs::read_to_string(&path).map_err(|e| PluginError::Token {
            message: format!("Failed to read token file {}: {}", path.display(), e),
        })?;
        Ok(value.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn manager_with(provider: StaticTokenProvider) -> TokenManager {
        TokenManager::new(Arc::new(provider))
    }

    #[test]
    fn test_get_reads_provider_on_every_call() {
        let provider = Arc::new(StaticTokenProvider::new());
        provider.insert("uid", "first-token");

        let mut manager = TokenManager::new(provider.clone());
        manager.register("uid", &["uid"]);

        assert_eq!(manager.get("uid").unwrap(), "first-token");

        // rotated externally, next read sees the new value
        provider.insert("uid", "second-token");
        assert_eq!(manager.get("uid").unwrap(), "second-token");
    }

    #[test]
    fn test_get_unregistered_name_fails() {
        let provider = StaticTokenProvider::new();
        provider.insert("nakadi", "secret");

        let manager = manager_with(provider);
        let err = manager.get("nakadi").unwrap_err();
        assert!(matches!(err, PluginError::Token { .. }));
    }

    #[test]
    fn test_register_bindings_parses_spec() {
        let mut manager = manager_with(StaticTokenProvider::new());
        manager
            .register_bindings("nakadi=nakadi.event_stream.read,uid:reports=storage.read")
            .unwrap();

        let binding = manager.binding("nakadi").unwrap();
        assert_eq!(binding.scopes, vec!["nakadi.event_stream.read", "uid"]);
        let binding = manager.binding("reports").unwrap();
        assert_eq!(binding.scopes, vec!["storage.read"]);
    }

    #[test]
    fn test_register_bindings_rejects_malformed_spec() {
        let mut manager = manager_with(StaticTokenProvider::new());

        assert!(manager.register_bindings("no-equals-sign").is_err());
        assert!(manager.register_bindings("=scope").is_err());
    }

    #[test]
    fn test_file_provider_reads_fresh_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uid.token");
        std::fs::write(&path, "token-one\n").unwrap();

        let provider = FileTokenProvider::new(dir.path());
        assert_eq!(provider.current("uid").unwrap(), "token-one");

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"token-two\n").unwrap();
        assert_eq!(provider.current("uid").unwrap(), "token-two");
    }

    #[test]
    fn test_file_provider_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileTokenProvider::new(dir.path());

        assert!(matches!(
            provider.current("absent").unwrap_err(),
            PluginError::Token { .. }
        ));
    }
}
