use crate::utils::error::{PluginError, Result};
use std::collections::HashMap;

/// The `[configuration]` section of a plugin info file, as handed over by the
/// host at load time. Keys are dotted paths (`nakadi.url`, `oauth2.tokens`),
/// values are plain strings.
#[derive(Debug, Clone, Default)]
pub struct PluginSettings {
    values: HashMap<String, String>,
}

impl PluginSettings {
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Parses a TOML document into settings. Nested tables are flattened to
    /// dotted keys, so `[nakadi] url = "..."` becomes `nakadi.url`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(content).map_err(|e| PluginError::Config {
            message: format!("Failed to parse settings: {}", e),
        })?;

        let mut values = HashMap::new();
        flatten_toml("", &value, &mut values)?;
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, out: &mut HashMap<String, String>) -> Result<()> {
    match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_toml(&path, nested, out)?;
            }
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        toml::Value::Integer(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        toml::Value::Float(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        toml::Value::Boolean(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        _ => {
            return Err(PluginError::Config {
                message: format!("Unsupported settings value at '{}'", prefix),
            });
        }
    }
    Ok(())
}

/// Per-invocation context passed to a plugin factory's `create`. Checks can
/// override the integration URL or the token binding used for one entity.
#[derive(Debug, Clone, Default)]
pub struct FactoryContext {
    pub url: Option<String>,
    pub oauth2_token: Option<String>,
    pub entity_id: Option<String>,
}

impl FactoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_oauth2_token(mut self, token_name: impl Into<String>) -> Self {
        self.oauth2_token = Some(token_name.into());
        self
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}
