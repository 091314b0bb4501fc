use crate::config::{FactoryContext, PluginSettings};
use crate::nakadi::client::NakadiClient;
use crate::tokens::{TokenManager, TokenProvider};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use std::sync::Arc;

/// Fallback token binding; always registered so a client without explicit
/// token configuration can still authenticate as the worker itself.
const UID_TOKEN: &str = "uid";

/// Load-time configuration of the Nakadi plugin: integration URL, default
/// token binding, and the token manager serving current values.
#[derive(Clone)]
pub struct NakadiConfig {
    pub base_url: String,
    pub default_token: Option<String>,
    pub tokens: Arc<TokenManager>,
}

/// Runs once when the host loads the plugin. Registers every binding
/// declared in `oauth2.tokens` plus the fixed `uid` binding against the
/// injected provider; the external refresh daemon keeps them current.
pub fn configure(
    settings: &PluginSettings,
    provider: Arc<dyn TokenProvider>,
) -> Result<NakadiConfig> {
    let base_url = settings.get_or("nakadi.url", "").to_string();
    if !base_url.is_empty() {
        validate_url("nakadi.url", &base_url)?;
    }

    let default_token = settings
        .get("nakadi.oauth2")
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let mut tokens = TokenManager::new(provider);
    if let Some(spec) = settings.get("oauth2.tokens") {
        tokens.register_bindings(spec)?;
    }
    tokens.register(UID_TOKEN, &[UID_TOKEN]);

    tracing::info!(
        "Nakadi plugin configured, url {:?}, default token {:?}",
        base_url,
        default_token.as_deref().unwrap_or(UID_TOKEN)
    );

    Ok(NakadiConfig {
        base_url,
        default_token,
        tokens: Arc::new(tokens),
    })
}

/// Runs per invocation context. Context overrides win over configured
/// defaults; the token binding falls back to `uid` when neither names one.
pub fn create_client(ctx: &FactoryContext, config: &NakadiConfig) -> NakadiClient {
    let base_url = ctx.url.as_deref().unwrap_or(&config.base_url);
    let token_name = ctx
        .oauth2_token
        .as_deref()
        .or(config.default_token.as_deref())
        .unwrap_or(UID_TOKEN);

    NakadiClient::new(base_url, token_name, config.tokens.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::StaticTokenProvider;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> PluginSettings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PluginSettings::from_map(map)
    }

    fn provider() -> Arc<StaticTokenProvider> {
        Arc::new(StaticTokenProvider::new())
    }

    #[test]
    fn test_configure_registers_declared_bindings_and_uid() {
        let config = configure(
            &settings(&[
                ("nakadi.url", "https://nakadi.example.org"),
                ("nakadi.oauth2", "nakadi"),
                ("oauth2.tokens", "nakadi=nakadi.event_stream.read:ops=uid,ops.read"),
            ]),
            provider(),
        )
        .unwrap();

        assert!(config.tokens.is_registered("nakadi"));
        assert!(config.tokens.is_registered("ops"));
        assert!(config.tokens.is_registered("uid"));
        assert_eq!(config.default_token.as_deref(), Some("nakadi"));
    }

    #[test]
    fn test_configure_without_token_settings() {
        let config = configure(&settings(&[]), provider()).unwrap();

        assert!(config.tokens.is_registered("uid"));
        assert!(config.default_token.is_none());
        assert_eq!(config.base_url, "");
    }

    #[test]
    fn test_configure_rejects_malformed_binding_spec() {
        let result = configure(&settings(&[("oauth2.tokens", "missing-equals")]), provider());

        assert!(result.is_err());
    }

    #[test]
    fn test_configure_rejects_invalid_url() {
        let result = configure(&settings(&[("nakadi.url", "not a url")]), provider());

        assert!(result.is_err());
    }

    #[test]
    fn test_create_client_uses_configured_defaults() {
        let config = configure(
            &settings(&[
                ("nakadi.url", "https://nakadi.example.org"),
                ("nakadi.oauth2", "nakadi"),
                ("oauth2.tokens", "nakadi=nakadi.event_stream.read"),
            ]),
            provider(),
        )
        .unwrap();

        let client = create_client(&FactoryContext::new(), &config);

        assert_eq!(client.base_url(), "https://nakadi.example.org");
        assert_eq!(client.token_name(), "nakadi");
    }

    #[test]
    fn test_create_client_context_overrides_win() {
        let config = configure(
            &settings(&[("nakadi.url", "https://nakadi.example.org")]),
            provider(),
        )
        .unwrap();

        let ctx = FactoryContext::new()
            .with_url("https://staging.example.org/")
            .with_oauth2_token("staging");
        let client = create_client(&ctx, &config);

        assert_eq!(client.base_url(), "https://staging.example.org");
        assert_eq!(client.token_name(), "staging");
    }

    #[test]
    fn test_create_client_falls_back_to_uid() {
        let config = configure(
            &settings(&[("nakadi.url", "https://nakadi.example.org")]),
            provider(),
        )
        .unwrap();

        let client = create_client(&FactoryContext::new(), &config);

        assert_eq!(client.token_name(), "uid");
    }
}
