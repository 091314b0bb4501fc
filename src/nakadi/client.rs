use crate::domain::model::Cursor;
use crate::tokens::TokenManager;
use crate::utils::error::{PluginError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

/// Explicit serializer boundary for POST bodies: either a structured value
/// serialized to JSON here, or pre-rendered text sent as-is. Both go out
/// with `Content-Type: application/json`.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Raw(String),
}

#[derive(Debug, Deserialize)]
struct CursorDistance {
    distance: i64,
}

/// Client for the event-streaming API. Stateless per call: the only held
/// state is the base URL and the token binding name; the token value itself
/// is read fresh from the manager on every request.
pub struct NakadiClient {
    http: Client,
    base_url: String,
    token_name: String,
    tokens: Arc<TokenManager>,
}

impl NakadiClient {
    pub fn new(
        base_url: impl Into<String>,
        token_name: impl Into<String>,
        tokens: Arc<TokenManager>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token_name: token_name.into(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.tokens.get(&self.token_name)?;

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(USER_AGENT, crate::USER_AGENT);

        if let Some(body) = body {
            let payload = match body {
                RequestBody::Json(value) => serde_json::to_string(&value)?,
                RequestBody::Raw(text) => text,
            };
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        tracing::debug!("{} {}", method, url);
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;
        if status != StatusCode::OK {
            return Err(PluginError::Api {
                method: method.as_str().to_lowercase(),
                url,
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Consumption stats for one subscription,
    /// `GET /subscriptions/{id}/stats`. The payload shape is owned by the
    /// streaming service; checks index into it dynamically.
    pub async fn subscription_stats(&self, subscription_id: &str) -> Result<serde_json::Value> {
        self.request(
            Method::GET,
            &format!("/subscriptions/{}/stats", subscription_id),
            None,
        )
        .await
    }

    /// Distance between a single pair of cursors. Normalized to a
    /// one-element batch on the wire, unwrapped back to a scalar.
    pub async fn distance(&self, event_type: &str, begin: &Cursor, end: &Cursor) -> Result<i64> {
        let distances = self
            .distance_batch(event_type, std::slice::from_ref(begin), std::slice::from_ref(end))
            .await?;
        distances
            .into_iter()
            .next()
            .ok_or_else(|| PluginError::Validation {
                message: "Cursor-distance response was empty".to_string(),
            })
    }

    /// Distances between cursor pairs, `POST /event-types/{type}/cursor-distances`.
    /// Results come back in input order.
    pub async fn distance_batch(
        &self,
        event_type: &str,
        begin: &[Cursor],
        end: &[Cursor],
    ) -> Result<Vec<i64>> {
        if begin.len() != end.len() {
            return Err(PluginError::Validation {
                message: format!(
                    "Cursor batches must have equal length, got {} begin and {} end",
                    begin.len(),
                    end.len()
                ),
            });
        }
        if begin.is_empty() {
            return Ok(Vec::new());
        }

        let pairs: Vec<serde_json::Value> = begin
            .iter()
            .zip(end.iter())
            .map(|(initial, fin)| {
                serde_json::json!({"initial_cursor": initial, "final_cursor": fin})
            })
            .collect();

        let response = self
            .request(
                Method::POST,
                &format!("/event-types/{}/cursor-distances", event_type),
                Some(RequestBody::Json(serde_json::Value::Array(pairs))),
            )
            .await?;

        let items: Vec<CursorDistance> = serde_json::from_value(response)?;
        Ok(items.into_iter().map(|item| item.distance).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::StaticTokenProvider;

    fn client(base_url: &str) -> NakadiClient {
        let provider = StaticTokenProvider::new();
        provider.insert("uid", "test-token");
        let mut manager = TokenManager::new(Arc::new(provider));
        manager.register("uid", &["uid"]);

        NakadiClient::new(base_url, "uid", Arc::new(manager))
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = client("https://nakadi.example.org/");

        assert_eq!(client.base_url(), "https://nakadi.example.org");
        assert_eq!(client.token_name(), "uid");
    }

    #[tokio::test]
    async fn test_distance_batch_rejects_unequal_lengths() {
        let client = client("https://nakadi.example.org");
        let begin = vec![Cursor::new("0", "0"), Cursor::new("1", "0")];
        let end = vec![Cursor::new("0", "5")];

        // fails before any request is sent
        let err = client.distance_batch("et", &begin, &end).await.unwrap_err();
        assert!(matches!(err, PluginError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_distance_batch_empty_input_short_circuits() {
        let client = client("https://nakadi.example.org");

        let distances = client.distance_batch("et", &[], &[]).await.unwrap();
        assert!(distances.is_empty());
    }
}
