use crate::domain::ports::{ObjectFetcher, RegionLookup};
use crate::utils::error::{PluginError, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use reqwest::Client;

/// EC2 instance-identity document; answers `{"region": "..."}` among other
/// fields when running inside the platform.
pub const DEFAULT_METADATA_URL: &str =
    "http://169.254.169.254/latest/dynamic/instance-identity/document";

/// Region discovery against a metadata endpoint returning `{"region": <string>}`.
pub struct HttpRegionLookup {
    client: Client,
    endpoint: String,
}

impl HttpRegionLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl RegionLookup for HttpRegionLookup {
    async fn region(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != reqwest::StatusCode::OK {
            return Err(PluginError::Api {
                method: "get".to_string(),
                url: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let document: serde_json::Value = serde_json::from_str(&body)?;
        document
            .get("region")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| PluginError::Config {
                message: format!("Metadata document from {} has no region", self.endpoint),
            })
    }
}

/// Fetches objects through a region-scoped AWS SDK client built per call.
#[derive(Debug, Clone, Default)]
pub struct SdkObjectFetcher;

impl SdkObjectFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl ObjectFetcher for SdkObjectFetcher {
    async fn fetch(&self, region: &str, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let config = aws_sdk_s3::config::Builder::from(&shared)
            .region(Region::new(region.to_string()))
            .build();
        let client = S3Client::from_conf(config);

        let response = client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| PluginError::ObjectStore {
                message: format!("Failed to download s3://{}/{}: {}", bucket, key, e),
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| PluginError::ObjectStore {
                message: format!("Failed to collect body of s3://{}/{}: {}", bucket, key, e),
            })?;

        Ok(data.into_bytes().to_vec())
    }
}
