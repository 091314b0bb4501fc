use crate::config::{FactoryContext, PluginSettings};
use crate::objstore::bucket::S3Bucket;
use crate::objstore::sdk::{HttpRegionLookup, SdkObjectFetcher, DEFAULT_METADATA_URL};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;

/// Load-time configuration of the object-store plugin.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub metadata_url: String,
}

/// Runs once when the host loads the plugin.
pub fn configure(settings: &PluginSettings) -> Result<S3Config> {
    let metadata_url = settings
        .get_or("s3.metadata.url", DEFAULT_METADATA_URL)
        .to_string();
    validate_url("s3.metadata.url", &metadata_url)?;

    tracing::info!("Object-store plugin configured, metadata endpoint {}", metadata_url);
    Ok(S3Config { metadata_url })
}

/// Runs per invocation context; builds a fresh accessor. The context may
/// point region discovery at a different metadata endpoint.
pub fn create_client(
    ctx: &FactoryContext,
    config: &S3Config,
) -> S3Bucket<HttpRegionLookup, SdkObjectFetcher> {
    let metadata_url = ctx.url.as_deref().unwrap_or(&config.metadata_url);

    S3Bucket::new(
        HttpRegionLookup::new(metadata_url),
        SdkObjectFetcher::new(),
    )
}
