use crate::domain::model::RemoteObject;
use crate::domain::ports::{ObjectFetcher, RegionLookup};
use crate::utils::error::Result;
use crate::utils::validation::{validate_bucket_name, validate_non_empty_string};

/// Object-store accessor handed to checks. Resolves the bucket's region via
/// the metadata endpoint, then downloads the object through a region-scoped
/// client into an in-memory handle.
pub struct S3Bucket<R: RegionLookup, F: ObjectFetcher> {
    region_lookup: R,
    fetcher: F,
}

impl<R: RegionLookup, F: ObjectFetcher> S3Bucket<R, F> {
    pub fn new(region_lookup: R, fetcher: F) -> Self {
        Self {
            region_lookup,
            fetcher,
        }
    }

    /// Downloads `key` from `bucket`. The returned handle is fully populated;
    /// `text()`/`json()` only decode.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<RemoteObject> {
        validate_bucket_name("bucket", bucket)?;
        validate_non_empty_string("key", key)?;

        let region = self.region_lookup.region().await?;
        tracing::debug!("Downloading s3://{}/{} from region {}", bucket, key, region);

        let buffer = self.fetcher.fetch(&region, bucket, key).await?;
        tracing::debug!("Downloaded {} bytes from s3://{}/{}", buffer.len(), bucket, key);

        Ok(RemoteObject::new(bucket, key, buffer))
    }
}
