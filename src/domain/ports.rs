use crate::utils::error::Result;

/// Read access to the externally-managed token cache. A refresh daemon owns
/// the tokens; implementations must return the freshest value on every call
/// and never cache.
pub trait TokenProvider: Send + Sync {
    fn current(&self, name: &str) -> Result<String>;
}

/// Resolves the region a bucket's storage client must be scoped to.
pub trait RegionLookup: Send + Sync {
    fn region(&self) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Downloads one object from a region-scoped store into memory.
pub trait ObjectFetcher: Send + Sync {
    fn fetch(
        &self,
        region: &str,
        bucket: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}
