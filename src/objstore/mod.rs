pub mod bucket;
pub mod factory;
pub mod sdk;

pub use bucket::S3Bucket;
pub use factory::{configure, create_client, S3Config};
pub use sdk::{HttpRegionLookup, SdkObjectFetcher};
