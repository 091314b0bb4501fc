pub mod config;
pub mod domain;
pub mod nakadi;
pub mod objstore;
pub mod tokens;
pub mod utils;

pub use config::{FactoryContext, PluginSettings};
pub use domain::model::{Cursor, RemoteObject};
pub use nakadi::{client::NakadiClient, factory::NakadiConfig};
pub use objstore::{bucket::S3Bucket, factory::S3Config};
pub use tokens::{FileTokenProvider, StaticTokenProvider, TokenManager, TokenProvider};
pub use utils::error::{PluginError, Result};

/// Client identity sent as the `User-Agent` header on every outgoing request.
pub const USER_AGENT: &str = concat!("check-plugins/", env!("CARGO_PKG_VERSION"));
