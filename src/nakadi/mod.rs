pub mod client;
pub mod factory;

pub use client::{NakadiClient, RequestBody};
pub use factory::{configure, create_client, NakadiConfig};
