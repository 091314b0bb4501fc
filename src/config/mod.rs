pub mod settings;

pub use settings::{FactoryContext, PluginSettings};
