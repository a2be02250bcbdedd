mod config_content_provider;
mod config_store;
mod match_config;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_store::ConfigStore;
pub use match_config::MatchConfig;
pub use validate::Validate;
