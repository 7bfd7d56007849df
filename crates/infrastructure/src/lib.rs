//! Infrastructure adapters for the provider port.

#![forbid(unsafe_code)]

mod http_provider_client;
mod provider_config;

pub use http_provider_client::HttpProviderClient;
pub use provider_config::ProviderConfig;
