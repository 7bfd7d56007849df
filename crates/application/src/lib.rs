//! Gateway service and the provider port it orchestrates.

#![forbid(unsafe_code)]

mod identity_gateway;
mod provider_client;

pub use identity_gateway::IdentityGateway;
pub use provider_client::{ProviderCallError, ProviderClient, UserCreation};
