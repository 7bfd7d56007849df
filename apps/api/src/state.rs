use idgate_application::IdentityGateway;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: IdentityGateway,
}
