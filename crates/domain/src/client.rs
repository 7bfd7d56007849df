use serde::{Deserialize, Serialize};

/// Client application registration mirrored from the provider.
///
/// `client_id` is the human-readable name callers use; `id` is the
/// provider's internal opaque identifier every admin endpoint is keyed by.
/// Intermediate only: never returned to gateway callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// Internal opaque identifier.
    pub id: String,
    /// Human-readable client identifier.
    pub client_id: String,
}
