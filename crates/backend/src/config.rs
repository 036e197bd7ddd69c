use serde::{Deserialize, Serialize};

use gymtrack_core::backend::Backend;

use crate::{DocumentBackend, LocalBackend, RelationalBackend};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    pub base_url: String,
    pub project_id: String,
    pub api_key: String,
    /// App-scheme URI the OAuth flow redirects back to.
    pub oauth_redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationalConfig {
    pub base_url: String,
    pub anon_key: String,
    /// App-scheme URI the OAuth flow redirects back to.
    pub oauth_redirect_url: String,
    #[serde(default = "default_photo_bucket")]
    pub photo_bucket: String,
}

fn default_photo_bucket() -> String {
    "progress-photos".to_string()
}

/// Which backend variant this build talks to. Exactly one is active,
/// selected here at startup rather than by swapping source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum BackendConfig {
    /// No remote persistence; accounts are fabricated from the email at
    /// sign-in and live only in the local cache.
    Local,
    Document(DocumentConfig),
    Relational(RelationalConfig),
}

/// Build the configured adapter and bundle its three sub-contracts.
pub fn create_backend(config: BackendConfig) -> Backend {
    match config {
        BackendConfig::Local => LocalBackend::create(),
        BackendConfig::Document(config) => DocumentBackend::create(config),
        BackendConfig::Relational(config) => RelationalBackend::create(config),
    }
}
