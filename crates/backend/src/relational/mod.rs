//! Relational variant: per-category tables over a PostgREST-style REST
//! surface, GoTrue-style auth endpoints, and object storage for photo blobs.

mod auth;
mod blobs;
mod data;
pub mod rows;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;

use gymtrack_core::backend::{Backend, BackendError, BackendResult};

use crate::config::RelationalConfig;
use crate::http::build_client;
use crate::session::SessionState;

pub struct RelationalBackend {
    client: Client,
    config: RelationalConfig,
    session: SessionState,
}

impl RelationalBackend {
    pub fn new(config: RelationalConfig) -> Self {
        Self {
            client: build_client(),
            config,
            session: SessionState::new(),
        }
    }

    pub fn create(config: RelationalConfig) -> Backend {
        let adapter = Arc::new(Self::new(config));
        Backend {
            auth: adapter.clone(),
            store: adapter.clone(),
            blobs: adapter,
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url(), table)
    }

    fn auth_url(&self, op: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url(), op)
    }

    /// Standard headers: the service key plus a bearer token, which is the
    /// session's when signed in and the anonymous key otherwise.
    fn headers(&self) -> BackendResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&self.config.anon_key)
            .map_err(|_| BackendError::auth("invalid service key format"))?;
        headers.insert("apikey", api_key);

        let token = self
            .session
            .access_token()
            .unwrap_or_else(|| self.config.anon_key.clone());
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| BackendError::auth("invalid access token format"))?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }
}
