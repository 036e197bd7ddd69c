//! GoTrue-style authentication endpoints for the relational variant.

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;

use gymtrack_core::auth::{AuthEvent, AuthSession, AuthSubscription, OAuthProvider, SignUpOutcome};
use gymtrack_core::backend::{AuthServiceTrait, BackendError, BackendResult};

use crate::http::{expect_success, parse_json, transport};

use super::RelationalBackend;

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
    identities: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: AuthUser,
}

/// The signup endpoint answers with a session when confirmation is off and
/// with a bare user when a confirmation email went out.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<AuthUser>,
    id: Option<String>,
    identities: Option<Vec<serde_json::Value>>,
}

fn oauth_state_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

impl RelationalBackend {
    fn install_session(&self, user: AuthUser, fallback_email: &str, access: String, refresh: String) -> AuthSession {
        let session = AuthSession {
            account_id: user.id,
            email: user.email.unwrap_or_else(|| fallback_email.to_string()),
            access_token: access,
            refresh_token: refresh,
        };
        self.session.install(session.clone());
        session
    }
}

#[async_trait]
impl AuthServiceTrait for RelationalBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<AuthSession> {
        let response = self
            .client
            .post(self.auth_url("token?grant_type=password"))
            .headers(self.headers()?)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;
        let token: TokenResponse = parse_json(response).await?;
        Ok(self.install_session(token.user, email, token.access_token, token.refresh_token))
    }

    async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> BackendResult<SignUpOutcome> {
        let response = self
            .client
            .post(self.auth_url("signup"))
            .headers(self.headers()?)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "display_name": display_name },
            }))
            .send()
            .await
            .map_err(transport)?;
        let parsed: SignUpResponse = parse_json(response).await?;

        if let (Some(access), Some(refresh)) = (parsed.access_token, parsed.refresh_token) {
            let user = parsed
                .user
                .ok_or_else(|| BackendError::encoding("signup session carried no user"))?;
            return Ok(SignUpOutcome {
                session: Some(self.install_session(user, email, access, refresh)),
                needs_confirmation: false,
            });
        }

        // A user with an empty identities list is the service's way of
        // saying the address is already registered without enumerating it.
        let identities = parsed
            .identities
            .or_else(|| parsed.user.as_ref().and_then(|u| u.identities.clone()));
        if identities.is_some_and(|list| list.is_empty()) {
            return Err(BackendError::api(
                422,
                "an account with this email already exists",
            ));
        }

        let got_user = parsed.id.is_some() || parsed.user.is_some();
        Ok(SignUpOutcome {
            session: None,
            needs_confirmation: got_user,
        })
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> BackendResult<String> {
        // The authorize endpoint *is* the URL to open; no round-trip needed.
        Ok(format!(
            "{}?provider={}&redirect_to={}&state={}",
            self.auth_url("authorize"),
            provider.as_str(),
            urlencoding::encode(&self.config.oauth_redirect_url),
            oauth_state_nonce(),
        ))
    }

    async fn set_session(&self, access_token: &str, refresh_token: &str) -> BackendResult<AuthSession> {
        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport)?;
        let user: AuthUser = parse_json(response).await?;
        Ok(self.install_session(user, "", access_token.to_string(), refresh_token.to_string()))
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let token = self.session.access_token();
        self.session.clear();
        let Some(token) = token else {
            return Ok(());
        };
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn send_password_reset(&self, email: &str) -> BackendResult<()> {
        let response = self
            .client
            .post(self.auth_url("recover"))
            .headers(self.headers()?)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn resend_confirmation(&self, email: &str) -> BackendResult<()> {
        let response = self
            .client
            .post(self.auth_url("resend"))
            .headers(self.headers()?)
            .json(&serde_json::json!({ "type": "signup", "email": email }))
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.current()
    }

    fn subscribe(&self, listener: Box<dyn Fn(&AuthEvent) + Send + Sync>) -> AuthSubscription {
        self.session.subscribe(listener)
    }
}
