use crate::auth::UserId;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// HTTP client for the external identity provider (a GoTrue-style auth API).
/// Signup, password and refresh grants, and session revocation all go
/// through here; this service never stores credentials itself.
#[derive(Clone)]
pub struct IdentityProvider {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("identity provider rejected the request: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProviderUser {
    pub id: UserId,
    pub email: String,
}

/// Token pair returned by the provider's grant endpoints.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ProviderUser>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    error: Option<String>,
}

impl IdentityProvider {
    pub fn new(base_url: String, api_key: String) -> IdentityProvider {
        IdentityProvider {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.api_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, password))]
    pub async fn password_grant(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ProviderError> {
        let response = self
            .http
            .post(format!("{}/token?grant_type=password", self.base_url))
            .header("apikey", &self.api_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        let session = Self::check(response).await?.json().await?;
        Ok(session)
    }

    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, ProviderError> {
        let response = self
            .http
            .post(format!("{}/token?grant_type=refresh_token", self.base_url))
            .header("apikey", &self.api_key)
            .json(&RefreshGrant { refresh_token })
            .send()
            .await?;
        let session = Self::check(response).await?.json().await?;
        Ok(session)
    }

    #[instrument(skip(self, access_token))]
    pub async fn logout(&self, access_token: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error_description.or(body.msg).or(body.error))
            .unwrap_or_else(|| "request failed".to_owned());
        Err(ProviderError::Rejected { status, message })
    }
}
