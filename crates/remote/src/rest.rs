use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Registration, RegistrationDraft, Session},
    error::StoreError,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{RemoteStore, Settings};

/// REST client for a Supabase-style backend: `/auth/v1/*` for the auth
/// service and `/rest/v1/registrations` for the table store. The bearer
/// token lives in memory only; durable session storage is the remote
/// service's concern.
pub struct RestStore {
    http: Client,
    api_url: String,
    api_key: String,
    session: RwLock<Option<Session>>,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    email: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    user: AuthUser,
}

impl RestStore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: Client::new(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            session: RwLock::new(None),
        }
    }

    /// Token sent as the bearer: the session token once signed in, the
    /// anon key otherwise.
    async fn bearer(&self) -> String {
        match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.api_key.clone(),
        }
    }

    async fn auth_request(&self, path: &str, body: &CredentialsBody<'_>) -> Result<Session, StoreError> {
        let response = self
            .http
            .post(format!("{}{path}", self.api_url))
            .header("apikey", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let response = check_status(response).await?;
        let auth: AuthResponse = response.json().await.map_err(transport)?;
        let Some(access_token) = auth.access_token else {
            return Err(StoreError::Internal(
                "auth service accepted the request but issued no session".into(),
            ));
        };

        let session = Session {
            access_token,
            email: auth.user.email,
        };
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }
}

#[async_trait::async_trait]
impl RemoteStore for RestStore {
    async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        let Some(session) = self.session.read().await.clone() else {
            return Ok(None);
        };

        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.api_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("stored session no longer honored by auth service");
                *self.session.write().await = None;
                Ok(None)
            }
            status if status.is_success() => Ok(Some(session)),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(StoreError::remote(status.as_u16(), message))
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        self.auth_request(
            "/auth/v1/token?grant_type=password",
            &CredentialsBody { email, password },
        )
        .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        self.auth_request("/auth/v1/signup", &CredentialsBody { email, password })
            .await
    }

    async fn sign_out(&self) -> Result<(), StoreError> {
        let token = {
            let mut guard = self.session.write().await;
            guard.take().map(|session| session.access_token)
        };
        let Some(token) = token else {
            return Ok(());
        };

        let response = self
            .http
            .post(format!("{}/auth/v1/logout", self.api_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn list_registrations(&self) -> Result<Vec<Registration>, StoreError> {
        let response = self
            .http
            .get(format!("{}/rest/v1/registrations", self.api_url))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer().await)
            .send()
            .await
            .map_err(transport)?;

        let response = check_status(response).await?;
        response.json().await.map_err(transport)
    }

    async fn insert_registration(&self, draft: &RegistrationDraft) -> Result<(), StoreError> {
        let response = self
            .http
            .post(format!("{}/rest/v1/registrations", self.api_url))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer().await)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;

        check_status(response).await?;
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(StoreError::Unauthorized);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::remote(status.as_u16(), message))
}
