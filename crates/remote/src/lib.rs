//! Client for the hosted table store + auth service the app reads and
//! writes through. The surface is deliberately narrow so the controller
//! and aggregator can be tested against an injected mock.

use async_trait::async_trait;
use shared::{
    domain::{Registration, RegistrationDraft, Session},
    error::StoreError,
};

mod config;
mod rest;

pub use config::{load_settings, Settings};
pub use rest::RestStore;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Reports the active session, if the auth service still honors it.
    async fn current_session(&self) -> Result<Option<Session>, StoreError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, StoreError>;
    async fn sign_out(&self) -> Result<(), StoreError>;
    /// All registrations, newest first (ordering applied server-side).
    async fn list_registrations(&self) -> Result<Vec<Registration>, StoreError>;
    async fn insert_registration(&self, draft: &RegistrationDraft) -> Result<(), StoreError>;
}

/// Placeholder store failing every call, for wiring the controller
/// before a real backend is configured.
pub struct MissingStore;

#[async_trait]
impl RemoteStore for MissingStore {
    async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        Err(StoreError::Internal("remote store unavailable".into()))
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, StoreError> {
        Err(StoreError::Internal("remote store unavailable".into()))
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Session, StoreError> {
        Err(StoreError::Internal("remote store unavailable".into()))
    }

    async fn sign_out(&self) -> Result<(), StoreError> {
        Err(StoreError::Internal("remote store unavailable".into()))
    }

    async fn list_registrations(&self) -> Result<Vec<Registration>, StoreError> {
        Err(StoreError::Internal("remote store unavailable".into()))
    }

    async fn insert_registration(&self, _draft: &RegistrationDraft) -> Result<(), StoreError> {
        Err(StoreError::Internal("remote store unavailable".into()))
    }
}

#[cfg(test)]
mod tests;
