//! Authentication gate over the remote auth service, plus the modal's
//! fixed-credential pre-check.

use std::sync::Arc;

use remote::RemoteStore;
use shared::{domain::Session, error::StoreError};
use tracing::{error, info};

/// The single credential pair the login modal accepts. The modal checks
/// this before the remote gate is ever invoked, so other credentials
/// never reach the network path.
pub const ADMIN_USERNAME: &str = "Ash";
pub const ADMIN_PASSWORD: &str = "Ash2004";

pub fn modal_precheck(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

/// Synthesized remote identity for an admin username.
pub fn admin_email(username: &str, domain: &str) -> String {
    format!("{}@{domain}", username.to_lowercase())
}

pub struct AuthGate {
    store: Arc<dyn RemoteStore>,
    admin_domain: String,
}

impl AuthGate {
    pub fn new(store: Arc<dyn RemoteStore>, admin_domain: impl Into<String>) -> Self {
        Self {
            store,
            admin_domain: admin_domain.into(),
        }
    }

    /// Signs in with the synthesized identity; a failed sign-in is
    /// treated as "this identity may not exist yet" and retried as a
    /// sign-up. A double failure is logged and aborts with no state
    /// change.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, StoreError> {
        let email = admin_email(username, &self.admin_domain);
        match self.store.sign_in(&email, password).await {
            Ok(session) => Ok(session),
            Err(sign_in_err) => {
                info!(%email, "sign-in failed ({sign_in_err}); attempting sign-up");
                match self.store.sign_up(&email, password).await {
                    Ok(session) => Ok(session),
                    Err(sign_up_err) => {
                        error!(%email, "auth error: sign-up also failed: {sign_up_err}");
                        Err(sign_up_err)
                    }
                }
            }
        }
    }

    pub async fn logout(&self) -> Result<(), StoreError> {
        self.store.sign_out().await
    }

    pub async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        self.store.current_session().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precheck_accepts_only_the_fixed_pair() {
        assert!(modal_precheck("Ash", "Ash2004"));
        assert!(!modal_precheck("Ash", "wrong"));
        assert!(!modal_precheck("ash", "Ash2004"));
        assert!(!modal_precheck("", ""));
    }

    #[test]
    fn admin_email_lowercases_the_username() {
        assert_eq!(admin_email("Ash", "urex.admin"), "ash@urex.admin");
        assert_eq!(admin_email("ASH", "urex.admin"), "ash@urex.admin");
    }
}
