use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub Uuid);

/// One student's bootcamp sign-up, as stored in the remote
/// `registrations` table. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub full_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub major: String,
    pub department: String,
    pub campus: String,
    pub programming_knowledge: String,
    pub programming_goals: String,
    pub created_at: DateTime<Utc>,
}

/// The user-entered half of a registration, before the remote store
/// assigns an id and creation timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub major: String,
    pub department: String,
    pub campus: String,
    pub programming_knowledge: String,
    pub programming_goals: String,
}

impl RegistrationDraft {
    /// Required-field presence check; reports the first missing field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("full_name", &self.full_name),
            ("last_name", &self.last_name),
            ("date_of_birth", &self.date_of_birth),
            ("major", &self.major),
            ("department", &self.department),
            ("campus", &self.campus),
            ("programming_knowledge", &self.programming_knowledge),
            ("programming_goals", &self.programming_goals),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("missing required field: {name}"));
            }
        }
        Ok(())
    }
}

/// An active auth session as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub email: String,
}

/// Derived dashboard statistics, recomputed whenever the registration
/// list changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: usize,
    pub top_major: String,
    pub beginners_pct: u8,
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self {
            total: 0,
            top_major: "N/A".to_string(),
            beginners_pct: 0,
        }
    }
}
