//! Account and profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use barbermatch_core::{AccountId, Entity};

use crate::Role;

/// A registered identity, including its password hash.
///
/// Never serialized: callers only ever see an [`AccountView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: AccountId::new(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Projection without the password hash.
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> AccountId {
        self.id
    }
}

/// Public projection of an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Display name and free-text style preference; at most one per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub account_id: AccountId,
    pub name: Option<String>,
    pub style_preferences: Option<String>,
}

impl Profile {
    pub fn empty(account_id: AccountId) -> Self {
        Self {
            account_id,
            name: None,
            style_preferences: None,
        }
    }

    /// Field-level overwrite: only fields present in `patch` change.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(style_preferences) = patch.style_preferences {
            self.style_preferences = Some(style_preferences);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub style_preferences: Option<String>,
}

/// Account projection with its profile attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithProfile {
    #[serde(flatten)]
    pub account: AccountView,
    pub profile: Option<Profile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_omits_password_hash() {
        let account = Account::new("ana@example.com", "$argon2id$v=19$...", Role::Client);
        let json = serde_json::to_value(account.view()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["role"], "client");
    }

    #[test]
    fn profile_patch_overwrites_only_supplied_fields() {
        let mut profile = Profile {
            account_id: AccountId::new(),
            name: Some("Ana".into()),
            style_preferences: Some("short".into()),
        };
        profile.apply(ProfilePatch {
            name: None,
            style_preferences: Some("fade".into()),
        });
        assert_eq!(profile.name.as_deref(), Some("Ana"));
        assert_eq!(profile.style_preferences.as_deref(), Some("fade"));
    }
}
