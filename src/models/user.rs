//! User model and auth payloads.

use serde::{Deserialize, Serialize};

/// Full user profile as returned by `/auth/me` and `/users/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub is_driver: bool,
    #[serde(default)]
    pub is_rider: bool,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    /// Free-form preference blob owned by the backend
    pub preferences: Option<serde_json::Value>,
    pub created_at: Option<String>,
}

impl User {
    /// A profile is complete once it has a name and preferences.
    pub fn profile_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.preferences.as_ref().is_some_and(|p| !p.is_null())
    }
}

/// Embedded user reference (driver, rider, conversation peer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub photo_url: Option<String>,
    pub phone: Option<String>,
}

/// Response from login, register and OTP verification.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub user: Option<User>,
    #[serde(default)]
    pub needs_profile_setup: bool,
}

/// Registration form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_driver: bool,
    pub is_rider: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
}

/// Partial profile update; unset fields are left alone by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_driver: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_rider: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// Weekly availability slot for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// 0 = Monday, 6 = Sunday
    pub day_of_week: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_tolerates_missing_optional_fields() {
        let user: User = serde_json::from_value(json!({ "id": 7, "name": "Ana" })).unwrap();
        assert_eq!(user.id, 7);
        assert!(!user.is_driver);
        assert!(!user.profile_complete());
    }

    #[test]
    fn test_profile_complete_requires_preferences() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "name": "Ana",
            "preferences": { "music": "jazz" }
        }))
        .unwrap();
        assert!(user.profile_complete());
    }

    #[test]
    fn test_profile_patch_omits_unset_fields() {
        let patch = ProfilePatch {
            bio: Some("Commuter".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "bio": "Commuter" }));
    }
}
