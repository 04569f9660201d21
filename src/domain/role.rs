//! Authorization roles derived from auth-provider user metadata.

use serde::{Deserialize, Serialize};

/// Closed set of roles the application distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular signed-in user.
    User,
    /// Moderator with access to the verification workflow.
    Admin,
}

impl Role {
    /// Derives the role from the auth provider's user metadata object.
    ///
    /// The provider stores the claim as a `"role"` string field; anything
    /// other than exactly `"admin"` (including a missing field or a non-string
    /// value) is a regular user.
    #[must_use]
    pub fn from_metadata(metadata: &serde_json::Value) -> Self {
        match metadata.get("role").and_then(|v| v.as_str()) {
            Some("admin") => Self::Admin,
            _ => Self::User,
        }
    }

    /// Whether this role may run the admin verification workflow.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_claim_yields_admin() {
        let meta = json!({"role": "admin"});
        assert_eq!(Role::from_metadata(&meta), Role::Admin);
        assert!(Role::from_metadata(&meta).is_admin());
    }

    #[test]
    fn missing_or_other_claims_yield_user() {
        assert_eq!(Role::from_metadata(&json!({})), Role::User);
        assert_eq!(Role::from_metadata(&json!({"role": "moderator"})), Role::User);
        assert_eq!(Role::from_metadata(&json!({"role": 1})), Role::User);
        assert_eq!(Role::from_metadata(&serde_json::Value::Null), Role::User);
    }

    #[test]
    fn claim_match_is_case_sensitive() {
        assert_eq!(Role::from_metadata(&json!({"role": "Admin"})), Role::User);
    }
}
