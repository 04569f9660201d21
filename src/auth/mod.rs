//! Auth provider seam: bearer token verification and role checks.
//!
//! The hosted auth provider is reached over HTTP; services and handlers only
//! see the [`AuthProvider`] trait so tests can substitute a fake.

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::Role;
use crate::error::HubError;

/// A verified user session as reported by the auth provider.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Stable user id.
    pub id: Uuid,
    /// Primary email.
    pub email: String,
    /// Provider-managed user metadata (carries the role claim).
    pub metadata: serde_json::Value,
}

impl AuthUser {
    /// Derives the application role from the embedded metadata claim.
    #[must_use]
    pub fn role(&self) -> Role {
        Role::from_metadata(&self.metadata)
    }

    /// Display name fallback chain: metadata `display_name`, then the email
    /// local part.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.metadata.get("display_name").and_then(|v| v.as_str()) {
            return name.to_string();
        }
        self.email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

/// Verifies bearer tokens against the hosted auth provider.
#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug {
    /// Resolves a bearer token to a user session.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Unauthenticated`] for an invalid or expired token
    /// and [`HubError::Upstream`] when the provider cannot be reached.
    async fn verify_token(&self, token: &str) -> Result<AuthUser, HubError>;
}

/// Extracts the bearer token from the `Authorization` header.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`] when the header is missing or not a
/// bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, HubError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HubError::Unauthenticated("missing bearer token".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HubError::Unauthenticated("malformed authorization header".to_string()))
}

/// Resolves the request's bearer token to a verified user.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`] when no valid credential is present.
pub async fn require_user(
    auth: &dyn AuthProvider,
    headers: &HeaderMap,
) -> Result<AuthUser, HubError> {
    let token = bearer_token(headers)?;
    auth.verify_token(token).await
}

/// Like [`require_user`], additionally requiring the admin role claim.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`] without a valid credential and
/// [`HubError::Forbidden`] for a valid non-admin user.
pub async fn require_admin(
    auth: &dyn AuthProvider,
    headers: &HeaderMap,
) -> Result<AuthUser, HubError> {
    let user = require_user(auth, headers).await?;
    if !user.role().is_admin() {
        return Err(HubError::Forbidden("admin role required".to_string()));
    }
    Ok(user)
}

/// Wire shape of the provider's `GET /auth/v1/user` response.
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
    #[serde(default)]
    email: String,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

/// HTTP implementation talking to a GoTrue-style hosted auth service.
#[derive(Debug, Clone)]
pub struct HttpAuthProvider {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl HttpAuthProvider {
    /// Creates a provider client for the given service base URL and API key.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: String, anon_key: String) -> Self {
        Self {
            http,
            base_url,
            anon_key,
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn verify_token(&self, token: &str) -> Result<AuthUser, HubError> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| HubError::Upstream(format!("auth provider unreachable: {e}")))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(HubError::Unauthenticated("invalid token".to_string()));
        }
        if !response.status().is_success() {
            return Err(HubError::Upstream(format!(
                "auth provider returned {}",
                response.status()
            )));
        }

        let user: ProviderUser = response
            .json()
            .await
            .map_err(|e| HubError::Upstream(format!("malformed auth response: {e}")))?;

        Ok(AuthUser {
            id: user.id,
            email: user.email,
            metadata: user.user_metadata,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn bearer_token_extracts_credential() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        let Ok(token) = bearer_token(&headers) else {
            panic!("expected token");
        };
        assert_eq!(token, "abc123");
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let headers = HeaderMap::new();
        let err = bearer_token(&headers);
        assert!(matches!(err, Err(HubError::Unauthenticated(_))));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert!(matches!(
            bearer_token(&headers),
            Err(HubError::Unauthenticated(_))
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            bearer_token(&headers),
            Err(HubError::Unauthenticated(_))
        ));
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "ada@example.org".to_string(),
            metadata: json!({}),
        };
        assert_eq!(user.display_name(), "ada");

        let named = AuthUser {
            metadata: json!({"display_name": "Ada L."}),
            ..user
        };
        assert_eq!(named.display_name(), "Ada L.");
    }

    #[test]
    fn role_comes_from_metadata() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "mod@example.org".to_string(),
            metadata: json!({"role": "admin"}),
        };
        assert!(user.role().is_admin());
    }

    /// Returns the same user for every token.
    #[derive(Debug)]
    struct CannedProvider(AuthUser);

    #[async_trait]
    impl AuthProvider for CannedProvider {
        async fn verify_token(&self, _token: &str) -> Result<AuthUser, HubError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn require_admin_rejects_valid_non_admin_sessions() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));

        let regular = CannedProvider(AuthUser {
            id: Uuid::new_v4(),
            email: "ada@example.org".to_string(),
            metadata: json!({"role": "user"}),
        });
        assert!(matches!(
            require_admin(&regular, &headers).await,
            Err(HubError::Forbidden(_))
        ));

        let admin = CannedProvider(AuthUser {
            id: Uuid::new_v4(),
            email: "mod@example.org".to_string(),
            metadata: json!({"role": "admin"}),
        });
        assert!(require_admin(&admin, &headers).await.is_ok());

        assert!(matches!(
            require_admin(&admin, &HeaderMap::new()).await,
            Err(HubError::Unauthenticated(_))
        ));
    }
}
