use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Current viewer as reported by the auth provider (`/me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// Granted permission tokens, either spelling
    #[serde(default)]
    pub user_permissions: Vec<String>,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Tokens that keep a viewer signed in across reloads.
///
/// The refresh token is optional: a session restored from an access token
/// alone simply cannot be renewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn from_login(response: &LoginResponse) -> Self {
        Self {
            access_token: response.access_token.clone(),
            refresh_token: Some(response.refresh_token.clone()).filter(|t| !t.is_empty()),
        }
    }

    /// Same session with a renewed access token.
    pub fn refreshed(self, response: RefreshResponse) -> Self {
        Self {
            access_token: response.access_token,
            ..self
        }
    }

    pub fn refresh_request(&self) -> Option<RefreshRequest> {
        self.refresh_token.clone().map(|refresh_token| RefreshRequest { refresh_token })
    }

    /// `Authorization` header value
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_response(refresh: &str) -> LoginResponse {
        LoginResponse {
            access_token: "a1".to_string(),
            refresh_token: refresh.to_string(),
            user: UserInfo {
                id: "u1".to_string(),
                username: "hr".to_string(),
                full_name: Some("Dana Hale".to_string()),
                email: None,
                is_admin: false,
                user_permissions: vec!["view employees".to_string()],
            },
        }
    }

    #[test]
    fn test_session_from_login_and_refresh() {
        let tokens = SessionTokens::from_login(&login_response("r1"));
        assert_eq!(tokens.authorization(), "Bearer a1");
        assert_eq!(
            tokens.refresh_request().map(|r| r.refresh_token),
            Some("r1".to_string())
        );

        let renewed = tokens.refreshed(RefreshResponse {
            access_token: "a2".to_string(),
        });
        assert_eq!(renewed.access_token, "a2");
        assert_eq!(renewed.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn test_empty_refresh_token_cannot_renew() {
        let tokens = SessionTokens::from_login(&login_response(""));
        assert_eq!(tokens.refresh_token, None);
        assert!(tokens.refresh_request().is_none());
    }

    #[test]
    fn test_user_permissions_default_to_empty() {
        let json = r#"{"id":"1","username":"hr","full_name":null,"email":null}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert!(user.user_permissions.is_empty());
        assert!(!user.is_admin);
        assert_eq!(user.display_name(), "hr");
    }
}
