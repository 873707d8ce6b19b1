//! Calls to the auth endpoints under `/api/system/auth`.

use contracts::system::auth::{LoginRequest, LoginResponse, RefreshResponse, SessionTokens, UserInfo};
use gloo_net::http::{Request, Response};
use serde::Serialize;

use crate::shared::api_utils::api_url;

fn auth_url(endpoint: &str) -> String {
    api_url(&format!("/api/system/auth/{}", endpoint))
}

async fn post<B: Serialize>(endpoint: &str, body: &B) -> Result<Response, String> {
    Request::post(&auth_url(endpoint))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))
}

fn status_error(action: &str, status: u16) -> String {
    match (action, status) {
        ("sign in", 401) => "Invalid username or password".to_string(),
        (_, 401) => "Session expired".to_string(),
        _ => format!("Failed to {}: {}", action, status),
    }
}

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let response = post("login", &LoginRequest { username, password }).await?;
    if !response.ok() {
        return Err(status_error("sign in", response.status()));
    }
    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Renew the access token of `tokens`.
pub async fn refresh(tokens: SessionTokens) -> Result<SessionTokens, String> {
    let request = tokens
        .refresh_request()
        .ok_or_else(|| "Session cannot be renewed".to_string())?;
    let response = post("refresh", &request).await?;
    if !response.ok() {
        return Err(status_error("refresh session", response.status()));
    }
    let renewed = response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    Ok(tokens.refreshed(renewed))
}

/// Revoke the refresh token server-side. Sessions without one have nothing
/// to revoke.
pub async fn revoke(tokens: &SessionTokens) -> Result<(), String> {
    let Some(request) = tokens.refresh_request() else {
        return Ok(());
    };
    let response = post("logout", &request).await?;
    if !response.ok() {
        return Err(status_error("sign out", response.status()));
    }
    Ok(())
}

/// The viewer behind `tokens`, including the granted permission tokens.
pub async fn current_user(tokens: &SessionTokens) -> Result<UserInfo, String> {
    let response = Request::get(&auth_url("me"))
        .header("Authorization", &tokens.authorization())
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    if !response.ok() {
        return Err(status_error("load current user", response.status()));
    }
    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_wording() {
        assert_eq!(status_error("sign in", 401), "Invalid username or password");
        assert_eq!(status_error("load current user", 401), "Session expired");
        assert_eq!(status_error("sign out", 500), "Failed to sign out: 500");
    }
}
