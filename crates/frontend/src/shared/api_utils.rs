//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use crate::system::auth::storage;

/// API port used when `ADMIN_API_PORT` is not set at build time.
const DEFAULT_API_PORT: &str = "3000";

fn api_port() -> &'static str {
    option_env!("ADMIN_API_PORT").unwrap_or(DEFAULT_API_PORT)
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location and the
/// API port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api_port())
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/employees/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// `Authorization` header value of the stored session, if any
pub fn bearer() -> Option<String> {
    storage::load_session().map(|session| session.authorization())
}
