use contracts::shared::permissions::PermissionSet;
use contracts::system::auth::{SessionTokens, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub session: Option<SessionTokens>,
    pub user_info: Option<UserInfo>,
    /// A stored session is being validated; nothing is decided yet
    pub restoring: bool,
}

impl AuthState {
    pub fn signed_in(session: SessionTokens, user_info: UserInfo) -> Self {
        Self {
            session: Some(session),
            user_info: Some(user_info),
            restoring: false,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some() && self.user_info.is_some()
    }
}

/// Validate the stored session, renewing it once if the access token was
/// rejected.
async fn restore_session(stored: SessionTokens) -> Option<AuthState> {
    if let Ok(user_info) = api::current_user(&stored).await {
        return Some(AuthState::signed_in(stored, user_info));
    }

    match api::refresh(stored).await {
        Ok(renewed) => {
            storage::save_session(&renewed);
            let user_info = api::current_user(&renewed).await.ok()?;
            Some(AuthState::signed_in(renewed, user_info))
        }
        Err(e) => {
            log::info!("stored session expired: {}", e);
            None
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let stored = storage::load_session();
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: stored.is_some(),
        ..AuthState::default()
    });

    if let Some(stored) = stored {
        spawn_local(async move {
            match restore_session(stored).await {
                Some(state) => {
                    log::info!("session restored");
                    set_auth_state.set(state);
                }
                None => {
                    storage::clear_session();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    }

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Permissions of the current viewer. Empty while signed out.
pub fn use_permissions() -> Signal<PermissionSet> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(|s| PermissionSet::from_session(s.user_info.as_ref())))
}

/// Log in and store the session. `set_auth_state` is taken up front because
/// the context is gone once this future has been awaited.
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(username, password).await?;

    let session = SessionTokens::from_login(&response);
    storage::save_session(&session);
    log::info!(
        "signed in as {} with {} permission(s)",
        response.user.username,
        response.user.user_permissions.len()
    );

    set_auth_state.set(AuthState::signed_in(session, response.user));
    Ok(())
}

/// Revoke the refresh token and drop the local session.
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(session) = storage::load_session() {
        if let Err(e) = api::revoke(&session).await {
            log::warn!("{}", e);
        }
    }
    storage::clear_session();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(tokens: &[&str]) -> UserInfo {
        UserInfo {
            id: "u1".to_string(),
            username: "hr".to_string(),
            full_name: None,
            email: None,
            is_admin: false,
            user_permissions: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_signed_in_needs_session_and_user() {
        let session = SessionTokens {
            access_token: "a1".to_string(),
            refresh_token: None,
        };
        assert!(!AuthState::default().is_signed_in());
        assert!(AuthState::signed_in(session.clone(), user(&[])).is_signed_in());

        let half = AuthState {
            session: Some(session),
            ..AuthState::default()
        };
        assert!(!half.is_signed_in());
    }

    #[test]
    fn test_session_permissions_use_canonical_tokens() {
        let state = AuthState {
            user_info: Some(user(&["employees-create"])),
            ..AuthState::default()
        };
        let perms = PermissionSet::from_session(state.user_info.as_ref());
        assert!(perms.allows("create employees"));
        assert!(PermissionSet::from_session(AuthState::default().user_info.as_ref()).is_empty());
    }
}
