//! Session tokens persisted in `localStorage`, so a reload keeps the viewer
//! signed in.

use contracts::system::auth::SessionTokens;
use web_sys::Storage;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn read(storage: &Storage, key: &str) -> Option<String> {
    storage.get_item(key).ok()?.filter(|v| !v.is_empty())
}

/// Stored session, if an access token is present.
pub fn load_session() -> Option<SessionTokens> {
    let storage = local_storage()?;
    Some(SessionTokens {
        access_token: read(&storage, ACCESS_TOKEN_KEY)?,
        refresh_token: read(&storage, REFRESH_TOKEN_KEY),
    })
}

pub fn save_session(tokens: &SessionTokens) {
    let Some(storage) = local_storage() else {
        log::warn!("localStorage unavailable, session will not survive a reload");
        return;
    };
    let _ = storage.set_item(ACCESS_TOKEN_KEY, &tokens.access_token);
    match &tokens.refresh_token {
        Some(refresh) => {
            let _ = storage.set_item(REFRESH_TOKEN_KEY, refresh);
        }
        None => {
            let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        }
    }
}

pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
