//! Persisted session artifact.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend's session cookie is `httpOnly`, so the console keeps its own
//! copy of the user record in `localStorage` to rehydrate `SessionState` on
//! reload. Logout purges it. Browser access is hydrate-only; SSR and tests
//! no-op.

#[cfg(test)]
#[path = "session_storage_test.rs"]
mod session_storage_test;

#[cfg(test)]
use std::sync::Mutex;

use crate::net::types::UserInfo;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "homedeck_session_user";

pub trait SessionPersistence {
    fn save_user(&self, user: &UserInfo);
    fn load_user(&self) -> Option<UserInfo>;
    fn purge(&self);
}

/// `localStorage`-backed persistence.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionPersistence for BrowserStorage {
    fn save_user(&self, user: &UserInfo) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            let Ok(raw) = serde_json::to_string(user) else {
                return;
            };
            if storage.set_item(STORAGE_KEY, &raw).is_err() {
                leptos::logging::warn!("could not persist session user");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = user;
        }
    }

    fn load_user(&self) -> Option<UserInfo> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(STORAGE_KEY).ok().flatten()?;
            serde_json::from_str(&raw).ok()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn purge(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
}

/// Process-local persistence for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    user: Mutex<Option<UserInfo>>,
}

#[cfg(test)]
impl SessionPersistence for MemoryStorage {
    fn save_user(&self, user: &UserInfo) {
        if let Ok(mut slot) = self.user.lock() {
            *slot = Some(user.clone());
        }
    }

    fn load_user(&self) -> Option<UserInfo> {
        self.user.lock().ok().and_then(|slot| slot.clone())
    }

    fn purge(&self) {
        if let Ok(mut slot) = self.user.lock() {
            *slot = None;
        }
    }
}
