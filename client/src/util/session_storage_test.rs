use super::*;

fn user() -> UserInfo {
    UserInfo {
        id: "u7".to_owned(),
        name: "Sam".to_owned(),
        email: "sam@example.com".to_owned(),
        role: "member".to_owned(),
        organization: None,
        phone: None,
        avatar_url: None,
    }
}

#[test]
fn memory_storage_round_trips_user() {
    let storage = MemoryStorage::default();
    assert!(storage.load_user().is_none());
    storage.save_user(&user());
    assert_eq!(storage.load_user(), Some(user()));
}

#[test]
fn memory_storage_purge_forgets_user() {
    let storage = MemoryStorage::default();
    storage.save_user(&user());
    storage.purge();
    assert!(storage.load_user().is_none());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_outside_browser() {
    BrowserStorage.save_user(&user());
    assert!(BrowserStorage.load_user().is_none());
    BrowserStorage.purge();
}
