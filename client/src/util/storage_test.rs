use super::*;

#[test]
fn memory_storage_round_trips_values() {
    let storage = MemoryStorage::new();
    storage.set("userRole", "hospital");
    assert_eq!(storage.get("userRole").as_deref(), Some("hospital"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove("nope");
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_instances_are_isolated() {
    let a = MemoryStorage::new();
    let b = MemoryStorage::new();
    a.set("isAuthenticated", "true");
    assert_eq!(b.get("isAuthenticated"), None);
}

#[test]
fn browser_storage_outside_browser_reads_nothing() {
    let storage = BrowserStorage;
    storage.set("isAuthenticated", "true");
    assert_eq!(storage.get("isAuthenticated"), None);
}
