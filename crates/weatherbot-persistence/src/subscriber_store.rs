//! Subscriber store.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};
use weatherbot_models::{ChatId, EligibleSubscriber, Subscriber};

use crate::atomic::{atomic_write_json, ensure_dir, read_json, read_json_optional, remove_if_exists};
use crate::error::{PersistenceError, Result};

/// Result of [`SubscriberStore::upsert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert {
    Saved(Subscriber),
    /// The chat is blocked; nothing was written.
    Blocked(Subscriber),
}

impl Upsert {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Upsert::Blocked(_))
    }

    pub fn into_subscriber(self) -> Subscriber {
        match self {
            Upsert::Saved(s) | Upsert::Blocked(s) => s,
        }
    }
}

/// Manages persistence of subscribers.
///
/// Each subscriber is stored as its own JSON file named after its chat id,
/// which keeps the chat id unique:
/// ```text
/// base_path/
/// └── subscribers/
///     ├── 123456.json
///     └── 789012.json
/// ```
///
/// Read-modify-write operations hold an internal lock, so the chat handlers
/// and the admin API can share one store.
pub struct SubscriberStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl SubscriberStore {
    /// Creates a new SubscriberStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn dir(&self) -> PathBuf {
        self.base_path.join("subscribers")
    }

    fn path(&self, chat_id: ChatId) -> PathBuf {
        self.dir().join(format!("{}.json", chat_id))
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is (), so a poisoned lock is still usable
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the subscriber for a chat, if registered.
    pub fn get(&self, chat_id: ChatId) -> Result<Option<Subscriber>> {
        read_json_optional(&self.path(chat_id))
    }

    /// Loads a subscriber, failing with `NotFound` if it is not registered.
    pub fn load(&self, chat_id: ChatId) -> Result<Subscriber> {
        self.get(chat_id)?
            .ok_or_else(|| PersistenceError::subscriber_not_found(chat_id))
    }

    /// Saves a subscriber, replacing any record with the same chat id.
    pub fn save(&self, subscriber: &Subscriber) -> Result<()> {
        let _guard = self.lock();
        self.write(subscriber)
    }

    fn write(&self, subscriber: &Subscriber) -> Result<()> {
        ensure_dir(&self.dir())?;
        atomic_write_json(&self.path(subscriber.chat_id), subscriber)?;
        debug!(chat_id = %subscriber.chat_id, "Saved subscriber");
        Ok(())
    }

    /// Lists all subscribers, oldest first.
    ///
    /// Unreadable records are skipped with a warning instead of failing the
    /// whole listing.
    pub fn list(&self) -> Result<Vec<Subscriber>> {
        let dir = self.dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|source| PersistenceError::ReadError {
            path: dir.clone(),
            source,
        })?;

        let mut subscribers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PersistenceError::ReadError {
                path: dir.clone(),
                source,
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match read_json::<Subscriber>(&path) {
                    Ok(subscriber) => subscribers.push(subscriber),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable subscriber record");
                    }
                }
            }
        }

        subscribers.sort_by(|a, b| {
            a.subscribed_at
                .cmp(&b.subscribed_at)
                .then_with(|| a.chat_id.cmp(&b.chat_id))
        });

        Ok(subscribers)
    }

    /// Lists active subscribers, projected to chat id and location.
    ///
    /// Blank locations are passed through; filtering them is up to the caller.
    pub fn list_active(&self) -> Result<Vec<EligibleSubscriber>> {
        Ok(self
            .list()?
            .iter()
            .filter(|s| s.is_active)
            .map(EligibleSubscriber::from)
            .collect())
    }

    /// Registers a chat or refreshes an existing registration.
    ///
    /// A new subscriber is created active. For an existing one the name is
    /// refreshed and the location is only replaced when `location` is given.
    /// Blocked subscribers are left untouched; the check and the write happen
    /// under the same lock so a concurrent block is never undone.
    pub fn upsert(&self, chat_id: ChatId, name: &str, location: Option<&str>) -> Result<Upsert> {
        let _guard = self.lock();

        let subscriber = match self.get(chat_id)? {
            Some(existing) if existing.is_blocked() => {
                return Ok(Upsert::Blocked(existing));
            }
            Some(mut existing) => {
                existing.name = name.to_string();
                if let Some(location) = location {
                    existing.set_location(location);
                }
                existing
            }
            None => {
                let mut created = Subscriber::new(chat_id, name);
                if let Some(location) = location {
                    created.set_location(location);
                }
                created
            }
        };

        self.write(&subscriber)?;
        Ok(Upsert::Saved(subscriber))
    }

    /// Updates the location of a registered subscriber.
    pub fn set_location(&self, chat_id: ChatId, location: &str) -> Result<Subscriber> {
        self.modify(chat_id, |s| s.set_location(location))
    }

    /// Sets the active flag of a registered subscriber.
    pub fn set_active(&self, chat_id: ChatId, active: bool) -> Result<Subscriber> {
        self.modify(chat_id, |s| {
            if active {
                s.unblock();
            } else {
                s.block();
            }
        })
    }

    fn modify(&self, chat_id: ChatId, f: impl FnOnce(&mut Subscriber)) -> Result<Subscriber> {
        let _guard = self.lock();
        let mut subscriber = self.load(chat_id)?;
        f(&mut subscriber);
        self.write(&subscriber)?;
        Ok(subscriber)
    }

    /// Deletes a subscriber. Returns false if it was not registered.
    pub fn delete(&self, chat_id: ChatId) -> Result<bool> {
        let _guard = self.lock();
        let removed = remove_if_exists(&self.path(chat_id))?;
        if removed {
            debug!(chat_id = %chat_id, "Deleted subscriber");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());

        let sub = Subscriber::new(100, "Ann").with_location("London");
        store.save(&sub).unwrap();

        let loaded = store.load(ChatId(100)).unwrap();
        assert_eq!(loaded, sub);
    }

    #[test]
    fn test_load_not_found() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());

        let result = store.load(ChatId(1));
        assert!(matches!(result, Err(PersistenceError::NotFound { .. })));
        assert!(store.get(ChatId(1)).unwrap().is_none());
    }

    #[test]
    fn test_list_empty_store() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_skips_corrupt_records() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());

        store.save(&Subscriber::new(1, "Ann")).unwrap();
        fs::write(dir.path().join("subscribers/2.json"), "{broken").unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].chat_id, ChatId(1));
    }

    #[test]
    fn test_list_active_filters_inactive() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());

        store
            .save(&Subscriber::new(1, "Ann").with_location("London"))
            .unwrap();
        store.save(&Subscriber::new(2, "Bo").with_location("")).unwrap();
        store
            .save(
                &Subscriber::new(3, "Cy")
                    .with_location("Paris")
                    .with_active(false),
            )
            .unwrap();

        let mut active = store.list_active().unwrap();
        active.sort_by_key(|s| s.chat_id);

        assert_eq!(active.len(), 2);
        assert_eq!(active[0].chat_id, ChatId(1));
        assert_eq!(active[0].location.as_deref(), Some("London"));
        assert_eq!(active[1].chat_id, ChatId(2));
    }

    #[test]
    fn test_upsert_creates_then_refreshes() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());

        let created = store.upsert(ChatId(9), "Ann", None).unwrap().into_subscriber();
        assert!(created.is_active);
        assert!(created.location.is_none());

        store.set_location(ChatId(9), "Berlin").unwrap();

        // Re-registering keeps the location and id
        let refreshed = store.upsert(ChatId(9), "Annie", None).unwrap().into_subscriber();
        assert_eq!(refreshed.id, created.id);
        assert_eq!(refreshed.name, "Annie");
        assert_eq!(refreshed.location.as_deref(), Some("Berlin"));

        let relocated = store
            .upsert(ChatId(9), "Annie", Some("Rome"))
            .unwrap()
            .into_subscriber();
        assert_eq!(relocated.location.as_deref(), Some("Rome"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_leaves_blocked_subscriber_untouched() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());
        store.upsert(ChatId(9), "Ann", Some("Berlin")).unwrap();
        store.set_active(ChatId(9), false).unwrap();

        let result = store.upsert(ChatId(9), "Annie", Some("Rome")).unwrap();
        assert!(result.is_blocked());

        let stored = store.load(ChatId(9)).unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.name, "Ann");
        assert_eq!(stored.location.as_deref(), Some("Berlin"));
        assert!(store.list_active().unwrap().is_empty());
    }

    #[test]
    fn test_set_location_requires_registration() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());

        let result = store.set_location(ChatId(5), "Madrid");
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_active() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());
        store.upsert(ChatId(3), "Cy", Some("Paris")).unwrap();

        let blocked = store.set_active(ChatId(3), false).unwrap();
        assert!(!blocked.is_active);
        assert!(store.list_active().unwrap().is_empty());

        let unblocked = store.set_active(ChatId(3), true).unwrap();
        assert!(unblocked.is_active);
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());
        store.upsert(ChatId(4), "Di", None).unwrap();

        assert!(store.delete(ChatId(4)).unwrap());
        assert!(store.get(ChatId(4)).unwrap().is_none());
        assert!(!store.delete(ChatId(4)).unwrap());
    }

    #[test]
    fn test_negative_chat_ids() {
        let dir = tempdir().unwrap();
        let store = SubscriberStore::new(dir.path());

        store.upsert(ChatId(-1001234), "Group", Some("Kyiv")).unwrap();
        let loaded = store.load(ChatId(-1001234)).unwrap();
        assert_eq!(loaded.location.as_deref(), Some("Kyiv"));
    }
}
