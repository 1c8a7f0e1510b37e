//! In-memory portfolio store
//!
//! Holds the five record collections plus the `profile` and `analytics`
//! singletons. Each collection lives in its own DashMap entry, so a write
//! holds the shard lock for that collection for the whole
//! lookup-mutate-writeback sequence. Every accessor hands out owned clones.

use crate::core::error::{Error, Result};
use crate::storage::collection::Collection;
use crate::storage::record::{Record, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};
use chrono::{DateTime, SecondsFormat, Utc};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

/// Analytics field refreshed on every analytics write
pub const LAST_UPDATED_FIELD: &str = "lastUpdated";
/// Analytics counter bumped by each page view
pub const PAGE_VIEWS_FIELD: &str = "pageViews";
/// Analytics counter bumped alongside `pageViews`
pub const UNIQUE_VISITORS_FIELD: &str = "uniqueVisitors";
/// Analytics list of `{projectId, views}` entries
pub const PROJECT_VIEWS_FIELD: &str = "projectViews";

/// Process-local store for all portfolio content
pub struct Store {
    /// Ordered records per collection
    collections: DashMap<Collection, Vec<Record>>,
    /// Profile singleton
    profile: RwLock<Record>,
    /// Analytics singleton
    analytics: RwLock<Record>,
    /// Last timestamp handed out, in epoch milliseconds
    clock: Mutex<i64>,
}

impl Store {
    /// Create an empty store with every collection present
    pub fn new() -> Self {
        let collections = DashMap::new();
        for collection in Collection::ALL {
            collections.insert(collection, Vec::new());
        }

        Self {
            collections,
            profile: RwLock::new(Record::new()),
            analytics: RwLock::new(Record::new()),
            clock: Mutex::new(0),
        }
    }

    /// Current time as an ISO-8601 string with millisecond precision.
    ///
    /// Successive calls never return the same or an earlier instant, so an
    /// update always moves `updatedAt` strictly forward.
    pub fn next_timestamp(&self) -> String {
        let mut last = self.clock.lock();
        let millis = Utc::now().timestamp_millis().max(*last + 1);
        *last = millis;

        DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Copy of the entire collection in insertion order
    pub fn find_all(&self, collection: Collection) -> Vec<Record> {
        self.collections
            .get(&collection)
            .map(|records| records.value().clone())
            .unwrap_or_default()
    }

    /// First record whose `id` equals `id`
    pub fn find_by_id(&self, collection: Collection, id: &str) -> Option<Record> {
        let records = self.collections.get(&collection)?;
        records.iter().find(|record| record.id() == Some(id)).cloned()
    }

    /// First record whose `field` strictly equals `value`. No type coercion:
    /// the string `"1"` never matches the number `1`.
    pub fn find_by_field(&self, collection: Collection, field: &str, value: &Value) -> Option<Record> {
        let records = self.collections.get(&collection)?;
        records
            .iter()
            .find(|record| record.get(field) == Some(value))
            .cloned()
    }

    /// Append a new record.
    ///
    /// A non-empty string `id` in `input` is kept, anything else is replaced
    /// with a fresh UUID. `createdAt` and `updatedAt` are always set here,
    /// overriding caller values. A caller id that already exists is a
    /// [`Error::Conflict`].
    pub fn create(&self, collection: Collection, mut input: Record) -> Result<Record> {
        let mut records = self.collections.entry(collection).or_default();

        let requested = input
            .get_str(ID_FIELD)
            .filter(|id| !id.is_empty())
            .map(String::from);

        let id = match requested {
            Some(id) => {
                if records.iter().any(|record| record.id() == Some(id.as_str())) {
                    return Err(Error::conflict(format!(
                        "{} with id '{}' already exists",
                        collection.resource_label(),
                        id
                    )));
                }
                id
            }
            None => loop {
                let candidate = Uuid::new_v4().to_string();
                if !records.iter().any(|record| record.id() == Some(candidate.as_str())) {
                    break candidate;
                }
            },
        };

        let now = self.next_timestamp();
        input.insert(ID_FIELD, id.clone());
        input.insert(CREATED_AT_FIELD, now.clone());
        input.insert(UPDATED_AT_FIELD, now);

        records.push(input.clone());
        debug!(collection = %collection, id = %id, "Record created");

        Ok(input)
    }

    /// Shallow-merge `patch` into the record with `id`. Returns `None` when no
    /// such record exists; nothing is inserted in that case. The record's
    /// `id` cannot be changed through a patch.
    pub fn update(&self, collection: Collection, id: &str, mut patch: Record) -> Option<Record> {
        let mut records = self.collections.get_mut(&collection)?;
        let record = records.iter_mut().find(|record| record.id() == Some(id))?;

        patch.remove(ID_FIELD);
        record.merge(patch);
        record.insert(UPDATED_AT_FIELD, self.next_timestamp());

        debug!(collection = %collection, id = %id, "Record updated");
        Some(record.clone())
    }

    /// Remove the record with `id`. Returns whether a record was removed.
    pub fn remove(&self, collection: Collection, id: &str) -> bool {
        let Some(mut records) = self.collections.get_mut(&collection) else {
            return false;
        };

        match records.iter().position(|record| record.id() == Some(id)) {
            Some(index) => {
                records.remove(index);
                debug!(collection = %collection, id = %id, "Record removed");
                true
            }
            None => false,
        }
    }

    /// Number of records in a collection
    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .get(&collection)
            .map(|records| records.len())
            .unwrap_or(0)
    }

    /// Copy of the profile singleton
    pub fn get_profile(&self) -> Record {
        self.profile.read().clone()
    }

    /// Shallow-merge `patch` into the profile. No timestamp is kept.
    pub fn update_profile(&self, patch: Record) -> Record {
        let mut profile = self.profile.write();
        profile.merge(patch);
        debug!("Profile updated");
        profile.clone()
    }

    /// Copy of the analytics singleton
    pub fn get_analytics(&self) -> Record {
        self.analytics.read().clone()
    }

    /// Shallow-merge `patch` into analytics and refresh `lastUpdated`
    pub fn update_analytics(&self, patch: Record) -> Record {
        let mut analytics = self.analytics.write();
        analytics.merge(patch);
        analytics.insert(LAST_UPDATED_FIELD, self.next_timestamp());
        debug!("Analytics updated");
        analytics.clone()
    }

    /// Add one to `pageViews` and `uniqueVisitors` under a single lock.
    /// Returns the analytics snapshot after the increment.
    pub fn record_page_view(&self) -> Record {
        let mut analytics = self.analytics.write();
        increment_counter(&mut analytics, PAGE_VIEWS_FIELD);
        increment_counter(&mut analytics, UNIQUE_VISITORS_FIELD);
        analytics.insert(LAST_UPDATED_FIELD, self.next_timestamp());
        analytics.clone()
    }

    /// Add one to the `views` of `project_id` in `projectViews`, appending
    /// `{projectId, views: 1}` the first time a project is seen. Returns the
    /// new view count for the project.
    pub fn record_project_view(&self, project_id: &str) -> u64 {
        let mut analytics = self.analytics.write();

        let mut entries = match analytics.remove(PROJECT_VIEWS_FIELD) {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        };

        let existing = entries
            .iter_mut()
            .find(|entry| entry.get("projectId").and_then(Value::as_str) == Some(project_id));

        let views = match existing {
            Some(entry) => {
                let views = entry.get("views").and_then(Value::as_u64).unwrap_or(0) + 1;
                entry["views"] = json!(views);
                views
            }
            None => {
                entries.push(json!({ "projectId": project_id, "views": 1 }));
                1
            }
        };

        analytics.insert(PROJECT_VIEWS_FIELD, Value::Array(entries));
        analytics.insert(LAST_UPDATED_FIELD, self.next_timestamp());
        debug!(project_id = %project_id, views, "Project view recorded");
        views
    }

    /// Replace the profile singleton wholesale. Used when seeding.
    pub(crate) fn set_profile(&self, profile: Record) {
        *self.profile.write() = profile;
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn increment_counter(record: &mut Record, field: &str) {
    let current = record.get(field).and_then(Value::as_u64).unwrap_or(0);
    record.insert(field, current + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let store = Store::new();
        let created = store
            .create(
                Collection::Skills,
                record(json!({ "name": "Go", "category": "backend", "level": 70, "createdAt": "forged" })),
            )
            .unwrap();

        let id = created.id().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_ne!(created.get_str(CREATED_AT_FIELD), Some("forged"));
        assert_eq!(created.get(CREATED_AT_FIELD), created.get(UPDATED_AT_FIELD));
        assert_eq!(store.find_by_id(Collection::Skills, id), Some(created));
    }

    #[test]
    fn test_create_keeps_caller_id_and_rejects_duplicates() {
        let store = Store::new();
        let created = store
            .create(Collection::Projects, record(json!({ "id": "site", "title": "Site" })))
            .unwrap();
        assert_eq!(created.id(), Some("site"));

        let duplicate = store.create(Collection::Projects, record(json!({ "id": "site" })));
        assert!(matches!(duplicate, Err(Error::Conflict(_))));
        assert_eq!(store.count(Collection::Projects), 1);
    }

    #[test]
    fn test_empty_id_is_replaced() {
        let store = Store::new();
        let created = store
            .create(Collection::Services, record(json!({ "id": "", "title": "Consulting" })))
            .unwrap();
        assert!(!created.id().unwrap().is_empty());
    }

    #[test]
    fn test_find_all_preserves_insertion_order() {
        let store = Store::new();
        for title in ["first", "second", "third"] {
            store
                .create(Collection::Projects, record(json!({ "title": title })))
                .unwrap();
        }

        let titles: Vec<_> = store
            .find_all(Collection::Projects)
            .iter()
            .map(|r| r.get_str("title").unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_find_by_field_is_strict() {
        let store = Store::new();
        store
            .create(Collection::Users, record(json!({ "email": "ada@example.com", "age": 36 })))
            .unwrap();

        assert!(store
            .find_by_field(Collection::Users, "email", &json!("ada@example.com"))
            .is_some());
        assert!(store
            .find_by_field(Collection::Users, "email", &json!("ADA@example.com"))
            .is_none());
        assert!(store.find_by_field(Collection::Users, "age", &json!("36")).is_none());
    }

    #[test]
    fn test_update_merges_and_advances_updated_at() {
        let store = Store::new();
        let created = store
            .create(Collection::Skills, record(json!({ "name": "Rust", "level": 60 })))
            .unwrap();
        let id = created.id().unwrap().to_string();

        let updated = store
            .update(Collection::Skills, &id, record(json!({ "level": 90, "id": "hijack" })))
            .unwrap();

        assert_eq!(updated.id(), Some(id.as_str()));
        assert_eq!(updated.get_str("name"), Some("Rust"));
        assert_eq!(updated.get("level"), Some(&json!(90)));
        assert_eq!(updated.get(CREATED_AT_FIELD), created.get(CREATED_AT_FIELD));
        assert!(updated.get_str(UPDATED_AT_FIELD) > created.get_str(UPDATED_AT_FIELD));
    }

    #[test]
    fn test_missing_ids_signal_absence() {
        let store = Store::new();
        assert!(store.find_by_id(Collection::Projects, "nope").is_none());
        assert!(store.update(Collection::Projects, "nope", Record::new()).is_none());
        assert!(!store.remove(Collection::Projects, "nope"));
        assert_eq!(store.count(Collection::Projects), 0);
    }

    #[test]
    fn test_remove_is_terminal() {
        let store = Store::new();
        let created = store
            .create(Collection::Experience, record(json!({ "company": "Acme" })))
            .unwrap();
        let id = created.id().unwrap();

        assert!(store.remove(Collection::Experience, id));
        assert!(store.find_by_id(Collection::Experience, id).is_none());
        assert!(!store.remove(Collection::Experience, id));
    }

    #[test]
    fn test_returned_records_are_isolated() {
        let store = Store::new();
        let created = store
            .create(Collection::Projects, record(json!({ "technologies": ["rust"] })))
            .unwrap();
        let id = created.id().unwrap().to_string();

        let mut copy = store.find_by_id(Collection::Projects, &id).unwrap();
        copy.insert("technologies", json!(["go"]));
        let mut listed = store.find_all(Collection::Projects);
        listed.clear();

        let stored = store.find_by_id(Collection::Projects, &id).unwrap();
        assert_eq!(stored.get("technologies"), Some(&json!(["rust"])));
        assert_eq!(store.count(Collection::Projects), 1);
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let store = Store::new();
        for title in ["first", "second"] {
            store
                .create(Collection::Projects, record(json!({ "title": title, "tags": ["a"] })))
                .unwrap();
        }

        let first = store.find_all(Collection::Projects);
        let second = store.find_all(Collection::Projects);
        assert_eq!(first, second);

        let id = first[0].id().unwrap();
        assert_eq!(
            store.find_by_id(Collection::Projects, id),
            store.find_by_id(Collection::Projects, id)
        );
    }

    #[test]
    fn test_singleton_reads_are_isolated() {
        let store = Store::new();
        store.set_profile(record(json!({
            "name": "Ada",
            "socialLinks": { "github": "https://github.com/ada" },
        })));
        store.record_project_view("project-1");

        let mut profile = store.get_profile();
        profile.insert("name", json!("Grace"));
        if let Some(Value::Object(links)) = profile.get_mut("socialLinks") {
            links.insert("github".to_string(), json!("https://github.com/grace"));
        }

        let mut analytics = store.get_analytics();
        if let Some(Value::Array(views)) = analytics.get_mut(PROJECT_VIEWS_FIELD) {
            views[0]["views"] = json!(99);
            views.push(json!({ "projectId": "project-2", "views": 1 }));
        }

        let profile = store.get_profile();
        assert_eq!(profile.get_str("name"), Some("Ada"));
        assert_eq!(
            profile.get("socialLinks"),
            Some(&json!({ "github": "https://github.com/ada" }))
        );
        assert_eq!(
            store.get_analytics().get(PROJECT_VIEWS_FIELD),
            Some(&json!([{ "projectId": "project-1", "views": 1 }]))
        );
    }

    #[test]
    fn test_profile_merge_has_no_timestamp() {
        let store = Store::new();
        store.set_profile(record(json!({ "name": "Ada", "title": "Engineer" })));

        let profile = store.update_profile(record(json!({ "title": "Architect" })));
        assert_eq!(profile.get_str("name"), Some("Ada"));
        assert_eq!(profile.get_str("title"), Some("Architect"));
        assert!(!profile.contains_key(LAST_UPDATED_FIELD));
        assert!(!profile.contains_key(UPDATED_AT_FIELD));
    }

    #[test]
    fn test_analytics_update_refreshes_last_updated() {
        let store = Store::new();
        let first = store.update_analytics(record(json!({ "pageViews": 5 })));
        let second = store.update_analytics(record(json!({ "uniqueVisitors": 2 })));

        assert_eq!(second.get("pageViews"), Some(&json!(5)));
        assert!(second.get_str(LAST_UPDATED_FIELD) > first.get_str(LAST_UPDATED_FIELD));
    }

    #[test]
    fn test_page_views_increment_both_counters() {
        let store = Store::new();
        store.update_analytics(record(json!({ "pageViews": 10, "uniqueVisitors": 4 })));

        store.record_page_view();
        let analytics = store.record_page_view();

        assert_eq!(analytics.get("pageViews"), Some(&json!(12)));
        assert_eq!(analytics.get("uniqueVisitors"), Some(&json!(6)));
    }

    #[test]
    fn test_project_views_upsert() {
        let store = Store::new();
        assert_eq!(store.record_project_view("project-1"), 1);
        assert_eq!(store.record_project_view("project-1"), 2);
        assert_eq!(store.record_project_view("project-2"), 1);

        let analytics = store.get_analytics();
        assert_eq!(
            analytics.get(PROJECT_VIEWS_FIELD),
            Some(&json!([
                { "projectId": "project-1", "views": 2 },
                { "projectId": "project-2", "views": 1 }
            ]))
        );
    }

    #[test]
    fn test_concurrent_page_views_are_not_lost() {
        let store = Arc::new(Store::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        store.record_page_view();
                        store.record_project_view("hot");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let analytics = store.get_analytics();
        assert_eq!(analytics.get("pageViews"), Some(&json!(2000)));
        assert_eq!(
            analytics.get(PROJECT_VIEWS_FIELD),
            Some(&json!([{ "projectId": "hot", "views": 2000 }]))
        );
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let store = Store::new();
        let stamps: Vec<_> = (0..100).map(|_| store.next_timestamp()).collect();
        assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(stamps[0].ends_with('Z'));
    }

    proptest! {
        #[test]
        fn prop_generated_ids_are_unique(count in 1usize..40) {
            let store = Store::new();
            let mut seen = HashSet::new();
            for n in 0..count {
                let created = store
                    .create(Collection::Skills, record(json!({ "level": n })))
                    .unwrap();
                prop_assert!(seen.insert(created.id().unwrap().to_string()));
            }
            prop_assert_eq!(store.count(Collection::Skills), count);
        }

        #[test]
        fn prop_update_preserves_untouched_fields(
            name in "[a-zA-Z ]{1,20}",
            level in 0u64..=100,
            new_level in 0u64..=100,
        ) {
            let store = Store::new();
            let created = store
                .create(Collection::Skills, record(json!({ "name": name.clone(), "level": level })))
                .unwrap();
            let id = created.id().unwrap().to_string();

            let updated = store
                .update(Collection::Skills, &id, record(json!({ "level": new_level })))
                .unwrap();

            prop_assert_eq!(updated.get_str("name"), Some(name.as_str()));
            prop_assert_eq!(updated.get("level"), Some(&json!(new_level)));
            prop_assert!(updated.get_str(UPDATED_AT_FIELD) > created.get_str(UPDATED_AT_FIELD));
        }
    }
}
