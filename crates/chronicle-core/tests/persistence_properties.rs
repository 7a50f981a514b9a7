use chrono::NaiveDate;
use serde_json::Value;

use chronicle_core::backup::{export_all, import_all};
use chronicle_core::model::{
    default_categories, CategoryItem, Credential, PlanEvent, ReminderSetting, UserProfile,
};
use chronicle_core::storage::{MemoryStore, PersistenceStore, StorageAccessor};
use chronicle_core::usage::{usage, DEFAULT_BUDGET_BYTES};
use chronicle_core::{Entity, StateSynchronizer, StorageError, StorageErrorKind};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn trip() -> PlanEvent {
    PlanEvent {
        id: "1".to_string(),
        title: "Trip".to_string(),
        start_date: date("2024-01-01"),
        end_date: date("2024-01-03"),
        category: "Travel".to_string(),
        notes: String::new(),
        is_journal: true,
        reminder_setting: ReminderSetting::None,
        is_reminder_dismissed: false,
    }
}

fn snapshot<S: PersistenceStore>(store: &S) -> Vec<(String, Option<String>)> {
    Entity::ALL
        .iter()
        .map(|e| {
            let key = e.storage_key().to_string();
            let value = store.get(&key).expect("get should succeed");
            (key, value)
        })
        .collect()
}

#[test]
fn test_round_trip_every_entity() {
    let mut accessor = StorageAccessor::new(MemoryStore::new());

    let events = vec![trip()];
    let credentials = vec![Credential::new("Mail", "a@b.c", "hunter2", "Work")];
    let profile = UserProfile {
        name: "Ada".to_string(),
        role: "Engineer".to_string(),
        avatar_url: String::new(),
        ai_api_key: Some("key".to_string()),
    };
    let categories = vec![CategoryItem::new("Travel", "bg-peach")];

    accessor.save(Entity::Events.storage_key(), &events).unwrap();
    accessor.save(Entity::Credentials.storage_key(), &credentials).unwrap();
    accessor.save(Entity::UserProfile.storage_key(), &profile).unwrap();
    accessor.save(Entity::Categories.storage_key(), &categories).unwrap();

    assert_eq!(accessor.load(Entity::Events.storage_key(), Vec::<PlanEvent>::new()), events);
    assert_eq!(
        accessor.load(Entity::Credentials.storage_key(), Vec::<Credential>::new()),
        credentials
    );
    assert_eq!(
        accessor.load(Entity::UserProfile.storage_key(), UserProfile::default()),
        profile
    );
    assert_eq!(
        accessor.load(Entity::Categories.storage_key(), Vec::<CategoryItem>::new()),
        categories
    );
}

#[test]
fn test_fallback_on_absence() {
    let mut accessor = StorageAccessor::new(MemoryStore::new());
    let fallback = default_categories();
    let loaded = accessor.load(Entity::Categories.storage_key(), fallback.clone());
    assert_eq!(loaded, fallback);
}

#[test]
fn test_quota_exceeded_keeps_previous_value() {
    let mut accessor = StorageAccessor::new(MemoryStore::with_budget(400));
    accessor.save(Entity::Events.storage_key(), &Vec::<PlanEvent>::new()).unwrap();

    let many: Vec<PlanEvent> = (0..20).map(|_| trip()).collect();
    let result = accessor.save(Entity::Events.storage_key(), &many);

    assert_eq!(result, Err(StorageError::QuotaExceeded));
    assert_eq!(result.unwrap_err().kind(), StorageErrorKind::QuotaExceeded);
    assert_eq!(
        accessor.store().get(Entity::Events.storage_key()).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn test_usage_grows_by_exact_pair_size() {
    let mut accessor = StorageAccessor::new(MemoryStore::new());
    let before = usage(accessor.store(), DEFAULT_BUDGET_BYTES).used_bytes;

    let events = vec![trip()];
    accessor.save(Entity::Events.storage_key(), &events).unwrap();
    let after = usage(accessor.store(), DEFAULT_BUDGET_BYTES).used_bytes;

    let value = serde_json::to_string(&events).unwrap();
    let expected = 2 * (Entity::Events.storage_key().len() + value.len()) as u64;
    assert_eq!(after - before, expected);
}

#[test]
fn test_backup_idempotence() {
    let today = date("2024-06-01");
    let mut sync = StateSynchronizer::mount(StorageAccessor::new(MemoryStore::new()), today);
    sync.set_events(vec![trip()]).unwrap();
    sync.add_credential(Credential::new("Mail", "a@b.c", "p\u{e9}ss \"quoted\"", "Work"))
        .unwrap();
    sync.add_category("Gardening", "bg-green-500").unwrap();
    let mut profile = sync.profile().clone();
    profile.ai_api_key = Some("secret".to_string());
    sync.save_profile(profile).unwrap();

    let mut accessor = sync.into_accessor();
    let before = snapshot(accessor.store());

    let exported = export_all(accessor.store()).unwrap();
    let report = import_all(&mut accessor, &exported).unwrap();

    assert_eq!(report.imported, Entity::ALL.to_vec());
    assert_eq!(snapshot(accessor.store()), before);
}

#[test]
fn test_import_ignores_unknown_fields_and_merges() {
    let mut store = MemoryStore::new();
    store.set(Entity::Credentials.storage_key(), "[]").unwrap();
    let mut accessor = StorageAccessor::new(store);

    let json = serde_json::json!({
        "EVENTS": [trip()],
        "BOGUS": 123,
    })
    .to_string();
    let report = import_all(&mut accessor, &json).unwrap();

    assert_eq!(report.imported, vec![Entity::Events]);
    let store = accessor.store();
    assert!(store.get(Entity::Events.storage_key()).unwrap().is_some());
    assert_eq!(
        store.get(Entity::Credentials.storage_key()).unwrap().as_deref(),
        Some("[]")
    );
    assert_eq!(store.get(Entity::UserProfile.storage_key()).unwrap(), None);
    assert_eq!(store.get(Entity::Categories.storage_key()).unwrap(), None);
    assert_eq!(store.get("BOGUS").unwrap(), None);
}

#[test]
fn test_invalid_json_rejected_cleanly() {
    let mut accessor = StorageAccessor::new(MemoryStore::new());
    let err = import_all(&mut accessor, "not json").unwrap_err();
    assert_eq!(err.kind(), StorageErrorKind::Unknown);
    assert!(accessor.store().keys().unwrap().is_empty());
}

#[test]
fn test_clear_all_restores_default_categories() {
    let today = date("2024-06-01");
    let mut sync = StateSynchronizer::mount(StorageAccessor::new(MemoryStore::new()), today);
    sync.set_categories(vec![CategoryItem::new("Solo", "bg-sage")]).unwrap();

    sync.clear_all();

    assert!(!sync.categories().is_empty());
    assert_eq!(sync.categories(), default_categories().as_slice());
}

#[test]
fn test_end_to_end_scenario() {
    let mut accessor = StorageAccessor::new(MemoryStore::new());
    let key = Entity::Events.storage_key();

    let loaded: Vec<PlanEvent> = accessor.load(key, Vec::new());
    assert!(loaded.is_empty());

    let events = vec![trip()];
    assert_eq!(accessor.save(key, &events), Ok(()));

    let exported = export_all(accessor.store()).unwrap();
    let parsed: Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(parsed["EVENTS"][0]["title"], "Trip");
    assert_eq!(parsed["EVENTS"][0]["startDate"], "2024-01-01");

    let mut fresh = StorageAccessor::new(MemoryStore::new());
    import_all(&mut fresh, &exported).unwrap();
    let restored: Vec<PlanEvent> = fresh.load(key, Vec::new());
    assert_eq!(restored, events);
}
