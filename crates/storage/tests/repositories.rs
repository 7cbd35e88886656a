use chrono::NaiveDate;
use storage::Database;
use storage::dto::event::NewEvent;
use storage::dto::registration::NewRegistration;
use storage::error::StorageError;
use storage::repository::event::EventRepository;
use storage::repository::registration::RegistrationRepository;
use storage::seed::{SeedMode, sample_events, seed_events};

async fn database() -> Database {
    let db = Database::in_memory().await.expect("open in-memory stores");
    db.run_migrations().await.expect("run migrations");
    db
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_event(name: &str, start: NaiveDate) -> NewEvent {
    NewEvent {
        name: name.to_string(),
        council: "Cultural Council".to_string(),
        start_date: start,
        end_date: start,
        venue: "College Ground".to_string(),
    }
}

fn new_registration(event_id: i64, roll_no: &str) -> NewRegistration {
    NewRegistration {
        event_id,
        event_name: "Cultural Fest".to_string(),
        council: "Cultural Council".to_string(),
        name: "Alice".to_string(),
        class_name: "SE".to_string(),
        year: 3,
        roll_no: roll_no.to_string(),
    }
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = database().await;
    db.run_migrations().await.expect("second run succeeds");

    let count = EventRepository::new(db.events_pool()).count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn stores_are_independent() {
    let db = database().await;

    let in_events: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'registrations'",
    )
    .fetch_optional(db.events_pool())
    .await
    .unwrap();
    assert!(in_events.is_none());

    let in_registrations: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'events'",
    )
    .fetch_optional(db.registrations_pool())
    .await
    .unwrap();
    assert!(in_registrations.is_none());
}

#[tokio::test]
async fn create_assigns_fresh_ids_and_list_orders_by_start_date() {
    let db = database().await;
    let repo = EventRepository::new(db.events_pool());

    let late = repo.create(&new_event("Late", date(2025, 12, 1))).await.unwrap();
    let early = repo.create(&new_event("Early", date(2025, 10, 25))).await.unwrap();
    let middle = repo.create(&new_event("Middle", date(2025, 11, 15))).await.unwrap();

    assert_ne!(late.id, early.id);
    assert_ne!(early.id, middle.id);

    let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["Early", "Middle", "Late"]);
}

#[tokio::test]
async fn find_by_id_reports_missing_event() {
    let db = database().await;
    let repo = EventRepository::new(db.events_pool());

    let created = repo.create(&new_event("Code Sprint", date(2025, 10, 25))).await.unwrap();
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), created);

    let missing = repo.find_by_id(created.id + 100).await;
    assert!(matches!(missing, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn registrations_list_newest_first() {
    let db = database().await;
    let repo = RegistrationRepository::new(db.registrations_pool());

    let first = repo.create(&new_registration(1, "R1")).await.unwrap();
    let second = repo.create(&new_registration(1, "R2")).await.unwrap();
    let third = repo.create(&new_registration(2, "R1")).await.unwrap();

    let listed = repo.list().await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, [third.id, second.id, first.id]);

    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn duplicate_roll_number_for_same_event_is_a_constraint_violation() {
    let db = database().await;
    let repo = RegistrationRepository::new(db.registrations_pool());

    repo.create(&new_registration(1, "R1")).await.unwrap();
    let duplicate = repo.create(&new_registration(1, "R1")).await;

    assert!(matches!(duplicate, Err(StorageError::ConstraintViolation(_))));
    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Alice");
}

#[tokio::test]
async fn find_and_delete_by_event_and_roll() {
    let db = database().await;
    let repo = RegistrationRepository::new(db.registrations_pool());

    let created = repo.create(&new_registration(7, "R9")).await.unwrap();
    let found = repo.find_by_event_and_roll(7, "R9").await.unwrap();
    assert_eq!(found, Some(created.clone()));

    assert!(repo.find_by_event_and_roll(8, "R9").await.unwrap().is_none());

    repo.delete(created.id).await.unwrap();
    assert!(repo.find_by_event_and_roll(7, "R9").await.unwrap().is_none());
    assert!(matches!(repo.delete(created.id).await, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn seed_if_empty_only_fills_an_empty_store() {
    let db = database().await;
    let repo = EventRepository::new(db.events_pool());

    let inserted = seed_events(&db, SeedMode::IfEmpty).await.unwrap();
    assert_eq!(inserted, sample_events().len());

    let again = seed_events(&db, SeedMode::IfEmpty).await.unwrap();
    assert_eq!(again, 0);
    assert_eq!(repo.count().await.unwrap(), sample_events().len() as i64);
}

#[tokio::test]
async fn seed_reset_replaces_events_and_keeps_registrations() {
    let db = database().await;
    let events = EventRepository::new(db.events_pool());
    let registrations = RegistrationRepository::new(db.registrations_pool());

    events.create(&new_event("Custom", date(2030, 1, 1))).await.unwrap();
    registrations.create(&new_registration(1, "R1")).await.unwrap();

    seed_events(&db, SeedMode::Reset).await.unwrap();

    let names: Vec<String> = events.list().await.unwrap().into_iter().map(|e| e.name).collect();
    assert!(!names.contains(&"Custom".to_string()));
    assert_eq!(names.len(), sample_events().len());
    assert_eq!(registrations.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn seed_never_leaves_store_untouched() {
    let db = database().await;

    assert_eq!(seed_events(&db, SeedMode::Never).await.unwrap(), 0);
    assert_eq!(EventRepository::new(db.events_pool()).count().await.unwrap(), 0);
}
