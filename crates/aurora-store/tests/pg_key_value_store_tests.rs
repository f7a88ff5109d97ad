//! Integration tests for `PgKeyValueStore`.

use aurora_core::store::{self, KeyValueStore};
use aurora_store::pg_key_value_store::PgKeyValueStore;
use sqlx::PgPool;

async fn store(pool: PgPool) -> PgKeyValueStore {
    let store = PgKeyValueStore::new(pool);
    store.ensure_schema().await.unwrap();
    store
}

// --- get ---

#[sqlx::test(migrations = false)]
async fn test_get_returns_none_for_missing_key(pool: PgPool) {
    let store = store(pool).await;

    let value = store.get("aurora:visits:mars").await.unwrap();

    assert!(value.is_none());
}

// --- set + get round-trip ---

#[sqlx::test(migrations = false)]
async fn test_set_then_get_returns_stored_json(pool: PgPool) {
    let store = store(pool).await;
    let steps = serde_json::json!(["Mars has two moons.", "Olympus Mons is huge."]);

    store.set("aurora:tour:mars:v0", steps.clone()).await.unwrap();

    assert_eq!(store.get("aurora:tour:mars:v0").await.unwrap(), Some(steps));
}

// --- overwrite ---

#[sqlx::test(migrations = false)]
async fn test_set_overwrites_existing_value(pool: PgPool) {
    let store = store(pool).await;

    store::save(&store, "aurora:visits:mars", &1_u64).await.unwrap();
    store::save(&store, "aurora:visits:mars", &2_u64).await.unwrap();

    let visits: Option<u64> = store::load(&store, "aurora:visits:mars").await.unwrap();
    assert_eq!(visits, Some(2));
}

// --- schema ---

#[sqlx::test(migrations = false)]
async fn test_ensure_schema_is_idempotent(pool: PgPool) {
    let store = store(pool).await;

    store.ensure_schema().await.unwrap();
    store.set("aurora:pref:muted", serde_json::json!(true)).await.unwrap();

    assert_eq!(
        store.get("aurora:pref:muted").await.unwrap(),
        Some(serde_json::json!(true))
    );
}
