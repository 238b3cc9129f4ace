//! Runs against a real Postgres only when `TEST_DATABASE_URL` is set. Kept
//! to a single test so the schema is only applied once per run.

use biolink::models::Link;
use biolink::store::{LinkStore, PgLinkStore, StoreError};
use uuid::Uuid;

async fn store() -> Option<PgLinkStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let store = PgLinkStore::connect(&url, 2).await.unwrap();
    store.migrate().await.unwrap();
    Some(store)
}

#[tokio::test]
async fn pg_store_honours_link_contract() {
    let Some(store) = store().await else {
        return;
    };

    let created = store.insert(" Blog ", "https://a.example").await.unwrap();
    assert_eq!(created.title, "Blog");
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created.clone()));

    let updated = store
        .update_by_id(created.id, "Journal", "https://b.example")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    assert!(store
        .update_by_id(Uuid::new_v4(), "Ghost", "https://ghost.example")
        .await
        .unwrap()
        .is_none());

    assert!(store.delete_by_id(created.id).await.unwrap());
    assert!(!store.delete_by_id(created.id).await.unwrap());

    let first = store.insert("one", "https://1.example").await.unwrap();
    let second = store.insert("two", "https://2.example").await.unwrap();

    let ids: Vec<Uuid> = store
        .find_all_ordered_by_creation_desc()
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.id)
        .collect();
    let pos = |id| ids.iter().position(|x| *x == id).unwrap();
    assert!(pos(second.id) < pos(first.id));

    let batch = insert_batch(&store).await;
    for link in &batch {
        assert_eq!(link.created_at, link.updated_at, "{}", link.id);
        store.delete_by_id(link.id).await.unwrap();
    }

    store.delete_by_id(first.id).await.unwrap();
    store.delete_by_id(second.id).await.unwrap();

    assert!(matches!(
        store.insert("", "https://a.example").await,
        Err(StoreError::Validation(_))
    ));
}

async fn insert_batch(store: &PgLinkStore) -> Vec<Link> {
    let mut links = Vec::new();
    for n in 0..50 {
        let link = store
            .insert(&format!("link {n}"), &format!("https://{n}.example"))
            .await
            .unwrap();
        links.push(link);
    }
    links
}
