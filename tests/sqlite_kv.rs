use std::sync::Arc;

use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

use shoplist::{
    db::{KeyValueStore, SeaKv, connection},
    error::StorageError,
    models::{Item, NewList},
    services::StoreContext,
};

// A single connection keeps every query on the same in-memory database.
async fn memory_kv() -> SeaKv {
    let db = connection::connect_url("sqlite::memory:", 1)
        .await
        .expect("connect to in-memory sqlite");
    SeaKv::new(&db)
}

#[tokio::test]
async fn set_overwrites_and_remove_is_idempotent() {
    let kv = memory_kv().await;

    assert_eq!(kv.get("missing").await.unwrap(), None);
    kv.set("k", "one").await.unwrap();
    kv.set("k", "two").await.unwrap();
    assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("two"));

    kv.remove("k").await.unwrap();
    kv.remove("k").await.unwrap();
    assert_eq!(kv.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn clear_drops_every_entry() {
    let kv = memory_kv().await;
    kv.set("a", "1").await.unwrap();
    kv.set("b", "2").await.unwrap();

    kv.clear().await.unwrap();

    assert_eq!(kv.get("a").await.unwrap(), None);
    assert_eq!(kv.get("b").await.unwrap(), None);
}

#[tokio::test]
async fn stores_work_on_sqlite() {
    let ctx = StoreContext::new(Arc::new(memory_kv().await));
    let list = ctx
        .lists()
        .create_list(NewList::titled("Persisted"))
        .await
        .unwrap();
    ctx.items()
        .replace_items(
            &list.id,
            vec![
                Item::new("Coffee", "500 g").with_price(7.25),
                Item::new("Filters", "1 pcs").with_price(2.0),
            ],
        )
        .await
        .unwrap();

    let stored = ctx.lists().get_list(&list.id).await.unwrap().unwrap();
    assert_eq!(stored.item_count, 2);
    assert_eq!(stored.total_price, 9.25);

    ctx.lists().delete_list(&list.id).await.unwrap();
    assert!(ctx.items().get_items(&list.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn database_errors_map_to_backend_errors() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_errors([DbErr::Custom("disk I/O error".to_string())])
        .into_connection();
    let kv = SeaKv::new(&db);

    let err = kv.get("@shopping_lists").await.unwrap_err();
    assert!(matches!(err, StorageError::Backend(_)));
}
