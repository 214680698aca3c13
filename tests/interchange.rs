use std::sync::Arc;

use shoplist::{
    error::{ImportError, StoreError},
    models::{Item, NewList, tag::find_tag},
    services::{StoreContext, interchange::BLOCK_SEPARATOR},
    test_helpers::{FlakyKv, memory_context},
};

#[tokio::test]
async fn export_covers_archived_and_active_lists() {
    let (_, ctx) = memory_context();
    let kept = ctx
        .lists()
        .create_list(NewList::titled("Active").with_items(vec![Item::new("Soap", "1 pcs")]))
        .await
        .unwrap();
    let archived = ctx
        .lists()
        .create_list(NewList::titled("Old").with_items(vec![Item::new("Tape", "2 pcs")]))
        .await
        .unwrap();
    ctx.lists().archive_list(&archived.id).await.unwrap();

    let payload = ctx.interchange().export_all().await.unwrap();

    assert_eq!(payload.lines().filter(|l| *l == BLOCK_SEPARATOR).count(), 2);
    assert!(payload.starts_with("\"Old\",\"General\","));
    assert!(payload.contains(&format!("\"{}\",\"General\",", kept.title)));
    assert!(payload.contains("\"Tape\",\"2 pcs\",\"Uncategorized\",\"false\""));
}

#[tokio::test]
async fn round_trip_preserves_item_count_and_tag() {
    let (_, source) = memory_context();
    let tag = find_tag("grocery").unwrap().to_tag();
    let items = vec![
        Item::new("Milk", "1 L").with_sub_tag("dairy").with_price(2.5),
        Item::new("Apples", "1 kg").with_sub_tag("fruits").checked(true),
        Item::new("Mystery", "3 pcs"),
    ];
    let original = source
        .lists()
        .create_list(NewList::titled("Groceries").with_tag(tag.clone()).with_items(items))
        .await
        .unwrap();

    let payload = source.interchange().export_all().await.unwrap();

    let (_, target) = memory_context();
    let report = target.interchange().import(&payload).await.unwrap();
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.skipped_blocks, 0);

    let imported = &report.created[0];
    assert_ne!(imported.id, original.id);
    assert_eq!(imported.title, "Groceries");
    assert_eq!(imported.tag, Some(tag));
    assert_eq!(imported.item_count, 3);
    assert_eq!(imported.total_price, 0.0);

    let items = target.items().get_items(&imported.id).await.unwrap();
    let sub_tags: Vec<_> = items.iter().map(|i| i.sub_tag.as_deref()).collect();
    assert_eq!(sub_tags, vec![Some("dairy"), Some("fruits"), None]);
    let checked: Vec<_> = items.iter().map(|i| i.checked).collect();
    assert_eq!(checked, vec![false, true, false]);
}

#[tokio::test]
async fn header_only_block_is_dropped() {
    let (_, ctx) = memory_context();
    let payload = "\"Good\",\"Household\",\"2024-05-01T10:00:00.000Z\"\n\
                   \"Sponges\",\"3 pcs\",\"Cleaning Supplies\",\"false\"\n\
                   ---\n\
                   \"Empty\",\"Groceries\",\"2024-05-01T10:00:00.000Z\"\n\
                   ---\n";

    let report = ctx.interchange().import(payload).await.unwrap();

    assert_eq!(report.created.len(), 1);
    assert_eq!(report.skipped_blocks, 1);
    let lists = ctx.lists().list_lists(true).await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].title, "Good");
    assert_eq!(lists[0].tag.as_ref().map(|t| t.id.as_str()), Some("household"));
}

#[tokio::test]
async fn unknown_category_falls_back_to_first_tag() {
    let (_, ctx) = memory_context();
    let payload = "\"Trip\",\"Camping gear\",\"2024-05-01T10:00:00.000Z\"\n\"Tent\",\"1 pcs\",\"Outdoor\",\"false\"\n";

    let report = ctx.interchange().import(payload).await.unwrap();

    let list = &report.created[0];
    assert_eq!(list.tag.as_ref().map(|t| t.id.as_str()), Some("grocery"));
    let items = ctx.items().get_items(&list.id).await.unwrap();
    assert_eq!(items[0].sub_tag, None);
}

#[tokio::test]
async fn payload_without_usable_blocks_fails() {
    let (_, ctx) = memory_context();

    assert!(matches!(
        ctx.interchange().import("").await,
        Err(ImportError::NoValidBlocks)
    ));
    assert!(matches!(
        ctx.interchange().import("\"Only header\",\"Other\",\"x\"\n---\n").await,
        Err(ImportError::NoValidBlocks)
    ));
    assert!(ctx.lists().list_lists(true).await.unwrap().is_empty());
}

#[tokio::test]
async fn store_failure_fails_the_import() {
    let kv = Arc::new(FlakyKv::new());
    let ctx = StoreContext::new(kv.clone());
    kv.fail_writes(true);

    let payload = "\"A\",\"Other\",\"x\"\n\"thing\",\"1 pcs\",\"\",\"false\"\n---\n";
    let err = ctx.interchange().import(payload).await.unwrap_err();
    assert!(matches!(err, ImportError::Store(StoreError::Storage(_))));
}

#[tokio::test]
async fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.txt");

    let (_, source) = memory_context();
    source
        .lists()
        .create_list(
            NewList::titled("Hardware store")
                .with_tag(find_tag("household").unwrap().to_tag())
                .with_items(vec![
                    Item::new("Light bulbs", "4 pcs").with_sub_tag("kitchen"),
                    Item::new("Mop", "1 pcs").with_sub_tag("cleaning"),
                ]),
        )
        .await
        .unwrap();
    let written = source.interchange().export_to_file(&path).await.unwrap();
    assert!(written > 0);

    let (_, target) = memory_context();
    let report = target.interchange().import_from_file(&path).await.unwrap();
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].item_count, 2);

    let missing = dir.path().join("missing.txt");
    assert!(matches!(
        target.interchange().import_from_file(&missing).await,
        Err(ImportError::Io(_))
    ));
}
