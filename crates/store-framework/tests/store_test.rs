use store_framework::{Applied, CollectionStore, StoreEntity, StoreError, StoreHandle};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Item {
    id: u32,
    title: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ItemDraft {
    title: String,
}

impl StoreEntity for Item {
    type Id = u32;
    type Draft = ItemDraft;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            title: self.title.clone(),
        }
    }
}

fn item(id: u32, title: &str) -> Item {
    Item {
        id,
        title: title.to_string(),
    }
}

fn ids(handle: &StoreHandle<Item>) -> Vec<u32> {
    handle.snapshot().records.iter().map(|i| i.id).collect()
}

async fn loaded_store(records: Vec<Item>) -> StoreHandle<Item> {
    let (store, handle) = CollectionStore::new(16);
    tokio::spawn(store.run());
    handle.begin_load().await.unwrap();
    handle.end_load(Some(records)).await.unwrap();
    handle
}

// --- Tests ---

#[tokio::test]
async fn test_confirmed_mutations_lifecycle() {
    let handle = loaded_store(vec![item(1, "Red Shoe"), item(2, "Blue Hat")]).await;
    assert_eq!(ids(&handle), vec![1, 2]);

    // 1. Create appends at the end
    let applied = handle.apply_create(item(3, "Green Scarf")).await.unwrap();
    assert_eq!(applied, Applied::Changed);
    assert_eq!(ids(&handle), vec![1, 2, 3]);

    // 2. Update replaces in place
    let ticket = handle.begin_update(1).await.unwrap();
    let applied = handle
        .apply_update(item(1, "Red Boot"), Some(ticket))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Changed);
    assert_eq!(ids(&handle), vec![1, 2, 3]);
    assert_eq!(handle.get(1).await.unwrap().unwrap().title, "Red Boot");

    // 3. Delete removes exactly that record
    let applied = handle.apply_delete(2).await.unwrap();
    assert_eq!(applied, Applied::Changed);
    assert_eq!(ids(&handle), vec![1, 3]);
    assert!(handle.get(2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_with_existing_id_is_rejected() {
    let handle = loaded_store(vec![item(1, "Red Shoe")]).await;

    let err = handle.apply_create(item(1, "Impostor")).await.unwrap_err();
    assert_eq!(err, StoreError::DuplicateId("1".into()));
    assert_eq!(handle.snapshot().len(), 1);
    assert_eq!(handle.get(1).await.unwrap().unwrap().title, "Red Shoe");
}

#[tokio::test]
async fn test_superseded_update_is_discarded() {
    let handle = loaded_store(vec![item(1, "Red Shoe")]).await;

    let older = handle.begin_update(1).await.unwrap();
    let newer = handle.begin_update(1).await.unwrap();
    assert!(newer.version > older.version);

    // The newer call completes first
    let applied = handle
        .apply_update(item(1, "Newer"), Some(newer))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Changed);

    // The older one lands afterwards and must not win
    let applied = handle
        .apply_update(item(1, "Older"), Some(older))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Stale);
    assert_eq!(handle.get(1).await.unwrap().unwrap().title, "Newer");
}

#[tokio::test]
async fn test_update_after_delete_does_not_resurrect() {
    let handle = loaded_store(vec![item(1, "Red Shoe"), item(2, "Blue Hat")]).await;

    let ticket = handle.begin_update(1).await.unwrap();
    handle.apply_delete(1).await.unwrap();

    let applied = handle
        .apply_update(item(1, "Too late"), Some(ticket))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Stale);

    // Unticketed updates are subject to tombstones too
    let applied = handle.apply_update(item(1, "Still too late"), None).await.unwrap();
    assert_eq!(applied, Applied::Stale);

    assert_eq!(ids(&handle), vec![2]);
}

#[tokio::test]
async fn test_load_skips_deleted_ids() {
    let handle = loaded_store(vec![item(1, "a"), item(2, "b"), item(3, "c")]).await;
    handle.apply_delete(2).await.unwrap();

    // A list response issued before the delete still contains record 2
    handle.begin_load().await.unwrap();
    let size = handle
        .end_load(Some(vec![item(1, "a"), item(2, "b"), item(3, "c")]))
        .await
        .unwrap();

    assert_eq!(size, 2);
    assert_eq!(ids(&handle), vec![1, 3]);
}

#[tokio::test]
async fn test_create_reusing_a_deleted_id() {
    let handle = loaded_store(vec![item(1, "a"), item(2, "b")]).await;
    let before_delete = handle.begin_update(2).await.unwrap();
    handle.apply_delete(2).await.unwrap();

    // The server hands out max + 1 again
    handle.apply_create(item(2, "reborn")).await.unwrap();
    assert_eq!(ids(&handle), vec![1, 2]);

    // A ticket from the deleted record never applies to the new one
    let applied = handle
        .apply_update(item(2, "old edit"), Some(before_delete))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Stale);

    let ticket = handle.begin_update(2).await.unwrap();
    let applied = handle
        .apply_update(item(2, "edited"), Some(ticket))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Changed);

    handle.begin_load().await.unwrap();
    handle
        .end_load(Some(vec![item(1, "a"), item(2, "edited")]))
        .await
        .unwrap();
    assert_eq!(handle.get(2).await.unwrap().unwrap().title, "edited");
}

#[tokio::test]
async fn test_load_without_deleted_id_lifts_tombstone() {
    let handle = loaded_store(vec![item(1, "a"), item(2, "b")]).await;
    handle.apply_delete(2).await.unwrap();

    // The server confirms record 2 is gone
    handle.begin_load().await.unwrap();
    handle.end_load(Some(vec![item(1, "a")])).await.unwrap();

    // A record with that id showing up later is a new record
    handle.begin_load().await.unwrap();
    handle
        .end_load(Some(vec![item(1, "a"), item(2, "new")]))
        .await
        .unwrap();
    assert_eq!(ids(&handle), vec![1, 2]);
}

#[tokio::test]
async fn test_load_keeps_first_of_duplicate_ids() {
    let handle = loaded_store(vec![item(4, "first"), item(5, "x"), item(4, "second")]).await;

    assert_eq!(ids(&handle), vec![4, 5]);
    assert_eq!(handle.get(4).await.unwrap().unwrap().title, "first");
}

#[tokio::test]
async fn test_load_adopts_server_order() {
    let handle = loaded_store(vec![item(1, "a"), item(2, "b")]).await;

    handle.begin_load().await.unwrap();
    handle
        .end_load(Some(vec![item(9, "z"), item(2, "b"), item(1, "a")]))
        .await
        .unwrap();

    assert_eq!(ids(&handle), vec![9, 2, 1]);
}

#[tokio::test]
async fn test_loading_flag_tracks_overlapping_loads() {
    let (store, handle) = CollectionStore::<Item>::new(16);
    tokio::spawn(store.run());
    assert!(!handle.snapshot().loading);

    handle.begin_load().await.unwrap();
    handle.begin_load().await.unwrap();
    assert!(handle.snapshot().loading);

    // The first call fails; the second is still in flight
    handle.end_load(None).await.unwrap();
    assert!(handle.snapshot().loading);

    handle.end_load(Some(vec![item(1, "a")])).await.unwrap();
    let snapshot = handle.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_records() {
    let handle = loaded_store(vec![item(1, "a"), item(2, "b")]).await;
    let before = handle.snapshot().revision;

    handle.begin_load().await.unwrap();
    let size = handle.end_load(None).await.unwrap();

    assert_eq!(size, 2);
    let snapshot = handle.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.revision, before);
    assert_eq!(ids(&handle), vec![1, 2]);
}

#[tokio::test]
async fn test_delete_of_absent_record_is_a_no_op() {
    let handle = loaded_store(vec![item(1, "a")]).await;
    let before = handle.snapshot().revision;

    let applied = handle.apply_delete(42).await.unwrap();
    assert_eq!(applied, Applied::Unchanged);
    assert_eq!(handle.snapshot().revision, before);
    assert_eq!(ids(&handle), vec![1]);
}

#[tokio::test]
async fn test_update_for_unknown_record_reports_not_found() {
    let handle = loaded_store(vec![item(1, "a")]).await;

    let err = handle.apply_update(item(7, "ghost"), None).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("7".into()));
    assert_eq!(ids(&handle), vec![1]);
}

#[tokio::test]
async fn test_subscribers_see_every_confirmed_change() {
    let handle = loaded_store(vec![]).await;
    let mut changes = handle.subscribe();
    changes.borrow_and_update();

    handle.apply_create(item(1, "a")).await.unwrap();
    changes.changed().await.unwrap();
    assert_eq!(changes.borrow_and_update().len(), 1);

    handle.apply_delete(1).await.unwrap();
    changes.changed().await.unwrap();
    assert!(changes.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_shutdown_closes_the_store() {
    let handle = loaded_store(vec![item(1, "a")]).await;
    handle.shutdown().await.unwrap();

    let err = handle.get(1).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::StoreClosed | StoreError::StoreDropped
    ));
}
