use std::fs;
use std::sync::Arc;

use meetup_server::context::RequestContext;
use meetup_server::model::{Meetup, MeetupId, NewMeetup};
use meetup_server::resolver::{MutationRoot, QueryRoot, Resolver};
use meetup_server::store::{JsonFileStore, MeetupStore, StoreError};

fn bg() -> RequestContext {
    RequestContext::background()
}

fn meetup(id: &str, title: &str) -> Meetup {
    Meetup::from_new(MeetupId::new(id), NewMeetup::new(title, "Online"))
}

#[tokio::test]
async fn missing_file_lists_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp.path().join("meetups.json"));

    assert!(store.list_all().await.unwrap().is_empty());
    assert!(!store.path().exists(), "reads must not create the file");
}

#[tokio::test]
async fn created_meetups_survive_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data").join("meetups.json");

    let store = JsonFileStore::new(&path);
    store.create(&bg(), meetup("a", "First")).await.unwrap();
    store.create(&bg(), meetup("b", "Second")).await.unwrap();

    let reopened = JsonFileStore::new(&path);
    let listed = reopened.list_all().await.unwrap();
    assert_eq!(listed, vec![meetup("a", "First"), meetup("b", "Second")]);

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    assert!(!std::path::Path::new(&tmp_name).exists(), "temp file must be renamed away");
}

#[tokio::test]
async fn duplicate_id_is_rejected_and_not_stored() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp.path().join("meetups.json"));

    store.create(&bg(), meetup("same", "First")).await.unwrap();
    let err = store.create(&bg(), meetup("same", "Again")).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(ref id) if id.as_str() == "same"));

    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn corrupt_file_is_a_storage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("meetups.json");
    fs::write(&path, "not valid json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(store.list_all().await, Err(StoreError::Corrupt(_))));
    assert!(matches!(store.create(&bg(), meetup("a", "x")).await, Err(StoreError::Corrupt(_))));

    assert_eq!(fs::read_to_string(&path).unwrap(), "not valid json", "failed create must not rewrite the file");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_persisted() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(tmp.path().join("meetups.json")));
    let root = Resolver::new(store.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let mutation = root.mutation();
            tokio::spawn(async move {
                mutation
                    .create_meetup(&RequestContext::background(), NewMeetup::new(format!("M{i}"), "Online"))
                    .await
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let listed = root.query().meetups(&RequestContext::background()).await.unwrap();
    assert_eq!(listed.len(), 8);
}

#[tokio::test]
async fn file_layout_uses_camel_case_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("meetups.json");
    let store = JsonFileStore::new(&path);

    let mut m = meetup("a", "First");
    m.starts_at = Some("2026-11-01T18:00:00Z".into());
    store.create(&bg(), m).await.unwrap();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["meetups"][0]["startsAt"], "2026-11-01T18:00:00Z");
    assert!(doc["meetups"][0].get("description").is_none());
}

#[tokio::test]
async fn cancelled_create_leaves_no_file_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("meetups.json");
    let store = JsonFileStore::new(&path);

    let (ctx, handle) = RequestContext::new(None);
    handle.cancel();

    let err = store.create(&ctx, meetup("a", "First")).await.unwrap_err();
    assert!(matches!(err, StoreError::Cancelled), "got {err:?}");
    assert!(!path.exists(), "cancelled write must not commit");

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    assert!(!std::path::Path::new(&tmp_name).exists(), "temp file must be cleaned up");
}

#[tokio::test]
async fn cancelled_create_keeps_previous_document() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp.path().join("meetups.json"));
    store.create(&bg(), meetup("a", "First")).await.unwrap();

    let (ctx, handle) = RequestContext::new(None);
    handle.cancel();
    assert!(store.create(&ctx, meetup("b", "Second")).await.is_err());

    assert_eq!(store.list_all().await.unwrap(), vec![meetup("a", "First")]);
}
