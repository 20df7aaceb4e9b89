//! Update operation tests.

use crate::common::*;
use ttlkv::prelude::*;

#[tokio::test(start_paused = true)]
async fn test_update_replaces_value_and_bumps_version() {
    let (_, client) = setup();
    client.create(b"u1", b"old").await.expect("create");

    let updated = client.update(b"u1", b"new").await.expect("update");
    assert_eq!(updated.status, OperationStatus::Success);
    assert_eq!(updated.version, 2);

    let read = client.get(b"u1").await.expect("get");
    assert_eq!(read.value, b"new");
    assert_eq!(read.version, 2);
}

#[tokio::test(start_paused = true)]
async fn test_update_absent_key_is_no_key() {
    let (_, client) = setup();
    let resp = client.update(b"ghost", b"v").await.expect("response");
    assert_eq!(resp.status, OperationStatus::NoKey);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_mutations_count_versions() {
    let (_, client) = setup();
    let mut gen = datagen(20);
    let key = gen.key(16);

    // Mutation 1: create. Mutations 2..=5: updates.
    client.create(&key, &gen.payload(32)).await.expect("create");
    for _ in 0..4 {
        client.update(&key, &gen.payload(32)).await.expect("update");
    }

    let read = client.get(&key).await.expect("get");
    assert_eq!(read.version, 5, "5 successful mutations yield version 5");
}
