//! Get operation tests.

use crate::common::*;
use ttlkv::prelude::*;

#[tokio::test(start_paused = true)]
async fn test_get_absent_key_is_no_key() {
    let (_, client) = setup();
    let resp = client.get(b"never-written").await.expect("response");
    assert_eq!(resp.status, OperationStatus::NoKey);
    assert!(resp.value.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_get_echoes_key_and_metadata() {
    let (_, client) = setup();
    let mut gen = datagen(10);
    let key = gen.key(32);
    let value = gen.payload(256);

    client
        .create_with_ttl(&key, &value, 120)
        .await
        .expect("create");
    let read = client.get(&key).await.expect("get");
    assert_eq!(read.key, key);
    assert_eq!(read.value, value);
    assert_eq!(read.version, 1);
    assert_eq!(read.ttl, 120);
}

#[tokio::test(start_paused = true)]
async fn test_get_oversized_key_fails_whole_call() {
    let (_, client) = setup();
    let key = vec![b'x'; 129];
    let err = client.get(&key).await.expect_err("must fail");
    assert!(matches!(
        err,
        ClientError::Input(InputError::KeySizeExceeded { size: 129, max: 128 })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_get_does_not_bump_version() {
    let (_, client) = setup();
    client.create(b"stable", b"v").await.expect("create");
    for _ in 0..5 {
        let read = client.get(b"stable").await.expect("get");
        assert_eq!(read.version, 1, "reads must never mutate the version");
    }
}
