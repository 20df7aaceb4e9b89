//! Batch execution tests: preconditions, isolation, key correlation.

use crate::common::*;
use std::collections::HashSet;
use ttlkv::prelude::*;

#[tokio::test(start_paused = true)]
async fn test_empty_batch_is_whole_call_error() {
    let (_, client) = setup();
    let err = client.do_batch(Vec::new()).expect_err("must fail");
    assert!(matches!(err, ClientError::EmptyBatch));
}

#[tokio::test(start_paused = true)]
async fn test_batch_of_n_yields_exactly_n_responses() {
    let (_, client) = setup();
    let mut gen = datagen(30);
    let keys = gen.distinct_keys(20, 12);

    let requests: Vec<_> = keys
        .iter()
        .map(|k| OperationRequest::create(k.clone(), gen.payload(64), Some(60)))
        .collect();
    let responses = client
        .do_batch(requests)
        .expect("batch accepted")
        .collect_all()
        .await
        .expect("complete");

    assert_eq!(responses.len(), 20);
    let submitted: HashSet<_> = keys.into_iter().collect();
    let echoed: HashSet<_> = responses.into_iter().map(|r| r.key).collect();
    assert_eq!(echoed, submitted, "correlate by echoed key, not position");
}

#[tokio::test(start_paused = true)]
async fn test_one_bad_item_does_not_poison_siblings() {
    let (_, client) = setup();
    let mut gen = datagen(31);
    let good = gen.distinct_keys(5, 12);

    let mut requests: Vec<_> = good
        .iter()
        .map(|k| OperationRequest::set(k.clone(), b"v".to_vec(), None))
        .collect();
    requests.insert(2, OperationRequest::set(Vec::new(), b"v".to_vec(), None));

    let responses = client
        .do_batch(requests)
        .expect("batch accepted")
        .collect_all()
        .await
        .expect("complete");
    assert_eq!(responses.len(), 6);

    let rejected: Vec<_> = responses
        .iter()
        .filter(|r| r.status == OperationStatus::IllegalArgument)
        .collect();
    assert_eq!(rejected.len(), 1);
    assert!(rejected[0].key.is_empty());

    for key in &good {
        let read = client.get(key).await.expect("get");
        assert!(read.is_success(), "sibling item must have been applied");
    }
}

#[tokio::test(start_paused = true)]
async fn test_mixed_operation_batch() {
    let (_, client) = setup();
    client.create(b"to-read", b"r").await.expect("seed");
    client.create(b"to-update", b"u1").await.expect("seed");
    client.create(b"to-destroy", b"d").await.expect("seed");

    let requests = vec![
        OperationRequest::get(b"to-read".to_vec(), None),
        OperationRequest::update(b"to-update".to_vec(), b"u2".to_vec(), None),
        OperationRequest::destroy(b"to-destroy".to_vec()),
        OperationRequest::create(b"brand-new".to_vec(), b"n".to_vec(), None),
        OperationRequest::get(b"missing".to_vec(), None),
    ];
    let responses = client
        .do_batch(requests)
        .expect("batch accepted")
        .collect_all()
        .await
        .expect("complete");
    assert_eq!(responses.len(), 5);

    let by_key = |k: &[u8]| {
        responses
            .iter()
            .find(|r| r.key == k)
            .unwrap_or_else(|| panic!("response for {k:?}"))
    };
    assert_eq!(by_key(b"to-read").value, b"r");
    assert_eq!(by_key(b"to-update").version, 2);
    assert_eq!(by_key(b"to-destroy").status, OperationStatus::Success);
    assert_eq!(by_key(b"brand-new").version, 1);
    assert_eq!(by_key(b"missing").status, OperationStatus::NoKey);
}

#[tokio::test(start_paused = true)]
async fn test_batch_respects_scope_isolation() {
    let (store, _) = setup();
    let client_a = Client::new(
        store.clone(),
        ClientConfig::new("suite", "namespace-a"),
    );
    let client_b = Client::new(
        store.clone(),
        ClientConfig::new("suite", "namespace-b"),
    );

    client_a.create(b"shared-key", b"from-a").await.expect("create");
    client_b.create(b"shared-key", b"from-b").await.expect("create");
    client_b.update(b"shared-key", b"from-b2").await.expect("update");

    let a = client_a.get(b"shared-key").await.expect("get");
    let b = client_b.get(b"shared-key").await.expect("get");
    assert_eq!(a.value, b"from-a");
    assert_eq!(a.version, 1, "scope a never saw scope b's mutations");
    assert_eq!(b.value, b"from-b2");
    assert_eq!(b.version, 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_key_does_not_block_siblings() {
    let (store, client) = setup();
    store.set_key_latency(b"slow", std::time::Duration::from_secs(20));

    let requests = vec![
        OperationRequest::set(b"slow".to_vec(), b"v".to_vec(), None),
        OperationRequest::set(b"fast".to_vec(), b"v".to_vec(), None),
    ];
    let mut stream = client.do_batch(requests).expect("batch accepted");

    // The fast key's response arrives first even though it was submitted
    // second; delivery order is decoupled from submission order.
    let first = stream
        .next_response()
        .await
        .expect("an item")
        .expect("no transport failure");
    assert_eq!(first.key, b"fast");
}
