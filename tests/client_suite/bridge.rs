//! Bridge tests: bounded waits, timeout budgets, partial results.

use crate::common::*;
use std::time::Duration;
use ttlkv::prelude::*;

#[tokio::test(start_paused = true)]
async fn test_bridge_completes_within_budget() {
    let (_, client) = setup();
    let mut gen = datagen(40);
    let keys = gen.distinct_keys(10, 12);

    let requests: Vec<_> = keys
        .iter()
        .map(|k| OperationRequest::set(k.clone(), b"v".to_vec(), None))
        .collect();
    let collector = BatchCollector::attach(client.do_batch(requests).expect("batch"));

    let outcome = collector
        .await_result(Duration::from_secs(10))
        .await
        .expect("no failure");
    assert!(!outcome.is_partial());
    assert_eq!(outcome.responses().len(), 10);
    assert_eq!(collector.state(), BatchState::Completed);
    assert_eq!(collector.received(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_budget_shorter_than_delivery_yields_partial() {
    let (store, client) = setup();
    store.set_key_latency(b"lagging-1", Duration::from_secs(5));
    store.set_key_latency(b"lagging-2", Duration::from_secs(8));

    let requests = vec![
        OperationRequest::set(b"prompt".to_vec(), b"v".to_vec(), None),
        OperationRequest::set(b"lagging-1".to_vec(), b"v".to_vec(), None),
        OperationRequest::set(b"lagging-2".to_vec(), b"v".to_vec(), None),
    ];
    let collector = BatchCollector::attach(client.do_batch(requests).expect("batch"));

    let outcome = collector
        .await_result(Duration::from_secs(1))
        .await
        .expect("timeout is not an error");
    assert!(outcome.is_partial());
    assert_eq!(outcome.responses().len(), 1, "strict subset: only the prompt key");
    assert_eq!(outcome.responses()[0].key, b"prompt");
    assert_eq!(collector.state(), BatchState::Receiving);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_wait_does_not_stop_delivery() {
    let (store, client) = setup();
    store.set_key_latency(b"late", Duration::from_secs(5));

    let requests = vec![OperationRequest::set(b"late".to_vec(), b"v".to_vec(), None)];
    let collector = BatchCollector::attach(client.do_batch(requests).expect("batch"));

    let first = collector
        .await_result(Duration::from_secs(1))
        .await
        .expect("partial");
    assert!(first.is_partial());
    assert_eq!(first.responses().len(), 0);

    // A later wait observes the delivery the first wait abandoned.
    let second = collector
        .await_result(Duration::from_secs(10))
        .await
        .expect("complete");
    assert!(!second.is_partial());
    assert_eq!(second.responses().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_reraised_not_partial() {
    let (store, client) = setup();
    store.fail_key(b"doomed", TransportError::Connection("peer gone".into()));

    let requests = vec![
        OperationRequest::set(b"fine".to_vec(), b"v".to_vec(), None),
        OperationRequest::set(b"doomed".to_vec(), b"v".to_vec(), None),
    ];
    let collector = BatchCollector::attach(client.do_batch(requests).expect("batch"));

    let err = collector
        .await_result(Duration::from_secs(10))
        .await
        .expect_err("upstream failure must re-raise");
    assert_eq!(err, TransportError::Connection("peer gone".into()));
    assert_eq!(collector.state(), BatchState::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_local_rejections_count_toward_completion() {
    let (_, client) = setup();
    let requests = vec![
        OperationRequest::set(Vec::new(), b"v".to_vec(), None),
        OperationRequest::set(b"ok".to_vec(), b"v".to_vec(), None),
    ];
    let collector = BatchCollector::attach(client.do_batch(requests).expect("batch"));

    let outcome = collector
        .await_result(Duration::from_secs(5))
        .await
        .expect("complete");
    assert!(!outcome.is_partial());
    assert_eq!(outcome.responses().len(), 2);
    let statuses: Vec<_> = outcome.responses().iter().map(|r| r.status).collect();
    assert!(statuses.contains(&OperationStatus::IllegalArgument));
    assert!(statuses.contains(&OperationStatus::Success));
}

#[tokio::test(start_paused = true)]
async fn test_per_item_deadline_becomes_timeout_status() {
    // An item slower than the per-call response deadline resolves to a
    // ResponseTimeout response; the batch still completes.
    let (store, client) = setup_with(
        ClientConfig::new("client-suite", "functional")
            .with_response_timeout(Duration::from_secs(2)),
    );
    store.set_key_latency(b"stuck", Duration::from_secs(60));

    let requests = vec![
        OperationRequest::set(b"quick".to_vec(), b"v".to_vec(), None),
        OperationRequest::set(b"stuck".to_vec(), b"v".to_vec(), None),
    ];
    let collector = BatchCollector::attach(client.do_batch(requests).expect("batch"));

    let outcome = collector
        .await_result(Duration::from_secs(30))
        .await
        .expect("complete");
    assert!(!outcome.is_partial());

    let stuck = outcome
        .responses()
        .iter()
        .find(|r| r.key == b"stuck")
        .expect("echoed");
    assert_eq!(stuck.status, OperationStatus::ResponseTimeout);
}
