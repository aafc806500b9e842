//! Ordering and barrier behaviour of the delivery queue.

use std::sync::Arc;
use std::time::Duration;

use tincan_queue::{InMemoryTransport, QueueConfig, QueueItem, StatementQueue};

#[tokio::test]
async fn statements_are_delivered_in_enqueue_order() {
    let transport =
        Arc::new(InMemoryTransport::<u32>::new().with_delay(Duration::from_millis(1)));
    let (queue, _drain) = StatementQueue::spawn(transport.clone(), QueueConfig::default());

    for i in 0..50u32 {
        queue.enqueue(i).unwrap();
    }
    queue.flush().unwrap().await.unwrap();

    let expected: Vec<u32> = (0..50).collect();
    assert_eq!(transport.delivered().await, expected);
}

#[tokio::test]
async fn interleaved_producers_keep_their_call_order() {
    let transport =
        Arc::new(InMemoryTransport::<String>::new().with_delay(Duration::from_millis(2)));
    let (queue, _drain) = StatementQueue::spawn(transport.clone(), QueueConfig::default());

    queue.enqueue("a".to_string()).unwrap();

    let producer = {
        let queue = queue.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            queue.enqueue("b".to_string()).unwrap();
        })
    };
    producer.await.unwrap();
    queue.enqueue("c".to_string()).unwrap();

    queue.flush().unwrap().await.unwrap();
    assert_eq!(transport.delivered().await, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn flush_never_resolves_before_prior_statements_are_sent() {
    let transport =
        Arc::new(InMemoryTransport::<u8>::new().with_delay(Duration::from_millis(10)));
    let (queue, _drain) = StatementQueue::spawn(transport.clone(), QueueConfig::default());

    queue.enqueue(1u8).unwrap();
    queue.enqueue(2u8).unwrap();
    let flush = queue.flush().unwrap();

    assert!(queue.pending_count() >= 1);
    flush.await.unwrap();

    assert_eq!(queue.pending_count(), 0);
    assert_eq!(transport.len().await, 2);
}

#[tokio::test]
async fn flush_marker_is_never_sent_to_transport() {
    let transport = Arc::new(InMemoryTransport::<u64>::new());
    let (queue, _drain) = StatementQueue::spawn(transport.clone(), QueueConfig::default());

    queue.enqueue(QueueItem::<u64>::FlushMarker).unwrap();
    queue.enqueue(7u64).unwrap();
    queue.flush().unwrap().await.unwrap();

    assert_eq!(transport.delivered().await, vec![7]);
    assert_eq!(transport.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn retries_wait_for_backoff() {
    let transport = Arc::new(InMemoryTransport::<String>::new());
    transport.fail_next(2);
    let config = QueueConfig::default()
        .with_max_attempts(3)
        .with_retry_backoff(Duration::from_secs(1));
    let (queue, _drain) = StatementQueue::spawn(transport.clone(), config);

    let started = tokio::time::Instant::now();
    queue.enqueue("eventually".to_string()).unwrap();
    queue.flush().unwrap().await.unwrap();

    // 1s after the first failure, 2s after the second
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert_eq!(transport.delivered().await, vec!["eventually"]);
    assert_eq!(transport.attempts(), 3);
}

#[tokio::test]
async fn enqueue_after_drain_stopped_fails() {
    let transport = Arc::new(InMemoryTransport::<u8>::new());
    let (queue, drain) = StatementQueue::spawn(transport.clone(), QueueConfig::default());

    let survivor = queue.clone();
    drain_abort(drain).await;

    assert!(survivor.enqueue(1).is_err());
    assert_eq!(survivor.pending_count(), 0);
    drop(queue);
}

async fn drain_abort(drain: tincan_queue::DrainHandle) {
    drain.abort();
    let _ = drain.join().await;
}
