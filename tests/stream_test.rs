use std::{
    pin::Pin,
    sync::{
        atomic::{AtomicUsize, Ordering::SeqCst},
        Arc,
    },
    task::{Context, Poll},
    time::Duration,
};

use futures::{channel::oneshot, stream, stream::BoxStream, Stream, StreamExt};
use sorted_merge::{merge_streams, BinarySearchList, Buckets, Builder, LinearList, UpdatableQueue};

/// Items that take a scheduler round trip each
fn slow(items: Vec<i32>) -> BoxStream<'static, i32> {
    stream::iter(items)
        .then(|item| async move {
            tokio::task::yield_now().await;
            item
        })
        .boxed()
}

#[test_log::test(tokio::test)]
async fn test_pending_sources() {
    let merged = Builder::new()
        .primary(slow(vec![3, 7, 11]))
        .others([slow(vec![2, 4, 20]), slow(vec![17, 19, 25])])
        .strategy(Buckets)
        .build_stream()
        .unwrap();
    let res: Vec<_> = merged.collect().await;
    assert_eq!(res, [2, 3, 4, 7, 11, 17, 19, 20, 25]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_spawned_merge() {
    let merged = Builder::new()
        .primary(slow((0..50).step_by(2).collect()))
        .other(slow((1..50).step_by(2).collect()))
        .strategy(UpdatableQueue)
        .build_stream()
        .unwrap();
    let res: Vec<_> = tokio::spawn(merged.collect::<Vec<_>>()).await.unwrap();
    assert_eq!(res, (0..50).collect::<Vec<_>>());
}

/// Stream that suspends once before every item and checks that no other
/// stream sharing `suspended` is suspended at the same time
struct Gated {
    items: std::vec::IntoIter<i32>,
    resumed: bool,
    suspended: Arc<AtomicUsize>,
}

impl Stream for Gated {
    type Item = i32;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<i32>> {
        if !self.resumed {
            self.resumed = true;
            assert_eq!(self.suspended.fetch_add(1, SeqCst), 0, "two pulls in flight");
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        self.resumed = false;
        self.suspended.fetch_sub(1, SeqCst);
        Poll::Ready(self.items.next())
    }
}

#[tokio::test]
async fn test_one_pull_in_flight() {
    let suspended = Arc::new(AtomicUsize::new(0));
    let gated = |items: Vec<i32>| Gated {
        items: items.into_iter(),
        resumed: false,
        suspended: Arc::clone(&suspended),
    };
    let merged = Builder::new()
        .primary(gated(vec![1, 4, 7]))
        .others([gated(vec![2, 5]), gated(vec![3, 6, 8, 9])])
        .strategy(LinearList)
        .build_stream()
        .unwrap();
    let res: Vec<_> = merged.collect().await;
    assert_eq!(res, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(suspended.load(SeqCst), 0);
}

#[tokio::test]
async fn test_cancel_mid_merge() {
    let (stop, stopped) = oneshot::channel::<()>();
    let mut merged = Builder::new()
        .primary(slow((0..).step_by(2).take(1000).collect()))
        .other(slow((1..).step_by(2).take(1000).collect()))
        .build_stream()
        .unwrap()
        .cancel_on(async move {
            let _ = stopped.await;
        });

    for expected in 0..3 {
        assert_eq!(merged.next().await, Some(expected));
    }
    stop.send(()).unwrap();
    assert_eq!(merged.next().await, None);
    assert_eq!(merged.next().await, None);
    assert_eq!(merged.emitted(), 3);
    assert_eq!(merged.open_sources(), 0);
}

#[tokio::test]
async fn test_cancel_while_source_pending() {
    let mut merged = Builder::new()
        .primary(stream::pending::<u8>().boxed())
        .other(stream::iter([1]).boxed())
        .strategy(BinarySearchList)
        .build_stream()
        .unwrap()
        .cancel_on(tokio::time::sleep(Duration::from_millis(10)));
    assert_eq!(merged.next().await, None);
    assert_eq!(merged.open_sources(), 0);
}

#[tokio::test]
async fn test_explicit_cancel() {
    let mut merged = merge_streams(slow(vec![1, 3]), [slow(vec![2])]);
    assert_eq!(merged.next().await, Some(1));
    merged.cancel();
    assert_eq!(merged.open_sources(), 0);
    assert_eq!(merged.next().await, None);
}

#[tokio::test]
async fn test_fallible_streams() {
    let mut merged = Builder::new()
        .primary(stream::iter(vec![Ok(1), Ok(5)]))
        .others([
            stream::iter(vec![Ok(2), Ok(3)]),
            stream::iter(vec![Ok(4), Err("connection reset")]),
        ])
        .try_build_stream()
        .unwrap();
    let mut res = Vec::new();
    while let Some(item) = merged.next().await {
        res.push(item);
    }
    assert_eq!(res, [Ok(1), Ok(2), Ok(3), Ok(4), Err("connection reset")]);
    assert_eq!(merged.open_sources(), 0);
}
