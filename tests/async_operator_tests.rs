#![cfg(feature = "async")]

use futures::stream::{self, StreamExt};
use lazyseq::{
    tee_stream, tee_stream_with_config, BufferConfig, BufferedStreamExt, TailDropStream,
    WindowStream,
};

#[tokio::test]
async fn test_stream_operators_match_iterators() {
    let windows: Vec<_> = stream::iter(1..=7).windows(3, 2).expect("valid").collect().await;
    assert_eq!(windows, vec![vec![1, 2, 3], vec![3, 4, 5], vec![5, 6, 7]]);

    let dropped: Vec<_> = stream::iter(1..=4).drop_end(2).collect().await;
    assert_eq!(dropped, vec![1, 2]);
}

#[tokio::test]
async fn test_stream_tee_every_consumer_gets_whole_source() {
    let group = tee_stream(stream::iter(0..32), 3);
    let results =
        futures::future::join_all(group.into_iter().map(|c| c.collect::<Vec<_>>())).await;
    for r in results {
        assert_eq!(r, (0..32).collect::<Vec<_>>());
    }
}

#[tokio::test]
async fn test_stream_tee_with_boxed_upstream() {
    let upstream =
        stream::unfold(0u32, |n| async move { (n < 3).then(|| (n, n + 1)) }).boxed_local();
    let mut group = upstream.tee(2);
    let b = group.pop().expect("two");
    let a = group.pop().expect("two");
    let (xs, ys) = futures::join!(a.collect::<Vec<_>>(), b.collect::<Vec<_>>());
    assert_eq!(xs, vec![0, 1, 2]);
    assert_eq!(ys, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_stream_tee_with_config_reports_peak_window() {
    let cfg = BufferConfig {
        min_capacity: 4,
        shrink_on_pop: true,
    };
    let mut group = tee_stream_with_config(stream::iter(0..40), 2, cfg);
    let mut b = group.pop().expect("two");
    let mut a = group.pop().expect("two");
    for _ in 0..25 {
        a.next().await;
    }
    assert_eq!(a.retained(), 25);
    assert_eq!(a.peak_retained(), 25);

    let caught_up: Vec<_> = b.by_ref().take(25).collect().await;
    assert_eq!(caught_up, (0..25).collect::<Vec<_>>());
    assert_eq!(b.retained(), 0);
    assert_eq!(b.peak_retained(), 25);
    assert_eq!(a.collect::<Vec<_>>().await, (25..40).collect::<Vec<_>>());
    assert_eq!(b.collect::<Vec<_>>().await, (25..40).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_stream_tee_with_config_zero_consumers() {
    assert!(tee_stream_with_config(stream::iter(0..3), 0, BufferConfig::default()).is_empty());
}

#[tokio::test]
async fn test_stream_operators_with_config() {
    let cfg = BufferConfig {
        min_capacity: 2,
        shrink_on_pop: false,
    };
    let windows: Vec<_> = WindowStream::with_config(stream::iter(0..10), 4, 3, cfg.clone())
        .expect("valid")
        .collect()
        .await;
    assert_eq!(windows, vec![vec![0, 1, 2, 3], vec![3, 4, 5, 6], vec![6, 7, 8, 9]]);

    let kept: Vec<_> = TailDropStream::with_config(stream::iter(0..50), 20, cfg)
        .collect()
        .await;
    assert_eq!(kept, (0..30).collect::<Vec<_>>());

    let bad = BufferConfig {
        min_capacity: 1,
        shrink_on_pop: true,
    };
    assert!(WindowStream::with_config(stream::iter(0..3), 1, 1, bad).is_err());
}
