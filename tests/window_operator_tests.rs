use lazyseq::{BufferConfig, BufferedExt, OpError, WindowEmitter};

#[test]
fn test_windows_unit_interval() {
    let out: Vec<_> = vec![1, 2, 3, 4, 5]
        .into_iter()
        .windows(3, 1)
        .expect("valid window")
        .collect();
    assert_eq!(out, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
}

#[test]
fn test_windows_with_interval() {
    let out: Vec<_> = vec![1, 2, 3, 4, 5, 6, 7]
        .into_iter()
        .windows(3, 2)
        .expect("valid window")
        .collect();
    assert_eq!(out, vec![vec![1, 2, 3], vec![3, 4, 5], vec![5, 6, 7]]);
}

#[test]
fn test_windows_short_source() {
    let out: Vec<Vec<i32>> = vec![1, 2].into_iter().windows(3, 1).expect("valid").collect();
    assert!(out.is_empty());
}

#[test]
fn test_windows_snapshots_are_independent() {
    let mut it = vec![String::from("a"), "b".into(), "c".into()]
        .into_iter()
        .windows(2, 1)
        .expect("valid");
    let mut first = it.next().expect("first window");
    first[0].push('!');
    assert_eq!(it.next(), Some(vec!["b".to_string(), "c".to_string()]));
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}

#[test]
fn test_windows_over_another_operator() {
    // windows of a drop_end: operators compose through the pull protocol
    let src = (1..=6).drop_end(1);
    let out: Vec<_> = WindowEmitter::with_config(src, 2, 2, BufferConfig::default())
        .expect("valid")
        .collect();
    assert_eq!(out, vec![vec![1, 2], vec![3, 4]]);
}

#[test]
fn test_windows_rejects_zero() {
    let err = (0..3).windows(0, 1).err().expect("rejected");
    assert!(matches!(err, OpError::InvalidArgument(_)));
    assert!(err.to_string().contains("window size"));
}
