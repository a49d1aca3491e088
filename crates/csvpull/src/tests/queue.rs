use alloc::{collections::VecDeque, vec::Vec};

use quickcheck::QuickCheck;

use super::utils::SEP;
use crate::{CapacityError, Record, RecordQueue};

fn record(bytes: &[u8]) -> Record {
    let mut record = Record::new();
    record.push_field(bytes, SEP, 4).unwrap();
    record
}

fn drain(queue: &mut RecordQueue) -> Vec<Vec<u8>> {
    core::iter::from_fn(|| queue.pop_front())
        .map(Record::into_bytes)
        .collect()
}

#[test]
fn empty_queue_pops_nothing() {
    let mut queue = RecordQueue::new(4, None);
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert!(queue.pop_front().is_none());
}

#[test]
fn wraps_around_without_growing() {
    let mut queue = RecordQueue::new(3, None);
    queue.push_back(record(b"a")).unwrap();
    queue.push_back(record(b"b")).unwrap();
    assert_eq!(queue.pop_front().unwrap().as_bytes(), b"a");
    queue.push_back(record(b"c")).unwrap();
    queue.push_back(record(b"d")).unwrap();

    assert_eq!(queue.capacity(), 3);
    assert_eq!(queue.len(), 3);
    assert_eq!(drain(&mut queue), [b"b".to_vec(), b"c".to_vec(), b"d".to_vec()]);
    assert!(queue.is_empty());
}

#[test]
fn grows_when_full_and_keeps_order() {
    let mut queue = RecordQueue::new(1, None);
    queue.push_back(record(b"1")).unwrap();
    assert_eq!(queue.pop_front().unwrap().as_bytes(), b"1");

    // begin/end now sit mid-ring; growth must linearise correctly.
    for b in b'a'..=b'j' {
        queue.push_back(record(&[b])).unwrap();
    }
    assert!(queue.capacity() >= 10);
    let expected: Vec<Vec<u8>> = (b'a'..=b'j').map(|b| alloc::vec![b]).collect();
    assert_eq!(drain(&mut queue), expected);
}

#[test]
fn bounded_queue_reports_overflow() {
    let mut queue = RecordQueue::new(1, Some(3));
    for b in b'a'..=b'c' {
        queue.push_back(record(&[b])).unwrap();
    }
    assert_eq!(queue.capacity(), 3);
    assert_eq!(
        queue.push_back(record(b"d")),
        Err(CapacityError::QueueOverflow { capacity: 3 })
    );
    assert_eq!(queue.len(), 3);
}

#[test]
fn initial_capacity_is_clamped_to_bound() {
    let queue = RecordQueue::new(64, Some(2));
    assert_eq!(queue.capacity(), 2);
    let queue = RecordQueue::new(0, None);
    assert_eq!(queue.capacity(), 1);
}

#[test]
fn clear_reports_discarded_records() {
    let mut queue = RecordQueue::new(2, None);
    queue.push_back(record(b"a")).unwrap();
    queue.push_back(record(b"b")).unwrap();
    queue.push_back(record(b"c")).unwrap();
    assert_eq!(queue.clear(), 3);
    assert!(queue.is_empty());
}

/// Property: any interleaving of pushes (`Some`) and pops (`None`) returns
/// records in push order, matching a `VecDeque` model.
#[test]
fn fifo_matches_model_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Option<u8>>, initial_capacity: u8) -> bool {
        let mut queue = RecordQueue::new(usize::from(initial_capacity % 8), None);
        let mut model = VecDeque::new();
        for op in ops {
            match op {
                Some(b) => {
                    queue.push_back(record(&[b])).unwrap();
                    model.push_back(alloc::vec![b]);
                }
                None => {
                    let got = queue.pop_front().map(Record::into_bytes);
                    if got != model.pop_front() {
                        return false;
                    }
                }
            }
            if queue.len() != model.len() {
                return false;
            }
        }
        drain(&mut queue) == Vec::from(model)
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 5_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<Option<u8>>, u8) -> bool);
}
