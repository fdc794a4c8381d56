use std::cell::Cell;
use std::collections::HashSet;
use std::convert::Infallible;
use std::rc::Rc;

use quickcheck::{quickcheck, TestResult};

use crate::{concat, iter, Pull, Stream};

/// A stream of `1, 2, ..., max`, followed by either exhaustion or a failure
/// that repeats on every subsequent pull.
#[derive(Clone, Debug)]
pub struct Counter<E = &'static str> {
    max: u64,
    fail: Option<E>,
    count: u64,
}

impl Counter {
    pub fn exhausting(max: u64) -> Counter {
        Counter { max, fail: None, count: 0 }
    }
}

impl<E> Counter<E> {
    pub fn failing(max: u64, err: E) -> Counter<E> {
        Counter { max, fail: Some(err), count: 0 }
    }
}

impl<E: Clone> Stream for Counter<E> {
    type Item = u64;
    type Error = E;

    fn next(&mut self) -> Pull<u64, E> {
        if self.count < self.max {
            self.count += 1;
            return Pull::Item(self.count);
        }
        match self.fail {
            None => Pull::Exhausted,
            Some(ref err) => Pull::Failed(err.clone()),
        }
    }
}

/// Wraps a stream and counts how many times it has been pulled.
#[derive(Debug)]
pub struct Pulls<S> {
    source: S,
    count: Rc<Cell<usize>>,
}

impl<S> Pulls<S> {
    pub fn new(source: S) -> Pulls<S> {
        Pulls { source, count: Rc::new(Cell::new(0)) }
    }

    pub fn counter(&self) -> Rc<Cell<usize>> {
        self.count.clone()
    }
}

impl<S: Stream> Stream for Pulls<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn next(&mut self) -> Pull<S::Item, S::Error> {
        self.count.set(self.count.get() + 1);
        self.source.next()
    }
}

// Maps an arbitrary byte to a chunk size in 1..=16, so that most generated
// inputs span several batches.
fn chunk_size(n: u8) -> usize {
    (n as usize % 16) + 1
}

fn batches(xs: &[u8], size: usize) -> Vec<Vec<u8>> {
    iter(xs.to_vec()).chunk(size).unwrap().collect().unwrap()
}

#[test]
fn prop_chunk_lengths() {
    fn p(xs: Vec<u8>, n: u8) -> bool {
        let size = chunk_size(n);
        let got = batches(&xs, size);
        let expected_batches = (xs.len() + size - 1) / size;
        if got.len() != expected_batches {
            return false;
        }
        match got.split_last() {
            None => xs.is_empty(),
            Some((last, full)) => {
                let last_len = match xs.len() % size {
                    0 => size,
                    rem => rem,
                };
                full.iter().all(|b| b.len() == size) && last.len() == last_len
            }
        }
    }
    quickcheck(p as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn prop_chunk_concat_is_identity() {
    fn p(xs: Vec<u8>, n: u8) -> bool {
        let joined: Vec<u8> =
            batches(&xs, chunk_size(n)).into_iter().flatten().collect();
        joined == xs
    }
    quickcheck(p as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn prop_chunk_flatten_roundtrip() {
    fn p(xs: Vec<u8>, n: u8) -> bool {
        let got: Result<Vec<u8>, Infallible> =
            iter(xs.clone()).chunk(chunk_size(n)).unwrap().flatten().collect();
        got == Ok(xs)
    }
    quickcheck(p as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn prop_chunk_failure_is_sticky() {
    fn p(len: u8, n: u8) -> TestResult {
        let size = chunk_size(n);
        let mut chunker =
            Counter::failing(len as u64, "boom").chunk(size).unwrap();
        // All full batches come out before the failure.
        for _ in 0..(len as usize / size) {
            if !chunker.next().is_item() {
                return TestResult::failed();
            }
        }
        let sticky = (0..3).all(|_| chunker.next() == Pull::Failed("boom"));
        TestResult::from_bool(sticky)
    }
    quickcheck(p as fn(u8, u8) -> TestResult);
}

#[test]
fn prop_unique_matches_reference() {
    fn p(xs: Vec<u8>) -> bool {
        let mut seen = HashSet::new();
        let expected: Vec<u8> =
            xs.iter().cloned().filter(|&x| seen.insert(x)).collect();
        let got: Vec<u8> = iter(xs).unique().collect().unwrap();
        got == expected
    }
    quickcheck(p as fn(Vec<u8>) -> bool);
}

#[test]
fn prop_concat_matches_chain() {
    fn p(lists: Vec<Vec<u8>>) -> bool {
        let expected: Vec<u8> = lists.iter().flatten().cloned().collect();
        let got: Vec<u8> =
            concat(lists.into_iter().map(iter)).collect().unwrap();
        got == expected
    }
    quickcheck(p as fn(Vec<Vec<u8>>) -> bool);
}
