#![no_main]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rxsel_core::SelectorBuilder;

#[derive(Arbitrary, Debug, Clone, Copy)]
struct Gauge {
    left: u8,
    right: u8,
    ignored: u16,
}

#[derive(Arbitrary, Debug)]
enum Op {
    SetLeft(u8),
    SetRight(u8),
    SetIgnored(u16),
    Select,
}

fn naive(left: u8, right: u8) -> Result<u16, u8> {
    // Equal sides are rejected so failed runs get exercised too.
    if left == right {
        Err(left)
    } else {
        Ok(u16::from(left) * 256 + u16::from(right))
    }
}

fuzz_target!(|input: (Gauge, Vec<Op>)| {
    let (mut gauge, ops) = input;
    let runs = Arc::new(AtomicU64::new(0));
    let counted = Arc::clone(&runs);
    let selector = SelectorBuilder::new()
        .fallible::<u8>()
        .input(|g: &Gauge| g.left)
        .input(|g: &Gauge| g.right)
        .try_build(move |left, right| {
            counted.fetch_add(1, Ordering::Relaxed);
            naive(*left, *right)
        });

    let mut committed: Option<(u8, u8)> = None;
    let mut expected_runs = 0_u64;
    let mut expected_commits = 0_u64;
    for op in ops.into_iter().take(1_024) {
        match op {
            Op::SetLeft(v) => gauge.left = v,
            Op::SetRight(v) => gauge.right = v,
            Op::SetIgnored(v) => gauge.ignored = v,
            Op::Select => {
                let tuple = (gauge.left, gauge.right);
                let hit = committed == Some(tuple);
                let out = selector.try_select(&gauge);
                assert_eq!(out, naive(gauge.left, gauge.right));
                if !hit {
                    expected_runs += 1;
                    if out.is_ok() {
                        committed = Some(tuple);
                        expected_commits += 1;
                    }
                }
            }
        }
        assert_eq!(runs.load(Ordering::Relaxed), expected_runs);
        assert_eq!(selector.recomputations(), expected_commits);
        assert_eq!(selector.is_warm(), committed.is_some());
    }
});
