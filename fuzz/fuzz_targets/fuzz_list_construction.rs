#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rxsel_core::BuildError;
use rxsel_core::list::{ListCombiner, SelectorOptions, extractor};
use rxsel_stream::{Transform, TransformIterExt};

#[derive(Arbitrary, Debug)]
struct Input {
    extractors: u8,
    arity: u8,
    states: Vec<Vec<u8>>,
}

fuzz_target!(|input: Input| {
    let count = usize::from(input.extractors % 16);
    let arity = usize::from(input.arity % 16);

    let extractors = (0..count)
        .map(|i| extractor(move |s: &Vec<u8>| s.get(i).copied().unwrap_or(0)))
        .collect();
    let built = Transform::from_list(
        extractors,
        ListCombiner::new(arity, |v: &[u8]| v.iter().map(|b| u32::from(*b)).sum::<u32>()),
        SelectorOptions::default(),
    );

    let transform = match built {
        Ok(transform) => {
            assert!(count > 0 && count == arity);
            transform
        }
        Err(BuildError::NoInputs) => {
            assert_eq!(count, 0);
            return;
        }
        Err(BuildError::ArityMismatch { extractors, combiner }) => {
            assert_eq!((extractors, combiner), (count, arity));
            assert_ne!(count, arity);
            return;
        }
    };

    let states: Vec<Vec<u8>> = input.states.into_iter().take(256).collect();
    let outputs: Vec<u32> = states
        .iter()
        .cloned()
        .through(&transform)
        .map(|r| match r {
            Ok(v) => v,
            Err(never) => match never {},
        })
        .collect();

    assert_eq!(outputs.len(), states.len());
    for (state, out) in states.iter().zip(&outputs) {
        let naive: u32 = (0..count)
            .map(|i| u32::from(state.get(i).copied().unwrap_or(0)))
            .sum();
        assert_eq!(*out, naive);
    }
    assert!(transform.recomputations() as usize <= states.len());
});
