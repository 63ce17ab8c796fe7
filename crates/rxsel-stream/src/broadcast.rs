//! A minimal synchronous fan-out source.
//!
//! [`Broadcast<S>`] delivers each emitted state to every subscriber in
//! registration order. A subscriber is a stage plus two sinks: one for values
//! and one for errors. It is enough to attach transforms to a push-based
//! source in tests and small hosts; it has no completion signal, no replay and
//! no unsubscribe.
//!
//! # Invariants
//!
//! 1. Subscribers are called in registration order.
//! 2. Each emission calls each subscriber's stage exactly once.
//! 3. A stage error goes to that subscriber's error sink only; delivery to the
//!    remaining subscribers continues.

use std::fmt;

use crate::logging::trace;
use crate::stage::Stage;

type Delivery<S> = Box<dyn FnMut(&S) -> bool>;

/// Push source fanning each state out to its subscribers.
pub struct Broadcast<S> {
    subscribers: Vec<Delivery<S>>,
    emitted: u64,
}

impl<S> fmt::Debug for Broadcast<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcast")
            .field("subscribers", &self.subscribers.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}

impl<S> Default for Broadcast<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Broadcast<S> {
    /// A source with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            emitted: 0,
        }
    }

    /// Attach `stage`, forwarding its outputs to `on_next` and its errors to
    /// `on_error`.
    pub fn subscribe<St, N, X>(&mut self, stage: St, mut on_next: N, mut on_error: X)
    where
        St: Stage<S> + 'static,
        N: FnMut(St::Output) + 'static,
        X: FnMut(St::Error) + 'static,
    {
        self.subscribers
            .push(Box::new(move |state: &S| match stage.apply(state) {
                Ok(value) => {
                    on_next(value);
                    true
                }
                Err(err) => {
                    on_error(err);
                    false
                }
            }));
    }

    /// Attach an infallible stage.
    pub fn subscribe_infallible<St, N>(&mut self, stage: St, on_next: N)
    where
        St: Stage<S, Error = std::convert::Infallible> + 'static,
        N: FnMut(St::Output) + 'static,
    {
        self.subscribe(stage, on_next, |never| match never {});
    }

    /// Deliver `state` to every subscriber. Returns how many subscribers
    /// received a value (as opposed to an error).
    pub fn emit(&mut self, state: &S) -> usize {
        self.emitted += 1;
        let delivered = self
            .subscribers
            .iter_mut()
            .map(|deliver| deliver(state))
            .filter(|ok| *ok)
            .count();
        trace!(
            message = "broadcast.emit",
            subscribers = self.subscribers.len(),
            delivered
        );
        delivered
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::IntoTransform;
    use rxsel_core::SelectorBuilder;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut source = Broadcast::new();
        for id in 0..3 {
            let log = Rc::clone(&log);
            source.subscribe_infallible(crate::stage::map(|n: &u8| *n), move |n| {
                log.borrow_mut().push((id, n));
            });
        }
        assert_eq!(source.emit(&7), 3);
        assert_eq!(*log.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn errors_go_to_error_sink_and_delivery_continues() {
        let failing = SelectorBuilder::new()
            .fallible::<String>()
            .try_input(|n: &i32| {
                if *n < 0 {
                    Err("negative".to_string())
                } else {
                    Ok(*n)
                }
            })
            .build(|n| *n)
            .into_transform();

        let values = Rc::new(RefCell::new(Vec::new()));
        let errors = Rc::new(RefCell::new(Vec::new()));
        let mut source = Broadcast::new();
        {
            let values = Rc::clone(&values);
            let errors = Rc::clone(&errors);
            source.subscribe(
                failing,
                move |v| values.borrow_mut().push(v),
                move |e| errors.borrow_mut().push(e),
            );
        }
        let tail = Rc::new(RefCell::new(0));
        {
            let tail = Rc::clone(&tail);
            source.subscribe_infallible(crate::stage::map(|n: &i32| *n), move |_| {
                *tail.borrow_mut() += 1;
            });
        }

        assert_eq!(source.emit(&-1), 1);
        assert_eq!(source.emit(&4), 2);
        assert_eq!(*values.borrow(), vec![4]);
        assert_eq!(*errors.borrow(), vec!["negative".to_string()]);
        assert_eq!(*tail.borrow(), 2);
    }

    #[test]
    fn debug_counts() {
        let mut source = Broadcast::<u8>::new();
        source.subscribe_infallible(crate::stage::map(|n: &u8| *n), |_| {});
        source.emit(&1);
        assert_eq!(
            format!("{source:?}"),
            "Broadcast { subscribers: 1, emitted: 1 }"
        );
    }
}
