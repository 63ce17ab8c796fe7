#![forbid(unsafe_code)]

//! Equality strategies used to decide whether an extracted value changed.
//!
//! A selector compares each freshly extracted value against the value at the
//! same position from its last successful run. The comparison is delegated to
//! an [`Equality`] strategy chosen at construction time:
//!
//! - [`Identity`] (default): shared handles (`Rc`, `Arc`, `&T`) compare by
//!   address; scalars and owned strings compare by value. Nothing is
//!   traversed, so a comparison is O(1) per position.
//! - [`ValueEq`]: structural comparison through [`PartialEq`].
//! - [`EqFn`]: any `Fn(&T, &T) -> bool`, for selectors whose positions all
//!   share one type.
//!
//! Because extractors return owned (`'static`) values, the `&T` rule only
//! covers `&'static T`. Two equal `&'static str` literals at different
//! addresses are *not* identical; extract a `String` (or use [`ValueEq`]) when
//! string contents are what matters.
//!
//! Strategies are plain values. Each selector owns its own copy; there is no
//! process-wide default instance.
//!
//! # Identity and stable references
//!
//! `Identity` only reports "unchanged" when the extractor hands back the very
//! same allocation. Extractors that pluck an `Arc` out of an immutable state
//! tree satisfy this naturally; extractors that rebuild a `Vec` on every call
//! never will, and should either return a shared handle or be paired with
//! [`ValueEq`].

use std::rc::Rc;
use std::sync::Arc;

/// Elementwise comparison strategy for extracted values.
pub trait Equality<T: ?Sized> {
    /// Whether `a` and `b` count as the same input.
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// Types with a cheap notion of "the same value".
///
/// Handle types answer by address, plain data answers by value. Implement this
/// for your own handle types to make them usable with [`Identity`].
pub trait Identical {
    /// Whether `self` and `other` are the same value or the same allocation.
    fn identical(&self, other: &Self) -> bool;
}

macro_rules! identical_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identical for $ty {
                #[inline]
                fn identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

// Floats use IEEE `==`: NaN never matches, -0.0 matches 0.0.
identical_by_value!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl<T: ?Sized> Identical for Rc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identical for Arc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

/// Address identity. Extracted values must be `'static`, so inside a
/// selector this only applies to `&'static T` (interned tables, string
/// literals). A `&str` therefore compares by address and length, unlike
/// `str` and `String`, which compare by value.
impl<T: ?Sized> Identical for &T {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

impl<T: Identical> Identical for Option<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.identical(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Default strategy: address identity for handles, value equality for scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Identical + ?Sized> Equality<T> for Identity {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a.identical(b)
    }
}

/// Structural comparison via [`PartialEq`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueEq;

impl<T: PartialEq + ?Sized> Equality<T> for ValueEq {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Adapts a comparison closure into a strategy.
#[derive(Clone, Copy)]
pub struct EqFn<F>(pub F);

impl<F> std::fmt::Debug for EqFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EqFn(..)")
    }
}

impl<T: ?Sized, F> Equality<T> for EqFn<F>
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_compares_scalars_by_value() {
        assert!(Identity.equals(&8_u32, &8_u32));
        assert!(!Identity.equals(&8_u32, &9_u32));
        assert!(Identity.equals(&2.15_f64, &2.15_f64));
        assert!(Identity.equals(&String::from("apple"), &String::from("apple")));
    }

    #[test]
    fn identity_nan_never_matches() {
        assert!(!Identity.equals(&f64::NAN, &f64::NAN));
    }

    #[test]
    fn identity_compares_rc_by_address() {
        let a = Rc::new(vec![1, 2, 3]);
        let same = Rc::clone(&a);
        let lookalike = Rc::new(vec![1, 2, 3]);
        assert!(Identity.equals(&a, &same));
        assert!(!Identity.equals(&a, &lookalike));
    }

    #[test]
    fn identity_compares_arc_by_address() {
        let a: Arc<str> = Arc::from("shop");
        let b: Arc<str> = Arc::from("shop");
        assert!(Identity.equals(&a, &Arc::clone(&a)));
        assert!(!Identity.equals(&a, &b));
    }

    #[test]
    fn identity_compares_references_by_address() {
        let items = [1, 1];
        assert!(Identity.equals(&&items[0], &&items[0]));
        assert!(!Identity.equals(&&items[0], &&items[1]));
    }

    #[test]
    fn identity_option_handles_none() {
        let shared = Arc::new(5);
        assert!(Identity.equals(&None::<Arc<i32>>, &None));
        assert!(!Identity.equals(&Some(Arc::clone(&shared)), &None));
        assert!(Identity.equals(&Some(Arc::clone(&shared)), &Some(shared)));
    }

    #[test]
    fn identity_str_refs_compare_by_address_strings_by_value() {
        let owned = String::from("shop");
        let literal: &str = "shop";
        let borrowed: &str = owned.as_str();
        assert!(!Identity.equals(&literal, &borrowed));
        assert!(Identity.equals(&literal, &literal));
        assert!(Identity.equals(&String::from("shop"), &owned));
        assert!(Identity.equals(literal, borrowed));
    }

    #[test]
    fn identity_static_refs_inside_selector() {
        static LABELS: [&str; 3] = ["low", "high", "low"];
        let selector = crate::SelectorBuilder::new()
            .input(|i: &usize| &LABELS[*i])
            .build(|label| label.len());

        assert_eq!(selector.select(&0), 3);
        assert_eq!(selector.select(&0), 3);
        assert_eq!(selector.recomputations(), 1);
        // Same text, different slot in the table: a different address.
        assert_eq!(selector.select(&2), 3);
        assert_eq!(selector.recomputations(), 2);
    }

    #[test]
    fn value_eq_is_structural() {
        let a = Rc::new(vec![1, 2, 3]);
        let b = Rc::new(vec![1, 2, 3]);
        assert!(ValueEq.equals(&a, &b));
        assert!(!ValueEq.equals(&vec![1], &vec![2]));
    }

    #[test]
    fn eq_fn_uses_closure() {
        let within_cent = EqFn(|a: &f64, b: &f64| (a - b).abs() < 0.01);
        assert!(within_cent.equals(&1.000, &1.004));
        assert!(!within_cent.equals(&1.0, &1.5));
    }
}
