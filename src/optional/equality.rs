//! Equality between optionals, the presence marker and missing references
//!
//! Operands are one of three kinds, see [`Operand`]. Rules, first match wins:
//!
//! 1. left is the marker: the right operand's presence decides
//! 2. right is the marker: the left operand's presence decides
//! 3. otherwise structural: a missing reference counts as the canonical
//!    absent value, two absent values are equal, two present values are
//!    equal when their wrapped values are
//!
//! A missing reference never has a value, so it is never equal to the marker.

use super::presence::HasPresence;
use super::sentinel::AnyValue;
use super::Optional;

/// One side of an equality test
pub enum Operand<'a, T> {
    /// The [`SOME`](super::SOME) marker
    Marker,
    /// A typed optional
    Value(&'a Optional<T>),
    /// No optional at all (as opposed to an absent one)
    Null,
}

impl<'a, T> Operand<'a, T> {
    fn slot(&self) -> Option<&'a T> {
        match *self {
            Operand::Value(value) => value.as_nullable(),
            Operand::Marker | Operand::Null => None,
        }
    }
}

impl<T> Clone for Operand<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operand<'_, T> {}

impl<T> HasPresence for Operand<'_, T> {
    fn has_value(&self) -> bool {
        match self {
            Operand::Marker => true,
            Operand::Value(value) => value.is_present(),
            Operand::Null => false,
        }
    }
}

impl<'a, T> From<&'a Optional<T>> for Operand<'a, T> {
    fn from(value: &'a Optional<T>) -> Self {
        Operand::Value(value)
    }
}

impl<'a, T> From<Option<&'a Optional<T>>> for Operand<'a, T> {
    fn from(value: Option<&'a Optional<T>>) -> Self {
        value.map_or(Operand::Null, Operand::Value)
    }
}

impl<T> From<&AnyValue> for Operand<'_, T> {
    fn from(_: &AnyValue) -> Self {
        Operand::Marker
    }
}

/// Equality under the rules in the module docs
pub fn equals<T: PartialEq>(a: Operand<'_, T>, b: Operand<'_, T>) -> bool {
    match (a, b) {
        (Operand::Marker, other) => other.has_value(),
        (other, Operand::Marker) => other.has_value(),
        (a, b) => a.slot() == b.slot(),
    }
}

/// Inequality under the rules in the module docs
///
/// Evaluated on its own table; for every operand pair the result is the
/// negation of [`equals`].
pub fn not_equals<T: PartialEq>(a: Operand<'_, T>, b: Operand<'_, T>) -> bool {
    match (a, b) {
        (Operand::Marker, other) => !other.has_value(),
        (other, Operand::Marker) => !other.has_value(),
        (a, b) => match (a.slot(), b.slot()) {
            (Some(left), Some(right)) => left != right,
            (None, None) => false,
            (Some(_), None) | (None, Some(_)) => true,
        },
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        equals(Operand::Value(self), Operand::Value(other))
    }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        not_equals(Operand::Value(self), Operand::Value(other))
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<T> PartialEq<AnyValue> for Optional<T> {
    fn eq(&self, other: &AnyValue) -> bool {
        other.matches(Some(self as &dyn HasPresence))
    }
}

impl<T> PartialEq<Optional<T>> for AnyValue {
    fn eq(&self, other: &Optional<T>) -> bool {
        self.matches(Some(other as &dyn HasPresence))
    }
}

/// Comparison with a raw nullable value; `None` counts as absent
impl<T: PartialEq> PartialEq<Option<T>> for Optional<T> {
    fn eq(&self, other: &Option<T>) -> bool {
        self.as_nullable() == other.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optional::SOME;

    fn of(value: i32) -> Optional<i32> {
        Optional::of(value)
    }

    fn none() -> Optional<i32> {
        Optional::none()
    }

    #[test]
    fn test_structural_equality() {
        assert!(of(1) == of(1));
        assert!(of(1) != of(2));
        assert!(of(1) != none());
        assert!(none() != of(1));
        assert!(none() == none());
        assert_eq!(Optional::<i32>::NONE, none());
    }

    #[test]
    fn test_marker_both_directions() {
        for value in [of(0), of(-5), none()] {
            let forward = value == SOME;
            let backward = SOME == value;
            assert_eq!(forward, backward);
            assert_eq!(forward, value.is_present());
            assert_eq!(value != SOME, !forward);
            assert_eq!(SOME != value, !backward);
        }
    }

    #[test]
    fn test_marker_on_any_wrapped_type() {
        assert!(Optional::of("text") == SOME);
        assert!(Optional::of(vec![0u8; 3]) == SOME);
        assert!(Optional::<f64>::none() != SOME);
        // No PartialEq needed on the wrapped type
        struct Opaque;
        assert!(Optional::of(Opaque) == SOME);
        assert!(SOME != Optional::<Opaque>::none());
    }

    /// The whole dispatch table, one row per operand pair
    #[test]
    fn test_dispatch_table() {
        let one = of(1);
        let two = of(2);
        let absent = none();

        fn m<'a>() -> Operand<'a, i32> {
            Operand::Marker
        }
        fn n<'a>() -> Operand<'a, i32> {
            Operand::Null
        }
        fn v(o: &Optional<i32>) -> Operand<'_, i32> {
            Operand::Value(o)
        }

        let rows: Vec<(Operand<'_, i32>, Operand<'_, i32>, bool)> = vec![
            // marker on the left
            (m(), v(&one), true),
            (m(), v(&absent), false),
            (m(), n(), false),
            (m(), m(), true),
            // marker on the right
            (v(&one), m(), true),
            (v(&absent), m(), false),
            (n(), m(), false),
            // structural
            (v(&one), v(&one), true),
            (v(&one), v(&two), false),
            (v(&one), v(&absent), false),
            (v(&absent), v(&absent), true),
            // missing references normalize to absent
            (n(), v(&absent), true),
            (v(&absent), n(), true),
            (n(), n(), true),
            (n(), v(&one), false),
            (v(&one), n(), false),
        ];

        for (index, (a, b, expected)) in rows.into_iter().enumerate() {
            assert_eq!(equals(a, b), expected, "equals row {}", index);
            assert_eq!(not_equals(a, b), !expected, "not_equals row {}", index);
        }
    }

    #[test]
    fn test_operand_conversions() {
        let value = of(3);
        assert!(matches!(Operand::from(&value), Operand::Value(_)));
        assert!(matches!(Operand::from(None::<&Optional<i32>>), Operand::Null));
        assert!(matches!(Operand::<i32>::from(&SOME), Operand::Marker));

        let missing: Option<&Optional<i32>> = None;
        assert!(equals(Operand::from(missing), Operand::Value(&none())));
    }

    #[test]
    fn test_compare_with_raw_nullable() {
        assert!(of(4) == Some(4));
        assert!(of(4) != Some(5));
        assert!(none() == None);
        assert!(of(4) != None);
    }
}
