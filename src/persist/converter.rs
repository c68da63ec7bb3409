//! Conversion between [`Optional`] and its nullable storage form

use crate::optional::Optional;
use std::marker::PhantomData;

/// Two-way conversion between an application-facing type and its storage type
pub trait NullableConverter {
    type Model;
    type Storage;

    fn to_storage(&self, model: &Self::Model) -> Self::Storage;
    fn from_storage(&self, raw: Self::Storage) -> Self::Model;
}

/// Converter for one column holding an `Optional<T>`
///
/// Present values are stored as-is, absent values as `NULL`. Reading `NULL`
/// back always produces the canonical absent value, so
/// `from_storage(to_storage(x)) == x` for every `x`.
pub struct OptionalConverter<T>(PhantomData<fn() -> T>);

impl<T> OptionalConverter<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Consume the optional, handing back the nullable value
    pub fn into_storage(&self, value: Optional<T>) -> Option<T> {
        value.into()
    }
}

impl<T> Default for OptionalConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OptionalConverter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OptionalConverter<T> {}

impl<T> std::fmt::Debug for OptionalConverter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OptionalConverter<{}>", std::any::type_name::<T>())
    }
}

impl<T: Clone> NullableConverter for OptionalConverter<T> {
    type Model = Optional<T>;
    type Storage = Option<T>;

    fn to_storage(&self, model: &Optional<T>) -> Option<T> {
        model.as_nullable().cloned()
    }

    fn from_storage(&self, raw: Option<T>) -> Optional<T> {
        Optional::from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_storage() {
        let converter = OptionalConverter::<String>::new();
        assert_eq!(converter.to_storage(&Optional::of("x".to_string())), Some("x".to_string()));
        assert_eq!(converter.to_storage(&Optional::none()), None);
        assert_eq!(converter.into_storage(Optional::of("y".to_string())), Some("y".to_string()));
        assert_eq!(converter.into_storage(Optional::none()), None);
    }

    #[test]
    fn test_from_storage() {
        let converter = OptionalConverter::<i64>::new();
        assert_eq!(converter.from_storage(Some(12)), Optional::of(12));
        assert_eq!(converter.from_storage(None), Optional::NONE);
    }

    #[test]
    fn test_round_trip_law() {
        let converter = OptionalConverter::<i64>::default();
        let samples = [Optional::of(0), Optional::of(i64::MIN), Optional::of(i64::MAX), Optional::none()];

        for sample in samples {
            assert_eq!(converter.from_storage(converter.to_storage(&sample)), sample);
        }
    }

    #[test]
    fn test_converter_is_zero_sized() {
        assert_eq!(std::mem::size_of::<OptionalConverter<String>>(), 0);
        assert_eq!(format!("{:?}", OptionalConverter::<i32>::new()), "OptionalConverter<i32>");
    }
}
