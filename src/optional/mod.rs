//! Explicit optional values
//!
//! [`Optional<T>`] is either present (carrying one `T`) or absent. Values are
//! immutable once built, and the wrapped value can only be read through
//! [`Optional::get`], which fails with [`AbsentValueAccess`] when there is
//! nothing to read.
//!
//! Presence can be tested without knowing `T` by comparing against the
//! [`SOME`] marker, see [`equality`] for the full comparison rules.

use crate::error::AbsentValueAccess;
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod equality;
pub mod presence;
pub mod sentinel;

pub use equality::{Operand, equals, not_equals};
pub use presence::HasPresence;
pub use sentinel::{AnyValue, SOME};

/// Text shown in place of an absent value
pub const ABSENT_PLACEHOLDER: &str = "N/A";

/// A value that is either present or absent
#[derive(Clone, Copy)]
pub struct Optional<T>(Option<T>);

impl<T> Optional<T> {
    /// The canonical absent value for `T`
    pub const NONE: Self = Optional(None);

    /// Wrap a value, producing a present optional
    pub const fn of(value: T) -> Self {
        Optional(Some(value))
    }

    /// The canonical absent value for `T`
    pub const fn none() -> Self {
        Self::NONE
    }

    /// True iff this optional was built with a value
    pub const fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the wrapped value
    ///
    /// Fails with [`AbsentValueAccess`] when the optional is absent.
    pub fn get(&self) -> Result<&T, AbsentValueAccess> {
        self.0.as_ref().ok_or_else(AbsentValueAccess::of::<T>)
    }

    /// Take the wrapped value by ownership
    ///
    /// Fails with [`AbsentValueAccess`] when the optional is absent.
    pub fn into_inner(self) -> Result<T, AbsentValueAccess> {
        self.0.ok_or_else(AbsentValueAccess::of::<T>)
    }

    /// View as a nullable reference, for handing the value to code that expects one
    pub fn as_nullable(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::NONE
    }
}

/// Nullable sources: `None` becomes the canonical absent value.
impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Optional::of(value),
            None => Optional::none(),
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.0
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(ABSENT_PLACEHOLDER),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "Optional::of({:?})", value),
            None => f.write_str("Optional::none()"),
        }
    }
}

impl<T: Hash> Hash for Optional<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Some(value) => {
                state.write_u8(1);
                value.hash(state);
            }
            None => state.write_u8(0),
        }
    }
}
