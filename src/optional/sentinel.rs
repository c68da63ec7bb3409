//! The untyped "some value" marker

use super::presence::HasPresence;
use std::hash::{Hash, Hasher};

/// Stands for "some value, whichever" when compared against an optional
///
/// Carries no payload and is never an [`Optional`](super::Optional) itself.
/// Use the shared [`SOME`] constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyValue;

/// The shared presence marker
///
/// ```
/// use option_persist::{Optional, SOME};
///
/// assert!(Optional::of(5) == SOME);
/// assert!(SOME != Optional::<u32>::none());
/// ```
pub const SOME: AnyValue = AnyValue;

impl AnyValue {
    /// Presence test against an erased operand; a missing reference has no value
    pub fn matches(&self, other: Option<&dyn HasPresence>) -> bool {
        other.is_some_and(|other| other.has_value())
    }
}

impl HasPresence for AnyValue {
    fn has_value(&self) -> bool {
        true
    }
}

impl Hash for AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(0x534f_4d45);
    }
}
