//! The type-erased presence capability

use super::Optional;

/// Anything that can answer "does this hold a value?" without exposing the value
///
/// Implemented by every [`Optional<T>`] and by the [`SOME`](super::SOME)
/// marker, so presence can be tested through `&dyn HasPresence`.
pub trait HasPresence {
    fn has_value(&self) -> bool;
}

impl<T> HasPresence for Optional<T> {
    fn has_value(&self) -> bool {
        self.is_present()
    }
}

impl<P: HasPresence + ?Sized> HasPresence for &P {
    fn has_value(&self) -> bool {
        (**self).has_value()
    }
}
