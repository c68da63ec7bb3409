//! Error types for optional values and column registration

use thiserror::Error;

/// Raised when the value of an absent [`Optional`](crate::Optional) is read.
///
/// This is always a caller bug: presence has to be checked before `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("attempted to access the value of an absent optional ({type_name})")]
pub struct AbsentValueAccess {
    /// Name of the wrapped type, for diagnostics only
    pub type_name: &'static str,
}

impl AbsentValueAccess {
    pub(crate) fn of<T>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Errors raised while registering optional columns or building schema from them
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The property already has an adapter registered.
    #[error("optional column '{entity}.{property}' is already registered")]
    AlreadyRegistered { entity: String, property: String },

    /// A nullable column was requested without a registered adapter.
    #[error("column '{entity}.{property}' is not registered as optional")]
    Unregistered { entity: String, property: String },

    /// A column registered as optional was declared as required.
    #[error("column '{entity}.{property}' is registered as optional but declared NOT NULL")]
    NullabilityConflict { entity: String, property: String },

    /// The registered storage type differs from the type used at the call site.
    #[error("column '{entity}.{property}' is registered as {registered}, not {requested}")]
    TypeMismatch {
        entity: String,
        property: String,
        registered: &'static str,
        requested: &'static str,
    },
}
