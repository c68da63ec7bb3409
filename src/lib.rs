//! Explicit optional values that survive a trip through nullable storage
//!
//! - [`Optional<T>`]: present/absent value, immutable, with a fallible `get`
//! - [`SOME`]: untyped marker for presence tests on any `Optional<T>`
//! - [`lookup`]: first-match lookups returning `Optional`
//! - [`persist`]: converter, sqlx bindings and the optional-column registry

pub mod cli;
pub mod config;
pub mod contacts;
pub mod db;
pub mod error;
pub mod lookup;
pub mod optional;
pub mod persist;

pub use error::{AbsentValueAccess, RegistryError};
pub use lookup::{LookupExt, find_first_or_absent, find_or_absent, first_or_absent};
pub use optional::{ABSENT_PLACEHOLDER, AnyValue, HasPresence, Operand, Optional, SOME, equals, not_equals};
