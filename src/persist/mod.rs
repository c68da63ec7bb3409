//! Persistence adapter for optional values
//!
//! This module provides:
//! - A compile-time generic converter between `Optional<T>` and `Option<T>`
//! - sqlx `Type`/`Encode`/`Decode` impls so optionals bind as nullable columns
//! - A registry recording which entity properties are optional
//! - Schema generation that takes column nullability from that registry

pub mod converter;
pub mod registry;
pub mod schema;
pub mod sqlite;

pub use converter::{NullableConverter, OptionalConverter};
pub use registry::{ColumnDefinition, ColumnRegistry, OptionalColumn, StorageType, global_registry};
pub use schema::TableBuilder;
