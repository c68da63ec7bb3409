//! Registry of optional columns
//!
//! Every entity property that holds an `Optional<T>` is registered here once.
//! Registration is what makes the backing column nullable: schema generation
//! only emits nullable columns that appear in the registry.

use super::converter::{NullableConverter, OptionalConverter};
use crate::error::RegistryError;
use crate::optional::Optional;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// SQL type affinity used for the storage column of a value type
pub trait StorageType {
    const SQL_TYPE: &'static str;
}

impl StorageType for i64 {
    const SQL_TYPE: &'static str = "INTEGER";
}

impl StorageType for i32 {
    const SQL_TYPE: &'static str = "INTEGER";
}

impl StorageType for f64 {
    const SQL_TYPE: &'static str = "REAL";
}

impl StorageType for bool {
    const SQL_TYPE: &'static str = "BOOLEAN";
}

impl StorageType for String {
    const SQL_TYPE: &'static str = "TEXT";
}

impl StorageType for Vec<u8> {
    const SQL_TYPE: &'static str = "BLOB";
}

impl StorageType for chrono::DateTime<chrono::Utc> {
    const SQL_TYPE: &'static str = "TIMESTAMP";
}

impl StorageType for uuid::Uuid {
    const SQL_TYPE: &'static str = "BLOB";
}

/// A registered optional column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Entity (table) the property belongs to
    pub entity: String,
    /// Property name on the entity
    pub property: String,
    /// Column name in storage
    pub column: String,
    pub sql_type: &'static str,
    /// Rust type wrapped by the optional
    pub value_type: &'static str,
    /// Always true for registered columns
    pub nullable: bool,
}

/// Typed handle for a registered column, carrying its converter
#[derive(Debug, Clone)]
pub struct OptionalColumn<T> {
    definition: ColumnDefinition,
    converter: OptionalConverter<T>,
}

impl<T> OptionalColumn<T> {
    pub fn definition(&self) -> &ColumnDefinition {
        &self.definition
    }

    pub fn column(&self) -> &str {
        &self.definition.column
    }
}

impl<T: Clone> OptionalColumn<T> {
    pub fn to_storage(&self, value: &Optional<T>) -> Option<T> {
        self.converter.to_storage(value)
    }

    pub fn from_storage(&self, raw: Option<T>) -> Optional<T> {
        self.converter.from_storage(raw)
    }
}

type ColumnKey = (String, String);

/// Thread-safe registry of optional columns, keyed by entity and property
pub struct ColumnRegistry {
    columns: RwLock<HashMap<ColumnKey, ColumnDefinition>>,
}

impl ColumnRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            columns: RwLock::new(HashMap::new()),
        }
    }

    /// Register an adapter for `entity.property`, stored in a column of the same name
    pub fn register<T: StorageType>(&self, entity: &str, property: &str) -> Result<OptionalColumn<T>, RegistryError> {
        self.register_column::<T>(entity, property, property)
    }

    /// Register an adapter for `entity.property`, stored in `column`
    ///
    /// Returns an error if the property is already registered
    pub fn register_column<T: StorageType>(
        &self,
        entity: &str,
        property: &str,
        column: &str,
    ) -> Result<OptionalColumn<T>, RegistryError> {
        let mut columns = self.columns.write().unwrap_or_else(PoisonError::into_inner);
        let key = (entity.to_string(), property.to_string());
        if columns.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered {
                entity: entity.to_string(),
                property: property.to_string(),
            });
        }

        let definition = ColumnDefinition {
            entity: entity.to_string(),
            property: property.to_string(),
            column: column.to_string(),
            sql_type: T::SQL_TYPE,
            value_type: std::any::type_name::<T>(),
            nullable: true,
        };
        log::debug!(
            "Registered optional column: {}.{} -> {} {}",
            entity,
            property,
            column,
            definition.sql_type
        );
        columns.insert(key, definition.clone());

        Ok(OptionalColumn {
            definition,
            converter: OptionalConverter::new(),
        })
    }

    /// Typed handle for an already registered property
    pub fn column<T: StorageType>(&self, entity: &str, property: &str) -> Result<OptionalColumn<T>, RegistryError> {
        let definition = self.get(entity, property).ok_or_else(|| RegistryError::Unregistered {
            entity: entity.to_string(),
            property: property.to_string(),
        })?;

        let requested = std::any::type_name::<T>();
        if definition.value_type != requested {
            return Err(RegistryError::TypeMismatch {
                entity: entity.to_string(),
                property: property.to_string(),
                registered: definition.value_type,
                requested,
            });
        }

        Ok(OptionalColumn {
            definition,
            converter: OptionalConverter::new(),
        })
    }

    /// Get a definition by entity and property
    pub fn get(&self, entity: &str, property: &str) -> Option<ColumnDefinition> {
        self.read()
            .get(&(entity.to_string(), property.to_string()))
            .cloned()
    }

    /// Check whether a property holds an optional value
    pub fn is_optional(&self, entity: &str, property: &str) -> bool {
        self.read()
            .contains_key(&(entity.to_string(), property.to_string()))
    }

    /// Find the definition backed by a given storage column
    pub fn find_by_column(&self, entity: &str, column: &str) -> Option<ColumnDefinition> {
        self.read()
            .values()
            .find(|def| def.entity == entity && def.column == column)
            .cloned()
    }

    /// List all optional columns of an entity, sorted by property
    pub fn list_entity(&self, entity: &str) -> Vec<ColumnDefinition> {
        let columns = self.read();
        let mut definitions: Vec<_> = columns
            .values()
            .filter(|def| def.entity == entity)
            .cloned()
            .collect();

        definitions.sort_by(|a, b| a.property.cmp(&b.property));
        definitions
    }

    /// Get all entities with at least one optional column
    pub fn entities(&self) -> Vec<String> {
        let columns = self.read();
        let mut entities: Vec<_> = columns.values().map(|def| def.entity.clone()).collect();

        entities.sort();
        entities.dedup();
        entities
    }

    /// Get total number of registered columns
    pub fn count(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ColumnKey, ColumnDefinition>> {
        self.columns.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Global column registry (wrapped in Arc for sharing with stores)
static GLOBAL_REGISTRY: Lazy<Arc<ColumnRegistry>> = Lazy::new(|| Arc::new(ColumnRegistry::new()));

/// Get a reference to the global ColumnRegistry Arc
pub fn global_registry() -> Arc<ColumnRegistry> {
    GLOBAL_REGISTRY.clone()
}
