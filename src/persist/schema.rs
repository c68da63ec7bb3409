//! `CREATE TABLE` generation driven by the optional-column registry
//!
//! Nullability is never declared by hand here. Required columns are always
//! `NOT NULL`, and the only nullable columns are the ones registered as
//! optional for the table's entity.

use super::registry::{ColumnRegistry, StorageType};
use crate::error::RegistryError;

#[derive(Debug, Clone)]
enum ColumnKind {
    PrimaryKey,
    Required { sql_type: &'static str },
    Optional,
}

#[derive(Debug, Clone)]
struct ColumnSpec {
    property: String,
    kind: ColumnKind,
}

/// Builder for one table's DDL
pub struct TableBuilder<'r> {
    registry: &'r ColumnRegistry,
    entity: String,
    columns: Vec<ColumnSpec>,
}

impl<'r> TableBuilder<'r> {
    /// Start a table for `entity`; the table is named after the entity
    pub fn new(registry: &'r ColumnRegistry, entity: &str) -> Self {
        Self {
            registry,
            entity: entity.to_string(),
            columns: Vec::new(),
        }
    }

    /// Add an auto-incrementing integer primary key
    pub fn primary_key(mut self, property: &str) -> Self {
        self.columns.push(ColumnSpec {
            property: property.to_string(),
            kind: ColumnKind::PrimaryKey,
        });
        self
    }

    /// Add a `NOT NULL` column
    pub fn required<T: StorageType>(mut self, property: &str) -> Self {
        self.columns.push(ColumnSpec {
            property: property.to_string(),
            kind: ColumnKind::Required { sql_type: T::SQL_TYPE },
        });
        self
    }

    /// Place a registered optional column at this position
    ///
    /// Registered columns that are never placed explicitly are appended at
    /// the end, in property order.
    pub fn optional(mut self, property: &str) -> Self {
        self.columns.push(ColumnSpec {
            property: property.to_string(),
            kind: ColumnKind::Optional,
        });
        self
    }

    /// Render the `CREATE TABLE IF NOT EXISTS` statement
    pub fn build(self) -> Result<String, RegistryError> {
        let mut lines = Vec::with_capacity(self.columns.len());
        let mut placed = Vec::new();

        for spec in &self.columns {
            match &spec.kind {
                ColumnKind::PrimaryKey => {
                    lines.push(format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", spec.property));
                }
                ColumnKind::Required { sql_type } => {
                    if self.registry.is_optional(&self.entity, &spec.property) {
                        return Err(RegistryError::NullabilityConflict {
                            entity: self.entity.clone(),
                            property: spec.property.clone(),
                        });
                    }
                    lines.push(format!("{} {} NOT NULL", spec.property, sql_type));
                }
                ColumnKind::Optional => {
                    let def = self
                        .registry
                        .get(&self.entity, &spec.property)
                        .ok_or_else(|| RegistryError::Unregistered {
                            entity: self.entity.clone(),
                            property: spec.property.clone(),
                        })?;
                    lines.push(format!("{} {}", def.column, def.sql_type));
                    placed.push(def.property);
                }
            }
        }

        for def in self.registry.list_entity(&self.entity) {
            if !placed.contains(&def.property) {
                lines.push(format!("{} {}", def.column, def.sql_type));
            }
        }

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.entity,
            lines.join(",\n    ")
        );
        log::debug!("Built schema for {}: {} columns", self.entity, lines.len());
        Ok(sql)
    }
}
