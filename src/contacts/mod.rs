//! Contact store backed by SQLite
//!
//! A small entity with three optional properties (nickname, email, age),
//! stored in nullable columns registered with a [`ColumnRegistry`].
//! Rows come back as [`DbContact`], whose optional columns stay raw
//! `Option<T>` and are only exposed as [`Optional`] through the registered
//! column adapters.

use crate::error::RegistryError;
use crate::optional::{HasPresence, Optional};
use crate::persist::{ColumnDefinition, ColumnRegistry, OptionalColumn, StorageType, TableBuilder};
use anyhow::Result;
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use std::sync::Arc;

pub mod repository;

/// Entity (and table) name for contacts
pub const ENTITY: &str = "contacts";

/// Storage row for a contact
///
/// Optional columns are selected under their property names, whatever
/// column the registry maps them to.
#[derive(Debug, Clone, FromRow)]
pub struct DbContact {
    pub id: i64,
    pub name: String,
    nickname: Option<String>,
    email: Option<String>,
    age: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl DbContact {
    pub fn nickname(&self, columns: &ContactColumns) -> Optional<String> {
        columns.nickname.from_storage(self.nickname.clone())
    }

    pub fn email(&self, columns: &ContactColumns) -> Optional<String> {
        columns.email.from_storage(self.email.clone())
    }

    pub fn age(&self, columns: &ContactColumns) -> Optional<i64> {
        columns.age.from_storage(self.age)
    }

    pub fn into_contact(self, columns: &ContactColumns) -> Contact {
        Contact {
            nickname: self.nickname(columns),
            email: self.email(columns),
            age: self.age(columns),
            id: self.id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}

/// A contact as seen by application code
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub nickname: Optional<String>,
    pub email: Optional<String>,
    pub age: Optional<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Contact {
    /// Presence view of one optional property
    pub fn field(&self, field: ContactField) -> &dyn HasPresence {
        match field {
            ContactField::Nickname => &self.nickname,
            ContactField::Email => &self.email,
            ContactField::Age => &self.age,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} (nickname: {}, email: {}, age: {})",
            self.id, self.name, self.nickname, self.email, self.age
        )
    }
}

/// Input for a new contact
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub nickname: Optional<String>,
    pub email: Optional<String>,
    pub age: Optional<i64>,
}

impl NewContact {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nickname: Optional::none(),
            email: Optional::none(),
            age: Optional::none(),
        }
    }

    pub fn nickname(mut self, nickname: &str) -> Self {
        self.nickname = Optional::of(nickname.to_string());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Optional::of(email.to_string());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Optional::of(age);
        self
    }
}

/// Optional properties of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContactField {
    Nickname,
    Email,
    Age,
}

impl ContactField {
    pub fn property(&self) -> &'static str {
        match self {
            ContactField::Nickname => "nickname",
            ContactField::Email => "email",
            ContactField::Age => "age",
        }
    }
}

/// Registered adapters for the optional contact columns
#[derive(Debug, Clone)]
pub struct ContactColumns {
    pub nickname: OptionalColumn<String>,
    pub email: OptionalColumn<String>,
    pub age: OptionalColumn<i64>,
}

impl ContactColumns {
    /// Register the contact columns, reusing registrations that already exist
    pub fn register(registry: &ColumnRegistry) -> Result<Self, RegistryError> {
        Ok(Self {
            nickname: ensure_registered(registry, "nickname")?,
            email: ensure_registered(registry, "email")?,
            age: ensure_registered(registry, "age")?,
        })
    }

    /// Registered definition backing `field`
    pub fn definition(&self, field: ContactField) -> &ColumnDefinition {
        match field {
            ContactField::Nickname => self.nickname.definition(),
            ContactField::Email => self.email.definition(),
            ContactField::Age => self.age.definition(),
        }
    }

    /// Select list for [`DbContact`], aliasing registered columns to property names
    pub fn select_sql(&self) -> String {
        format!(
            "SELECT id, name, {} AS nickname, {} AS email, {} AS age, created_at FROM {}",
            self.nickname.column(),
            self.email.column(),
            self.age.column(),
            ENTITY
        )
    }
}

fn ensure_registered<T: StorageType>(registry: &ColumnRegistry, property: &str) -> Result<OptionalColumn<T>, RegistryError> {
    match registry.column::<T>(ENTITY, property) {
        Err(RegistryError::Unregistered { .. }) => registry.register::<T>(ENTITY, property),
        other => other,
    }
}

/// Contacts table DDL; nullability comes from the registry
pub fn schema_sql(registry: &ColumnRegistry) -> Result<String, RegistryError> {
    TableBuilder::new(registry, ENTITY)
        .primary_key("id")
        .required::<String>("name")
        .optional("nickname")
        .optional("email")
        .optional("age")
        .required::<chrono::DateTime<chrono::Utc>>("created_at")
        .build()
}

/// Contact store: a pool plus the registered column adapters
pub struct ContactStore {
    pool: SqlitePool,
    columns: ContactColumns,
}

impl ContactStore {
    /// Register columns and create the contacts table if needed
    pub async fn open(pool: SqlitePool, registry: Arc<ColumnRegistry>) -> Result<Self> {
        let columns = ContactColumns::register(&registry)?;
        repository::init(&pool, &registry).await?;

        Ok(Self { pool, columns })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn columns(&self) -> &ContactColumns {
        &self.columns
    }

    pub async fn insert(&self, contact: &NewContact) -> Result<i64> {
        repository::insert(&self.pool, &self.columns, contact).await
    }

    pub async fn get(&self, id: i64) -> Result<Optional<Contact>> {
        repository::get(&self.pool, &self.columns, id).await
    }

    pub async fn list(&self) -> Result<Vec<Contact>> {
        repository::list(&self.pool, &self.columns).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Optional<Contact>> {
        repository::find_by_name(&self.pool, &self.columns, name).await
    }

    pub async fn find_first<P>(&self, predicate: P) -> Result<Optional<Contact>>
    where
        P: FnMut(&Contact) -> bool,
    {
        repository::find_first(&self.pool, &self.columns, predicate).await
    }

    pub async fn list_missing(&self, field: ContactField) -> Result<Vec<Contact>> {
        repository::list_missing(&self.pool, &self.columns, field).await
    }

    pub async fn set_nickname(&self, id: i64, nickname: Optional<String>) -> Result<()> {
        repository::set_nickname(&self.pool, &self.columns, id, nickname).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        repository::delete(&self.pool, id).await
    }
}
