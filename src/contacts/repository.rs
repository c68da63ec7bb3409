//! Repository for contact operations

use super::{Contact, ContactColumns, ContactField, DbContact, ENTITY, NewContact};
use crate::lookup::try_find_first_or_absent_stream;
use crate::optional::Optional;
use crate::persist::ColumnRegistry;
use anyhow::{Context, Result};
use futures::TryStreamExt;
use sqlx::SqlitePool;

/// Create the contacts table from the registered columns
pub async fn init(pool: &SqlitePool, registry: &ColumnRegistry) -> Result<()> {
    let sql = super::schema_sql(registry)?;

    sqlx::query(&sql)
        .execute(pool)
        .await
        .context("Failed to create contacts table")?;

    log::debug!("Contacts table ready");
    Ok(())
}

/// Insert a contact, returning its id
pub async fn insert(pool: &SqlitePool, columns: &ContactColumns, contact: &NewContact) -> Result<i64> {
    let sql = format!(
        "INSERT INTO {} (name, {}, {}, {}, created_at) VALUES (?, ?, ?, ?, ?)",
        ENTITY,
        columns.nickname.column(),
        columns.email.column(),
        columns.age.column(),
    );

    let result = sqlx::query(&sql)
        .bind(&contact.name)
        .bind(columns.nickname.to_storage(&contact.nickname))
        .bind(columns.email.to_storage(&contact.email))
        .bind(columns.age.to_storage(&contact.age))
        .bind(chrono::Utc::now())
        .execute(pool)
        .await
        .with_context(|| format!("Failed to insert contact '{}'", contact.name))?;

    let id = result.last_insert_rowid();
    log::info!("Saved contact: {} (#{})", contact.name, id);
    Ok(id)
}

/// Get contact by id
pub async fn get(pool: &SqlitePool, columns: &ContactColumns, id: i64) -> Result<Optional<Contact>> {
    let row: Option<DbContact> = sqlx::query_as(&format!("{} WHERE id = ?", columns.select_sql()))
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to get contact #{}", id))?;

    Ok(row.map(|row| row.into_contact(columns)).into())
}

/// List all contacts in insertion order
pub async fn list(pool: &SqlitePool, columns: &ContactColumns) -> Result<Vec<Contact>> {
    let rows: Vec<DbContact> = sqlx::query_as(&format!("{} ORDER BY id", columns.select_sql()))
        .fetch_all(pool)
        .await
        .context("Failed to list contacts")?;

    Ok(rows.into_iter().map(|row| row.into_contact(columns)).collect())
}

/// First contact with the given name
pub async fn find_by_name(pool: &SqlitePool, columns: &ContactColumns, name: &str) -> Result<Optional<Contact>> {
    let sql = format!("{} WHERE name = ? ORDER BY id", columns.select_sql());
    let rows = sqlx::query_as::<_, DbContact>(&sql)
        .bind(name)
        .fetch(pool)
        .map_ok(|row| row.into_contact(columns));

    try_find_first_or_absent_stream(rows, None::<fn(&Contact) -> bool>)
        .await
        .with_context(|| format!("Failed to find contact '{}'", name))
}

/// First contact accepted by `predicate`, scanning in insertion order
///
/// Rows are streamed; scanning stops at the first match.
pub async fn find_first<P>(pool: &SqlitePool, columns: &ContactColumns, predicate: P) -> Result<Optional<Contact>>
where
    P: FnMut(&Contact) -> bool,
{
    let sql = format!("{} ORDER BY id", columns.select_sql());
    let rows = sqlx::query_as::<_, DbContact>(&sql)
        .fetch(pool)
        .map_ok(|row| row.into_contact(columns));

    try_find_first_or_absent_stream(rows, Some(predicate))
        .await
        .context("Failed to search contacts")
}

/// Contacts whose `field` is absent
pub async fn list_missing(pool: &SqlitePool, columns: &ContactColumns, field: ContactField) -> Result<Vec<Contact>> {
    let def = columns.definition(field);

    let sql = format!("{} WHERE {} IS NULL ORDER BY id", columns.select_sql(), def.column);
    let rows: Vec<DbContact> = sqlx::query_as(&sql)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to list contacts without {}", def.property))?;

    Ok(rows.into_iter().map(|row| row.into_contact(columns)).collect())
}

/// Replace a contact's nickname; an absent nickname clears the column
pub async fn set_nickname(pool: &SqlitePool, columns: &ContactColumns, id: i64, nickname: Optional<String>) -> Result<()> {
    let sql = format!("UPDATE {} SET {} = ? WHERE id = ?", ENTITY, columns.nickname.column());
    let result = sqlx::query(&sql)
        .bind(nickname)
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to update nickname of contact #{}", id))?;

    if result.rows_affected() == 0 {
        anyhow::bail!("Contact #{} not found", id);
    }

    log::info!("Updated nickname of contact #{}", id);
    Ok(())
}

/// Delete contact by id
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", ENTITY))
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete contact #{}", id))?;

    if result.rows_affected() == 0 {
        anyhow::bail!("Contact #{} not found", id);
    }

    log::info!("Deleted contact #{}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::optional::SOME;

    async fn setup() -> (SqlitePool, ColumnRegistry, ContactColumns) {
        let pool = db::connect_memory().await.unwrap();
        let registry = ColumnRegistry::new();
        let columns = ContactColumns::register(&registry).unwrap();
        init(&pool, &registry).await.unwrap();
        (pool, registry, columns)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (pool, _registry, columns) = setup().await;

        let id = insert(&pool, &columns, &NewContact::new("Ada").nickname("Countess"))
            .await
            .unwrap();

        let contact = get(&pool, &columns, id).await.unwrap().into_inner().unwrap();
        assert_eq!(contact.name, "Ada");
        assert_eq!(contact.nickname, Optional::of("Countess".to_string()));
        assert_eq!(contact.email, Optional::none());
        assert!(contact.age != SOME);
    }

    #[tokio::test]
    async fn test_get_missing_is_absent() {
        let (pool, _registry, columns) = setup().await;
        assert!(get(&pool, &columns, 99).await.unwrap().is_absent());
    }

    #[tokio::test]
    async fn test_absent_values_are_stored_as_null() {
        let (pool, _registry, columns) = setup().await;
        insert(&pool, &columns, &NewContact::new("Linus")).await.unwrap();

        let nulls: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contacts WHERE nickname IS NULL AND email IS NULL AND age IS NULL",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(nulls, 1);
    }

    #[tokio::test]
    async fn test_set_nickname_missing_contact() {
        let (pool, _registry, columns) = setup().await;
        let result = set_nickname(&pool, &columns, 5, Optional::of("x".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_missing() {
        let (pool, _registry, columns) = setup().await;
        insert(&pool, &columns, &NewContact::new("A").age(30)).await.unwrap();
        insert(&pool, &columns, &NewContact::new("B")).await.unwrap();

        let missing = list_missing(&pool, &columns, ContactField::Age).await.unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "B");
    }

    #[tokio::test]
    async fn test_renamed_column_round_trip() {
        let pool = db::connect_memory().await.unwrap();
        let registry = ColumnRegistry::new();
        registry.register_column::<String>(ENTITY, "nickname", "nick").unwrap();
        let columns = ContactColumns::register(&registry).unwrap();
        init(&pool, &registry).await.unwrap();

        let id = insert(&pool, &columns, &NewContact::new("Ada").nickname("Countess"))
            .await
            .unwrap();

        let listed = list(&pool, &columns).await.unwrap();
        assert_eq!(listed[0].nickname, Optional::of("Countess".to_string()));

        set_nickname(&pool, &columns, id, Optional::none()).await.unwrap();
        let nulls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE nick IS NULL")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(nulls, 1);

        let missing = list_missing(&pool, &columns, ContactField::Nickname).await.unwrap();
        assert_eq!(missing.len(), 1);
        assert!(get(&pool, &columns, id).await.unwrap().into_inner().unwrap().nickname.is_absent());
    }
}
