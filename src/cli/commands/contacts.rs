use crate::contacts::{ContactField, ContactStore, NewContact};
use crate::optional::{Optional, SOME};
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ContactsSubcommands {
    /// Insert the sample contacts
    Seed,
    /// List all contacts
    List,
    /// Show the first contact with the given name
    Find {
        /// Contact name
        name: String,
    },
    /// Show the first contact that has a value for a field
    First {
        /// Field that must be present
        #[arg(long, value_enum)]
        with: ContactField,
    },
    /// List contacts without a value for a field
    Missing {
        /// Field to check
        #[arg(value_enum)]
        field: ContactField,
    },
    /// Set or clear a contact's nickname
    SetNickname {
        /// Contact id
        id: i64,
        /// New nickname; omit to clear it
        nickname: Option<String>,
    },
    /// Delete a contact
    Delete {
        /// Contact id
        id: i64,
    },
}

/// Contacts inserted by `seed`
pub fn sample_contacts() -> Vec<NewContact> {
    vec![
        NewContact::new("Ada Lovelace")
            .nickname("Countess")
            .email("ada@example.com")
            .age(36),
        NewContact::new("Grace Hopper").email("grace@example.com"),
        NewContact::new("Linus Torvalds").age(28),
        NewContact::new("Margaret Hamilton"),
    ]
}

pub async fn seed(store: &ContactStore) -> Result<usize> {
    let samples = sample_contacts();
    for contact in &samples {
        store.insert(contact).await?;
    }
    Ok(samples.len())
}

pub async fn handle(command: ContactsSubcommands, store: &ContactStore) -> Result<()> {
    match command {
        ContactsSubcommands::Seed => {
            let count = seed(store).await?;
            println!("Inserted {} contacts", count);
        }
        ContactsSubcommands::List => {
            let contacts = store.list().await?;
            if contacts.is_empty() {
                println!("No contacts found");
            }
            for contact in contacts {
                println!("{}", contact);
            }
        }
        ContactsSubcommands::Find { name } => match store.find_by_name(&name).await?.into_inner() {
            Ok(contact) => println!("{}", contact),
            Err(_) => println!("No contact named '{}'", name),
        },
        ContactsSubcommands::First { with } => {
            let found = store
                .find_first(|contact| SOME.matches(Some(contact.field(with))))
                .await?;
            println!("{}", found);
        }
        ContactsSubcommands::Missing { field } => {
            let contacts = store.list_missing(field).await?;
            println!("{} contacts without {}", contacts.len(), field.property());
            for contact in contacts {
                println!("  {}", contact);
            }
        }
        ContactsSubcommands::SetNickname { id, nickname } => {
            let nickname = Optional::from(nickname);
            println!("Setting nickname of #{} to {}", id, nickname);
            store.set_nickname(id, nickname).await?;
        }
        ContactsSubcommands::Delete { id } => {
            store.delete(id).await?;
            println!("Deleted contact #{}", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::persist::ColumnRegistry;
    use clap::Parser;
    use std::sync::Arc;

    async fn store() -> ContactStore {
        let pool = db::connect_memory().await.unwrap();
        ContactStore::open(pool, Arc::new(ColumnRegistry::new())).await.unwrap()
    }

    #[tokio::test]
    async fn test_seed_inserts_samples() {
        let store = store().await;
        assert_eq!(seed(&store).await.unwrap(), 4);
        assert_eq!(store.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_handle_runs_every_command() {
        let store = store().await;

        handle(ContactsSubcommands::Seed, &store).await.unwrap();
        handle(ContactsSubcommands::List, &store).await.unwrap();
        handle(ContactsSubcommands::Find { name: "Nobody".to_string() }, &store).await.unwrap();
        handle(ContactsSubcommands::First { with: ContactField::Age }, &store).await.unwrap();
        handle(ContactsSubcommands::Missing { field: ContactField::Email }, &store).await.unwrap();
        handle(ContactsSubcommands::SetNickname { id: 2, nickname: None }, &store).await.unwrap();
        handle(ContactsSubcommands::Delete { id: 4 }, &store).await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 3);
        assert!(handle(ContactsSubcommands::Delete { id: 4 }, &store).await.is_err());
    }

    #[test]
    fn test_parse_arguments() {
        let cli = crate::cli::Cli::try_parse_from(["option-persist", "missing", "nickname"]).unwrap();
        assert!(matches!(
            cli.command,
            ContactsSubcommands::Missing { field: ContactField::Nickname }
        ));

        let cli = crate::cli::Cli::try_parse_from(["option-persist", "set-nickname", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            ContactsSubcommands::SetNickname { id: 3, nickname: None }
        ));

        let cli = crate::cli::Cli::try_parse_from(["option-persist", "--database", "x.db", "first", "--with", "email"]).unwrap();
        assert_eq!(cli.database, Some(std::path::PathBuf::from("x.db")));
    }
}
