//! # Customer Commands
//!
//! Register, look up, rename and delete customers.
//!
//! Names are unique, so a lookup by name yields at most one customer.

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;
use voucher_core::validation::parse_uuid;
use voucher_core::{Customer, ValidationError};
use voucher_db::DbError;

use crate::console::Console;
use crate::error::{ConsoleError, ConsoleResult};

/// How `customer delete` picks its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeleteKey {
    Id,
    Name,
}

impl std::str::FromStr for DeleteKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(DeleteKey::Id),
            "name" => Ok(DeleteKey::Name),
            _ => Err(ValidationError::NotAllowed {
                field: "delete key".to_string(),
                allowed: vec!["id".to_string(), "name".to_string()],
            }),
        }
    }
}

/// `customer create`: prompts for a name and saves the customer.
pub async fn create<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let name = console.prompt("Customer name").await?;
    let customer = Customer::new(&name)?;

    console.db().customers().save(&customer).await?;

    info!(id = %customer.id(), "Customer created");
    console.print_entity("Created customer", &customer).await
}

/// `customer list`: prints every customer, oldest first.
pub async fn list<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let customers = console.db().customers().find_all().await?;
    console.print_listing(&customers, "No customers.").await
}

/// `customer find`: looks a customer up by name.
pub async fn find<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let name = console.prompt("Customer name").await?;

    let customer = console
        .db()
        .customers()
        .find_by_name(&name)
        .await?
        .ok_or_else(|| ConsoleError::not_found("Customer", name.trim()))?;

    console.print_entity("Found customer", &customer).await
}

/// `customer rename`: gives an existing customer a new name.
pub async fn rename<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = parse_uuid("customer id", &console.prompt("Customer id").await?)?;
    let name = console.prompt("New name").await?;

    let mut customer = console
        .db()
        .customers()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DbError::data_modifying("Customer", "update", format!("id {}", id)))?;

    customer.update_name(&name)?;
    console.db().customers().update(&customer).await?;

    info!(id = %id, "Customer renamed");
    console.print_entity("Renamed customer", &customer).await
}

/// `customer delete`: removes a customer by id or by name.
pub async fn delete<R, W>(console: &mut Console<R, W>) -> ConsoleResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let key: DeleteKey = console.prompt("Delete by (id/name)").await?.parse()?;

    let target = match key {
        DeleteKey::Id => {
            let id = parse_uuid("customer id", &console.prompt("Customer id").await?)?;
            console.db().customers().delete(id).await?;
            id.to_string()
        }
        DeleteKey::Name => {
            let name = console.prompt("Customer name").await?;
            if name.is_empty() {
                return Err(ValidationError::Required {
                    field: "customer name".to_string(),
                }
                .into());
            }
            console.db().customers().delete_by_name(&name).await?;
            name
        }
    };

    info!(%target, "Customer deleted");
    console.print(&format!("Deleted customer {}", target)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::test_support::{db, run_script};

    #[test]
    fn test_delete_key_parsing() {
        assert_eq!("ID".parse::<DeleteKey>().unwrap(), DeleteKey::Id);
        assert_eq!(" name ".parse::<DeleteKey>().unwrap(), DeleteKey::Name);
        assert!("email".parse::<DeleteKey>().is_err());
    }

    #[tokio::test]
    async fn test_create_find_rename_delete() {
        let db = db().await;

        run_script(&db, OutputFormat::Text, "customer create\ntest\n").await;
        let customer = db.customers().find_by_name("test").await.unwrap().unwrap();

        let script = format!(
            "customer find\ntest\ncustomer rename\n{}\nnew_name\n",
            customer.id()
        );
        let output = run_script(&db, OutputFormat::Text, &script).await;
        assert!(output.contains(&format!("Found customer: {}", customer)));

        let renamed = db.customers().find_by_id(customer.id()).await.unwrap().unwrap();
        assert_eq!(renamed.name(), "new_name");
        assert_eq!(renamed.created_at(), customer.created_at());

        let script = format!("customer delete\nid\n{}\ncustomer list\n", customer.id());
        let output = run_script(&db, OutputFormat::Text, &script).await;
        assert!(output.contains(&format!("Deleted customer {}", customer.id())));
        assert!(output.contains("No customers."));
        assert!(db.customers().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_long_names() {
        let db = db().await;
        let long = "x".repeat(51);
        let script = format!("customer create\n   \ncustomer create\n{}\n", long);
        let output = run_script(&db, OutputFormat::Text, &script).await;

        assert_eq!(output.matches("[VALIDATION_ERROR]").count(), 2);
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let db = db().await;
        let output = run_script(
            &db,
            OutputFormat::Text,
            "customer create\nalice\ncustomer create\nalice\n",
        )
        .await;

        assert!(output.contains("[DUPLICATE] customers.name 'alice' already exists"));
        assert_eq!(db.customers().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rename_unknown_id() {
        let db = db().await;
        let id = uuid::Uuid::new_v4();
        let script = format!("customer rename\n{}\nnew_name\n", id);
        let output = run_script(&db, OutputFormat::Text, &script).await;

        assert!(output.contains(&format!(
            "[DATA_MODIFYING] Failed to update Customer: no row matched id {}",
            id
        )));
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let db = db().await;
        let output = run_script(&db, OutputFormat::Text, "customer find\nnobody\n").await;

        assert!(output.contains("[NOT_FOUND] Customer not found: nobody"));
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let db = db().await;
        db.customers()
            .save(&Customer::new("bob").unwrap())
            .await
            .unwrap();

        let output = run_script(
            &db,
            OutputFormat::Text,
            "customer delete\nname\nbob\ncustomer delete\nname\nbob\n",
        )
        .await;

        assert!(output.contains("Deleted customer bob"));
        assert!(output.contains("[DATA_MODIFYING]"));
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_json_listing() {
        let db = db().await;
        let customer = Customer::new("carol").unwrap();
        db.customers().save(&customer).await.unwrap();

        let output = run_script(&db, OutputFormat::Json, "customer list\n").await;

        let line = output
            .lines()
            .find(|line| line.contains("carol"))
            .unwrap()
            .trim_start_matches("> ");
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["name"], "carol");
        assert_eq!(value["id"], customer.id().to_string());
    }
}
