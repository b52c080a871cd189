//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Name Uniqueness
//! `customers.name` carries a UNIQUE constraint, so name-based lookup and
//! delete address at most one row. Saving (or renaming to) a name that is
//! already taken fails with [`DbError::UniqueViolation`].

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::expect_affected;
use voucher_core::Customer;

/// Row shape of the `customers` table.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = DbError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| DbError::CorruptRow(format!("customers.id '{}': {}", row.id, e)))?;
        Customer::from_parts(id, row.created_at, &row.name)
            .map_err(|e| DbError::CorruptRow(format!("customers.name for {}: {}", id, e)))
    }
}

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// repo.save(&customer).await?;
/// let found = repo.find_by_name("test").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - id or name already exists
    pub async fn save(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id(), name = %customer.name(), "Saving customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(customer.id().to_string())
        .bind(customer.name())
        .bind(customer.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(|field| duplicate_value(field, customer)))?;

        Ok(())
    }

    /// Gets a customer by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    /// Gets a customer by exact name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM customers
            WHERE name = ?1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    /// Lists every customer, oldest first.
    pub async fn find_all(&self) -> DbResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM customers
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded customers");
        rows.into_iter().map(Customer::try_from).collect()
    }

    /// Writes the customer's current name to the row with its id.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::DataModifying)` - No customer with this id
    /// * `Err(DbError::UniqueViolation)` - The new name is taken
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id(), name = %customer.name(), "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = ?2
            WHERE id = ?1
            "#,
        )
        .bind(customer.id().to_string())
        .bind(customer.name())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(|field| duplicate_value(field, customer)))?;

        expect_affected(result, "Customer", "update", || {
            format!("id {}", customer.id())
        })?;
        Ok(())
    }

    /// Deletes a customer by id.
    ///
    /// ## Returns
    /// * `Err(DbError::DataModifying)` - No customer with this id
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        expect_affected(result, "Customer", "delete", || format!("id {}", id))?;
        Ok(())
    }

    /// Deletes a customer by exact name.
    ///
    /// ## Returns
    /// * `Err(DbError::DataModifying)` - No customer with this name
    pub async fn delete_by_name(&self, name: &str) -> DbResult<()> {
        let name = name.trim();
        debug!(name = %name, "Deleting customer by name");

        let result = sqlx::query("DELETE FROM customers WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        expect_affected(result, "Customer", "delete", || format!("name '{}'", name))?;
        Ok(())
    }

    /// Deletes every customer and returns how many rows were removed.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM customers")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Counts customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn duplicate_value(field: &str, customer: &Customer) -> String {
    if field.ends_with(".name") {
        customer.name().to_string()
    } else {
        customer.id().to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> CustomerRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .customers()
    }

    #[tokio::test]
    async fn test_save_then_find_by_id() {
        let repo = repo().await;
        let customer = Customer::new("test").unwrap();

        repo.save(&customer).await.unwrap();

        let found = repo.find_by_id(customer.id()).await.unwrap();
        assert_eq!(found, Some(customer));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let repo = repo().await;
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_duplicate_id_fails() {
        let repo = repo().await;
        let customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();

        let same_id = Customer::with_id(customer.id(), "other").unwrap();
        let err = repo.save(&same_id).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "customers.id");
                assert_eq!(value, customer.id().to_string());
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_duplicate_name_fails() {
        let repo = repo().await;
        repo.save(&Customer::new("test").unwrap()).await.unwrap();

        let err = repo.save(&Customer::new("test").unwrap()).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value }
                if field == "customers.name" && value == "test"
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_all() {
        let repo = repo().await;
        for name in ["test1", "test2", "test3"] {
            repo.save(&Customer::new(name).unwrap()).await.unwrap();
        }

        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let repo = repo().await;
        let customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();
        repo.save(&Customer::new("someone else").unwrap()).await.unwrap();

        assert_eq!(repo.find_by_name("test").await.unwrap(), Some(customer));
        assert_eq!(repo.find_by_name("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repo().await;
        let mut customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();

        customer.update_name("new_name").unwrap();
        repo.update(&customer).await.unwrap();

        let found = repo.find_by_id(customer.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "new_name");
        assert_eq!(found, customer);
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let repo = repo().await;
        let customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();

        let wrong_id = Customer::new("wrongIdCustomer").unwrap();
        let err = repo.update(&wrong_id).await.unwrap_err();

        assert!(err.is_data_modifying());
        assert_eq!(repo.find_all().await.unwrap(), vec![customer]);
    }

    #[tokio::test]
    async fn test_update_to_taken_name_fails() {
        let repo = repo().await;
        repo.save(&Customer::new("alice").unwrap()).await.unwrap();
        let mut bob = Customer::new("bob").unwrap();
        repo.save(&bob).await.unwrap();

        bob.update_name("alice").unwrap();
        assert!(matches!(
            repo.update(&bob).await,
            Err(DbError::UniqueViolation { .. })
        ));
        assert_eq!(
            repo.find_by_id(bob.id()).await.unwrap().unwrap().name(),
            "bob"
        );
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = repo().await;
        let customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();

        repo.delete(customer.id()).await.unwrap();

        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails() {
        let repo = repo().await;
        repo.save(&Customer::new("test").unwrap()).await.unwrap();

        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();

        assert!(err.is_data_modifying());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let repo = repo().await;
        let customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();

        repo.delete_by_name(customer.name()).await.unwrap();

        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_stale_name_fails() {
        let repo = repo().await;
        let mut customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();

        let real_name = customer.name().to_string();
        customer.update_name("wrongName").unwrap();
        repo.update(&customer).await.unwrap();

        let err = repo.delete_by_name(&real_name).await.unwrap_err();
        assert!(err.is_data_modifying());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_customer_lifecycle() {
        let repo = repo().await;
        let mut customer = Customer::new("test").unwrap();
        repo.save(&customer).await.unwrap();

        assert_eq!(
            repo.find_by_name("test").await.unwrap().as_ref(),
            Some(&customer)
        );

        customer.update_name("new_name").unwrap();
        repo.update(&customer).await.unwrap();
        assert_eq!(
            repo.find_by_id(customer.id()).await.unwrap().unwrap().name(),
            "new_name"
        );

        repo.delete(customer.id()).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = repo().await;
        for name in ["a", "b"] {
            repo.save(&Customer::new(name).unwrap()).await.unwrap();
        }

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
