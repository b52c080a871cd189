//! # Voucher Repository
//!
//! Database operations for vouchers.
//!
//! Rows are rebuilt through [`Voucher::with_id`], so a row whose amount is out
//! of bound for its type surfaces as [`DbError::CorruptRow`] instead of an
//! invalid voucher.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::expect_affected;
use voucher_core::{Voucher, VoucherType};

/// Row shape of the `vouchers` table.
#[derive(Debug, sqlx::FromRow)]
struct VoucherRow {
    id: String,
    voucher_type: VoucherType,
    discount_amount: i64,
}

impl TryFrom<VoucherRow> for Voucher {
    type Error = DbError;

    fn try_from(row: VoucherRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| DbError::CorruptRow(format!("vouchers.id '{}': {}", row.id, e)))?;
        Voucher::with_id(id, row.voucher_type, row.discount_amount)
            .map_err(|e| DbError::CorruptRow(format!("voucher {}: {}", id, e)))
    }
}

/// Repository for voucher database operations.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: SqlitePool,
}

impl VoucherRepository {
    /// Creates a new VoucherRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VoucherRepository { pool }
    }

    /// Inserts a new voucher.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - id already exists
    pub async fn save(&self, voucher: &Voucher) -> DbResult<()> {
        debug!(
            id = %voucher.id(),
            voucher_type = %voucher.voucher_type(),
            amount = voucher.discount_amount(),
            "Saving voucher"
        );

        sqlx::query(
            r#"
            INSERT INTO vouchers (id, voucher_type, discount_amount)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(voucher.id().to_string())
        .bind(voucher.voucher_type())
        .bind(voucher.discount_amount())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(|_| voucher.id().to_string()))?;

        Ok(())
    }

    /// Gets a voucher by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Voucher))` - Voucher found
    /// * `Ok(None)` - Voucher not found
    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<Voucher>> {
        let row: Option<VoucherRow> = sqlx::query_as(
            r#"
            SELECT id, voucher_type, discount_amount
            FROM vouchers
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Voucher::try_from).transpose()
    }

    /// Lists every voucher in insertion order.
    pub async fn find_all(&self) -> DbResult<Vec<Voucher>> {
        let rows: Vec<VoucherRow> = sqlx::query_as(
            r#"
            SELECT id, voucher_type, discount_amount
            FROM vouchers
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded vouchers");
        rows.into_iter().map(Voucher::try_from).collect()
    }

    /// Lists vouchers of one type in insertion order.
    pub async fn find_by_type(&self, voucher_type: VoucherType) -> DbResult<Vec<Voucher>> {
        let rows: Vec<VoucherRow> = sqlx::query_as(
            r#"
            SELECT id, voucher_type, discount_amount
            FROM vouchers
            WHERE voucher_type = ?1
            ORDER BY rowid
            "#,
        )
        .bind(voucher_type)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Voucher::try_from).collect()
    }

    /// Writes the voucher's current discount amount to the row with its id.
    ///
    /// The type tag never changes, so only the amount is written.
    ///
    /// ## Returns
    /// * `Err(DbError::DataModifying)` - No voucher with this id
    pub async fn update(&self, voucher: &Voucher) -> DbResult<()> {
        debug!(
            id = %voucher.id(),
            amount = voucher.discount_amount(),
            "Updating voucher"
        );

        let result = sqlx::query(
            r#"
            UPDATE vouchers
            SET discount_amount = ?2
            WHERE id = ?1
            "#,
        )
        .bind(voucher.id().to_string())
        .bind(voucher.discount_amount())
        .execute(&self.pool)
        .await?;

        expect_affected(result, "Voucher", "update", || format!("id {}", voucher.id()))?;
        Ok(())
    }

    /// Deletes a voucher by id.
    ///
    /// ## Returns
    /// * `Err(DbError::DataModifying)` - No voucher with this id
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(id = %id, "Deleting voucher");

        let result = sqlx::query("DELETE FROM vouchers WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        expect_affected(result, "Voucher", "delete", || format!("id {}", id))?;
        Ok(())
    }

    /// Deletes every voucher and returns how many rows were removed.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM vouchers")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Counts vouchers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vouchers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use voucher_core::{Money, VoucherFactories};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_then_find_by_id() {
        let repo = db().await.vouchers();
        for voucher_type in VoucherType::ALL {
            let voucher = Voucher::new(voucher_type, 50).unwrap();
            repo.save(&voucher).await.unwrap();

            assert_eq!(repo.find_by_id(voucher.id()).await.unwrap(), Some(voucher));
        }
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let repo = db().await.vouchers();
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_duplicate_id_fails() {
        let repo = db().await.vouchers();
        let voucher = Voucher::new(VoucherType::FixedAmount, 500).unwrap();
        repo.save(&voucher).await.unwrap();

        let err = repo.save(&voucher).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref value, .. } if *value == voucher.id().to_string()
        ));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = db().await.vouchers();
        let factories = VoucherFactories::with_defaults();
        let saved = vec![
            factories.create(VoucherType::FixedAmount, 1000).unwrap(),
            factories.create(VoucherType::PercentDiscount, 10).unwrap(),
            factories.create(VoucherType::FixedAmount, 2500).unwrap(),
        ];
        for voucher in &saved {
            repo.save(voucher).await.unwrap();
        }

        assert_eq!(repo.find_all().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_find_by_type() {
        let repo = db().await.vouchers();
        let fixed = Voucher::new(VoucherType::FixedAmount, 1000).unwrap();
        let percent = Voucher::new(VoucherType::PercentDiscount, 10).unwrap();
        repo.save(&fixed).await.unwrap();
        repo.save(&percent).await.unwrap();

        assert_eq!(
            repo.find_by_type(VoucherType::PercentDiscount).await.unwrap(),
            vec![percent]
        );
        assert_eq!(
            repo.find_by_type(VoucherType::FixedAmount).await.unwrap(),
            vec![fixed]
        );
    }

    #[tokio::test]
    async fn test_update_amount() {
        let repo = db().await.vouchers();
        let mut voucher = Voucher::new(VoucherType::FixedAmount, 500).unwrap();
        repo.save(&voucher).await.unwrap();

        voucher.update(800).unwrap();
        repo.update(&voucher).await.unwrap();

        let found = repo.find_by_id(voucher.id()).await.unwrap().unwrap();
        assert_eq!(found.discount_amount(), 800);
        assert_eq!(found.discount(Money::new(1000)).unwrap(), Money::new(200));
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails_and_leaves_store_unchanged() {
        let repo = db().await.vouchers();
        let stored = Voucher::new(VoucherType::FixedAmount, 500).unwrap();
        repo.save(&stored).await.unwrap();

        let never_saved = Voucher::new(VoucherType::FixedAmount, 700).unwrap();
        let err = repo.update(&never_saved).await.unwrap_err();

        assert!(err.is_data_modifying());
        assert_eq!(repo.find_all().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = db().await.vouchers();
        let voucher = Voucher::new(VoucherType::PercentDiscount, 25).unwrap();
        repo.save(&voucher).await.unwrap();

        repo.delete(voucher.id()).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails() {
        let repo = db().await.vouchers();
        repo.save(&Voucher::new(VoucherType::FixedAmount, 500).unwrap())
            .await
            .unwrap();

        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();

        assert!(err.is_data_modifying());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_bound_row_is_corrupt() {
        let db = db().await;
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO vouchers (id, voucher_type, discount_amount) VALUES (?1, 'percent_discount', 500)",
        )
        .bind(id.to_string())
        .execute(db.pool())
        .await
        .unwrap();

        assert!(matches!(
            db.vouchers().find_by_id(id).await,
            Err(DbError::CorruptRow(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_type_is_rejected_by_schema() {
        let db = db().await;
        let result = sqlx::query(
            "INSERT INTO vouchers (id, voucher_type, discount_amount) VALUES ('x', 'bogus', 1)",
        )
        .execute(db.pool())
        .await;

        assert!(result.is_err());
    }
}
