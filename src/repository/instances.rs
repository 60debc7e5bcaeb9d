//! Book instances repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::instance::{BookInstance, BookInstanceRow, LoanStatus, LoanedInstance, LoanedInstanceRow},
};

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a copy by its UUID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            "SELECT * FROM book_instances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?;

        Ok(BookInstance::from(row))
    }

    /// On-loan copies of one borrower, soonest due first
    pub async fn borrowed_by_user(
        &self,
        borrower_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<LoanedInstance>, i64)> {
        let rows = sqlx::query_as::<_, LoanedInstanceRow>(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.borrower_id, bi.status,
                   b.title AS book_title, u.username AS borrower_username
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.borrower_id = $1 AND bi.status = $2
            ORDER BY bi.due_back
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(borrower_id)
        .bind(LoanStatus::OnLoan.as_code())
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE borrower_id = $1 AND status = $2",
        )
        .bind(borrower_id)
        .bind(LoanStatus::OnLoan.as_code())
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(LoanedInstance::from).collect(), total))
    }

    /// All on-loan copies across borrowers, soonest due first
    pub async fn all_borrowed(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<LoanedInstance>, i64)> {
        let rows = sqlx::query_as::<_, LoanedInstanceRow>(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.borrower_id, bi.status,
                   b.title AS book_title, u.username AS borrower_username
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN users u ON bi.borrower_id = u.id
            WHERE bi.status = $1
            ORDER BY bi.due_back
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(LoanStatus::OnLoan.as_code())
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(LoanStatus::OnLoan.as_code())
                .fetch_one(&self.pool)
                .await?;

        Ok((rows.into_iter().map(LoanedInstance::from).collect(), total))
    }

    /// Persist a renewed due date
    pub async fn set_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        let result = sqlx::query("UPDATE book_instances SET due_back = $2 WHERE id = $1")
            .bind(id)
            .bind(due_back)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies currently available for loan
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(LoanStatus::Available.as_code())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
