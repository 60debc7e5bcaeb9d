//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// List authors ordered by primary key, one page at a time
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Author>, i64)> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        Ok((authors, total))
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an author; absent fields keep their current value
    pub async fn update(&self, id: i32, update: &UpdateAuthor) -> AppResult<Author> {
        let updated = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                date_of_birth = COALESCE($4, date_of_birth),
                date_of_death = COALESCE($5, date_of_death)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.date_of_birth)
        .bind(update.date_of_death)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        Ok(updated)
    }

    /// Delete an author. A foreign-key refusal (books still reference the
    /// author) surfaces as a constraint error for the confirmation page.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db) = &e {
                    if db.is_foreign_key_violation() {
                        return AppError::Constraint(
                            "Author cannot be deleted while books reference them".to_string(),
                        );
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }
        Ok(())
    }

    /// Books written by an author, for the detail page
    pub async fn get_books(&self, author_id: i32) -> AppResult<Vec<crate::models::BookShort>> {
        let books = sqlx::query_as::<_, crate::models::BookShort>(
            r#"
            SELECT b.id, b.title, b.isbn, b.author_id,
                   a.first_name || ' ' || a.last_name AS author_name
            FROM books b
            JOIN authors a ON b.author_id = a.id
            WHERE b.author_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Count all authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
