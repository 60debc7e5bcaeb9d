//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookShort, CreateBook, Genre, Language, UpdateBook},
        instance::{BookInstance, BookInstanceRow},
    },
};

/// A duplicate isbn comes back as a field error the form can show; a bad
/// author or language reference as a constraint message.
fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::form_field("isbn", "A book with this ISBN already exists");
        }
        if db.is_foreign_key_violation() {
            return AppError::Constraint(
                "Referenced author, language or genre does not exist".to_string(),
            );
        }
    }
    AppError::from(e)
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID with author, language, genres and copies
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        book.author = sqlx::query_as("SELECT * FROM authors WHERE id = $1")
            .bind(book.author_id)
            .fetch_optional(&self.pool)
            .await?;

        book.language = sqlx::query_as("SELECT * FROM languages WHERE id = $1")
            .bind(book.language_id)
            .fetch_optional(&self.pool)
            .await?;

        book.genres = self.get_genres(id).await?;

        let instances = sqlx::query_as::<_, BookInstanceRow>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        book.instances = instances.into_iter().map(BookInstance::from).collect();

        Ok(book)
    }

    /// List books ordered by primary key, one page at a time
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<BookShort>, i64)> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, b.isbn, b.author_id,
                   a.first_name || ' ' || a.last_name AS author_name
            FROM books b
            JOIN authors a ON b.author_id = a.id
            ORDER BY b.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Create a new book and attach its genre set
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        self.set_genres(id, &book.genre_ids).await?;
        self.get_by_id(id).await
    }

    /// Update a book; absent fields keep their current value
    pub async fn update(&self, id: i32, update: &UpdateBook) -> AppResult<Book> {
        let found = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                isbn = COALESCE($4, isbn),
                author_id = COALESCE($5, author_id),
                language_id = COALESCE($6, language_id)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.summary.as_deref())
        .bind(update.isbn.as_deref())
        .bind(update.author_id)
        .bind(update.language_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        if found.is_none() {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        if let Some(ref genre_ids) = update.genre_ids {
            self.set_genres(id, genre_ids).await?;
        }

        self.get_by_id(id).await
    }

    /// Delete a book; its copies go with it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Genres attached to a book
    pub async fn get_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    /// Replace a book's genre set
    async fn set_genres(&self, book_id: i32, genre_ids: &[i32]) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        for genre_id in genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(book_id)
                .bind(genre_id)
                .execute(&self.pool)
                .await
                .map_err(map_write_error)?;
        }
        Ok(())
    }

    /// List all genres
    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    /// List all languages
    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        let languages = sqlx::query_as::<_, Language>("SELECT * FROM languages ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(languages)
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count all genres
    pub async fn count_genres(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
