//! Catalog (book) management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookShort, CreateBook, Genre, Language, UpdateBook},
    repository::Repository,
    services::form_errors,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

/// Counts shown on the catalog index page
#[derive(Debug, Clone, Copy)]
pub struct CatalogCounts {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// One page of books
    pub async fn list_books(&self, page: i64, per_page: i64) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.list(page, per_page).await
    }

    /// Book with author, language, genres and copies
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, form: CreateBook) -> AppResult<Book> {
        form.validate().map_err(form_errors)?;
        self.repository.books.create(&form).await
    }

    pub async fn update_book(&self, id: i32, form: UpdateBook) -> AppResult<Book> {
        form.validate().map_err(form_errors)?;
        self.repository.books.update(id, &form).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Genre and language choice lists for the book form
    pub async fn form_choices(&self) -> AppResult<(Vec<Genre>, Vec<Language>)> {
        let genres = self.repository.books.list_genres().await?;
        let languages = self.repository.books.list_languages().await?;
        Ok((genres, languages))
    }

    /// Index-page counts
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        Ok(CatalogCounts {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.instances.count().await?,
            num_instances_available: self.repository.instances.count_available().await?,
            num_authors: self.repository.authors.count().await?,
            num_genres: self.repository.books.count_genres().await?,
        })
    }
}
