//! Author management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::BookShort,
    },
    repository::Repository,
    services::form_errors,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// One page of authors, ordered as persisted
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.list(page, per_page).await
    }

    /// Author with their books, for the detail page
    pub async fn get_with_books(&self, id: i32) -> AppResult<(Author, Vec<BookShort>)> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.authors.get_books(id).await?;
        Ok((author, books))
    }

    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create(&self, form: CreateAuthor) -> AppResult<Author> {
        form.validate().map_err(form_errors)?;
        self.repository.authors.create(&form).await
    }

    pub async fn update(&self, id: i32, form: UpdateAuthor) -> AppResult<Author> {
        form.validate().map_err(form_errors)?;
        self.repository.authors.update(id, &form).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }
}
