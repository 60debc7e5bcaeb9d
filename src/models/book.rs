//! Book (catalog title) model and related types.
//!
//! Genre and Language are the book's lookup tables and live here beside it;
//! both are free-text names managed by librarians.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;
use super::instance::BookInstance;

/// Genre classification, many-to-many with books
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Language a book is written in, one-to-many with books
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Full book model (DB + API). Relations are loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    /// Uniquely identifies the title
    pub isbn: String,
    pub author_id: i32,
    pub language_id: Option<i32>,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[sqlx(skip)]
    #[serde(default)]
    pub instances: Vec<BookInstance>,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub author_id: i32,
    pub author_name: Option<String>,
}

/// Create book form fields
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 1000, message = "Summary must be 1-1000 characters"))]
    pub summary: String,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10-13 characters"))]
    pub isbn: String,
    pub author_id: i32,
    pub language_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book form fields
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Summary must be 1-1000 characters"))]
    pub summary: Option<String>,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10-13 characters"))]
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    /// When present, replaces the genre set
    pub genre_ids: Option<Vec<i32>>,
}
