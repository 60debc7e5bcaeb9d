//! Book pages: list, detail and CRUD forms

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::Response,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookShort, CreateBook, Genre, Language, UpdateBook},
};

use super::{redirect_found, require_capability, AuthenticatedUser, PageQuery, PaginatedPage};

/// Book detail context; the book carries its author, language, genres and
/// copies
#[derive(Serialize, ToSchema)]
pub struct BookDetailPage {
    pub template: &'static str,
    pub book: Book,
}

/// Book form context with the genre and language choice lists
#[derive(Serialize, ToSchema)]
pub struct BookFormPage<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub template: &'static str,
    pub form: T,
    pub genres: Vec<Genre>,
    pub languages: Vec<Language>,
}

/// Delete confirmation context
#[derive(Serialize, ToSchema)]
pub struct BookConfirmDeletePage {
    pub template: &'static str,
    pub book: Book,
}

/// Paginated book list
#[utoipa::path(
    get,
    path = "/catalog/books/",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of books", body = PaginatedPage<BookShort>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedPage<BookShort>>> {
    let page = query.page();
    let per_page = state.config.catalog.page_size;
    let (books, total) = state.services.catalog.list_books(page, per_page).await?;

    Ok(Json(PaginatedPage::build(
        "catalog/book_list.html",
        books,
        total,
        page,
        per_page,
    )))
}

/// Book detail with copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail", body = BookDetailPage),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetailPage>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(BookDetailPage {
        template: "catalog/book_detail.html",
        book,
    }))
}

/// Blank book form with choice lists
#[utoipa::path(
    get,
    path = "/catalog/book/create/",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Book form", body = BookFormPage<CreateBook>),
        (status = 302, description = "Login or librarian capability required")
    )
)]
pub async fn create_book_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
) -> AppResult<Json<BookFormPage<CreateBook>>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let (genres, languages) = state.services.catalog.form_choices().await?;
    Ok(Json(BookFormPage {
        template: "catalog/book_form.html",
        form: CreateBook::default(),
        genres,
        languages,
    }))
}

/// Create a book and redirect to its detail page
#[utoipa::path(
    post,
    path = "/catalog/book/create/",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 302, description = "Created; redirect to the book detail page"),
        (status = 400, description = "Form validation failed"),
        (status = 409, description = "Referenced author, language or genre missing")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Json(form): Json<CreateBook>,
) -> AppResult<Response> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let book = state.services.catalog.create_book(form).await?;
    Ok(redirect_found(&format!("/catalog/book/{}", book.id)))
}

/// Book form pre-filled with current values
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form", body = BookFormPage<Book>),
        (status = 302, description = "Login or librarian capability required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
) -> AppResult<Json<BookFormPage<Book>>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let book = state.services.catalog.get_book(id).await?;
    let (genres, languages) = state.services.catalog.form_choices().await?;
    Ok(Json(BookFormPage {
        template: "catalog/book_form.html",
        form: book,
        genres,
        languages,
    }))
}

/// Update a book and redirect to its detail page
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 302, description = "Updated; redirect to the book detail page"),
        (status = 400, description = "Form validation failed"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
    Json(form): Json<UpdateBook>,
) -> AppResult<Response> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let book = state.services.catalog.update_book(id, form).await?;
    Ok(redirect_found(&format!("/catalog/book/{}", book.id)))
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = BookConfirmDeletePage),
        (status = 302, description = "Login or librarian capability required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
) -> AppResult<Json<BookConfirmDeletePage>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(BookConfirmDeletePage {
        template: "catalog/book_confirm_delete.html",
        book,
    }))
}

/// Delete a book and redirect to the book list
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete/",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 302, description = "Deleted; redirect to the book list"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    state.services.catalog.delete_book(id).await?;
    Ok(redirect_found("/catalog/books/"))
}
