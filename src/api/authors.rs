//! Author pages: list, detail and CRUD forms

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
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::BookShort,
    },
};

use super::{redirect_found, require_capability, AuthenticatedUser, PageQuery, PaginatedPage};

/// Author detail context
#[derive(Serialize, ToSchema)]
pub struct AuthorDetailPage {
    pub template: &'static str,
    pub author: Author,
    /// The author's books
    pub books: Vec<BookShort>,
}

/// Author form context (create: blank fields, update: current values)
#[derive(Serialize, ToSchema)]
pub struct AuthorFormPage<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub template: &'static str,
    pub form: T,
}

/// Delete confirmation context
#[derive(Serialize, ToSchema)]
pub struct AuthorConfirmDeletePage {
    pub template: &'static str,
    pub author: Author,
}

/// Paginated author list, ordered as persisted
#[utoipa::path(
    get,
    path = "/catalog/authors/",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of authors", body = PaginatedPage<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedPage<Author>>> {
    let page = query.page();
    let per_page = state.config.catalog.page_size;
    let (authors, total) = state.services.authors.list(page, per_page).await?;

    Ok(Json(PaginatedPage::build(
        "catalog/author_list.html",
        authors,
        total,
        page,
        per_page,
    )))
}

/// Author detail with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author detail", body = AuthorDetailPage),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetailPage>> {
    let (author, books) = state.services.authors.get_with_books(id).await?;
    Ok(Json(AuthorDetailPage {
        template: "catalog/author_detail.html",
        author,
        books,
    }))
}

/// Blank author form
#[utoipa::path(
    get,
    path = "/catalog/author/create/",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Author form", body = AuthorFormPage<CreateAuthor>),
        (status = 302, description = "Login or librarian capability required")
    )
)]
pub async fn create_author_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
) -> AppResult<Json<AuthorFormPage<CreateAuthor>>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    Ok(Json(AuthorFormPage {
        template: "catalog/author_form.html",
        form: CreateAuthor::default(),
    }))
}

/// Create an author and redirect to their detail page
#[utoipa::path(
    post,
    path = "/catalog/author/create/",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 302, description = "Created; redirect to the author detail page"),
        (status = 400, description = "Form validation failed")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Json(form): Json<CreateAuthor>,
) -> AppResult<Response> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let author = state.services.authors.create(form).await?;
    Ok(redirect_found(&format!("/catalog/author/{}", author.id)))
}

/// Author form pre-filled with current values
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form", body = AuthorFormPage<Author>),
        (status = 302, description = "Login or librarian capability required"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorFormPage<Author>>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let author = state.services.authors.get(id).await?;
    Ok(Json(AuthorFormPage {
        template: "catalog/author_form.html",
        form: author,
    }))
}

/// Update an author and redirect to their detail page
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 302, description = "Updated; redirect to the author detail page"),
        (status = 400, description = "Form validation failed"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
    Json(form): Json<UpdateAuthor>,
) -> AppResult<Response> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let author = state.services.authors.update(id, form).await?;
    Ok(redirect_found(&format!("/catalog/author/{}", author.id)))
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = AuthorConfirmDeletePage),
        (status = 302, description = "Login or librarian capability required"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorConfirmDeletePage>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let author = state.services.authors.get(id).await?;
    Ok(Json(AuthorConfirmDeletePage {
        template: "catalog/author_confirm_delete.html",
        author,
    }))
}

/// Delete an author and redirect to the author list. A store refusal
/// (books still reference the author) re-renders the confirmation with
/// an explanatory message instead of a raw failure.
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 302, description = "Deleted; redirect to the author list"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author still referenced by books")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    state.services.authors.delete(id).await?;
    Ok(redirect_found("/catalog/authors/"))
}
