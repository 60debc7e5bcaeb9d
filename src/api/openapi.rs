//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health, index, instances};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblos API",
        version = "1.0.0",
        description = "Library Catalog Server API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Index
        index::index,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::update_author_form,
        authors::update_author,
        authors::delete_author_form,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::update_book_form,
        books::update_book,
        books::delete_book_form,
        books::delete_book,
        // Loans
        instances::my_borrowed,
        instances::all_borrowed,
        instances::renew_form,
        instances::renew,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            authors::AuthorDetailPage,
            authors::AuthorConfirmDeletePage,
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::Genre,
            crate::models::book::Language,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookDetailPage,
            books::BookConfirmDeletePage,
            // Instances and loans
            crate::models::instance::BookInstance,
            crate::models::instance::LoanStatus,
            crate::models::instance::LoanedInstance,
            crate::models::instance::RenewalRequest,
            instances::RenewalFormPage,
            instances::RenewalForm,
            instances::DateField,
            // Index
            index::IndexPage,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog index"),
        (name = "authors", description = "Author pages and forms"),
        (name = "books", description = "Book pages and forms"),
        (name = "loans", description = "Borrowed copies and loan renewal")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
