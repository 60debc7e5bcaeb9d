//! API handlers for the catalog endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod index;
pub mod instances;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, header::LOCATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Location of the login entry point with the return path attached
pub fn login_location(login_url: &str, next: &str) -> String {
    format!("{}?next={}", login_url, next)
}

/// Explicit capability check, called at the top of each protected operation.
/// A refusal redirects to the login entry point, like any permission failure.
pub fn require_capability(granted: bool, login_url: &str, next: &str) -> Result<(), AppError> {
    if granted {
        Ok(())
    } else {
        Err(AppError::AuthRedirect {
            location: login_location(login_url, next),
        })
    }
}

/// A 302 response, the shape every successful form submission answers with
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Extractor for the authenticated caller from the Bearer token.
/// Requests without a valid token are sent to the login entry point.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let next = parts.uri.path().to_string();
        let login_url = &state.config.auth.login_url;

        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::AuthRedirect {
                location: login_location(login_url, &next),
            })?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::AuthRedirect {
                location: login_location(login_url, &next),
            });
        }

        let token = &auth_header[7..];

        // Validate the token using the shared secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret).map_err(|_| {
            AppError::AuthRedirect {
                location: login_location(login_url, &next),
            }
        })?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Page-number query parameter for the list views
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// One rendered page of a list view: template identifier plus the page's
/// item list and pagination context.
#[derive(Serialize, ToSchema)]
pub struct PaginatedPage<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Template the front end renders this context with
    pub template: &'static str,
    /// Current page's items
    pub list: Vec<T>,
    /// Current page number
    pub page: i64,
    /// Total number of pages
    pub num_pages: i64,
    /// Total number of items
    pub total: i64,
    /// Whether the listing spans more than one page
    pub is_paginated: bool,
}

impl<T> PaginatedPage<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn build(template: &'static str, list: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        let num_pages = if total == 0 { 1 } else { (total + per_page - 1) / per_page };
        Self {
            template,
            list,
            page,
            num_pages,
            total,
            is_paginated: total > per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, ToSchema)]
    struct Row(i32);

    #[test]
    fn twelve_items_paginate_ten_then_three() {
        let first: PaginatedPage<Row> =
            PaginatedPage::build("t", (0..10).map(Row).collect(), 12, 1, 10);
        assert_eq!(first.list.len(), 10);
        assert_eq!(first.num_pages, 2);
        assert!(first.is_paginated);

        let second: PaginatedPage<Row> =
            PaginatedPage::build("t", (10..12).map(Row).collect(), 12, 2, 10);
        assert_eq!(second.list.len(), 2);
        assert!(second.is_paginated);
    }

    #[test]
    fn single_page_is_not_paginated() {
        let page: PaginatedPage<Row> = PaginatedPage::build("t", vec![Row(1)], 1, 1, 10);
        assert_eq!(page.num_pages, 1);
        assert!(!page.is_paginated);
    }

    #[test]
    fn empty_listing_still_has_one_page() {
        let page: PaginatedPage<Row> = PaginatedPage::build("t", vec![], 0, 1, 10);
        assert_eq!(page.num_pages, 1);
        assert!(!page.is_paginated);
    }

    #[test]
    fn capability_refusal_redirects_to_login() {
        let err = require_capability(false, "/accounts/login/", "/catalog/borrowedbooks/")
            .unwrap_err();
        match err {
            AppError::AuthRedirect { location } => {
                assert_eq!(location, "/accounts/login/?next=/catalog/borrowedbooks/");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn granted_capability_passes() {
        assert!(require_capability(true, "/accounts/login/", "/x").is_ok());
    }

    #[test]
    fn page_query_floors_at_one() {
        assert_eq!(PageQuery { page: None }.page(), 1);
        assert_eq!(PageQuery { page: Some(0) }.page(), 1);
        assert_eq!(PageQuery { page: Some(2) }.page(), 2);
    }
}
