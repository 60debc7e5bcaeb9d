//! Borrowed-copies pages and the loan-renewal form

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::Response,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::instance::{BookInstance, LoanedInstance, RenewalRequest},
    services::renewals::{RENEWAL_DATE_HELP_TEXT, RENEWAL_DATE_LABEL},
};

use super::{redirect_found, require_capability, AuthenticatedUser, PageQuery, PaginatedPage};

/// Renewal date field as the form displays it
#[derive(Serialize, ToSchema)]
pub struct DateField {
    pub label: &'static str,
    pub help_text: &'static str,
    /// Suggested value
    pub initial: NaiveDate,
}

/// Renewal form context
#[derive(Serialize, ToSchema)]
pub struct RenewalFormPage {
    pub template: &'static str,
    pub book_instance: BookInstance,
    pub form: RenewalForm,
}

#[derive(Serialize, ToSchema)]
pub struct RenewalForm {
    pub renewal_date: DateField,
}

/// The calling borrower's on-loan copies, due soonest first
#[utoipa::path(
    get,
    path = "/catalog/mybooks/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of the caller's loans", body = PaginatedPage<LoanedInstance>),
        (status = 302, description = "Login required")
    )
)]
pub async fn my_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedPage<LoanedInstance>>> {
    let page = query.page();
    let per_page = state.config.catalog.page_size;
    let (instances, total) = state
        .services
        .loans
        .borrowed_by_user(claims.user_id, page, per_page)
        .await?;

    Ok(Json(PaginatedPage::build(
        "catalog/bookinstance_list_borrowed_user.html",
        instances,
        total,
        page,
        per_page,
    )))
}

/// Every on-loan copy across borrowers, due soonest first
#[utoipa::path(
    get,
    path = "/catalog/borrowedbooks/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of all active loans", body = PaginatedPage<LoanedInstance>),
        (status = 302, description = "Login or librarian capability required")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedPage<LoanedInstance>>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let page = query.page();
    let per_page = state.config.catalog.page_size;
    let (instances, total) = state.services.loans.all_borrowed(page, per_page).await?;

    Ok(Json(PaginatedPage::build(
        "catalog/bookinstance_list_borrowed_all.html",
        instances,
        total,
        page,
        per_page,
    )))
}

/// Renewal form for one copy, pre-filled with the suggested date
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Copy UUID")),
    responses(
        (status = 200, description = "Renewal form", body = RenewalFormPage),
        (status = 302, description = "Login or librarian capability required"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renew_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalFormPage>> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let instance = state.services.loans.get_instance(id).await?;
    let today = chrono::Local::now().date_naive();
    let initial = state.services.loans.policy().proposed(today);

    Ok(Json(RenewalFormPage {
        template: "catalog/book_renew_librarian.html",
        book_instance: instance,
        form: RenewalForm {
            renewal_date: DateField {
                label: RENEWAL_DATE_LABEL,
                help_text: RENEWAL_DATE_HELP_TEXT,
                initial,
            },
        },
    }))
}

/// Apply a renewal: validate the proposed date, persist the new due date and
/// redirect to the all-borrowed list
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Copy UUID")),
    request_body = RenewalRequest,
    responses(
        (status = 302, description = "Renewed; redirect to the all-borrowed list"),
        (status = 400, description = "Renewal date outside the allowed window"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renew(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    uri: Uri,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewalRequest>,
) -> AppResult<Response> {
    require_capability(claims.can_mark_returned(), &state.config.auth.login_url, uri.path())?;

    let today = chrono::Local::now().date_naive();
    state
        .services
        .loans
        .renew(id, request.renewal_date, today)
        .await?;

    Ok(redirect_found("/catalog/borrowedbooks/"))
}
