//! Borrowed-copies queries and the renewal transition

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::instance::{BookInstance, LoanedInstance},
    repository::Repository,
    services::renewals::RenewalPolicy,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    policy: RenewalPolicy,
}

impl LoansService {
    pub fn new(repository: Repository, policy: RenewalPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> &RenewalPolicy {
        &self.policy
    }

    /// Get a copy by UUID
    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.instances.get_by_id(id).await
    }

    /// On-loan copies of the calling borrower, due soonest first
    pub async fn borrowed_by_user(
        &self,
        borrower_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<LoanedInstance>, i64)> {
        // Verify the borrower exists
        self.repository.users.get_by_id(borrower_id).await?;
        self.repository
            .instances
            .borrowed_by_user(borrower_id, page, per_page)
            .await
    }

    /// Every on-loan copy, due soonest first
    pub async fn all_borrowed(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<LoanedInstance>, i64)> {
        self.repository.instances.all_borrowed(page, per_page).await
    }

    /// Renew a loan: validate the proposed date against today, then persist
    /// the new due date. The caller has already passed the capability gate.
    pub async fn renew(
        &self,
        instance_id: Uuid,
        renewal_date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<BookInstance> {
        let mut instance = self.repository.instances.get_by_id(instance_id).await?;

        self.policy
            .validate(renewal_date, today)
            .map_err(|e| AppError::form_field("renewal_date", e.to_string()))?;

        self.repository
            .instances
            .set_due_back(instance_id, renewal_date)
            .await?;

        tracing::info!("Renewed loan on copy {} until {}", instance_id, renewal_date);

        instance.due_back = Some(renewal_date);
        Ok(instance)
    }
}
