//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Loan status of a physical copy. Stored as the single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[serde(rename = "m")]
    Maintenance,
    #[serde(rename = "o")]
    OnLoan,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    /// Return the stored code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }
}

impl From<&str> for LoanStatus {
    fn from(s: &str) -> Self {
        match s {
            "o" => LoanStatus::OnLoan,
            "a" => LoanStatus::Available,
            "r" => LoanStatus::Reserved,
            _ => LoanStatus::Maintenance,
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

/// Internal row structure for instance queries (status as stored text)
#[derive(Debug, Clone, FromRow)]
pub struct BookInstanceRow {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: String,
}

impl From<BookInstanceRow> for BookInstance {
    fn from(row: BookInstanceRow) -> Self {
        BookInstance {
            id: row.id,
            book_id: row.book_id,
            imprint: row.imprint,
            due_back: row.due_back,
            borrower_id: row.borrower_id,
            status: LoanStatus::from(row.status.as_str()),
        }
    }
}

/// One physical, loanable copy of a book
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    /// Globally unique, non-guessable copy identifier
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    /// Due date; unset when the copy is not on loan
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: LoanStatus,
}

impl BookInstance {
    /// On loan ⇒ borrower and due date are set (soft invariant, reported not
    /// enforced)
    pub fn loan_fields_consistent(&self) -> bool {
        match self.status {
            LoanStatus::OnLoan => self.borrower_id.is_some() && self.due_back.is_some(),
            LoanStatus::Available => self.borrower_id.is_none() && self.due_back.is_none(),
            _ => true,
        }
    }
}

/// Internal row structure for borrowed-list queries
#[derive(Debug, Clone, FromRow)]
pub struct LoanedInstanceRow {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: String,
    pub book_title: String,
    pub borrower_username: Option<String>,
}

impl From<LoanedInstanceRow> for LoanedInstance {
    fn from(row: LoanedInstanceRow) -> Self {
        LoanedInstance {
            id: row.id,
            book_id: row.book_id,
            imprint: row.imprint,
            due_back: row.due_back,
            borrower_id: row.borrower_id,
            status: LoanStatus::from(row.status.as_str()),
            book_title: row.book_title,
            borrower_username: row.borrower_username,
        }
    }
}

/// Copy with book title and borrower name, for the borrowed-list pages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanedInstance {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: LoanStatus,
    pub book_title: String,
    pub borrower_username: Option<String>,
}

/// Renewal form submission: the single date field
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenewalRequest {
    pub renewal_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            LoanStatus::Maintenance,
            LoanStatus::OnLoan,
            LoanStatus::Available,
            LoanStatus::Reserved,
        ] {
            assert_eq!(LoanStatus::from(status.as_code()), status);
        }
    }

    #[test]
    fn unknown_code_falls_back_to_maintenance() {
        assert_eq!(LoanStatus::from("x"), LoanStatus::Maintenance);
    }

    #[test]
    fn on_loan_requires_borrower_and_due_date() {
        let copy = BookInstance {
            id: Uuid::new_v4(),
            book_id: 1,
            imprint: "Imprint, 2016".to_string(),
            due_back: None,
            borrower_id: None,
            status: LoanStatus::OnLoan,
        };
        assert!(!copy.loan_fields_consistent());

        let copy = BookInstance {
            due_back: Some(chrono::NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()),
            borrower_id: Some(7),
            ..copy
        };
        assert!(copy.loan_fields_consistent());
    }
}
