//! Loan-renewal date policy

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::config::CatalogConfig;

/// Label shown next to the renewal date field
pub const RENEWAL_DATE_LABEL: &str = "Renewal date";

/// Help text shown under the renewal date field
pub const RENEWAL_DATE_HELP_TEXT: &str = "Enter a date between now and 4 weeks (default 3).";

/// Why a candidate date was refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenewalError {
    #[error("Invalid date - renewal in past")]
    InPast,
    #[error("Invalid date - renewal more than 4 weeks ahead")]
    TooFarAhead,
}

/// Date-window policy for loan renewals. Pure: callers supply today's date.
#[derive(Debug, Clone, Copy)]
pub struct RenewalPolicy {
    max_weeks: i64,
    default_weeks: i64,
}

impl RenewalPolicy {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            max_weeks: config.renewal_max_weeks,
            default_weeks: config.renewal_default_weeks,
        }
    }

    /// A renewal date may not be in the past, nor further out than the
    /// maximum extension.
    pub fn validate(&self, candidate: NaiveDate, today: NaiveDate) -> Result<(), RenewalError> {
        if candidate < today {
            return Err(RenewalError::InPast);
        }
        if candidate > today + Duration::weeks(self.max_weeks) {
            return Err(RenewalError::TooFarAhead);
        }
        Ok(())
    }

    /// Suggested renewal date presented in the form. A convenience default,
    /// not part of the validity rule.
    pub fn proposed(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::weeks(self.default_weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RenewalPolicy {
        RenewalPolicy::new(&CatalogConfig::default())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn date_in_past_is_rejected() {
        let yesterday = today() - Duration::days(1);
        assert_eq!(policy().validate(yesterday, today()), Err(RenewalError::InPast));
    }

    #[test]
    fn today_is_accepted() {
        assert_eq!(policy().validate(today(), today()), Ok(()));
    }

    #[test]
    fn every_day_inside_the_window_is_accepted() {
        for days in 0..=28 {
            let candidate = today() + Duration::days(days);
            assert_eq!(policy().validate(candidate, today()), Ok(()), "day {}", days);
        }
    }

    #[test]
    fn four_weeks_out_is_the_last_valid_day() {
        let max = today() + Duration::weeks(4);
        assert_eq!(policy().validate(max, today()), Ok(()));
        assert_eq!(
            policy().validate(max + Duration::days(1), today()),
            Err(RenewalError::TooFarAhead)
        );
    }

    #[test]
    fn far_future_is_rejected() {
        let candidate = today() + Duration::weeks(9);
        assert_eq!(policy().validate(candidate, today()), Err(RenewalError::TooFarAhead));
    }

    #[test]
    fn proposed_date_is_three_weeks_out() {
        assert_eq!(policy().proposed(today()), today() + Duration::weeks(3));
    }

    #[test]
    fn field_texts_match_the_form_contract() {
        assert_eq!(RENEWAL_DATE_LABEL, "Renewal date");
        assert_eq!(
            RENEWAL_DATE_HELP_TEXT,
            "Enter a date between now and 4 weeks (default 3)."
        );
    }
}
