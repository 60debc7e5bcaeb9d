//! Business logic services

pub mod authors;
pub mod catalog;
pub mod loans;
pub mod renewals;

use crate::{
    config::CatalogConfig,
    error::{AppError, FieldErrors},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: &CatalogConfig) -> Self {
        let policy = renewals::RenewalPolicy::new(catalog_config);
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository, policy),
        }
    }
}

/// Flatten `validator` output into the field→messages map the forms return
pub fn form_errors(errors: validator::ValidationErrors) -> AppError {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }
    AppError::FormInvalid { errors: fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "First name must be 1-100 characters"))]
        first_name: String,
    }

    #[test]
    fn validator_errors_become_field_errors() {
        let err = Probe { first_name: String::new() }.validate().unwrap_err();
        match form_errors(err) {
            AppError::FormInvalid { errors } => {
                assert_eq!(
                    errors.get("first_name").unwrap(),
                    &vec!["First name must be 1-100 characters".to_string()]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
