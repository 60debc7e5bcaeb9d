//! User model and authenticated-caller claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrower account as the catalog sees it. Accounts are provisioned and
/// authenticated by the accounts service; this record exists for the borrower
/// reference and display names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Named capability grants carried in the token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Librarian-level grant: mark copies returned, renew any loan, edit the
    /// catalog
    #[serde(default)]
    pub mark_returned: bool,
}

/// JWT claims for authenticated callers, minted by the accounts service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    #[serde(default)]
    pub capabilities: Capabilities,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token (operator tooling and tests; the accounts
    /// service is the production issuer)
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Whether the caller may mark copies returned (and therefore renew loans
    /// and edit the catalog)
    pub fn can_mark_returned(&self) -> bool {
        self.capabilities.mark_returned
    }
}
