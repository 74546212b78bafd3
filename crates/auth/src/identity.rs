//! Credential & identity: registration and password login.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use validator::{Validate, ValidationError};

use barbermatch_core::{DomainError, DomainResult, StoreError};

use crate::{Account, AccountRepository, AccountView, CredentialHasher, JwtClaims, Role, TokenIssuer};

/// Default token lifetime: one day from issuance.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Hashed once per service; unknown-email logins are checked against it.
const DUMMY_PASSWORD: &str = "barbermatch-timing-equalizer";

/// Successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub account: AccountView,
    pub token: String,
}

pub struct IdentityService {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
    dummy_hash: String,
}

impl IdentityService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD).unwrap_or_else(|e| {
            warn!(error = %e, "could not prepare dummy password hash");
            String::new()
        });
        Self {
            accounts,
            hasher,
            tokens,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            dummy_hash,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Create an account. Fails with `Conflict` when the email is taken.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str, role: Role) -> DomainResult<AuthSession> {
        validate_registration(email, password)?;

        let existing = self.accounts.find_by_email(email).await.map_err(internal)?;
        if existing.is_some() {
            return Err(DomainError::conflict("email already registered"));
        }

        let password_hash = self.hasher.hash(password)?;
        let account = match self.accounts.insert(Account::new(email, password_hash, role)).await {
            Ok(account) => account,
            // Lost a race with a concurrent registration of the same email.
            Err(StoreError::UniqueViolation(_)) => {
                return Err(DomainError::conflict("email already registered"));
            }
            Err(e) => return Err(internal(e)),
        };

        info!(account_id = %account.id, "account registered");
        self.session_for(&account)
    }

    /// Check an email/password pair.
    ///
    /// `Ok(None)` covers both an unknown email and a wrong password so callers
    /// cannot tell which one happened.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<Option<AuthSession>> {
        let Some(account) = self.accounts.find_by_email(email).await.map_err(internal)? else {
            // Same hashing cost as a wrong password for a known email.
            let _ = self.hasher.verify(password, &self.dummy_hash);
            return Ok(None);
        };

        if !self.hasher.verify(password, &account.password_hash) {
            return Ok(None);
        }

        self.session_for(&account).map(Some)
    }

    fn session_for(&self, account: &Account) -> DomainResult<AuthSession> {
        let claims = JwtClaims::for_account(account.id, &account.email, account.role, Utc::now(), self.token_ttl);
        let token = self.tokens.issue(&claims).map_err(|e| {
            error!(error = %e, "token issuance failed");
            DomainError::internal("token issuance failed")
        })?;
        Ok(AuthSession {
            account: account.view(),
            token,
        })
    }
}

const INVALID_EMAIL: &str = "email must be a valid address";

/// Registration fields checked before anything touches the store.
#[derive(Debug, Validate)]
struct Registration {
    #[validate(email(message = "email must be a valid address"), custom(function = "has_top_level_domain"))]
    email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    password: String,
}

fn validate_registration(email: &str, password: &str) -> DomainResult<()> {
    Registration {
        email: email.to_string(),
        password: password.to_string(),
    }
    .validate()
    .map_err(DomainError::from)
}

/// Addresses must name a dotted domain; `ana@localhost` is rejected.
fn has_top_level_domain(email: &str) -> Result<(), ValidationError> {
    let dotted = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.split('.').count() > 1);
    if dotted {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some(INVALID_EMAIL.into());
    Err(err)
}

fn internal(err: StoreError) -> DomainError {
    error!(error = %err, "account store failure");
    DomainError::internal(err.to_string())
}
