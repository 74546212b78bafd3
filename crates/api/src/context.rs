use barbermatch_auth::{JwtClaims, Role};
use barbermatch_core::AccountId;

/// Authenticated caller for a request, taken from verified token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    account_id: AccountId,
    email: String,
    role: Role,
}

impl PrincipalContext {
    pub fn new(account_id: AccountId, email: impl Into<String>, role: Role) -> Self {
        Self {
            account_id,
            email: email.into(),
            role,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<JwtClaims> for PrincipalContext {
    fn from(claims: JwtClaims) -> Self {
        Self::new(claims.sub, claims.email, claims.role)
    }
}
