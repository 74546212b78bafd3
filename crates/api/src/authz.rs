//! Per-route role guard.
//!
//! Handlers call [`require`] with their declared policy before touching any
//! service.

use axum::http::StatusCode;
use axum::response::Response;

use barbermatch_auth::{AuthzError, RolePolicy, authorize};

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

pub fn require(policy: RolePolicy, principal: Option<&PrincipalContext>) -> Result<(), Response> {
    authorize(&policy, principal.map(PrincipalContext::role)).map_err(authz_error_to_response)
}

pub fn authz_error_to_response(err: AuthzError) -> Response {
    match err {
        AuthzError::Unauthenticated => json_error(StatusCode::UNAUTHORIZED, "unauthorized", err.to_string()),
        AuthzError::Forbidden(_) => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use barbermatch_auth::Role;
    use barbermatch_core::AccountId;

    use super::*;

    #[test]
    fn admin_policy_maps_to_status_codes() {
        let client = PrincipalContext::new(AccountId::new(), "c@example.com", Role::Client);
        let admin = PrincipalContext::new(AccountId::new(), "a@example.com", Role::Admin);

        assert!(require(RolePolicy::ADMIN, Some(&admin)).is_ok());
        assert_eq!(
            require(RolePolicy::ADMIN, Some(&client)).unwrap_err().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            require(RolePolicy::ADMIN, None).unwrap_err().status(),
            StatusCode::UNAUTHORIZED
        );
        assert!(require(RolePolicy::OPEN, None).is_ok());
    }
}
