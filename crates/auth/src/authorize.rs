use thiserror::Error;

use crate::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden: role '{0}' is not allowed")]
    Forbidden(Role),
}

/// Per-operation allow-list of roles.
///
/// An empty list places no role restriction on the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    allowed: &'static [Role],
}

impl RolePolicy {
    /// No role restriction.
    pub const OPEN: RolePolicy = RolePolicy { allowed: &[] };

    pub const ADMIN: RolePolicy = RolePolicy { allowed: &[Role::Admin] };

    pub const STAFF: RolePolicy = RolePolicy {
        allowed: &[Role::Admin, Role::Barber],
    };

    pub const fn allow(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn allowed(&self) -> &'static [Role] {
        self.allowed
    }

    pub fn is_open(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// Decide whether a caller may invoke an operation guarded by `policy`.
///
/// - No IO
/// - No panics
/// - A missing caller is denied whenever the policy names any role
pub fn authorize(policy: &RolePolicy, caller: Option<Role>) -> Result<(), AuthzError> {
    if policy.is_open() {
        return Ok(());
    }
    match caller {
        None => Err(AuthzError::Unauthenticated),
        Some(role) if policy.allowed.contains(&role) => Ok(()),
        Some(role) => Err(AuthzError::Forbidden(role)),
    }
}

/// Boolean form of [`authorize`].
pub fn is_permitted(policy: &RolePolicy, caller: Option<Role>) -> bool {
    authorize(policy, caller).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const POLICIES: [RolePolicy; 3] = [RolePolicy::OPEN, RolePolicy::ADMIN, RolePolicy::STAFF];

    fn callers() -> [Option<Role>; 4] {
        [None, Some(Role::Client), Some(Role::Barber), Some(Role::Admin)]
    }

    #[test]
    fn decision_matrix() {
        for policy in POLICIES {
            for caller in callers() {
                let expected = policy.is_open()
                    || caller.is_some_and(|r| policy.allowed().contains(&r));
                assert_eq!(
                    is_permitted(&policy, caller),
                    expected,
                    "policy {:?} caller {:?}",
                    policy.allowed(),
                    caller
                );
            }
        }
    }

    #[test]
    fn open_policy_admits_anonymous_callers() {
        assert_eq!(authorize(&RolePolicy::OPEN, None), Ok(()));
    }

    #[test]
    fn restricted_policy_reports_why() {
        assert_eq!(authorize(&RolePolicy::ADMIN, None), Err(AuthzError::Unauthenticated));
        assert_eq!(
            authorize(&RolePolicy::ADMIN, Some(Role::Client)),
            Err(AuthzError::Forbidden(Role::Client))
        );
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Client), Just(Role::Barber), Just(Role::Admin)]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            .. ProptestConfig::default()
        })]

        #[test]
        fn granted_iff_member(roles in proptest::collection::vec(any_role(), 0..4), caller in proptest::option::of(any_role())) {
            let leaked: &'static [Role] = Box::leak(roles.clone().into_boxed_slice());
            let policy = RolePolicy::allow(leaked);
            let expected = roles.is_empty() || caller.is_some_and(|r| roles.contains(&r));
            prop_assert_eq!(is_permitted(&policy, caller), expected);
        }
    }
}
