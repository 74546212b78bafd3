//! `barbermatch-auth`: credentials, identity tokens and role-based access.
//!
//! This crate is intentionally decoupled from HTTP. Storage is reached only
//! through the [`AccountRepository`] port.

pub mod account;
pub mod authorize;
pub mod claims;
pub mod identity;
pub mod password;
pub mod roles;
pub mod store;
pub mod token;
pub mod users;

pub use account::{Account, AccountView, AccountWithProfile, Profile, ProfilePatch};
pub use authorize::{AuthzError, RolePolicy, authorize, is_permitted};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use identity::{AuthSession, DEFAULT_TOKEN_TTL_HOURS, IdentityService};
pub use password::{Argon2Hasher, CredentialHasher};
pub use roles::Role;
pub use store::AccountRepository;
pub use token::{Hs256Jwt, JwtValidator, TokenError, TokenIssuer};
pub use users::UserDirectory;
