use async_trait::async_trait;

use barbermatch_core::{AccountId, StoreResult};

use crate::{Account, Profile};

/// Persistence port for accounts and their profiles.
///
/// Implementations must enforce email uniqueness on `insert` and report a
/// duplicate as `StoreError::UniqueViolation`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn insert(&self, account: Account) -> StoreResult<Account>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>>;

    async fn list(&self) -> StoreResult<Vec<Account>>;

    /// Removes the account and its profile. Returns whether a row was removed.
    async fn delete(&self, id: AccountId) -> StoreResult<bool>;

    async fn find_profile(&self, account_id: AccountId) -> StoreResult<Option<Profile>>;

    /// Insert-or-replace the profile for `profile.account_id`.
    async fn save_profile(&self, profile: Profile) -> StoreResult<Profile>;

    async fn count(&self) -> StoreResult<u64>;
}
