//! User directory: account lookups, profiles and admin deletion.

use std::sync::Arc;

use tracing::{error, info, instrument};

use barbermatch_core::{AccountId, DomainError, DomainResult, StoreError};

use crate::{AccountRepository, AccountView, AccountWithProfile, Profile, ProfilePatch};

pub struct UserDirectory {
    accounts: Arc<dyn AccountRepository>,
}

impl UserDirectory {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Account with its profile attached, or `None` when absent.
    pub async fn find_by_id(&self, id: AccountId) -> DomainResult<Option<AccountWithProfile>> {
        let Some(account) = self.accounts.find_by_id(id).await.map_err(internal)? else {
            return Ok(None);
        };
        let profile = self.accounts.find_profile(id).await.map_err(internal)?;
        Ok(Some(AccountWithProfile {
            account: account.view(),
            profile,
        }))
    }

    pub async fn list(&self) -> DomainResult<Vec<AccountView>> {
        let accounts = self.accounts.list().await.map_err(internal)?;
        Ok(accounts.iter().map(|a| a.view()).collect())
    }

    /// Merge `patch` onto the account's profile, creating it on first use.
    ///
    /// Returns `None` when the account does not exist.
    #[instrument(skip(self, patch))]
    pub async fn update_profile(&self, id: AccountId, patch: ProfilePatch) -> DomainResult<Option<Profile>> {
        if self.accounts.find_by_id(id).await.map_err(internal)?.is_none() {
            return Ok(None);
        }

        let mut profile = self
            .accounts
            .find_profile(id)
            .await
            .map_err(internal)?
            .unwrap_or_else(|| Profile::empty(id));
        profile.apply(patch);

        let saved = self.accounts.save_profile(profile).await.map_err(internal)?;
        Ok(Some(saved))
    }

    /// Returns whether an account was actually removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AccountId) -> DomainResult<bool> {
        let removed = self.accounts.delete(id).await.map_err(internal)?;
        if removed {
            info!(account_id = %id, "account deleted");
        }
        Ok(removed)
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.accounts.count().await.map_err(internal)
    }
}

fn internal(err: StoreError) -> DomainError {
    error!(error = %err, "account store failure");
    DomainError::from(err)
}
