//! # Profile State
//!
//! The user-profile container. The profile blob and the onboarding flag
//! live under their own namespaced keys: the flag gates the welcome flow
//! and survives logout, the blob does not.

use std::sync::Mutex;

use tracing::warn;

use crate::error::StateResult;
use crate::kv::KeyValueStore;
use lemon_core::UserProfile;

/// Namespaced key the profile blob is stored under.
pub const PROFILE_KEY: &str = "lemon.profile";

/// Namespaced key the onboarding flag is stored under.
pub const ONBOARDING_KEY: &str = "lemon.onboarded";

/// The injected profile state container.
#[derive(Debug)]
pub struct ProfileState<S> {
    store: S,
    profile: Mutex<UserProfile>,
}

impl<S: KeyValueStore> ProfileState<S> {
    /// Creates a container with an empty, not-onboarded profile.
    pub fn new(store: S) -> Self {
        ProfileState {
            store,
            profile: Mutex::new(UserProfile::default()),
        }
    }

    /// Loads the persisted profile and onboarding flag, if any.
    pub async fn load(&self) -> StateResult<()> {
        if let Some(json) = self.store.get(PROFILE_KEY).await? {
            match serde_json::from_str::<UserProfile>(&json) {
                Ok(profile) => *self.lock() = profile,
                Err(err) => warn!(error = %err, "Discarding malformed profile blob"),
            }
        }

        // The flag key wins over whatever the blob says.
        if let Some(flag) = self.store.get(ONBOARDING_KEY).await? {
            self.lock().is_onboarded = flag == "true";
        }

        Ok(())
    }

    /// Replaces the profile and persists it.
    pub async fn update(&self, profile: UserProfile) -> StateResult<()> {
        *self.lock() = profile;
        self.persist().await
    }

    /// Completes onboarding: merges the provided fields, sets the flag,
    /// persists both keys.
    pub async fn complete_onboarding(&self, profile: UserProfile) -> StateResult<()> {
        {
            let mut current = self.lock();
            *current = profile;
            current.is_onboarded = true;
        }
        self.persist().await?;
        self.store.set(ONBOARDING_KEY, "true").await?;
        Ok(())
    }

    /// Logs out: removes the profile blob and resets in-memory state.
    ///
    /// The onboarding flag is kept, so a returning user skips the welcome
    /// flow.
    pub async fn logout(&self) -> StateResult<()> {
        {
            let mut profile = self.lock();
            let was_onboarded = profile.is_onboarded;
            *profile = UserProfile::default();
            profile.is_onboarded = was_onboarded;
        }
        self.store.remove(PROFILE_KEY).await?;
        Ok(())
    }

    /// Whether onboarding has been completed.
    pub fn is_onboarded(&self) -> bool {
        self.lock().is_onboarded
    }

    /// Executes a function with read access to the profile.
    pub fn with_profile<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&UserProfile) -> R,
    {
        f(&self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, UserProfile> {
        self.profile.lock().expect("profile mutex poisoned")
    }

    async fn persist(&self) -> StateResult<()> {
        let json = {
            let profile = self.lock();
            serde_json::to_string(&*profile)?
        };
        self.store.set(PROFILE_KEY, &json).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
