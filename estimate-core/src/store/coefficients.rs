//! Load, save and reset of the user's coefficient profile.
//!
//! Profiles are stored as JSON under `estimate_coefficients`, suffixed with
//! `:<user>` when scoped to a user. Loading never fails: anything missing or
//! unreadable gives the default profile.

use tracing::{debug, info, warn};

use super::kv::{KeyValueStore, StoreError};
use crate::models::CoefficientSet;

/// Storage key of the unscoped profile.
pub const COEFFICIENTS_KEY: &str = "estimate_coefficients";

/// A coefficient profile held in a [`KeyValueStore`] under one scope.
pub struct CoefficientRepository<'a> {
    store: &'a dyn KeyValueStore,
    key: String,
}

impl<'a> CoefficientRepository<'a> {
    /// Binds to `store` under the given user scope, or the shared key when
    /// `scope` is `None` or blank.
    pub fn new(
        store: &'a dyn KeyValueStore,
        scope: Option<&str>,
    ) -> Self {
        let key = match scope.map(str::trim) {
            Some(user) if !user.is_empty() => format!("{COEFFICIENTS_KEY}:{user}"),
            _ => COEFFICIENTS_KEY.to_string(),
        };
        Self { store, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored profile, falling back to the default profile when
    /// nothing is stored or the stored value cannot be read.
    pub async fn load(&self) -> CoefficientSet {
        match self.store.get(&self.key).await {
            Ok(Some(json)) => match serde_json::from_str::<CoefficientSet>(&json) {
                Ok(set) => {
                    debug!(key = %self.key, "loaded coefficient profile");
                    set
                }
                Err(error) => {
                    warn!(key = %self.key, %error, "stored coefficient profile is unreadable; using defaults");
                    CoefficientSet::default()
                }
            },
            Ok(None) => {
                debug!(key = %self.key, "no stored coefficient profile; using defaults");
                CoefficientSet::default()
            }
            Err(error) => {
                warn!(key = %self.key, %error, "failed to read coefficient profile; using defaults");
                CoefficientSet::default()
            }
        }
    }

    /// Writes `set`, reporting any failure to the caller.
    pub async fn try_save(
        &self,
        set: &CoefficientSet,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(set)?;
        self.store.set(&self.key, &json).await?;
        info!(key = %self.key, "saved coefficient profile");
        Ok(())
    }

    /// Writes `set`, logging rather than returning any failure.
    pub async fn save(
        &self,
        set: &CoefficientSet,
    ) {
        if let Err(error) = self.try_save(set).await {
            warn!(key = %self.key, %error, "failed to save coefficient profile");
        }
    }

    /// Stores the default profile and returns it.
    pub async fn reset(&self) -> CoefficientSet {
        let defaults = CoefficientSet::default();
        self.save(&defaults).await;
        defaults
    }
}

/// Loads the profile for `scope`; see [`CoefficientRepository::load`].
pub async fn load_coefficients(
    store: &dyn KeyValueStore,
    scope: Option<&str>,
) -> CoefficientSet {
    CoefficientRepository::new(store, scope).load().await
}

/// Best-effort save for `scope`; see [`CoefficientRepository::save`].
pub async fn save_coefficients(
    store: &dyn KeyValueStore,
    scope: Option<&str>,
    set: &CoefficientSet,
) {
    CoefficientRepository::new(store, scope).save(set).await
}

/// Restores the default profile for `scope`; see [`CoefficientRepository::reset`].
pub async fn reset_coefficients(
    store: &dyn KeyValueStore,
    scope: Option<&str>,
) -> CoefficientSet {
    CoefficientRepository::new(store, scope).reset().await
}
