//! Session-held API credential.
//!
//! One key per process, set and cleared only by explicit requests. Injected into
//! the LLM client instead of being read from ambient state.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("API key must not be empty")]
    Empty,
}

/// Shared holder for the provider API key. Clones share the same slot.
#[derive(Clone, Default)]
pub struct CredentialStore {
    key: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    /// Builds a store pre-seeded with `key` when it is non-blank.
    pub fn seeded(key: Option<String>) -> Self {
        let key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            key: Arc::new(RwLock::new(key)),
        }
    }

    /// Stores `key` (trimmed). Blank keys are rejected and leave the slot untouched.
    pub async fn set(&self, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }
        *self.key.write().await = Some(key.to_string());
        Ok(())
    }

    pub async fn clear(&self) {
        *self.key.write().await = None;
    }

    pub async fn is_present(&self) -> bool {
        self.key.read().await.is_some()
    }

    pub(crate) async fn get(&self) -> Option<String> {
        self.key.read().await.clone()
    }
}

// Never print the key itself.
impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = CredentialStore::default();
        assert!(!store.is_present().await);
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_set_trims_and_stores() {
        let store = CredentialStore::default();
        store.set("  sk-test  ").await.unwrap();
        assert!(store.is_present().await);
        assert_eq!(store.get().await.as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn test_blank_key_rejected_and_previous_kept() {
        let store = CredentialStore::default();
        store.set("sk-old").await.unwrap();
        assert_eq!(store.set("   ").await, Err(CredentialError::Empty));
        assert_eq!(store.get().await.as_deref(), Some("sk-old"));
    }

    #[tokio::test]
    async fn test_clear_removes_key() {
        let store = CredentialStore::default();
        store.set("sk-test").await.unwrap();
        store.clear().await;
        assert!(!store.is_present().await);
    }

    #[tokio::test]
    async fn test_clones_share_slot() {
        let store = CredentialStore::default();
        let injected = store.clone();
        store.set("sk-shared").await.unwrap();
        assert_eq!(injected.get().await.as_deref(), Some("sk-shared"));
    }

    #[tokio::test]
    async fn test_seeded_ignores_blank_env_value() {
        assert!(!CredentialStore::seeded(Some("  ".to_string())).is_present().await);
        assert!(CredentialStore::seeded(Some("sk-env".to_string())).is_present().await);
        assert!(!CredentialStore::seeded(None).is_present().await);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let store = CredentialStore::seeded(Some("sk-secret".to_string()));
        assert!(!format!("{store:?}").contains("sk-secret"));
    }
}
