//! Opaque bearer tokens mapped to accounts, held in memory.

use crate::model::AccountId;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Live sessions kept per account; issuing beyond this ends the oldest one.
pub const MAX_SESSIONS_PER_ACCOUNT: usize = 10;

#[derive(Debug, Default)]
struct Sessions {
    owners: HashMap<String, AccountId>,
    /// Tokens of each account, oldest first.
    issued: HashMap<AccountId, VecDeque<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session and returns its token.
    pub async fn issue(&self, account: AccountId) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.inner.write().await;
        sessions.owners.insert(token.clone(), account);

        let queue = sessions.issued.entry(account).or_default();
        queue.push_back(token.clone());
        let mut evicted = Vec::new();
        while queue.len() > MAX_SESSIONS_PER_ACCOUNT {
            evicted.extend(queue.pop_front());
        }
        for old in &evicted {
            sessions.owners.remove(old);
        }
        debug!(%account, evicted = evicted.len(), "Session issued");
        token
    }

    pub async fn resolve(&self, token: &str) -> Option<AccountId> {
        self.inner.read().await.owners.get(token).copied()
    }

    /// Ends one session. Returns whether it existed.
    pub async fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.inner.write().await;
        let Some(account) = sessions.owners.remove(token) else {
            return false;
        };
        if let Some(queue) = sessions.issued.get_mut(&account) {
            queue.retain(|t| t != token);
            if queue.is_empty() {
                sessions.issued.remove(&account);
            }
        }
        true
    }

    /// Ends every session of an account.
    pub async fn revoke_account(&self, account: AccountId) -> usize {
        let mut sessions = self.inner.write().await;
        let tokens = sessions.issued.remove(&account).unwrap_or_default();
        for token in &tokens {
            sessions.owners.remove(token);
        }
        tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_resolve_revoke() {
        let sessions = SessionStore::new();
        let a = sessions.issue(AccountId(1)).await;
        let b = sessions.issue(AccountId(1)).await;
        let c = sessions.issue(AccountId(2)).await;
        assert_ne!(a, b);

        assert_eq!(sessions.resolve(&a).await, Some(AccountId(1)));
        assert!(sessions.revoke(&a).await);
        assert_eq!(sessions.resolve(&a).await, None);

        assert_eq!(sessions.revoke_account(AccountId(1)).await, 1);
        assert_eq!(sessions.resolve(&b).await, None);
        assert_eq!(sessions.resolve(&c).await, Some(AccountId(2)));
    }

    #[tokio::test]
    async fn test_oldest_sessions_are_evicted_beyond_the_cap() {
        let sessions = SessionStore::new();
        let mut tokens = Vec::new();
        for _ in 0..MAX_SESSIONS_PER_ACCOUNT + 2 {
            tokens.push(sessions.issue(AccountId(1)).await);
        }
        let other = sessions.issue(AccountId(2)).await;

        assert_eq!(sessions.resolve(&tokens[0]).await, None);
        assert_eq!(sessions.resolve(&tokens[1]).await, None);
        for token in &tokens[2..] {
            assert_eq!(sessions.resolve(token).await, Some(AccountId(1)));
        }
        assert_eq!(sessions.resolve(&other).await, Some(AccountId(2)));

        // Evicted tokens no longer count towards the account.
        assert!(!sessions.revoke(&tokens[0]).await);
        assert!(sessions.revoke(&tokens[2]).await);
        assert_eq!(
            sessions.revoke_account(AccountId(1)).await,
            MAX_SESSIONS_PER_ACCOUNT - 1
        );
        assert_eq!(sessions.resolve(&other).await, Some(AccountId(2)));
    }
}
