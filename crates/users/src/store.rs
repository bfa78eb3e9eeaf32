//! The in-memory user store.
//!
//! `UserStore` owns the authoritative user collection for the admin portal.
//! Consumers receive it by explicit injection; nothing else may mutate the
//! collection. All operations take one lock acquisition, so a bulk append is
//! all-or-nothing at the collection level and the operations stay atomic with
//! respect to each other if sessions ever run concurrently.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::entities::{NewUser, User, UserRole, UserSource, UserStatus, UserUpdate};
use crate::types::{UserError, UserResult};

/// One validated bulk-import row, ready for reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUserRecord {
    /// Lowercased, trimmed email
    pub email: String,
    /// Digits-only identity number
    pub cedula: String,
}

/// Aggregate counts over the collection
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

/// Sink for bulk reconciliation.
///
/// The import session is generic over this trait so a network-backed store
/// can replace the in-memory one without touching the orchestration logic.
/// Callers await completion and must not re-submit a batch after a reported
/// success; the contract does not assume idempotence.
pub trait BulkUserSink {
    fn add_bulk_users(
        &self,
        records: &[BulkUserRecord],
    ) -> impl std::future::Future<Output = UserResult<Vec<User>>> + Send;
}

#[derive(Debug)]
struct StoreInner {
    users: Vec<User>,
    next_id: i64,
}

/// The shared, injected owner of the user collection
#[derive(Debug, Clone)]
pub struct UserStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                users: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a user through manual entry.
    ///
    /// Manual entry rejects duplicate emails; bulk reconciliation does not.
    pub async fn add_user(&self, request: NewUser) -> UserResult<User> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email == email) {
            return Err(UserError::EmailAlreadyExists);
        }

        let mut user = User::new(
            email,
            request.cedula.trim().to_string(),
            request.role.unwrap_or(UserRole::Student),
            UserSource::Manual,
        );
        user.id = inner.next_id;
        inner.next_id += 1;
        if let Some(display_name) = request.display_name {
            user.display_name = display_name;
        }

        inner.users.push(user.clone());
        info!(email = %user.email, id = user.id, "created user");
        Ok(user)
    }

    /// Reconcile validated import rows into the collection.
    ///
    /// Every record is synthesized into a fresh user: distinct id, status
    /// active, role student, created today, source `bulk-upload`. The whole
    /// batch is appended under a single write lock and exactly the
    /// synthesized users are returned. Rows are treated as additive; no
    /// duplicate detection against existing users happens here.
    pub async fn add_bulk_users(&self, records: &[BulkUserRecord]) -> UserResult<Vec<User>> {
        let mut inner = self.inner.write().await;

        let mut added = Vec::with_capacity(records.len());
        for record in records {
            let mut user = User::new(
                record.email.clone(),
                record.cedula.clone(),
                UserRole::Student,
                UserSource::BulkUpload,
            );
            user.id = inner.next_id;
            inner.next_id += 1;
            added.push(user);
        }

        inner.users.extend(added.iter().cloned());
        info!(count = added.len(), "reconciled bulk users into store");
        Ok(added)
    }

    /// Merge partial fields into the matching user.
    ///
    /// Total over the collection: an unknown id leaves it unchanged and
    /// reports `None`.
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Option<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.iter_mut().find(|u| u.id == id)?;
        user.apply(update);
        info!(id, "updated user");
        Some(user.clone())
    }

    /// Remove the user with the given id; `false` when no user matched
    pub async fn delete_user(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        let removed = inner.users.len() < before;
        if removed {
            warn!(id, "deleted user");
        }
        removed
    }

    /// Flip the status of the matching user, returning the new status
    pub async fn toggle_user_status(&self, id: i64) -> Option<UserStatus> {
        let mut inner = self.inner.write().await;
        let user = inner.users.iter_mut().find(|u| u.id == id)?;
        user.status = user.status.toggled();
        Some(user.status)
    }

    /// Snapshot of the full collection, in insertion order
    pub async fn users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }

    pub async fn find_by_id(&self, id: i64) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.iter().find(|u| u.id == id).cloned()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        let inner = self.inner.read().await;
        inner.users.iter().find(|u| u.email == needle).cloned()
    }

    /// Search the way the admin console filters: case-insensitive match on
    /// the email or a substring of the cedula. An empty term matches all.
    pub async fn search(&self, term: &str) -> Vec<User> {
        let term = term.trim();
        let inner = self.inner.read().await;
        if term.is_empty() {
            return inner.users.clone();
        }
        let needle = term.to_lowercase();
        inner
            .users
            .iter()
            .filter(|u| u.email.to_lowercase().contains(&needle) || u.cedula.contains(term))
            .cloned()
            .collect()
    }

    pub async fn filter_by_status(&self, status: UserStatus) -> Vec<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .iter()
            .filter(|u| u.status == status)
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> UserStats {
        let inner = self.inner.read().await;
        let total = inner.users.len();
        let active = inner.users.iter().filter(|u| u.is_active()).count();
        UserStats {
            total,
            active,
            inactive: total - active,
        }
    }
}

impl BulkUserSink for UserStore {
    async fn add_bulk_users(&self, records: &[BulkUserRecord]) -> UserResult<Vec<User>> {
        UserStore::add_bulk_users(self, records).await
    }
}
