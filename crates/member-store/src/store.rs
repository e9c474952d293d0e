//! Storage capability shared by all member backends.

use crate::error::StoreError;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared handle to a member storage backend.
pub type DynMemberStore = Arc<dyn MemberStore>;

/// Persistence for member registrations.
///
/// Every implementation must enforce uniqueness of `student_id` and
/// `email` on `insert`, whichever [`UniquenessStrategy`] it declares.
/// The pre-check only produces an earlier error; the insert-time
/// constraint is what keeps concurrent submissions safe.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// The uniqueness strategy callers should follow with this backend.
    fn strategy(&self) -> UniquenessStrategy;

    /// Find a member sharing either the student ID or the email.
    async fn find_by_student_id_or_email(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<Registration>, StoreError>;

    /// Insert a new member, failing with [`StoreError::Duplicate`] on collision.
    async fn insert(&self, registration: &NewRegistration) -> Result<PersistedId, StoreError>;

    /// Read back a persisted member.
    async fn get(&self, id: PersistedId) -> Result<Option<Registration>, StoreError>;

    /// Number of persisted members.
    async fn count(&self) -> Result<usize, StoreError>;

    /// Check that the backend can serve requests.
    async fn health_check(&self) -> bool {
        self.count().await.is_ok()
    }
}
