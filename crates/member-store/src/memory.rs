//! In-memory member store.

use crate::error::StoreError;
use crate::store::MemberStore;
use crate::types::*;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

#[derive(Default)]
struct MemoryState {
    members: BTreeMap<PersistedId, Registration>,
    by_student_id: HashMap<String, PersistedId>,
    by_email: HashMap<String, PersistedId>,
    next_id: PersistedId,
}

impl MemoryState {
    fn lookup(&self, student_id: &str, email: &str) -> Option<&Registration> {
        self.by_student_id
            .get(student_id)
            .or_else(|| self.by_email.get(email))
            .and_then(|id| self.members.get(id))
    }

    fn collisions(&self, student_id: &str, email: &str) -> Option<DuplicateFields> {
        let mut fields = Vec::new();
        if self.by_student_id.contains_key(student_id) {
            fields.push(UniqueField::StudentId);
        }
        if self.by_email.contains_key(email) {
            fields.push(UniqueField::Email);
        }
        (!fields.is_empty()).then(|| DuplicateFields::of(fields))
    }
}

/// Process-local member store.
///
/// Both unique indexes are checked and updated under a single write lock,
/// which makes `insert` the uniqueness constraint for this backend.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
    strategy: UniquenessStrategy,
}

impl MemoryStore {
    pub fn new(strategy: UniquenessStrategy) -> Self {
        info!(%strategy, "In-memory member store initialized (data is lost on restart)");
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                next_id: 1,
                ..Default::default()
            })),
            strategy,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(UniquenessStrategy::default())
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    fn strategy(&self) -> UniquenessStrategy {
        self.strategy
    }

    #[instrument(skip(self))]
    async fn find_by_student_id_or_email(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<Registration>, StoreError> {
        let state = self.state.read().await;
        Ok(state.lookup(student_id, email).cloned())
    }

    #[instrument(skip(self, registration), fields(student_id = %registration.student_id))]
    async fn insert(&self, registration: &NewRegistration) -> Result<PersistedId, StoreError> {
        let mut state = self.state.write().await;

        if let Some(collisions) = state.collisions(&registration.student_id, &registration.email) {
            debug!(%collisions, "Rejected duplicate member");
            return Err(StoreError::Duplicate(collisions));
        }

        let id = state.next_id;
        state.next_id += 1;
        state
            .by_student_id
            .insert(registration.student_id.clone(), id);
        state.by_email.insert(registration.email.clone(), id);
        state
            .members
            .insert(id, Registration::from_new(id, registration.clone()));

        debug!(id, total = state.members.len(), "Inserted member");
        Ok(id)
    }

    async fn get(&self, id: PersistedId) -> Result<Option<Registration>, StoreError> {
        let state = self.state.read().await;
        Ok(state.members.get(&id).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.state.read().await.members.len())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
