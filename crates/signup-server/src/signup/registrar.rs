//! Duplicate detection and persistence of validated registrations.

use super::error::{RegistrarError, SignupError};
use super::types::{Created, NormalizedRegistration, RawRegistration};
use super::validator::validate;
use chrono::Utc;
use member_store::{DuplicateFields, DynMemberStore, StoreError, UniquenessStrategy};
use tracing::{error, info, instrument, warn};

/// Coordinates a submission against the injected storage backend.
#[derive(Clone)]
pub struct Registrar {
    store: DynMemberStore,
}

impl Registrar {
    pub fn new(store: DynMemberStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DynMemberStore {
        &self.store
    }

    /// Validate a raw submission and persist it.
    ///
    /// Validation failures return before the store is touched.
    pub async fn register(&self, raw: &RawRegistration) -> Result<Created, SignupError> {
        let registration = validate(raw).inspect_err(|e| {
            warn!(reason = %e, "Submission failed validation");
        })?;

        Ok(self.submit(registration).await?)
    }

    /// Persist a validated registration.
    ///
    /// With [`UniquenessStrategy::PreCheck`] an existing member is looked up
    /// first so the conflict is reported without attempting a write. The
    /// insert-time constraint still decides the outcome when two submissions
    /// race past the lookup.
    #[instrument(
        skip(self, registration),
        fields(student_id = %registration.student_id, strategy = %self.store.strategy())
    )]
    pub async fn submit(
        &self,
        registration: NormalizedRegistration,
    ) -> Result<Created, RegistrarError> {
        if self.store.strategy() == UniquenessStrategy::PreCheck {
            let existing = self
                .store
                .find_by_student_id_or_email(&registration.student_id, &registration.email)
                .await
                .map_err(|e| translate(e, &registration))?;

            if let Some(existing) = existing {
                let fields = DuplicateFields::between(
                    &existing,
                    &registration.student_id,
                    &registration.email,
                );
                warn!(%fields, "Member already registered");
                return Err(RegistrarError::DuplicateMember(fields));
            }
        }

        let aka = registration.aka.clone();
        let email = registration.email.clone();
        let new = registration.into_new(Utc::now());

        match self.store.insert(&new).await {
            Ok(id) => {
                info!(id, %aka, %email, "Registered new member");
                Ok(Created {
                    id,
                    created_at: new.created_at,
                })
            }
            Err(e) => Err(translate_insert(e)),
        }
    }
}

fn translate(e: StoreError, registration: &NormalizedRegistration) -> RegistrarError {
    if let StoreError::Backend(msg) = &e {
        error!(error = %msg, student_id = %registration.student_id, "Member lookup failed");
    }
    RegistrarError::from(e)
}

fn translate_insert(e: StoreError) -> RegistrarError {
    match &e {
        StoreError::Duplicate(fields) => {
            warn!(%fields, "Storage rejected duplicate member");
        }
        StoreError::Backend(msg) => {
            error!(error = %msg, "Member insert failed");
        }
    }
    RegistrarError::from(e)
}
