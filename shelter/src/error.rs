use thiserror::Error;

use crate::types::{AdoptionId, AdoptionStatus, PetId, PetStatus, ReminderId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShelterError {
    #[error("shelter: pet {0} not found")]
    PetNotFound(PetId),

    #[error("shelter: pet {pet_id} is not available for adoption (status {status})")]
    PetUnavailable { pet_id: PetId, status: PetStatus },

    #[error("shelter: {user} has already requested pet {pet_id}")]
    DuplicateAdoption { user: String, pet_id: PetId },

    #[error("shelter: adoption request {0} not found")]
    AdoptionNotFound(AdoptionId),

    #[error("shelter: adoption request {adoption_id} is {status}, not pending")]
    NotPending {
        adoption_id: AdoptionId,
        status: AdoptionStatus,
    },

    #[error("shelter: reminder {0} not found")]
    ReminderNotFound(ReminderId),

    #[error("shelter: pet {pet_id} has not been adopted by {user}")]
    PetNotOwned { user: String, pet_id: PetId },

    #[error("shelter: {0}")]
    Validation(String),
}

impl ShelterError {
    /// Whether the error names a record that does not exist (for this user).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ShelterError::PetNotFound(_)
                | ShelterError::AdoptionNotFound(_)
                | ShelterError::ReminderNotFound(_)
        )
    }

    /// Whether the error is a conflict with the current record state.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ShelterError::PetUnavailable { .. }
                | ShelterError::DuplicateAdoption { .. }
                | ShelterError::NotPending { .. }
        )
    }
}
