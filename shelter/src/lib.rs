//! Pet shelter registry.
//!
//! Holds adoptable pets, adoption requests, per-user care reminders and the
//! chatbot query log in memory, and enforces the adoption and reminder
//! rules on top of them.

pub mod error;
pub mod shelter;
pub mod types;

pub use error::ShelterError;
pub use shelter::{Shelter, DEFAULT_CHAT_LIMIT};
pub use types::{
    Adoption, AdoptionId, AdoptionStatus, ChatId, ChatQuery, Dashboard, Decision, NewPet,
    NewReminder, Pet, PetId, PetKind, PetStatus, Reminder, ReminderId, ReminderKind,
    ReminderUpdate,
};

#[cfg(test)]
mod tests;
