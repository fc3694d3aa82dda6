//! The in-memory shelter registry.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ShelterError;
use crate::types::{
    Adoption, AdoptionId, AdoptionStatus, ChatId, ChatQuery, Dashboard, Decision, NewPet,
    NewReminder, Pet, PetId, PetKind, PetStatus, Reminder, ReminderId, ReminderUpdate,
};

/// Chat exchanges kept when no limit is configured.
pub const DEFAULT_CHAT_LIMIT: usize = 10_000;

/// Registry of pets, adoption requests, reminders and chat history.
///
/// The chat log keeps at most `chat_limit` exchanges across all users; the
/// oldest are dropped first.
///
/// Ids are assigned sequentially from 1 per record type and never reused.
/// The registry is not synchronized; wrap it in a lock to share it.
#[derive(Debug)]
pub struct Shelter {
    pets: BTreeMap<PetId, Pet>,
    adoptions: BTreeMap<AdoptionId, Adoption>,
    reminders: BTreeMap<ReminderId, Reminder>,
    chats: VecDeque<ChatQuery>,
    chat_limit: usize,

    next_pet: PetId,
    next_adoption: AdoptionId,
    next_reminder: ReminderId,
    next_chat: ChatId,

    clock: fn() -> DateTime<Utc>,
}

impl Default for Shelter {
    fn default() -> Self {
        Self::new()
    }
}

impl Shelter {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create a registry that stamps records using `clock`.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            pets: BTreeMap::new(),
            adoptions: BTreeMap::new(),
            reminders: BTreeMap::new(),
            chats: VecDeque::new(),
            chat_limit: DEFAULT_CHAT_LIMIT,
            next_pet: 1,
            next_adoption: 1,
            next_reminder: 1,
            next_chat: 1,
            clock,
        }
    }

    /// Cap the chat log at `limit` exchanges (at least one).
    pub fn with_chat_limit(mut self, limit: usize) -> Self {
        self.chat_limit = limit.max(1);
        self.trim_chats();
        self
    }

    pub fn chat_limit(&self) -> usize {
        self.chat_limit
    }

    fn trim_chats(&mut self) {
        while self.chats.len() > self.chat_limit {
            self.chats.pop_front();
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    // -----------------------------------------------------------------------
    // Pets
    // -----------------------------------------------------------------------

    /// List a new pet as available.
    pub fn add_pet(&mut self, new: NewPet) -> Result<Pet, ShelterError> {
        if new.name.trim().is_empty() {
            return Err(ShelterError::Validation("pet name is required".to_string()));
        }

        let id = self.next_pet;
        self.next_pet += 1;

        let pet = Pet {
            id,
            name: new.name,
            breed: new.breed,
            kind: new.kind,
            age: new.age,
            description: new.description,
            health_status: new.health_status,
            image: new.image,
            status: PetStatus::Available,
            added_at: self.now(),
        };
        tracing::info!(pet = id, name = %pet.name, kind = %pet.kind, "pet listed");
        self.pets.insert(id, pet.clone());
        Ok(pet)
    }

    pub fn pet(&self, id: PetId) -> Result<&Pet, ShelterError> {
        self.pets.get(&id).ok_or(ShelterError::PetNotFound(id))
    }

    pub fn set_pet_status(&mut self, id: PetId, status: PetStatus) -> Result<Pet, ShelterError> {
        let pet = self.pets.get_mut(&id).ok_or(ShelterError::PetNotFound(id))?;
        pet.status = status;
        Ok(pet.clone())
    }

    /// Remove a pet along with its adoption requests and reminders.
    pub fn remove_pet(&mut self, id: PetId) -> Result<Pet, ShelterError> {
        let pet = self.pets.remove(&id).ok_or(ShelterError::PetNotFound(id))?;
        self.adoptions.retain(|_, a| a.pet_id != id);
        self.reminders.retain(|_, r| r.pet_id != Some(id));
        tracing::info!(pet = id, "pet removed");
        Ok(pet)
    }

    /// Available pets, newest first. `None` lists every kind.
    pub fn available_pets(&self, kind: Option<PetKind>) -> Vec<Pet> {
        let mut pets: Vec<Pet> = self
            .pets
            .values()
            .filter(|p| p.status == PetStatus::Available)
            .filter(|p| kind.is_none_or(|k| p.kind == k))
            .cloned()
            .collect();
        pets.sort_by(|a, b| b.added_at.cmp(&a.added_at).then(b.id.cmp(&a.id)));
        pets
    }

    // -----------------------------------------------------------------------
    // Adoptions
    // -----------------------------------------------------------------------

    /// File a pending adoption request for an available pet.
    pub fn request_adoption(&mut self, user: &str, pet_id: PetId) -> Result<Adoption, ShelterError> {
        let pet = self.pet(pet_id)?;
        if pet.status != PetStatus::Available {
            return Err(ShelterError::PetUnavailable {
                pet_id,
                status: pet.status,
            });
        }
        if self
            .adoptions
            .values()
            .any(|a| a.user == user && a.pet_id == pet_id)
        {
            return Err(ShelterError::DuplicateAdoption {
                user: user.to_string(),
                pet_id,
            });
        }

        let id = self.next_adoption;
        self.next_adoption += 1;

        let adoption = Adoption {
            id,
            user: user.to_string(),
            pet_id,
            requested_at: self.now(),
            status: AdoptionStatus::Pending,
            admin_notes: None,
            approved_at: None,
        };
        tracing::info!(adoption = id, user, pet = pet_id, "adoption requested");
        self.adoptions.insert(id, adoption.clone());
        Ok(adoption)
    }

    /// Withdraw one of the user's own pending requests.
    pub fn cancel_adoption(&mut self, user: &str, id: AdoptionId) -> Result<Adoption, ShelterError> {
        let adoption = self
            .adoptions
            .get(&id)
            .filter(|a| a.user == user)
            .ok_or(ShelterError::AdoptionNotFound(id))?;
        if adoption.status != AdoptionStatus::Pending {
            return Err(ShelterError::NotPending {
                adoption_id: id,
                status: adoption.status,
            });
        }

        tracing::info!(adoption = id, user, "adoption cancelled");
        self.adoptions
            .remove(&id)
            .ok_or(ShelterError::AdoptionNotFound(id))
    }

    /// Approve or reject a pending request. Approval marks the pet adopted.
    pub fn review_adoption(
        &mut self,
        id: AdoptionId,
        decision: Decision,
        notes: Option<String>,
    ) -> Result<Adoption, ShelterError> {
        let now = self.now();
        let adoption = self
            .adoptions
            .get(&id)
            .ok_or(ShelterError::AdoptionNotFound(id))?;
        if adoption.status != AdoptionStatus::Pending {
            return Err(ShelterError::NotPending {
                adoption_id: id,
                status: adoption.status,
            });
        }

        let pet_id = adoption.pet_id;
        if decision == Decision::Approve {
            let pet = self.pet(pet_id)?;
            if pet.status == PetStatus::Adopted {
                return Err(ShelterError::PetUnavailable {
                    pet_id,
                    status: pet.status,
                });
            }
        }

        let adoption = self
            .adoptions
            .get_mut(&id)
            .ok_or(ShelterError::AdoptionNotFound(id))?;
        adoption.admin_notes = notes;
        match decision {
            Decision::Approve => {
                adoption.status = AdoptionStatus::Approved;
                adoption.approved_at = Some(now);
            }
            Decision::Reject => adoption.status = AdoptionStatus::Rejected,
        }
        let adoption = adoption.clone();

        if decision == Decision::Approve {
            if let Some(pet) = self.pets.get_mut(&pet_id) {
                pet.status = PetStatus::Adopted;
            }
        }

        tracing::info!(adoption = id, status = %adoption.status, pet = pet_id, "adoption reviewed");
        Ok(adoption)
    }

    pub fn adoption(&self, id: AdoptionId) -> Result<&Adoption, ShelterError> {
        self.adoptions.get(&id).ok_or(ShelterError::AdoptionNotFound(id))
    }

    /// The user's adoption requests, newest first.
    pub fn adoptions_for(&self, user: &str) -> Vec<Adoption> {
        let mut adoptions: Vec<Adoption> = self
            .adoptions
            .values()
            .filter(|a| a.user == user)
            .cloned()
            .collect();
        adoptions.sort_by(|a, b| b.requested_at.cmp(&a.requested_at).then(b.id.cmp(&a.id)));
        adoptions
    }

    /// Pets the user has an approved adoption for.
    pub fn adopted_pets(&self, user: &str) -> Vec<Pet> {
        let ids: BTreeSet<PetId> = self
            .adoptions
            .values()
            .filter(|a| a.user == user && a.status == AdoptionStatus::Approved)
            .map(|a| a.pet_id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.pets.get(&id).cloned())
            .collect()
    }

    fn owns_pet(&self, user: &str, pet_id: PetId) -> bool {
        self.adoptions.values().any(|a| {
            a.user == user && a.pet_id == pet_id && a.status == AdoptionStatus::Approved
        })
    }

    // -----------------------------------------------------------------------
    // Reminders
    // -----------------------------------------------------------------------

    /// Add a reminder. A linked pet must be one the user adopted.
    pub fn add_reminder(&mut self, user: &str, new: NewReminder) -> Result<Reminder, ShelterError> {
        validate_title(&new.title)?;
        if let Some(pet_id) = new.pet_id {
            self.pet(pet_id)?;
            if !self.owns_pet(user, pet_id) {
                return Err(ShelterError::PetNotOwned {
                    user: user.to_string(),
                    pet_id,
                });
            }
        }

        let id = self.next_reminder;
        self.next_reminder += 1;

        let reminder = Reminder {
            id,
            user: user.to_string(),
            pet_id: new.pet_id,
            title: new.title,
            description: new.description,
            kind: new.kind,
            date: new.date,
            time: new.time,
            recurring: new.recurring,
            completed: false,
            created_at: self.now(),
        };
        self.reminders.insert(id, reminder.clone());
        Ok(reminder)
    }

    fn own_reminder_mut(&mut self, user: &str, id: ReminderId) -> Result<&mut Reminder, ShelterError> {
        self.reminders
            .get_mut(&id)
            .filter(|r| r.user == user)
            .ok_or(ShelterError::ReminderNotFound(id))
    }

    pub fn update_reminder(
        &mut self,
        user: &str,
        id: ReminderId,
        update: ReminderUpdate,
    ) -> Result<Reminder, ShelterError> {
        validate_title(&update.title)?;
        let reminder = self.own_reminder_mut(user, id)?;
        reminder.title = update.title;
        reminder.description = update.description;
        reminder.kind = update.kind;
        reminder.date = update.date;
        reminder.time = update.time;
        reminder.recurring = update.recurring;
        Ok(reminder.clone())
    }

    pub fn complete_reminder(&mut self, user: &str, id: ReminderId) -> Result<Reminder, ShelterError> {
        let reminder = self.own_reminder_mut(user, id)?;
        reminder.completed = true;
        Ok(reminder.clone())
    }

    pub fn delete_reminder(&mut self, user: &str, id: ReminderId) -> Result<Reminder, ShelterError> {
        self.own_reminder_mut(user, id)?;
        self.reminders
            .remove(&id)
            .ok_or(ShelterError::ReminderNotFound(id))
    }

    /// The user's reminders, ordered by due date then time.
    pub fn reminders_for(&self, user: &str) -> Vec<Reminder> {
        let mut reminders: Vec<Reminder> = self
            .reminders
            .values()
            .filter(|r| r.user == user)
            .cloned()
            .collect();
        reminders.sort_by(|a, b| a.due_at().cmp(&b.due_at()).then(a.id.cmp(&b.id)));
        reminders
    }

    /// Summarize a user's adoptions and active reminders as of `now`.
    ///
    /// Active reminders due before `now` are overdue; the rest are due today
    /// when they fall on `now`'s date, upcoming otherwise.
    pub fn dashboard(&self, user: &str, now: NaiveDateTime) -> Dashboard {
        let adoptions = self.adoptions_for(user);
        let adopted_pets_count = adoptions
            .iter()
            .filter(|a| a.status == AdoptionStatus::Approved)
            .count();
        let pending_adoptions_count = adoptions
            .iter()
            .filter(|a| a.status == AdoptionStatus::Pending)
            .count();

        let active: Vec<Reminder> = self
            .reminders_for(user)
            .into_iter()
            .filter(|r| !r.completed)
            .collect();
        let active_reminders_count = active.len();

        let mut overdue_reminders = Vec::new();
        let mut today_reminders = Vec::new();
        let mut upcoming_reminders = Vec::new();
        for reminder in active {
            let due = reminder.due_at();
            if due < now {
                overdue_reminders.push(reminder);
            } else if due.date() == now.date() {
                today_reminders.push(reminder);
            } else {
                upcoming_reminders.push(reminder);
            }
        }

        Dashboard {
            adoptions,
            adopted_pets_count,
            pending_adoptions_count,
            overdue_reminders,
            today_reminders,
            upcoming_reminders,
            active_reminders_count,
        }
    }

    // -----------------------------------------------------------------------
    // Chat log
    // -----------------------------------------------------------------------

    /// Record one chatbot exchange, evicting the oldest past the limit.
    pub fn record_chat(
        &mut self,
        user: Option<&str>,
        session_id: Option<&str>,
        query: &str,
        response: &str,
    ) -> ChatQuery {
        let id = self.next_chat;
        self.next_chat += 1;

        let entry = ChatQuery {
            id,
            user: user.map(str::to_string),
            session_id: session_id.map(str::to_string),
            query: query.to_string(),
            response: response.to_string(),
            timestamp: self.now(),
        };
        self.chats.push_back(entry.clone());
        self.trim_chats();
        entry
    }

    /// Exchanges of a user (`None` for anonymous ones), newest first.
    pub fn chat_history(&self, user: Option<&str>) -> Vec<ChatQuery> {
        let mut entries: Vec<ChatQuery> = self
            .chats
            .iter()
            .filter(|c| c.user.as_deref() == user)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries
    }

    /// Drop a user's chat history. Returns the number of entries removed.
    pub fn clear_chat(&mut self, user: Option<&str>) -> usize {
        let before = self.chats.len();
        self.chats.retain(|c| c.user.as_deref() != user);
        before - self.chats.len()
    }
}

fn validate_title(title: &str) -> Result<(), ShelterError> {
    if title.trim().is_empty() {
        return Err(ShelterError::Validation("reminder title is required".to_string()));
    }
    Ok(())
}
