//! Shelter records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShelterError;

pub type PetId = u64;
pub type AdoptionId = u64;
pub type ReminderId = u64;
pub type ChatId = u64;

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetKind {
    #[default]
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

impl PetKind {
    pub const ALL: [PetKind; 5] = [
        PetKind::Dog,
        PetKind::Cat,
        PetKind::Bird,
        PetKind::Rabbit,
        PetKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetKind::Dog => "dog",
            PetKind::Cat => "cat",
            PetKind::Bird => "bird",
            PetKind::Rabbit => "rabbit",
            PetKind::Other => "other",
        }
    }
}

impl fmt::Display for PetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetKind {
    type Err = ShelterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| ShelterError::Validation(format!("unknown pet type {:?}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    #[default]
    Available,
    Pending,
    Adopted,
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Adopted => "adopted",
        })
    }
}

/// A pet listed by the shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub breed: String,
    #[serde(rename = "type")]
    pub kind: PetKind,
    /// Age in years.
    pub age: u32,
    pub description: String,
    pub health_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: PetStatus,
    pub added_at: DateTime<Utc>,
}

fn default_health_status() -> String {
    "Healthy".to_string()
}

/// Input for listing a new pet. Also the format of seed files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPet {
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default, rename = "type")]
    pub kind: PetKind,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_health_status")]
    pub health_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NewPet {
    pub fn new(name: impl Into<String>, kind: PetKind) -> Self {
        Self {
            name: name.into(),
            breed: String::new(),
            kind,
            age: 0,
            description: String::new(),
            health_status: default_health_status(),
            image: None,
        }
    }

    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = breed.into();
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }
}

// ---------------------------------------------------------------------------
// Adoptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdoptionStatus::Pending => "pending",
            AdoptionStatus::Approved => "approved",
            AdoptionStatus::Rejected => "rejected",
        })
    }
}

/// Outcome of an admin review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

/// A user's request to adopt a pet. At most one per (user, pet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adoption {
    pub id: AdoptionId,
    pub user: String,
    pub pet_id: PetId,
    pub requested_at: DateTime<Utc>,
    pub status: AdoptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Vaccination,
    Feeding,
    Grooming,
    VetVisit,
    Medication,
    #[default]
    Other,
}

/// A care reminder owned by a user, optionally tied to one of their pets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<PetId>,
    pub title: String,
    pub description: String,
    pub kind: ReminderKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub recurring: bool,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// When the reminder is due, in the user's local wall-clock time.
    pub fn due_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Due before `now` and not yet completed.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.due_at() < now && !self.completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<PetId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ReminderKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub recurring: bool,
}

/// Replacement values for an existing reminder. The linked pet is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderUpdate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ReminderKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub recurring: bool,
}

// ---------------------------------------------------------------------------
// Chat log and dashboard
// ---------------------------------------------------------------------------

/// One chatbot exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub id: ChatId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// A user's overview: adoption requests and active reminders bucketed by
/// due time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub adoptions: Vec<Adoption>,
    pub adopted_pets_count: usize,
    pub pending_adoptions_count: usize,
    pub overdue_reminders: Vec<Reminder>,
    pub today_reminders: Vec<Reminder>,
    pub upcoming_reminders: Vec<Reminder>,
    pub active_reminders_count: usize,
}
