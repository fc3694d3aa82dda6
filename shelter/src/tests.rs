use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::ShelterError;
use crate::shelter::{Shelter, DEFAULT_CHAT_LIMIT};
use crate::types::{
    AdoptionStatus, Decision, NewPet, NewReminder, PetKind, PetStatus, Reminder, ReminderKind,
    ReminderUpdate,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

fn shelter() -> Shelter {
    Shelter::with_clock(fixed_clock)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    date(y, mo, d).and_time(time(h, mi))
}

fn reminder(title: &str, d: NaiveDate, t: NaiveTime) -> NewReminder {
    NewReminder {
        pet_id: None,
        title: title.to_string(),
        description: String::new(),
        kind: ReminderKind::Other,
        date: d,
        time: t,
        recurring: false,
    }
}

fn titles(reminders: &[Reminder]) -> Vec<String> {
    reminders.iter().map(|r| r.title.clone()).collect()
}

/// Shelter where "alice" has adopted pet 1 (Rex).
fn shelter_with_adoption() -> Shelter {
    let mut s = shelter();
    s.add_pet(NewPet::new("Rex", PetKind::Dog)).unwrap();
    let a = s.request_adoption("alice", 1).unwrap();
    s.review_adoption(a.id, Decision::Approve, None).unwrap();
    s
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

#[test]
fn test_add_pet_defaults() {
    let mut s = shelter();
    let pet = s
        .add_pet(NewPet::new("Mittens", PetKind::Cat).with_breed("Tabby").with_age(2))
        .unwrap();
    assert_eq!(pet.id, 1);
    assert_eq!(pet.status, PetStatus::Available);
    assert_eq!(pet.health_status, "Healthy");
    assert_eq!(pet.added_at, fixed_clock());
    assert_eq!(s.pet(1).unwrap().breed, "Tabby");

    assert!(matches!(
        s.add_pet(NewPet::new("  ", PetKind::Dog)),
        Err(ShelterError::Validation(_))
    ));
    assert_eq!(s.pet(9), Err(ShelterError::PetNotFound(9)));
}

#[test]
fn test_available_pets_filter_and_order() {
    let mut s = shelter();
    s.add_pet(NewPet::new("Rex", PetKind::Dog)).unwrap();
    s.add_pet(NewPet::new("Tom", PetKind::Cat)).unwrap();
    s.add_pet(NewPet::new("Fido", PetKind::Dog)).unwrap();
    s.set_pet_status(1, PetStatus::Adopted).unwrap();

    let all: Vec<String> = s.available_pets(None).into_iter().map(|p| p.name).collect();
    assert_eq!(all, vec!["Fido", "Tom"]);

    let dogs: Vec<String> = s
        .available_pets(Some(PetKind::Dog))
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(dogs, vec!["Fido"]);

    assert!(s.available_pets(Some(PetKind::Rabbit)).is_empty());
}

#[test]
fn test_pet_kind_parse() {
    assert_eq!("Rabbit".parse::<PetKind>().unwrap(), PetKind::Rabbit);
    assert!("snake".parse::<PetKind>().is_err());
}

#[test]
fn test_seed_file_format() {
    let yaml = r#"
- name: Rex
  breed: Labrador
  type: dog
  age: 3
- name: Kiwi
  type: bird
"#;
    let pets: Vec<NewPet> = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(pets.len(), 2);
    assert_eq!(pets[0].kind, PetKind::Dog);
    assert_eq!(pets[1].kind, PetKind::Bird);
    assert_eq!(pets[1].health_status, "Healthy");
}

#[test]
fn test_remove_pet_cascades() {
    let mut s = shelter_with_adoption();
    let r = s
        .add_reminder(
            "alice",
            NewReminder {
                pet_id: Some(1),
                ..reminder("walk", date(2026, 3, 2), time(8, 0))
            },
        )
        .unwrap();
    s.add_reminder("alice", reminder("buy food", date(2026, 3, 2), time(9, 0)))
        .unwrap();

    s.remove_pet(1).unwrap();
    assert!(s.adoptions_for("alice").is_empty());
    assert!(s.reminders_for("alice").iter().all(|x| x.id != r.id));
    assert_eq!(s.reminders_for("alice").len(), 1);
}

// ---------------------------------------------------------------------------
// Adoptions
// ---------------------------------------------------------------------------

#[test]
fn test_request_adoption() {
    let mut s = shelter();
    s.add_pet(NewPet::new("Rex", PetKind::Dog)).unwrap();

    let a = s.request_adoption("alice", 1).unwrap();
    assert_eq!(a.status, AdoptionStatus::Pending);
    assert_eq!(a.user, "alice");

    assert_eq!(
        s.request_adoption("alice", 1),
        Err(ShelterError::DuplicateAdoption {
            user: "alice".to_string(),
            pet_id: 1
        })
    );
    // Another user may still ask for the same pet.
    assert!(s.request_adoption("bob", 1).is_ok());
    assert_eq!(s.request_adoption("bob", 2), Err(ShelterError::PetNotFound(2)));
}

#[test]
fn test_request_unavailable_pet() {
    let mut s = shelter();
    s.add_pet(NewPet::new("Rex", PetKind::Dog)).unwrap();
    s.set_pet_status(1, PetStatus::Pending).unwrap();

    let err = s.request_adoption("alice", 1).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(
        err,
        ShelterError::PetUnavailable {
            pet_id: 1,
            status: PetStatus::Pending
        }
    );
}

#[test]
fn test_approval_marks_pet_adopted() {
    let mut s = shelter();
    s.add_pet(NewPet::new("Rex", PetKind::Dog)).unwrap();
    let a = s.request_adoption("alice", 1).unwrap();
    let b = s.request_adoption("bob", 1).unwrap();

    let approved = s
        .review_adoption(a.id, Decision::Approve, Some("good home".to_string()))
        .unwrap();
    assert_eq!(approved.status, AdoptionStatus::Approved);
    assert_eq!(approved.approved_at, Some(fixed_clock()));
    assert_eq!(approved.admin_notes.as_deref(), Some("good home"));
    assert_eq!(s.pet(1).unwrap().status, PetStatus::Adopted);
    assert!(s.available_pets(None).is_empty());

    // A second approval for the same pet is refused.
    assert!(matches!(
        s.review_adoption(b.id, Decision::Approve, None),
        Err(ShelterError::PetUnavailable { .. })
    ));
    let rejected = s.review_adoption(b.id, Decision::Reject, None).unwrap();
    assert_eq!(rejected.status, AdoptionStatus::Rejected);
    assert!(rejected.approved_at.is_none());

    assert_eq!(
        s.review_adoption(a.id, Decision::Reject, None),
        Err(ShelterError::NotPending {
            adoption_id: a.id,
            status: AdoptionStatus::Approved
        })
    );
}

#[test]
fn test_cancel_adoption() {
    let mut s = shelter();
    s.add_pet(NewPet::new("Rex", PetKind::Dog)).unwrap();
    s.add_pet(NewPet::new("Tom", PetKind::Cat)).unwrap();
    let a = s.request_adoption("alice", 1).unwrap();
    let b = s.request_adoption("alice", 2).unwrap();

    // Only the owner can cancel.
    assert_eq!(
        s.cancel_adoption("bob", a.id),
        Err(ShelterError::AdoptionNotFound(a.id))
    );

    s.cancel_adoption("alice", a.id).unwrap();
    assert!(s.adoption(a.id).is_err());
    // The pet can be requested again once the request is gone.
    assert!(s.request_adoption("alice", 1).is_ok());

    s.review_adoption(b.id, Decision::Reject, None).unwrap();
    assert!(matches!(
        s.cancel_adoption("alice", b.id),
        Err(ShelterError::NotPending { .. })
    ));
}

#[test]
fn test_adoptions_for_and_adopted_pets() {
    let mut s = shelter_with_adoption();
    s.add_pet(NewPet::new("Tom", PetKind::Cat)).unwrap();
    s.request_adoption("alice", 2).unwrap();

    let ids: Vec<u64> = s.adoptions_for("alice").iter().map(|a| a.pet_id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert!(s.adoptions_for("bob").is_empty());

    let pets: Vec<String> = s.adopted_pets("alice").into_iter().map(|p| p.name).collect();
    assert_eq!(pets, vec!["Rex"]);
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

#[test]
fn test_add_reminder_validation() {
    let mut s = shelter_with_adoption();
    s.add_pet(NewPet::new("Tom", PetKind::Cat)).unwrap();

    assert!(matches!(
        s.add_reminder("alice", reminder(" ", date(2026, 3, 2), time(8, 0))),
        Err(ShelterError::Validation(_))
    ));

    let own = NewReminder {
        pet_id: Some(1),
        kind: ReminderKind::Vaccination,
        ..reminder("rabies shot", date(2026, 3, 2), time(8, 0))
    };
    let r = s.add_reminder("alice", own.clone()).unwrap();
    assert_eq!(r.pet_id, Some(1));
    assert!(!r.completed);

    assert_eq!(
        s.add_reminder("bob", own),
        Err(ShelterError::PetNotOwned {
            user: "bob".to_string(),
            pet_id: 1
        })
    );

    let not_adopted = NewReminder {
        pet_id: Some(2),
        ..reminder("brush", date(2026, 3, 2), time(8, 0))
    };
    assert!(matches!(
        s.add_reminder("alice", not_adopted),
        Err(ShelterError::PetNotOwned { pet_id: 2, .. })
    ));

    let missing = NewReminder {
        pet_id: Some(42),
        ..reminder("brush", date(2026, 3, 2), time(8, 0))
    };
    assert_eq!(
        s.add_reminder("alice", missing),
        Err(ShelterError::PetNotFound(42))
    );
}

#[test]
fn test_reminder_edit_complete_delete() {
    let mut s = shelter();
    let r = s
        .add_reminder("alice", reminder("feed", date(2026, 3, 2), time(8, 0)))
        .unwrap();

    let update = ReminderUpdate {
        title: "feed twice".to_string(),
        description: "morning and evening".to_string(),
        kind: ReminderKind::Feeding,
        date: date(2026, 3, 3),
        time: time(7, 30),
        recurring: true,
    };
    assert_eq!(
        s.update_reminder("bob", r.id, update.clone()),
        Err(ShelterError::ReminderNotFound(r.id))
    );
    let updated = s.update_reminder("alice", r.id, update).unwrap();
    assert_eq!(updated.title, "feed twice");
    assert_eq!(updated.kind, ReminderKind::Feeding);
    assert!(updated.recurring);
    assert_eq!(updated.due_at(), at(2026, 3, 3, 7, 30));

    let done = s.complete_reminder("alice", r.id).unwrap();
    assert!(done.completed);
    assert!(!done.is_overdue(at(2027, 1, 1, 0, 0)));

    assert!(s.delete_reminder("bob", r.id).is_err());
    s.delete_reminder("alice", r.id).unwrap();
    assert!(s.reminders_for("alice").is_empty());
    assert!(s.delete_reminder("alice", r.id).unwrap_err().is_not_found());
}

#[test]
fn test_reminders_ordered_by_due_time() {
    let mut s = shelter();
    s.add_reminder("alice", reminder("c", date(2026, 3, 5), time(8, 0))).unwrap();
    s.add_reminder("alice", reminder("a", date(2026, 3, 1), time(18, 0))).unwrap();
    s.add_reminder("alice", reminder("b", date(2026, 3, 1), time(19, 0))).unwrap();
    s.add_reminder("bob", reminder("x", date(2026, 1, 1), time(0, 0))).unwrap();

    let titles: Vec<String> = s.reminders_for("alice").into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn test_dashboard_buckets() {
    let mut s = shelter_with_adoption();
    s.add_pet(NewPet::new("Tom", PetKind::Cat)).unwrap();
    s.request_adoption("alice", 2).unwrap();

    let now = at(2026, 3, 10, 12, 0);
    s.add_reminder("alice", reminder("yesterday", date(2026, 3, 9), time(12, 0))).unwrap();
    s.add_reminder("alice", reminder("this morning", date(2026, 3, 10), time(8, 0))).unwrap();
    s.add_reminder("alice", reminder("tonight", date(2026, 3, 10), time(20, 0))).unwrap();
    s.add_reminder("alice", reminder("next week", date(2026, 3, 17), time(9, 0))).unwrap();
    let done = s
        .add_reminder("alice", reminder("done", date(2026, 3, 1), time(9, 0)))
        .unwrap();
    s.complete_reminder("alice", done.id).unwrap();

    let d = s.dashboard("alice", now);
    assert_eq!(d.adoptions.len(), 2);
    assert_eq!(d.adopted_pets_count, 1);
    assert_eq!(d.pending_adoptions_count, 1);
    assert_eq!(d.active_reminders_count, 4);

    assert_eq!(titles(&d.overdue_reminders), vec!["yesterday", "this morning"]);
    assert_eq!(titles(&d.today_reminders), vec!["tonight"]);
    assert_eq!(titles(&d.upcoming_reminders), vec!["next week"]);

    assert!(d.overdue_reminders.iter().all(|r| r.is_overdue(now)));

    let empty = s.dashboard("nobody", now);
    assert!(empty.adoptions.is_empty());
    assert_eq!(empty.active_reminders_count, 0);
}

// ---------------------------------------------------------------------------
// Chat log
// ---------------------------------------------------------------------------

#[test]
fn test_chat_log() {
    let mut s = shelter();
    s.record_chat(Some("alice"), None, "hi", "hello");
    s.record_chat(Some("alice"), Some("tab-1"), "dog food", "kibble");
    s.record_chat(None, None, "hey", "hello");
    s.record_chat(Some("bob"), None, "bye", "see you");

    let history = s.chat_history(Some("alice"));
    let queries: Vec<&str> = history.iter().map(|c| c.query.as_str()).collect();
    assert_eq!(queries, vec!["dog food", "hi"]);
    assert_eq!(history[0].session_id.as_deref(), Some("tab-1"));

    assert_eq!(s.chat_history(None).len(), 1);

    assert_eq!(s.clear_chat(Some("alice")), 2);
    assert!(s.chat_history(Some("alice")).is_empty());
    assert_eq!(s.chat_history(Some("bob")).len(), 1);
    assert_eq!(s.clear_chat(Some("alice")), 0);
}

#[test]
fn test_chat_log_evicts_oldest() {
    let mut s = shelter().with_chat_limit(3);
    for i in 0..10 {
        s.record_chat(None, None, &format!("q{i}"), "a");
    }
    s.record_chat(Some("alice"), None, "hi", "hello");

    let anon = s.chat_history(None);
    let queries: Vec<&str> = anon.iter().map(|c| c.query.as_str()).collect();
    assert_eq!(queries, vec!["q9", "q8"]);
    assert_eq!(s.chat_history(Some("alice")).len(), 1);
}

#[test]
fn test_chat_log_default_limit() {
    let mut s = shelter();
    assert_eq!(s.chat_limit(), DEFAULT_CHAT_LIMIT);
    for _ in 0..DEFAULT_CHAT_LIMIT + 5 {
        s.record_chat(None, None, "hey", "hello");
    }
    assert_eq!(s.chat_history(None).len(), DEFAULT_CHAT_LIMIT);

    let s = shelter().with_chat_limit(0);
    assert_eq!(s.chat_limit(), 1);
}

#[test]
fn test_records_serialize() {
    let mut s = shelter_with_adoption();
    let pet = s.pet(1).unwrap().clone();
    let json = serde_json::to_value(&pet).unwrap();
    assert_eq!(json["type"], "dog");
    assert_eq!(json["status"], "adopted");

    let r = s
        .add_reminder(
            "alice",
            NewReminder {
                kind: ReminderKind::VetVisit,
                ..reminder("checkup", date(2026, 4, 1), time(10, 15))
            },
        )
        .unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["kind"], "vet_visit");
    assert_eq!(json["date"], "2026-04-01");
    assert_eq!(json["time"], "10:15:00");
}
