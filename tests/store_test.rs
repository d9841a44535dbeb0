//! Integration tests for the ChatStore mutation API

use chrono::{Duration, TimeZone, Utc};
use mindcare_chat::config::ChatConfig;
use mindcare_chat::filter::filter_contacts;
use mindcare_chat::models::{Contact, ContactFilters, Message, ASSISTANT_ID};
use mindcare_chat::store::ChatStore;
use mindcare_chat::ChatError;

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

fn store() -> ChatStore {
    let contacts = vec![
        Contact::new("psi-ana", "Dra. Ana Souza", "Psicólogo"),
        Contact::new("patient-1", "João Pereira", "Paciente"),
    ];
    ChatStore::with_contacts(contacts, ChatConfig::default(), base_time())
}

fn incoming(id: &str, from: &str, at: chrono::DateTime<Utc>) -> Message {
    Message::text(id, from, from, "olá", at, false)
}

#[test]
fn test_mark_as_read_then_incoming_message_counts_one() {
    let mut store = store();
    for i in 0..3 {
        store.add_message("patient-1", incoming(&format!("m{i}"), "patient-1", base_time()));
    }
    assert_eq!(store.contact("patient-1").unwrap().unread_count, 3);

    assert!(store.mark_as_read("patient-1"));
    assert_eq!(store.contact("patient-1").unwrap().unread_count, 0);

    store.add_message("patient-1", incoming("m4", "patient-1", base_time()));
    assert_eq!(store.contact("patient-1").unwrap().unread_count, 1);
    assert_eq!(store.conversation("patient-1").unwrap().messages.len(), 4);
}

#[test]
fn test_mark_as_read_is_idempotent() {
    let mut store = store();
    store.add_message("psi-ana", incoming("m1", "psi-ana", base_time()));
    assert!(store.mark_as_read("psi-ana"));
    assert!(store.mark_as_read("psi-ana"));
    assert_eq!(store.contact("psi-ana").unwrap().unread_count, 0);
}

#[test]
fn test_own_message_leaves_unread_untouched() {
    let mut store = store();
    store.add_message("psi-ana", incoming("m1", "psi-ana", base_time()));
    let own = Message::text("m2", "viewer", "Você", "obrigado", base_time() + Duration::minutes(1), true);
    store.add_message("psi-ana", own);

    let contact = store.contact("psi-ana").unwrap();
    assert_eq!(contact.unread_count, 1);
    assert_eq!(contact.last_message.as_deref(), Some("obrigado"));
    assert_eq!(contact.last_message_time, Some(base_time() + Duration::minutes(1)));
}

#[test]
fn test_toggle_pin_twice_restores() {
    let mut store = store();
    let before = store.conversation("psi-ana").unwrap().is_pinned;

    assert!(store.toggle_pin("psi-ana"));
    assert_eq!(store.conversation("psi-ana").unwrap().is_pinned, !before);

    assert!(store.toggle_pin("psi-ana"));
    assert_eq!(store.conversation("psi-ana").unwrap().is_pinned, before);
}

#[test]
fn test_archive_toggles_and_lists() {
    let mut store = store();
    assert!(store.archive_conversation("patient-1"));
    let archived: Vec<&str> = store.archived_contacts().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(archived, vec!["patient-1"]);

    assert!(store.archive_conversation("patient-1"));
    assert!(store.archived_contacts().is_empty());
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut store = store();
    let snapshot: Vec<Contact> = store.contacts().to_vec();

    assert!(!store.mark_as_read("ghost"));
    assert!(!store.toggle_pin("ghost"));
    assert!(!store.archive_conversation("ghost"));
    assert!(!store.add_message("ghost", incoming("m1", "ghost", base_time())));
    assert!(!store.open_conversation("ghost"));

    assert_eq!(store.contacts(), snapshot.as_slice());
    assert!(store.conversation("ghost").is_none());
}

#[test]
fn test_add_message_updates_last_activity() {
    let mut store = store();
    let at = base_time() + Duration::hours(2);
    store.add_message("psi-ana", incoming("m1", "psi-ana", at));
    assert_eq!(store.conversation("psi-ana").unwrap().last_activity, at);
}

#[test]
fn test_total_unread_sums_contacts() {
    let mut store = store();
    store.add_message("psi-ana", incoming("m1", "psi-ana", base_time()));
    store.add_message("patient-1", incoming("m2", "patient-1", base_time()));
    store.add_message("patient-1", incoming("m3", "patient-1", base_time()));
    assert_eq!(store.total_unread(), 3);
}

#[test]
fn test_send_text_appends_sanitized_own_message() {
    let mut store = store();
    let sent = store
        .send_text("psi-ana", "viewer", "Você", "  bom dia\u{7}  ", base_time())
        .expect("valid text")
        .expect("known conversation");

    assert_eq!(sent.content, "bom dia");
    assert!(sent.is_own);
    let conversation = store.conversation("psi-ana").unwrap();
    assert_eq!(conversation.messages.last(), Some(&sent));
    assert_eq!(store.contact("psi-ana").unwrap().unread_count, 0);
}

#[test]
fn test_send_text_rejects_empty_and_oversized() {
    let settings = ChatConfig {
        max_message_length: 10,
        ..ChatConfig::default()
    };
    let mut store = ChatStore::with_contacts(Vec::new(), settings, base_time());

    let empty = store.send_text(ASSISTANT_ID, "viewer", "Você", "   ", base_time());
    assert!(matches!(empty, Err(ChatError::InvalidMessage(_))));

    let long = store.send_text(ASSISTANT_ID, "viewer", "Você", "mensagem longa demais", base_time());
    assert!(matches!(long, Err(ChatError::InvalidMessage(_))));

    assert!(store.conversation(ASSISTANT_ID).unwrap().messages.is_empty());
}

#[test]
fn test_send_text_to_unknown_conversation_returns_none() {
    let mut store = store();
    let result = store.send_text("ghost", "viewer", "Você", "oi", base_time()).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_send_text_ids_are_unique() {
    let mut store = store();
    let a = store.send_text("psi-ana", "viewer", "Você", "um", base_time()).unwrap().unwrap();
    let b = store.send_text("psi-ana", "viewer", "Você", "dois", base_time()).unwrap().unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_search_query_too_long_is_rejected() {
    let settings = ChatConfig {
        max_search_length: 3,
        ..ChatConfig::default()
    };
    let mut store = ChatStore::with_contacts(Vec::new(), settings, base_time());
    assert!(matches!(store.set_search_query("abcd"), Err(ChatError::InvalidQuery(_))));
    assert_eq!(store.search_query(), "");
}

#[test]
fn test_whitespace_only_query_is_not_empty() {
    let mut store = store();
    store.set_search_query("   ").unwrap();
    assert_eq!(store.search_query(), "   ");
    assert!(store.filtered_contacts().is_empty());
}

#[test]
fn test_trailing_space_in_query_is_significant() {
    let contacts = vec![
        Contact::new("c1", "Anabela Reis", "Paciente"),
        Contact::new("c2", "Dra. Ana Souza", "Psicólogo"),
    ];
    let mut store = ChatStore::with_contacts(contacts.clone(), ChatConfig::default(), base_time());
    store.set_search_query("Ana ").unwrap();

    let through_store: Vec<&str> = store.filtered_contacts().iter().map(|c| c.id.as_str()).collect();
    let direct: Vec<&str> = filter_contacts(&contacts, "Ana ", &ContactFilters::default())
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(through_store, vec!["c2"]);
    assert_eq!(through_store, direct);
}
