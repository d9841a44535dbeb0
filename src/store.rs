//! Per-session conversation registry.
//!
//! `ChatStore` owns the contact list and one conversation per contact. It is
//! built once per authenticated session and handed to whatever renders it.
//! Every mutation is keyed by id and is a no-op for an unknown id.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::ChatConfig;
use crate::error::Result;
use crate::filter::filter_contacts;
use crate::metrics::MetricsCollector;
use crate::models::{Contact, ContactFilters, Conversation, Message, PatientRecord, Role};
use crate::seed::{assistant_contact, contacts_for_role, TriagePolicy};
use crate::sort::sort_contacts;
use crate::validation::InputValidator;

/// Contacts, conversations and list state of one session
#[derive(Debug)]
pub struct ChatStore {
    contacts: Vec<Contact>,
    conversations: HashMap<String, Conversation>,
    search_query: String,
    active_filters: ContactFilters,
    active_conversation: Option<String>,
    settings: ChatConfig,
    metrics: MetricsCollector,
    next_message_seq: u64,
}

impl ChatStore {
    /// Seed a store for the viewer's role
    #[must_use]
    pub fn for_session(
        role: Role,
        roster: &[PatientRecord],
        triage: &dyn TriagePolicy,
        settings: ChatConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let contacts = contacts_for_role(role, roster, triage, &settings.assistant_name);
        debug!(role = %role, contacts = contacts.len(), "Seeding chat store");
        Self::with_contacts(contacts, settings, now)
    }

    /// Store over an explicit contact list.
    ///
    /// The assistant is prepended if missing; later duplicates of an id are dropped.
    #[must_use]
    pub fn with_contacts(contacts: Vec<Contact>, settings: ChatConfig, now: DateTime<Utc>) -> Self {
        let mut store = Self {
            contacts: Vec::with_capacity(contacts.len() + 1),
            conversations: HashMap::with_capacity(contacts.len() + 1),
            search_query: String::new(),
            active_filters: ContactFilters::default(),
            active_conversation: None,
            metrics: MetricsCollector::default(),
            next_message_seq: 0,
            settings,
        };

        if !contacts.iter().any(Contact::is_assistant) {
            let assistant = assistant_contact(&store.settings.assistant_name);
            store.insert_contact(assistant, now);
        }
        for contact in contacts {
            if store.conversations.contains_key(&contact.id) {
                warn!(contact_id = %contact.id, "Dropping duplicate contact");
                continue;
            }
            store.insert_contact(contact, now);
        }
        store
    }

    fn insert_contact(&mut self, contact: Contact, now: DateTime<Utc>) {
        self.conversations
            .insert(contact.id.clone(), Conversation::new(&contact.id, now));
        self.contacts.push(contact);
    }

    fn contact_mut(&mut self, id: &str) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id == id)
    }

    /// All contacts in seeding order
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contact by id
    #[must_use]
    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Conversation by id
    #[must_use]
    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// Current free-text search
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current categorical filters
    #[must_use]
    pub const fn active_filters(&self) -> &ContactFilters {
        &self.active_filters
    }

    /// Replace the search text. The query is kept verbatim; only an empty
    /// query matches every contact.
    pub fn set_search_query(&mut self, query: &str) -> Result<()> {
        InputValidator::validate_search_query(query, self.settings.max_search_length)?;
        self.search_query = query.to_string();
        Ok(())
    }

    /// Replace the categorical filters
    pub fn set_filters(&mut self, filters: ContactFilters) {
        self.active_filters = filters;
    }

    /// Drop the search text and every filter
    pub fn clear_filters(&mut self) {
        self.search_query.clear();
        self.active_filters = ContactFilters::default();
    }

    /// Contacts passing the search and filters, in seeding order
    #[must_use]
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        filter_contacts(&self.contacts, &self.search_query, &self.active_filters)
    }

    /// Filtered contacts in display order
    #[must_use]
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        let mut visible = self.filtered_contacts();
        sort_contacts(&mut visible, &self.conversations);
        self.metrics.record_visible_contacts(visible.len());
        visible
    }

    /// Contacts whose conversation is archived
    #[must_use]
    pub fn archived_contacts(&self) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| self.conversations.get(&c.id).is_some_and(|conv| conv.is_archived))
            .collect()
    }

    /// Sum of unread counts over all contacts
    #[must_use]
    pub fn total_unread(&self) -> u32 {
        self.contacts.iter().map(|c| c.unread_count).sum()
    }

    /// Id of the conversation currently open
    #[must_use]
    pub fn active_conversation(&self) -> Option<&str> {
        self.active_conversation.as_deref()
    }

    /// Reset the unread counter of a contact
    pub fn mark_as_read(&mut self, id: &str) -> bool {
        let found = match self.contact_mut(id) {
            Some(contact) => {
                contact.unread_count = 0;
                true
            }
            None => false,
        };
        self.log_mutation("mark_as_read", id, found);
        found
    }

    /// Flip the pinned flag of a conversation
    pub fn toggle_pin(&mut self, id: &str) -> bool {
        let found = match self.conversations.get_mut(id) {
            Some(conversation) => {
                conversation.is_pinned = !conversation.is_pinned;
                true
            }
            None => false,
        };
        self.log_mutation("toggle_pin", id, found);
        found
    }

    /// Flip the archived flag of a conversation
    pub fn archive_conversation(&mut self, id: &str) -> bool {
        let found = match self.conversations.get_mut(id) {
            Some(conversation) => {
                conversation.is_archived = !conversation.is_archived;
                true
            }
            None => false,
        };
        self.log_mutation("archive_conversation", id, found);
        found
    }

    /// Make a conversation the open one and mark it read
    pub fn open_conversation(&mut self, id: &str) -> bool {
        if !self.conversations.contains_key(id) {
            self.log_mutation("open_conversation", id, false);
            return false;
        }
        self.active_conversation = Some(id.to_string());
        self.mark_as_read(id)
    }

    /// Append a message and refresh the thread summary.
    ///
    /// Incoming messages bump the unread counter by one; own messages leave it.
    pub fn add_message(&mut self, conversation_id: &str, message: Message) -> bool {
        let Some(conversation) = self.conversations.get_mut(conversation_id) else {
            self.log_mutation("add_message", conversation_id, false);
            return false;
        };

        conversation.last_activity = conversation.last_activity.max(message.timestamp);
        let is_own = message.is_own;
        let timestamp = message.timestamp;
        let content = message.content.clone();
        conversation.messages.push(message);

        if let Some(contact) = self.contact_mut(conversation_id) {
            contact.last_message = Some(content);
            contact.last_message_time = Some(timestamp);
            if !is_own {
                contact.unread_count = contact.unread_count.saturating_add(1);
            }
        }

        self.metrics.record_message_appended(is_own);
        self.log_mutation("add_message", conversation_id, true);
        true
    }

    /// Validate viewer text and append it as an own message.
    ///
    /// Returns the stored message, or `None` if the conversation is unknown.
    pub fn send_text(
        &mut self,
        conversation_id: &str,
        sender_id: &str,
        sender_name: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Message>> {
        let content = InputValidator::sanitize_text(text);
        InputValidator::validate_message_content(&content, self.settings.max_message_length)?;

        if !self.conversations.contains_key(conversation_id) {
            self.log_mutation("send_text", conversation_id, false);
            return Ok(None);
        }

        self.next_message_seq += 1;
        let id = format!("msg-{}", self.next_message_seq);
        let message = Message::text(&id, sender_id, sender_name, &content, now, true);
        self.add_message(conversation_id, message.clone());
        Ok(Some(message))
    }

    fn log_mutation(&self, operation: &'static str, id: &str, found: bool) {
        if found {
            debug!(operation, id, "Store mutation applied");
        } else {
            debug!(operation, id, "Unknown id, ignoring");
        }
        self.metrics.record_mutation(operation, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ASSISTANT_ID;
    use chrono::Duration;

    fn store_with(ids: &[&str]) -> ChatStore {
        let contacts = ids.iter().map(|id| Contact::new(id, id, "Paciente")).collect();
        ChatStore::with_contacts(contacts, ChatConfig::default(), Utc::now())
    }

    #[test]
    fn test_assistant_is_always_present() {
        let store = store_with(&["a", "b"]);
        assert_eq!(store.contacts()[0].id, ASSISTANT_ID);
        assert!(store.conversation(ASSISTANT_ID).is_some());
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let store = store_with(&["a", "a"]);
        assert_eq!(store.contacts().len(), 2);
    }

    #[test]
    fn test_last_activity_never_moves_backwards() {
        let mut store = store_with(&["a"]);
        let now = Utc::now();
        let late = Message::text("1", "a", "a", "later", now + Duration::minutes(5), false);
        let early = Message::text("2", "a", "a", "earlier", now - Duration::minutes(5), false);
        store.add_message("a", late);
        store.add_message("a", early);

        let conversation = store.conversation("a").unwrap();
        assert_eq!(conversation.last_activity, now + Duration::minutes(5));
        assert_eq!(conversation.messages.len(), 2);
    }

    #[test]
    fn test_open_conversation_marks_read() {
        let mut store = store_with(&["a"]);
        store.add_message("a", Message::text("1", "a", "a", "oi", Utc::now(), false));
        assert!(store.open_conversation("a"));
        assert_eq!(store.active_conversation(), Some("a"));
        assert_eq!(store.contact("a").unwrap().unread_count, 0);
        assert!(!store.open_conversation("missing"));
        assert_eq!(store.active_conversation(), Some("a"));
    }
}
