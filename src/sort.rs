//! Ordering of the visible contact list.
//!
//! Precedence, highest first: the assistant, pinned conversations, contacts
//! with unread messages, then most recent activity.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Contact, Conversation};

fn is_pinned(contact: &Contact, conversations: &HashMap<String, Conversation>) -> bool {
    conversations
        .get(&contact.id)
        .is_some_and(|c| c.is_pinned)
}

fn last_message_millis(contact: &Contact) -> i64 {
    contact
        .last_message_time
        .map_or(0, |t| t.timestamp_millis())
}

/// Compare two contacts for display order.
#[must_use]
pub fn compare_contacts(
    a: &Contact,
    b: &Contact,
    conversations: &HashMap<String, Conversation>,
) -> Ordering {
    match (a.is_assistant(), b.is_assistant()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    // `true` sorts first, hence the reversed operands
    is_pinned(b, conversations)
        .cmp(&is_pinned(a, conversations))
        .then_with(|| (b.unread_count > 0).cmp(&(a.unread_count > 0)))
        .then_with(|| last_message_millis(b).cmp(&last_message_millis(a)))
}

/// Stable sort of `contacts` by [`compare_contacts`].
pub fn sort_contacts(contacts: &mut [&Contact], conversations: &HashMap<String, Conversation>) {
    contacts.sort_by(|a, b| compare_contacts(a, b, conversations));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ASSISTANT_ID;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_unread_beats_recency() {
        let mut old_unread = Contact::new("a", "A", "Paciente");
        old_unread.unread_count = 2;
        old_unread.last_message_time = Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        let mut new_read = Contact::new("b", "B", "Paciente");
        new_read.last_message_time = Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());

        let conversations = HashMap::new();
        let mut list = vec![&new_read, &old_unread];
        sort_contacts(&mut list, &conversations);
        assert_eq!(list[0].id, "a");
    }

    #[test]
    fn test_missing_timestamp_sorts_last() {
        let never = Contact::new("never", "N", "Paciente");
        let mut once = Contact::new("once", "O", "Paciente");
        once.last_message_time = Some(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap());

        let conversations = HashMap::new();
        let mut list = vec![&never, &once];
        sort_contacts(&mut list, &conversations);
        assert_eq!(list[0].id, "once");
    }

    #[test]
    fn test_assistant_beats_pinned_unread() {
        let assistant = Contact::new(ASSISTANT_ID, "Assistente", "Assistente IA");
        let mut busy = Contact::new("busy", "B", "Médico");
        busy.unread_count = 9;
        let mut conversations = HashMap::new();
        let mut pinned = Conversation::new("busy", Utc::now());
        pinned.is_pinned = true;
        conversations.insert("busy".to_string(), pinned);

        assert_eq!(compare_contacts(&assistant, &busy, &conversations), Ordering::Less);
        assert_eq!(compare_contacts(&busy, &assistant, &conversations), Ordering::Greater);
    }
}
