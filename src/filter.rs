//! Search and categorical filtering of the contact list.

use crate::models::{Contact, ContactFilters};

/// True if the contact passes the text search and every active filter.
///
/// `query_lower` must already be lower-cased; an empty query matches everything.
#[must_use]
pub fn matches(contact: &Contact, query_lower: &str, filters: &ContactFilters) -> bool {
    let text_match = query_lower.is_empty()
        || contact.name.to_lowercase().contains(query_lower)
        || contact.role.to_lowercase().contains(query_lower);
    if !text_match {
        return false;
    }

    if filters.online && !contact.online {
        return false;
    }

    if let Some(role) = filters.role.as_deref().filter(|r| !r.is_empty()) {
        if contact.role != role {
            return false;
        }
    }

    if let Some(priority) = filters.priority {
        if contact.priority != priority {
            return false;
        }
    }

    true
}

/// Visible subset of `contacts`, in input order.
#[must_use]
pub fn filter_contacts<'a>(
    contacts: &'a [Contact],
    search_query: &str,
    filters: &ContactFilters,
) -> Vec<&'a Contact> {
    if search_query.is_empty() && filters.is_empty() {
        return contacts.iter().collect();
    }

    let query_lower = search_query.to_lowercase();
    contacts
        .iter()
        .filter(|c| matches(c, &query_lower, filters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn contact(id: &str, name: &str, role: &str) -> Contact {
        Contact::new(id, name, role)
    }

    #[test]
    fn test_query_matches_role_label() {
        let contacts = vec![
            contact("1", "Ana", "Psicólogo"),
            contact("2", "Bruno", "Médico"),
        ];
        let found = filter_contacts(&contacts, "PSIC", &ContactFilters::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut a = contact("1", "Ana", "Paciente");
        a.online = true;
        a.priority = Priority::High;
        let mut b = contact("2", "Beatriz", "Paciente");
        b.online = true;
        let contacts = vec![a, b];

        let filters = ContactFilters {
            online: true,
            role: Some("Paciente".to_string()),
            priority: Some(Priority::High),
        };
        let found = filter_contacts(&contacts, "", &filters);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_role_filter_is_exact() {
        let contacts = vec![contact("1", "Ana", "Psicólogo Clínico")];
        let filters = ContactFilters {
            role: Some("Psicólogo".to_string()),
            ..ContactFilters::default()
        };
        assert!(filter_contacts(&contacts, "", &filters).is_empty());
    }
}
