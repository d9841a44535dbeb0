//! Data models for contacts, conversations and messages
//!
//! This module contains the value types shared by the store, the filter and
//! sort policies, the seeding code and the assistant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Contact id of the automated assistant. Always present, always first.
pub const ASSISTANT_ID: &str = "ai-assistant";

/// Urgency attached to a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Routine follow-up
    Low,
    /// Default priority
    #[default]
    Medium,
    /// Needs attention soon
    High,
    /// Needs attention now
    Urgent,
}

impl Priority {
    /// Lowercase label used in configuration and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(ChatError::UnknownPriority(other.to_string())),
        }
    }
}

/// Role of the authenticated viewer, supplied by the session collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Public employee using the platform as a patient
    Servidor,
    /// Psychologist
    Psicologo,
    /// Physician
    Medico,
    /// Platform administrator
    Admin,
}

impl Role {
    /// Session role string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Servidor => "servidor",
            Self::Psicologo => "psicologo",
            Self::Medico => "medico",
            Self::Admin => "admin",
        }
    }

    /// True for roles that treat patients and therefore see the roster
    #[must_use]
    pub const fn is_clinical(&self) -> bool {
        matches!(self, Self::Psicologo | Self::Medico)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "servidor" => Ok(Self::Servidor),
            "psicologo" | "psicólogo" => Ok(Self::Psicologo),
            "medico" | "médico" => Ok(Self::Medico),
            "admin" => Ok(Self::Admin),
            other => Err(ChatError::UnknownRole(other.to_string())),
        }
    }
}

/// A chat counterpart: staff member, patient or the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique id, equal to the id of the owning conversation
    pub id: String,
    /// Display name
    pub name: String,
    /// Role label shown in the list ("Psicólogo", "Paciente", ...)
    pub role: String,
    /// Clinical specialty, if any
    pub specialty: Option<String>,
    /// Presence flag
    pub online: bool,
    /// Human readable "last seen" text
    pub last_seen: Option<String>,
    /// True if this contact is a patient
    pub is_patient: bool,
    /// Reference into the external patient registry
    pub patient_id: Option<String>,
    /// Triage priority
    pub priority: Priority,
    /// Incoming messages not yet read
    pub unread_count: u32,
    /// Content of the most recent message
    pub last_message: Option<String>,
    /// Timestamp of the most recent message
    pub last_message_time: Option<DateTime<Utc>>,
}

impl Contact {
    /// Create an offline contact with no thread history
    #[must_use]
    pub fn new(id: &str, name: &str, role: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            specialty: None,
            online: false,
            last_seen: None,
            is_patient: false,
            patient_id: None,
            priority: Priority::default(),
            unread_count: 0,
            last_message: None,
            last_message_time: None,
        }
    }

    /// True for the automated assistant
    #[must_use]
    pub fn is_assistant(&self) -> bool {
        self.id == ASSISTANT_ID
    }
}

/// Kind of message content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text
    #[default]
    Text,
    /// File attachment
    File,
    /// Appointment proposal or confirmation
    Appointment,
    /// Generated by the platform
    System,
}

/// Coarse emotional classification of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Crisis or self-harm language
    Urgent,
    /// Distress
    Negative,
    /// Wellbeing
    Positive,
    /// Nothing recognised
    Neutral,
}

impl Sentiment {
    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Negative => "negative",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classification attached to messages written by the assistant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnnotation {
    /// Detected sentiment of the message being answered
    pub sentiment: Sentiment,
    /// Fixed confidence associated with the sentiment
    pub confidence: f32,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message id
    pub id: String,
    /// Id of the author
    pub sender_id: String,
    /// Display name of the author
    pub sender_name: String,
    /// Message body
    pub content: String,
    /// When the message was sent
    pub timestamp: DateTime<Utc>,
    /// Kind of content
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// True if authored by the current viewer
    pub is_own: bool,
    /// Present on assistant replies
    pub ai_annotation: Option<SentimentAnnotation>,
}

impl Message {
    /// Plain text message
    #[must_use]
    pub fn text(
        id: &str,
        sender_id: &str,
        sender_name: &str,
        content: &str,
        timestamp: DateTime<Utc>,
        is_own: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: sender_name.to_string(),
            content: content.to_string(),
            timestamp,
            message_type: MessageType::Text,
            is_own,
            ai_annotation: None,
        }
    }
}

/// Message thread and display flags of one contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Equal to the contact id
    pub id: String,
    /// Contact this thread belongs to
    pub contact_id: String,
    /// Messages in insertion (chronological) order
    pub messages: Vec<Message>,
    /// Pinned to the top of the list
    pub is_pinned: bool,
    /// Hidden from the main list by the UI
    pub is_archived: bool,
    /// Timestamp of the latest message, or of creation
    pub last_activity: DateTime<Utc>,
}

impl Conversation {
    /// Empty conversation for a contact
    #[must_use]
    pub fn new(contact_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: contact_id.to_string(),
            contact_id: contact_id.to_string(),
            messages: Vec::new(),
            is_pinned: false,
            is_archived: false,
            last_activity: created_at,
        }
    }
}

/// Categorical filters applied on top of the text search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFilters {
    /// Only contacts currently online
    pub online: bool,
    /// Exact role label
    pub role: Option<String>,
    /// Exact priority
    pub priority: Option<Priority>,
}

impl ContactFilters {
    /// True when no filter dimension is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.online && self.role.as_deref().map_or(true, str::is_empty) && self.priority.is_none()
    }
}

/// Patient as provided by the external registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Registry id
    pub id: String,
    /// Full name
    pub name: String,
    /// Avatar URL or initials
    #[serde(default)]
    pub avatar: Option<String>,
    /// Priority assigned by triage, if any
    #[serde(default)]
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_accepts_accents() {
        assert_eq!("Psicólogo".parse::<Role>().unwrap(), Role::Psicologo);
        assert_eq!("MEDICO".parse::<Role>().unwrap(), Role::Medico);
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn test_priority_round_trips_through_display() {
        for priority in [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent] {
            assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
        }
    }

    #[test]
    fn test_empty_role_filter_counts_as_inactive() {
        let filters = ContactFilters {
            role: Some(String::new()),
            ..ContactFilters::default()
        };
        assert!(filters.is_empty());
    }

    #[test]
    fn test_message_serializes_type_field() {
        let message = Message::text("m1", "a", "A", "oi", Utc::now(), true);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["isOwn"], true);
    }
}
