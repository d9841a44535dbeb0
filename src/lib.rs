//! Mindcare Chat - Clinical Conversation Registry
//!
//! A Rust library holding the chat state of a mental-health care platform:
//! contacts, their conversations, and a scripted triage assistant.
//!
//! # Features
//!
//! - Role-based seeding of contacts (employees, psychologists, physicians, admins)
//! - Search and categorical filters over the contact list
//! - Deterministic display ordering (assistant, pinned, unread, recency)
//! - Read/pin/archive/append mutations keyed by id
//! - Keyword-based sentiment classification with canned replies

/// Scripted assistant replies
pub mod assistant;
/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Contact search and filters
pub mod filter;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Per-session contact sets
pub mod seed;
/// Sentiment classification
pub mod sentiment;
/// Display ordering of contacts
pub mod sort;
/// Conversation registry
pub mod store;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use assistant::{converse, AssistantReply, AssistantResponder};
pub use error::{ChatError, Result};
pub use models::{Contact, ContactFilters, Conversation, Message, Priority, Role, Sentiment};
pub use sentiment::{classify, SentimentResult};
pub use store::ChatStore;
