//! Scripted assistant replies.
//!
//! The assistant classifies what the viewer wrote, answers with a canned
//! response for that sentiment and offers follow-up suggestions. Urgent
//! messages are logged as escalations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{Message, MessageType, Sentiment, SentimentAnnotation, ASSISTANT_ID};
use crate::sentiment::{classify, response_for, suggestions_for, ResponseSelector, SentimentResult};
use crate::store::ChatStore;

/// Reply produced for one viewer message
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    /// Message authored by the assistant
    pub message: Message,
    /// Classification of the viewer's text
    pub classification: SentimentResult,
    /// Follow-up actions to offer
    pub suggestions: Vec<String>,
}

/// Builds assistant replies
pub struct AssistantResponder {
    display_name: String,
    selector: Box<dyn ResponseSelector>,
    metrics: MetricsCollector,
    next_seq: u64,
}

impl AssistantResponder {
    /// Responder picking replies through `selector`
    #[must_use]
    pub fn new(display_name: &str, selector: Box<dyn ResponseSelector>) -> Self {
        Self {
            display_name: display_name.to_string(),
            selector,
            metrics: MetricsCollector::default(),
            next_seq: 0,
        }
    }

    /// Classify `user_text` and build the assistant's answer, timestamped `now`
    pub fn reply(&mut self, user_text: &str, now: DateTime<Utc>) -> AssistantReply {
        let classification = classify(user_text);
        self.metrics.record_classification(classification.sentiment);

        let content = response_for(classification.sentiment, self.selector.as_mut());
        self.next_seq += 1;

        let message = Message {
            id: format!("ai-{}", self.next_seq),
            sender_id: ASSISTANT_ID.to_string(),
            sender_name: self.display_name.clone(),
            content: content.to_string(),
            timestamp: now,
            message_type: MessageType::Text,
            is_own: false,
            ai_annotation: Some(SentimentAnnotation {
                sentiment: classification.sentiment,
                confidence: classification.confidence,
            }),
        };

        AssistantReply {
            message,
            classification,
            suggestions: suggestions_for(classification.sentiment)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Send viewer text to the assistant and append its reply.
///
/// Both messages go through the store's mutation path. Returns `None` when the
/// store has no assistant conversation.
pub fn converse(
    store: &mut ChatStore,
    responder: &mut AssistantResponder,
    viewer_id: &str,
    viewer_name: &str,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Option<AssistantReply>> {
    let Some(sent) = store.send_text(ASSISTANT_ID, viewer_id, viewer_name, text, now)? else {
        return Ok(None);
    };

    let reply = responder.reply(&sent.content, now);
    if reply.classification.sentiment == Sentiment::Urgent {
        warn!(
            viewer_id,
            confidence = reply.classification.confidence,
            "Urgent message detected, escalating to care team"
        );
    } else {
        info!(
            sentiment = %reply.classification.sentiment,
            "Assistant replied"
        );
    }

    store.add_message(ASSISTANT_ID, reply.message.clone());
    Ok(Some(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::FixedSelector;

    #[test]
    fn test_reply_carries_annotation() {
        let mut responder = AssistantResponder::new("Assistente", Box::new(FixedSelector(0)));
        let reply = responder.reply("estou triste", Utc::now());
        let annotation = reply.message.ai_annotation.unwrap();
        assert_eq!(annotation.sentiment, Sentiment::Negative);
        assert!(!reply.message.is_own);
        assert_eq!(reply.message.sender_id, ASSISTANT_ID);
        assert!(!reply.suggestions.is_empty());
    }

    #[test]
    fn test_reply_ids_are_sequential() {
        let mut responder = AssistantResponder::new("Assistente", Box::new(FixedSelector(0)));
        let first = responder.reply("oi", Utc::now());
        let second = responder.reply("oi", Utc::now());
        assert_ne!(first.message.id, second.message.id);
    }
}
