use std::time::Duration;

use metrics::{counter, histogram};

use crate::models::Sentiment;

/// Metrics collection and management
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    // Store metrics
    pub messages_appended_total: &'static str,
    pub mutations_total: &'static str,
    pub visible_contacts: &'static str,
    pub operation_duration_seconds: &'static str,

    // Assistant metrics
    pub classifications_total: &'static str,
    pub escalations_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            messages_appended_total: "mindcare_chat_messages_appended_total",
            mutations_total: "mindcare_chat_mutations_total",
            visible_contacts: "mindcare_chat_visible_contacts",
            operation_duration_seconds: "mindcare_chat_operation_duration_seconds",

            classifications_total: "mindcare_chat_classifications_total",
            escalations_total: "mindcare_chat_escalations_total",
        }
    }
}

impl MetricsCollector {
    /// Record a message entering a conversation
    pub fn record_message_appended(&self, is_own: bool) {
        let direction = if is_own { "outgoing" } else { "incoming" };
        counter!(self.messages_appended_total, "direction" => direction).increment(1);
    }

    /// Record a store mutation and whether its id was known
    pub fn record_mutation(&self, operation: &'static str, found: bool) {
        let status = if found { "hit" } else { "miss" };
        counter!(self.mutations_total, "operation" => operation, "status" => status).increment(1);
    }

    /// Record the size of a computed contact list
    #[allow(clippy::cast_precision_loss)]
    pub fn record_visible_contacts(&self, count: usize) {
        histogram!(self.visible_contacts).record(count as f64);
    }

    /// Record how long a timed operation took
    pub fn record_operation_duration(&self, operation: &'static str, elapsed: Duration) {
        histogram!(self.operation_duration_seconds, "operation" => operation)
            .record(elapsed.as_secs_f64());
    }

    /// Record a classifier decision
    pub fn record_classification(&self, sentiment: Sentiment) {
        counter!(self.classifications_total, "sentiment" => sentiment.as_str()).increment(1);
        if sentiment == Sentiment::Urgent {
            counter!(self.escalations_total).increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_creation() {
        let collector = MetricsCollector::default();
        assert_eq!(
            collector.messages_appended_total,
            "mindcare_chat_messages_appended_total"
        );
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let collector = MetricsCollector::default();
        collector.record_message_appended(true);
        collector.record_mutation("toggle_pin", false);
        collector.record_visible_contacts(3);
        collector.record_operation_duration("list_contacts", Duration::from_millis(5));
        collector.record_classification(Sentiment::Urgent);
    }
}
