//! In-process publish/subscribe for portal domain events.
//!
//! Handlers publish a [`PortalEvent`] after their database work has
//! committed; the notification dispatcher consumes them on its own task.
//! Delivery is best effort by contract: a publish never blocks the request
//! that triggered it, and a full buffer drops the oldest events rather
//! than pushing back on HTTP handlers.

use chrono::{DateTime, Utc};
use nextif_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

/// Published after a task has been created and assigned.
///
/// Payload keys: `task_id`, `title`, `due_date`, `assignee_ids`.
pub const EVENT_TASK_ASSIGNED: &str = "task.assigned";

/// Published after an admin has verified a submission.
///
/// Payload keys: `submission_id`, `task_id`, `task_title`, `ambassador_id`,
/// `status`, `feedback`, `new_due_date`.
pub const EVENT_SUBMISSION_VERIFIED: &str = "submission.verified";

// ---------------------------------------------------------------------------
// PortalEvent
// ---------------------------------------------------------------------------

/// Envelope for one thing that happened on the portal.
///
/// Every event carries a dot-separated name (see the `EVENT_*` constants),
/// an optional pointer at the row it concerns, the admin who caused it,
/// and a JSON payload whose shape is agreed between the publishing handler
/// and the dispatcher that consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalEvent {
    /// Which kind of event this is, e.g. [`EVENT_TASK_ASSIGNED`].
    pub event_type: String,

    /// Table-ish name of the row the event is about (`"task"`,
    /// `"submission"`), when there is one.
    pub source_entity_type: Option<String>,

    /// Id of that row.
    pub source_entity_id: Option<DbId>,

    /// Admin whose action produced the event. `None` for system-originated
    /// events.
    pub actor_id: Option<DbId>,

    /// Event-specific data. See the `EVENT_*` constants for the keys each
    /// event carries.
    pub payload: serde_json::Value,

    /// UTC instant the event was built, not when it was delivered.
    pub timestamp: DateTime<Utc>,
}

impl PortalEvent {
    /// Build a bare event of the given kind.
    ///
    /// Source, actor, and payload start empty; chain the `with_*` methods
    /// to fill them in.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_id: None,
            payload: serde_json::Value::Object(serde_json::Map::new()),
            timestamp: Utc::now(),
        }
    }

    /// Record which row the event is about.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Record the admin whose action produced the event.
    pub fn with_actor(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Replace the payload wholesale.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// How many events the channel buffers per subscriber before the oldest
/// ones start getting overwritten.
const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out hub connecting event publishers to their subscribers.
///
/// A thin wrapper over [`broadcast::Sender`]: every subscriber sees every
/// event, and a subscriber that falls more than the buffer capacity behind
/// observes `RecvError::Lagged` instead of stalling publishers.
///
/// ```
/// use nextif_events::{EventBus, PortalEvent, EVENT_TASK_ASSIGNED};
///
/// let bus = EventBus::default();
/// let _inbox = bus.subscribe();
/// bus.publish(PortalEvent::new(EVENT_TASK_ASSIGNED).with_source("task", 1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PortalEvent>,
}

impl EventBus {
    /// Build a bus whose per-subscriber buffer holds `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Hand an event to every current subscriber.
    ///
    /// Fire and forget: with zero subscribers the event simply evaporates,
    /// which is the correct outcome for best-effort notifications.
    pub fn publish(&self, event: PortalEvent) {
        let name = event.event_type.clone();
        match self.sender.send(event) {
            Ok(subscribers) => {
                tracing::trace!(event = %name, subscribers, "published portal event");
            }
            Err(_) => {
                tracing::trace!(event = %name, "no subscribers, event dropped");
            }
        }
    }

    /// Open a fresh receiver that will see everything published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::RecvError;

    #[tokio::test]
    async fn assignment_event_reaches_a_subscriber_intact() {
        let bus = EventBus::default();
        let mut inbox = bus.subscribe();

        bus.publish(
            PortalEvent::new(EVENT_TASK_ASSIGNED)
                .with_source("task", 11)
                .with_actor(3)
                .with_payload(serde_json::json!({
                    "title": "Campus info session",
                    "assignee_ids": [5, 9],
                })),
        );

        let event = inbox.recv().await.unwrap();
        assert_eq!(event.event_type, EVENT_TASK_ASSIGNED);
        assert_eq!(event.source_entity_type.as_deref(), Some("task"));
        assert_eq!(event.source_entity_id, Some(11));
        assert_eq!(event.actor_id, Some(3));
        assert_eq!(event.payload["title"], "Campus info session");
        assert_eq!(event.payload["assignee_ids"][1], 9);
    }

    #[tokio::test]
    async fn each_subscriber_gets_its_own_copy_of_every_event() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(PortalEvent::new(EVENT_TASK_ASSIGNED));
        bus.publish(PortalEvent::new(EVENT_SUBMISSION_VERIFIED));

        for inbox in [&mut first, &mut second] {
            assert_eq!(inbox.recv().await.unwrap().event_type, EVENT_TASK_ASSIGNED);
            assert_eq!(
                inbox.recv().await.unwrap().event_type,
                EVENT_SUBMISSION_VERIFIED
            );
        }
    }

    #[test]
    fn publishing_with_nobody_listening_is_a_quiet_no_op() {
        let bus = EventBus::default();
        bus.publish(PortalEvent::new("nobody.cares"));
    }

    #[tokio::test]
    async fn slow_subscriber_sees_lag_then_the_latest_event() {
        let bus = EventBus::new(1);
        let mut inbox = bus.subscribe();

        bus.publish(PortalEvent::new("first"));
        bus.publish(PortalEvent::new("second"));

        match inbox.recv().await {
            Err(RecvError::Lagged(missed)) => assert_eq!(missed, 1),
            other => panic!("expected a lag error, got {other:?}"),
        }
        assert_eq!(inbox.recv().await.unwrap().event_type, "second");
    }

    #[test]
    fn bare_event_has_no_source_actor_or_payload() {
        let event = PortalEvent::new("bare.event");

        assert_eq!(event.event_type, "bare.event");
        assert!(event.source_entity_type.is_none());
        assert!(event.source_entity_id.is_none());
        assert!(event.actor_id.is_none());
        assert_eq!(event.payload, serde_json::json!({}));
        assert!(event.timestamp <= Utc::now());
    }
}
