//! In-process event bus.
//!
//! Domain events drained from an aggregate at save time are dispatched here
//! synchronously, within the same request. There is no queue, no retry and no
//! delivery guarantee beyond "the listeners ran before the response was
//! sent".

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::event::DomainEvent;

#[async_trait]
pub trait EventListener: Send + Sync {
    async fn handle(&self, event: &DomainEvent);
}

#[derive(Clone)]
pub struct EventBus {
    listeners: Arc<Vec<Box<dyn EventListener>>>,
}

impl EventBus {
    pub fn new(listeners: Vec<Box<dyn EventListener>>) -> Self {
        Self {
            listeners: Arc::new(listeners),
        }
    }

    /// Bus without listeners, for tests and maintenance jobs that handle
    /// their own logging.
    pub fn noop() -> Self {
        Self::new(Vec::new())
    }

    pub async fn dispatch(&self, event: &DomainEvent) {
        for listener in self.listeners.iter() {
            listener.handle(event).await;
        }
    }

    pub async fn dispatch_all(&self, events: Vec<DomainEvent>) {
        for event in &events {
            self.dispatch(event).await;
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(vec![Box::new(AuditLogListener)])
    }
}

/// Logs every domain event at info level.
pub struct AuditLogListener;

#[async_trait]
impl EventListener for AuditLogListener {
    async fn handle(&self, event: &DomainEvent) {
        tracing::info!(event = event.name(), "domain event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct RecordingListener(Mutex<Vec<String>>);

    #[async_trait]
    impl EventListener for RecordingListener {
        async fn handle(&self, event: &DomainEvent) {
            self.0.lock().unwrap().push(event.name().to_string());
        }
    }

    #[tokio::test]
    async fn dispatches_events_to_all_listeners_in_order() {
        let recorder = Arc::new(RecordingListener(Mutex::new(Vec::new())));

        struct Forward(Arc<RecordingListener>);
        #[async_trait]
        impl EventListener for Forward {
            async fn handle(&self, event: &DomainEvent) {
                self.0.handle(event).await;
            }
        }

        let bus = EventBus::new(vec![Box::new(Forward(recorder.clone()))]);
        bus.dispatch_all(vec![
            DomainEvent::OrganizationRemoved {
                organization_id: Uuid::new_v4(),
            },
            DomainEvent::SpaceMarkedForRemoval {
                space_id: Uuid::new_v4(),
            },
        ])
        .await;

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec!["organization.removed", "space.marked_for_removal"]
        );
    }
}
