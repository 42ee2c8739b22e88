//! Event dispatch.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::advisor::PlacementAdvisor;
use crate::error::{EventError, EventResult};
use crate::event::{Event, Reply};
use crate::request::decode_request;

/// Event names the router understands.
pub mod names {
    pub const PRIORITIZE: &str = "scheduler.prioritize";
    pub const RESERVE: &str = "scheduler.reserve";
    pub const RELEASE: &str = "scheduler.release";
    pub const PING: &str = "ping";
}

/// Dispatches transport events to the placement advisor.
///
/// In-flight events are bounded by a fixed-size permit pool; excess
/// events queue until a worker frees up. Handlers share no mutable
/// state, so permits are the only coordination between them.
pub struct EventRouter {
    advisor: PlacementAdvisor,
    workers: Arc<Semaphore>,
}

impl EventRouter {
    pub fn new(advisor: PlacementAdvisor, worker_limit: usize) -> Self {
        Self {
            advisor,
            workers: Arc::new(Semaphore::new(worker_limit)),
        }
    }

    /// Handle one event and build its reply.
    pub async fn dispatch(&self, event: Event) -> EventResult<Reply> {
        let _permit = self
            .workers
            .acquire()
            .await
            .expect("worker pool semaphore closed");

        debug!(
            name = %event.name,
            id = %event.id,
            resource = %event.resource_id,
            "received event"
        );

        match event.name.as_str() {
            names::PRIORITIZE => {
                let request = decode_request(&event)?;
                let candidates = self.advisor.prioritize(request).await;
                Ok(Reply::to_event(
                    &event,
                    Some(json!({ "prioritizedCandidates": candidates })),
                ))
            }
            names::RESERVE => {
                self.advisor.reserve();
                Ok(Reply::to_event(&event, None))
            }
            names::RELEASE => {
                self.advisor.release();
                Ok(Reply::to_event(&event, None))
            }
            names::PING => {
                self.advisor.ping();
                Ok(Reply::to_event(&event, None))
            }
            other => Err(EventError::UnhandledEvent(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use berth_inventory::{HostRecord, HostSnapshot, SnapshotHandle};
    use berth_metrics::Counters;
    use serde_json::Value;

    async fn test_router(counters: Arc<Counters>) -> EventRouter {
        let snapshots = SnapshotHandle::new();
        snapshots
            .publish(HostSnapshot {
                version: "1".to_string(),
                hosts: vec![
                    HostRecord {
                        uuid: "h1".to_string(),
                        labels: [
                            ("zone".to_string(), "a".to_string()),
                            ("io.rancher.host.os".to_string(), "windows".to_string()),
                        ]
                        .into_iter()
                        .collect(),
                    },
                    HostRecord {
                        uuid: "h2".to_string(),
                        labels: [("io.rancher.host.os".to_string(), "windows".to_string())]
                            .into_iter()
                            .collect(),
                    },
                ],
            })
            .await;

        EventRouter::new(PlacementAdvisor::new(snapshots, counters), 4)
    }

    fn event(name: &str, data: Value) -> Event {
        Event {
            name: name.to_string(),
            id: "event-1".to_string(),
            resource_id: "42".to_string(),
            reply_to: "reply.1".to_string(),
            data: serde_json::from_value(data).unwrap(),
        }
    }

    #[tokio::test]
    async fn prioritize_replies_with_candidates() {
        let router = test_router(Arc::new(Counters::new())).await;

        let reply = router
            .dispatch(event(
                names::PRIORITIZE,
                serde_json::json!({
                    "schedulerRequest": {
                        "context": [{
                            "data": {"fields": {"labels": {
                                "io.rancher.scheduler.affinity:host_label": "zone=a"
                            }}}
                        }]
                    }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(reply.name, "reply.1");
        let data = reply.data.unwrap();
        assert_eq!(data["prioritizedCandidates"], serde_json::json!(["h1"]));
    }

    #[tokio::test]
    async fn prioritize_without_request_is_rejected() {
        let router = test_router(Arc::new(Counters::new())).await;

        let err = router
            .dispatch(event(names::PRIORITIZE, serde_json::json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::MissingRequest { .. }));
    }

    #[tokio::test]
    async fn reserve_and_release_acknowledge_without_data() {
        let counters = Arc::new(Counters::new());
        let router = test_router(counters.clone()).await;

        let reserve = router
            .dispatch(event(names::RESERVE, serde_json::json!({})))
            .await
            .unwrap();
        let release = router
            .dispatch(event(names::RELEASE, serde_json::json!({})))
            .await
            .unwrap();

        assert!(reserve.data.is_none());
        assert!(release.data.is_none());

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.event.reserve, 1);
        assert_eq!(snapshot.event.release, 1);
    }

    #[tokio::test]
    async fn ping_is_acknowledged() {
        let router = test_router(Arc::new(Counters::new())).await;

        let reply = router
            .dispatch(event(names::PING, serde_json::json!({})))
            .await
            .unwrap();
        assert!(reply.data.is_none());
    }

    #[tokio::test]
    async fn unknown_event_name_is_unhandled() {
        let router = test_router(Arc::new(Counters::new())).await;

        let err = router
            .dispatch(event("scheduler.compact", serde_json::json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::UnhandledEvent(name) if name == "scheduler.compact"));
    }

    #[tokio::test]
    async fn dispatch_handles_concurrent_events() {
        let router = Arc::new(test_router(Arc::new(Counters::new())).await);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let router = router.clone();
            handles.push(tokio::spawn(async move {
                router
                    .dispatch(event(names::RESERVE, serde_json::json!({})))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }
}
