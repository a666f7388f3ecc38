//! In-process point ledger queue.
//!
//! Implements the `PointRecordQueue` port over an unbounded `tokio` mpsc
//! channel. Delivery is at-most-once: events accepted while the worker runs
//! are written to the ledger; events published after the worker stops are
//! rejected with a closed-queue error and the publisher decides whether to
//! log or fail.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::PointRecordService;
use crate::domain::point_record::PointEarnEvent;
use crate::domain::ports::{PointRecordQueue, PointRecordQueueError};

/// Channel-backed implementation of the point record queue port.
#[derive(Clone)]
pub struct MpscPointRecordQueue {
    sender: mpsc::UnboundedSender<PointEarnEvent>,
}

impl PointRecordQueue for MpscPointRecordQueue {
    fn publish_earn(&self, event: PointEarnEvent) -> Result<(), PointRecordQueueError> {
        self.sender
            .send(event)
            .map_err(|_| PointRecordQueueError::closed("ledger worker stopped"))
    }
}

/// Spawn the ledger worker and return the queue handle feeding it.
///
/// The worker drains events until every queue handle has been dropped, then
/// exits; awaiting the returned [`JoinHandle`] gives a clean shutdown point.
/// Append failures are logged and skipped so one bad event cannot stall the
/// ledger.
pub fn spawn_point_record_worker(
    service: PointRecordService,
) -> (MpscPointRecordQueue, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::unbounded_channel::<PointEarnEvent>();

    let handle = tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            let user_id = event.user_id;
            if let Err(error) = service.record_earn(event).await {
                warn!(%error, %user_id, "point record append failed, event dropped");
            }
        }
        info!("point record worker drained and stopped");
    });

    (MpscPointRecordQueue { sender }, handle)
}

/// Convenience wrapper returning the queue as a port trait object.
pub fn spawn_point_record_worker_arc(
    service: PointRecordService,
) -> (Arc<dyn PointRecordQueue>, JoinHandle<()>) {
    let (queue, handle) = spawn_point_record_worker(service);
    (Arc::new(queue), handle)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::point_record::PointRecordKind;
    use crate::domain::ports::{MockPointRecordRepository, PointRecordRepositoryError};
    use crate::domain::user::UserId;

    fn earn_event(user_id: UserId) -> PointEarnEvent {
        PointEarnEvent {
            user_id,
            point: 10,
            amount: 0,
            kind: PointRecordKind::Charged,
            message: "answered a common question".to_owned(),
        }
    }

    #[tokio::test]
    async fn published_events_reach_the_ledger() {
        let user_id = UserId::random();
        let mut records = MockPointRecordRepository::new();
        records
            .expect_append()
            .withf(move |record| record.user_id() == &user_id && record.point() == 10)
            .times(1)
            .returning(|_| Ok(()));

        let service = PointRecordService::new(Arc::new(records));
        let (queue, handle) = spawn_point_record_worker(service);

        queue.publish_earn(earn_event(user_id)).expect("publish succeeds");

        // Dropping the queue closes the channel so the worker drains and
        // exits, which proves the append expectation was met.
        drop(queue);
        handle.await.expect("worker exits cleanly");
    }

    #[tokio::test]
    async fn append_failures_do_not_stop_the_worker() {
        let mut records = MockPointRecordRepository::new();
        records
            .expect_append()
            .times(2)
            .returning(|_| Err(PointRecordRepositoryError::query("insert failed")));

        let service = PointRecordService::new(Arc::new(records));
        let (queue, handle) = spawn_point_record_worker(service);

        queue
            .publish_earn(earn_event(UserId::random()))
            .expect("first publish succeeds");
        queue
            .publish_earn(earn_event(UserId::random()))
            .expect("second publish succeeds");

        drop(queue);
        handle.await.expect("worker exits cleanly");
    }

    #[tokio::test]
    async fn publishing_without_a_worker_reports_a_closed_queue() {
        let (sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);
        let queue = MpscPointRecordQueue { sender };

        let error = queue
            .publish_earn(earn_event(UserId::random()))
            .expect_err("channel is closed");
        assert!(matches!(error, PointRecordQueueError::Closed { .. }));
    }
}
