//! Port for publishing point-earn events to the ledger writer.
//!
//! Publication is decoupled from the triggering transaction's call stack:
//! the answer service publishes after its own writes succeed, and the
//! handler appends the ledger entry off the request path. Delivery is
//! in-process and at-most-once; the handler does not need redelivery
//! idempotency under that transport.

use crate::domain::point_record::PointEarnEvent;

/// Errors raised when an event cannot be handed to the queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointRecordQueueError {
    /// The queue is closed; the worker has shut down.
    #[error("point record queue closed: {message}")]
    Closed { message: String },
}

impl PointRecordQueueError {
    /// Create a closed-queue error with the given message.
    pub fn closed(message: impl Into<String>) -> Self {
        Self::Closed {
            message: message.into(),
        }
    }
}

/// Port for the fire-and-forget earn notification.
#[cfg_attr(test, mockall::automock)]
pub trait PointRecordQueue: Send + Sync {
    /// Hand an earn event to the ledger writer without blocking.
    fn publish_earn(&self, event: PointEarnEvent) -> Result<(), PointRecordQueueError>;
}

/// Fixture queue that discards events.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePointRecordQueue;

impl PointRecordQueue for FixturePointRecordQueue {
    fn publish_earn(&self, _event: PointEarnEvent) -> Result<(), PointRecordQueueError> {
        Ok(())
    }
}
