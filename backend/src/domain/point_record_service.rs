//! Ledger writer consuming point-earn events.
//!
//! Runs off the request path: the queue worker hands each event here and
//! this service turns it into an append-only ledger row.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::point_record::{PointEarnEvent, PointRecord};
use crate::domain::ports::{PointRecordRepository, PointRecordRepositoryError};

/// Writes point-earn events into the ledger.
#[derive(Clone)]
pub struct PointRecordService {
    records: Arc<dyn PointRecordRepository>,
}

impl PointRecordService {
    /// Create the service over its ledger store.
    pub fn new(records: Arc<dyn PointRecordRepository>) -> Self {
        Self { records }
    }

    /// Append one ledger entry for an earn event.
    pub async fn record_earn(&self, event: PointEarnEvent) -> Result<(), PointRecordRepositoryError> {
        let record = PointRecord::new(
            Uuid::new_v4(),
            event.user_id,
            event.point,
            event.amount,
            event.kind,
            event.message,
            Utc::now(),
        );
        self.records.append(&record).await
    }
}
