//! PostgreSQL-backed `PointRecordRepository` implementation using Diesel ORM.
//!
//! The ledger is append-only; this adapter only ever inserts.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::point_record::PointRecord;
use crate::domain::ports::{PointRecordRepository, PointRecordRepositoryError};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewPointRecordRow;
use super::pool::{DbPool, PoolError};
use super::schema::point_records;

/// Diesel-backed implementation of the point record repository port.
#[derive(Clone)]
pub struct DieselPointRecordRepository {
    pool: DbPool,
}

impl DieselPointRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PointRecordRepositoryError {
    map_basic_pool_error(error, PointRecordRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PointRecordRepositoryError {
    map_basic_diesel_error(
        error,
        PointRecordRepositoryError::query,
        PointRecordRepositoryError::connection,
    )
}

fn record_to_new_row(record: &PointRecord) -> NewPointRecordRow<'_> {
    NewPointRecordRow {
        id: record.id(),
        user_id: *record.user_id().as_uuid(),
        point: record.point(),
        amount: record.amount(),
        kind: record.kind().as_str(),
        message: record.message(),
        created_at: record.created_at(),
    }
}

#[async_trait]
impl PointRecordRepository for DieselPointRecordRepository {
    async fn append(&self, record: &PointRecord) -> Result<(), PointRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(point_records::table)
            .values(record_to_new_row(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::point_record::PointRecordKind;
    use crate::domain::user::UserId;

    #[rstest]
    fn record_maps_to_an_insert_row() {
        let record = PointRecord::new(
            Uuid::new_v4(),
            UserId::random(),
            10,
            0,
            PointRecordKind::Charged,
            "answered a common question",
            Utc::now(),
        );

        let row = record_to_new_row(&record);
        assert_eq!(row.point, 10);
        assert_eq!(row.amount, 0);
        assert_eq!(row.kind, "charged");
        assert_eq!(row.message, "answered a common question");
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(
            repo_err,
            PointRecordRepositoryError::Connection { .. }
        ));
    }
}
