//! Port for appending to the point record ledger.

use async_trait::async_trait;

use crate::domain::point_record::PointRecord;

/// Errors raised by point record repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointRecordRepositoryError {
    /// Repository connection could not be established.
    #[error("point record repository connection failed: {message}")]
    Connection { message: String },
    /// Append failed during execution.
    #[error("point record repository query failed: {message}")]
    Query { message: String },
}

impl PointRecordRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the append-only ledger. Records are never updated or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointRecordRepository: Send + Sync {
    /// Append one ledger entry.
    async fn append(&self, record: &PointRecord) -> Result<(), PointRecordRepositoryError>;
}

/// Fixture implementation that discards ledger writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePointRecordRepository;

#[async_trait]
impl PointRecordRepository for FixturePointRecordRepository {
    async fn append(&self, _record: &PointRecord) -> Result<(), PointRecordRepositoryError> {
        Ok(())
    }
}
