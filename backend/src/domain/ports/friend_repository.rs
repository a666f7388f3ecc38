//! Port for friend directory reads.

use async_trait::async_trait;

use crate::domain::friend::FriendSummary;
use crate::domain::user::UserId;

/// Errors raised by friend repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FriendRepositoryError {
    /// Repository connection could not be established.
    #[error("friend repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("friend repository query failed: {message}")]
    Query { message: String },
}

impl FriendRepositoryError {
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

/// Port for listing the friends of a host user. Read-only for this core.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// List the friends of `host_id` as pickable candidates.
    async fn list_friends_of_host(
        &self,
        host_id: &UserId,
    ) -> Result<Vec<FriendSummary>, FriendRepositoryError>;
}

/// Fixture implementation returning an empty friend list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFriendRepository;

#[async_trait]
impl FriendRepository for FixtureFriendRepository {
    async fn list_friends_of_host(
        &self,
        _host_id: &UserId,
    ) -> Result<Vec<FriendSummary>, FriendRepositoryError> {
        Ok(Vec::new())
    }
}
