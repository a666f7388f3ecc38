//! PostgreSQL-backed `FriendRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::friend::FriendSummary;
use crate::domain::ports::{FriendRepository, FriendRepositoryError};
use crate::domain::user::{DisplayName, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{friends, users};

/// Diesel-backed implementation of the friend repository port.
#[derive(Clone)]
pub struct DieselFriendRepository {
    pool: DbPool,
}

impl DieselFriendRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FriendRepositoryError {
    map_basic_pool_error(error, FriendRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FriendRepositoryError {
    map_basic_diesel_error(
        error,
        FriendRepositoryError::query,
        FriendRepositoryError::connection,
    )
}

fn row_to_summary(row: (Uuid, String)) -> Result<FriendSummary, FriendRepositoryError> {
    let (user_id, display_name) = row;
    let display_name = DisplayName::new(display_name)
        .map_err(|err| FriendRepositoryError::query(format!("invalid display name: {err}")))?;
    Ok(FriendSummary {
        user_id: UserId::from_uuid(user_id),
        display_name,
    })
}

#[async_trait]
impl FriendRepository for DieselFriendRepository {
    async fn list_friends_of_host(
        &self,
        host_id: &UserId,
    ) -> Result<Vec<FriendSummary>, FriendRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, String)> = friends::table
            .inner_join(users::table)
            .filter(friends::host_user_id.eq(host_id.as_uuid()))
            .order(friends::created_at.asc())
            .select((users::id, users::display_name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn row_conversion_produces_a_summary() {
        let id = Uuid::new_v4();
        let summary = row_to_summary((id, "Grace".to_owned())).expect("valid row converts");

        assert_eq!(summary.user_id.as_uuid(), &id);
        assert_eq!(summary.display_name.as_ref(), "Grace");
    }

    #[rstest]
    fn row_conversion_rejects_a_blank_display_name() {
        let error =
            row_to_summary((Uuid::new_v4(), "  ".to_owned())).expect_err("blank name must fail");
        assert!(matches!(error, FriendRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(repo_err, FriendRepositoryError::Connection { .. }));
    }
}
