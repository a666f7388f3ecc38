//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{DisplayName, Points, User, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| UserRepositoryError::query(format!("invalid display name: {err}")))?;
    let points = Points::new(row.points)
        .map_err(|err| UserRepositoryError::query(format!("invalid point balance: {err}")))?;
    Ok(User::new(UserId::from_uuid(row.id), display_name, points))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn valid_row() -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            display_name: "Ada".to_owned(),
            points: 40,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error(#[values("refused", "timed out")] message: &str) {
        let repo_err = map_pool_error(PoolError::checkout(message));

        assert!(matches!(repo_err, UserRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains(message));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, UserRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_produces_a_valid_user(valid_row: UserRow) {
        let expected_id = valid_row.id;
        let user = row_to_user(valid_row).expect("valid row converts");

        assert_eq!(user.id().as_uuid(), &expected_id);
        assert_eq!(user.points().value(), 40);
    }

    #[rstest]
    fn row_conversion_rejects_a_negative_balance(mut valid_row: UserRow) {
        valid_row.points = -1;

        let error = row_to_user(valid_row).expect_err("negative balance must fail");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
        assert!(error.to_string().contains("point balance"));
    }

    #[rstest]
    fn row_conversion_rejects_a_blank_display_name(mut valid_row: UserRow) {
        valid_row.display_name = "  ".to_owned();

        let error = row_to_user(valid_row).expect_err("blank name must fail");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
        assert!(error.to_string().contains("display name"));
    }
}
