//! PostgreSQL-backed `AnswerRepository` implementation using Diesel ORM.
//!
//! The two mutating operations run inside a database transaction so the
//! answer write and the balance change commit together. Balance and counter
//! guards are expressed in the UPDATE filters; a guard that matches no row
//! rolls the whole transaction back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::answer::{Answer, AnswerDraft};
use crate::domain::ports::{AnswerPage, AnswerRepository, AnswerRepositoryError};
use crate::domain::reward;
use crate::domain::user::UserId;

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AnswerRow, NewAnswerRow};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, users};

/// Diesel-backed implementation of the answer repository port.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AnswerRepositoryError {
    map_basic_pool_error(error, AnswerRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AnswerRepositoryError {
    map_basic_diesel_error(
        error,
        AnswerRepositoryError::query,
        AnswerRepositoryError::connection,
    )
}

/// Transaction-local error carrying guard failures out of the closure.
#[derive(Debug, thiserror::Error)]
enum TxError {
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
    #[error("balance guard matched no row")]
    InsufficientPoints,
    #[error("counter guard matched no row")]
    HintCountConflict,
    #[error("{0}")]
    MissingRow(&'static str),
}

fn map_tx_error(error: TxError, price: i64, expected: u8) -> AnswerRepositoryError {
    match error {
        TxError::Diesel(err) => map_diesel_error(err),
        TxError::InsufficientPoints => AnswerRepositoryError::InsufficientPoints { price },
        TxError::HintCountConflict => AnswerRepositoryError::HintCountConflict { expected },
        TxError::MissingRow(message) => AnswerRepositoryError::query(message),
    }
}

fn hint_count_to_row(count: u8) -> i16 {
    i16::from(count)
}

fn row_hint_count(raw: i16) -> Result<u8, AnswerRepositoryError> {
    u8::try_from(raw)
        .map_err(|_| AnswerRepositoryError::query(format!("invalid hint count {raw}")))
}

/// Convert a database row into a validated domain answer.
fn row_to_answer(row: AnswerRow) -> Result<Answer, AnswerRepositoryError> {
    let hint_count = row_hint_count(row.hint_count)?;
    Answer::new(
        AnswerDraft {
            id: row.id,
            question_id: row.question_id,
            picker_id: UserId::from_uuid(row.picker_id),
            picked_id: UserId::from_uuid(row.picked_id),
            hint_count,
            created_at: row.created_at,
        },
        reward::MAX_HINT_COUNT,
    )
    .map_err(|err| AnswerRepositoryError::query(err.to_string()))
}

fn answer_to_new_row(answer: &Answer) -> NewAnswerRow {
    NewAnswerRow {
        id: answer.id(),
        question_id: answer.question_id(),
        picker_id: *answer.picker_id().as_uuid(),
        picked_id: *answer.picked_id().as_uuid(),
        hint_count: hint_count_to_row(answer.hint_count()),
        created_at: answer.created_at(),
    }
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn find_by_id(
        &self,
        answer_id: &Uuid,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = answers::table
            .filter(answers::id.eq(answer_id))
            .select(AnswerRow::as_select())
            .first::<AnswerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_answer).transpose()
    }

    async fn create_with_reward(
        &self,
        answer: &Answer,
        reward_points: i64,
    ) -> Result<(), AnswerRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let new_row = answer_to_new_row(answer);
        let picker_id = *answer.picker_id().as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Answer insert and reward credit commit together or not at all.
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(answers::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;

                let credited = diesel::update(users::table.filter(users::id.eq(picker_id)))
                    .set(users::points.eq(users::points + reward_points))
                    .execute(conn)
                    .await?;
                if credited != 1 {
                    return Err(TxError::MissingRow("picker row missing during reward"));
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, 0, 0))
    }

    async fn purchase_hint(
        &self,
        answer_id: &Uuid,
        buyer_id: &UserId,
        price: i64,
        expected_hint_count: u8,
    ) -> Result<(), AnswerRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let answer_id = *answer_id;
        let buyer_id = *buyer_id.as_uuid();
        let expected_row_count = hint_count_to_row(expected_hint_count);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Both UPDATEs carry their guard in the filter: the debit only
        // matches while the balance covers the price, and the increment only
        // matches while the counter still holds the value the service read.
        conn.transaction(|conn| {
            async move {
                let debited = diesel::update(
                    users::table
                        .filter(users::id.eq(buyer_id))
                        .filter(users::points.ge(price)),
                )
                .set(users::points.eq(users::points - price))
                .execute(conn)
                .await?;
                if debited != 1 {
                    return Err(TxError::InsufficientPoints);
                }

                let advanced = diesel::update(
                    answers::table
                        .filter(answers::id.eq(answer_id))
                        .filter(answers::hint_count.eq(expected_row_count)),
                )
                .set(answers::hint_count.eq(answers::hint_count + 1))
                .execute(conn)
                .await?;
                if advanced != 1 {
                    return Err(TxError::HintCountConflict);
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, price, expected_hint_count))
    }

    async fn list_page_by_picker(
        &self,
        picker_id: &UserId,
        page: PageRequest,
    ) -> Result<AnswerPage, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = answers::table
            .filter(answers::picker_id.eq(picker_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<AnswerRow> = answers::table
            .filter(answers::picker_id.eq(picker_id.as_uuid()))
            .order((answers::created_at.asc(), answers::id.asc()))
            .offset(page.offset())
            .limit(page.limit())
            .select(AnswerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let answers = rows
            .into_iter()
            .map(row_to_answer)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnswerPage {
            answers,
            total_elements: u64::try_from(total).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> AnswerRow {
        AnswerRow {
            id: Uuid::new_v4(),
            question_id: Uuid::new_v4(),
            picker_id: Uuid::new_v4(),
            picked_id: Uuid::new_v4(),
            hint_count: 2,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_conversion_produces_a_valid_answer(valid_row: AnswerRow) {
        let answer = row_to_answer(valid_row).expect("valid row converts");
        assert_eq!(answer.hint_count(), 2);
    }

    #[rstest]
    fn row_conversion_rejects_a_negative_hint_count(mut valid_row: AnswerRow) {
        valid_row.hint_count = -1;

        let error = row_to_answer(valid_row).expect_err("negative count must fail");
        assert!(matches!(error, AnswerRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_rejects_a_self_pick(mut valid_row: AnswerRow) {
        valid_row.picked_id = valid_row.picker_id;

        let error = row_to_answer(valid_row).expect_err("self pick must fail");
        assert!(matches!(error, AnswerRepositoryError::Query { .. }));
    }

    #[rstest]
    fn failed_balance_guard_maps_to_insufficient_points() {
        let error = map_tx_error(TxError::InsufficientPoints, 30, 1);
        assert_eq!(error, AnswerRepositoryError::InsufficientPoints { price: 30 });
    }

    #[rstest]
    fn failed_counter_guard_maps_to_conflict() {
        let error = map_tx_error(TxError::HintCountConflict, 30, 1);
        assert_eq!(error, AnswerRepositoryError::HintCountConflict { expected: 1 });
    }

    #[rstest]
    fn diesel_errors_keep_the_basic_mapping() {
        let error = map_tx_error(TxError::Diesel(diesel::result::Error::NotFound), 0, 0);
        assert!(matches!(error, AnswerRepositoryError::Query { .. }));
    }
}
