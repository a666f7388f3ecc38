//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::question::{Question, QuestionStatus};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::QuestionRow;
use super::pool::{DbPool, PoolError};
use super::schema::questions;

/// Diesel-backed implementation of the question repository port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestionRepositoryError {
    map_basic_pool_error(error, QuestionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    map_basic_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain question.
fn row_to_question(row: QuestionRow) -> Result<Question, QuestionRepositoryError> {
    let status = row
        .status
        .parse::<QuestionStatus>()
        .map_err(|err| QuestionRepositoryError::query(err.to_string()))?;
    Question::new(row.id, row.content, status, row.group_id)
        .map_err(|err| QuestionRepositoryError::query(err.to_string()))
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn find_by_id(
        &self,
        question_id: &Uuid,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = questions::table
            .filter(questions::id.eq(question_id))
            .select(QuestionRow::as_select())
            .first::<QuestionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_question).transpose()
    }
}
