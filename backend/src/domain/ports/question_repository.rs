//! Port for question catalogue reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::question::Question;

/// Errors raised by question repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionRepositoryError {
    /// Repository connection could not be established.
    #[error("question repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("question repository query failed: {message}")]
    Query { message: String },
}

impl QuestionRepositoryError {
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

/// Port for reading questions. The answer flow never mutates the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find a question by id.
    async fn find_by_id(
        &self,
        question_id: &Uuid,
    ) -> Result<Option<Question>, QuestionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionRepository;

#[async_trait]
impl QuestionRepository for FixtureQuestionRepository {
    async fn find_by_id(
        &self,
        _question_id: &Uuid,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        Ok(None)
    }
}
