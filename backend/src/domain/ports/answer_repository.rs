//! Port for answer persistence and the transactional purchase path.
//!
//! Two mutations on this port bundle a balance change with the answer write
//! so both commit or neither does: rewarding the picker on creation, and
//! debiting the buyer while incrementing the hint counter on purchase.

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::answer::Answer;
use crate::domain::user::UserId;

/// Errors raised by answer repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerRepositoryError {
    /// Repository connection could not be established.
    #[error("answer repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("answer repository query failed: {message}")]
    Query { message: String },
    /// The buyer's balance was below the hint price at commit time.
    #[error("balance below hint price of {price}")]
    InsufficientPoints { price: i64 },
    /// The hint counter moved between read and commit; the purchase raced
    /// with another writer or is past the cap.
    #[error("hint counter changed concurrently, expected {expected}")]
    HintCountConflict { expected: u8 },
}

impl AnswerRepositoryError {
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

/// One page of answers plus the total count for the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPage {
    pub answers: Vec<Answer>,
    pub total_elements: u64,
}

/// Port for writing answers and reading the caller's answer history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Find an answer by id.
    async fn find_by_id(&self, answer_id: &Uuid)
    -> Result<Option<Answer>, AnswerRepositoryError>;

    /// Insert `answer` and credit the picker's balance by `reward_points`
    /// in one transaction.
    async fn create_with_reward(
        &self,
        answer: &Answer,
        reward_points: i64,
    ) -> Result<(), AnswerRepositoryError>;

    /// Debit `buyer_id` by `price` and advance the hint counter from
    /// `expected_hint_count` in one transaction.
    ///
    /// The adapter must guard both writes so racing purchases cannot drive
    /// the balance negative or skip the counter past the cap; failed guards
    /// surface as [`AnswerRepositoryError::InsufficientPoints`] or
    /// [`AnswerRepositoryError::HintCountConflict`] and roll everything
    /// back.
    async fn purchase_hint(
        &self,
        answer_id: &Uuid,
        buyer_id: &UserId,
        price: i64,
        expected_hint_count: u8,
    ) -> Result<(), AnswerRepositoryError>;

    /// Page of answers where `picker_id` is the picker, ordered by creation
    /// time ascending with the id as tiebreak.
    async fn list_page_by_picker(
        &self,
        picker_id: &UserId,
        page: PageRequest,
    ) -> Result<AnswerPage, AnswerRepositoryError>;
}

/// Fixture implementation for tests that do not exercise answer persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnswerRepository;

#[async_trait]
impl AnswerRepository for FixtureAnswerRepository {
    async fn find_by_id(
        &self,
        _answer_id: &Uuid,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        Ok(None)
    }

    async fn create_with_reward(
        &self,
        _answer: &Answer,
        _reward_points: i64,
    ) -> Result<(), AnswerRepositoryError> {
        Ok(())
    }

    async fn purchase_hint(
        &self,
        _answer_id: &Uuid,
        _buyer_id: &UserId,
        _price: i64,
        _expected_hint_count: u8,
    ) -> Result<(), AnswerRepositoryError> {
        Ok(())
    }

    async fn list_page_by_picker(
        &self,
        _picker_id: &UserId,
        _page: PageRequest,
    ) -> Result<AnswerPage, AnswerRepositoryError> {
        Ok(AnswerPage {
            answers: Vec::new(),
            total_elements: 0,
        })
    }
}
