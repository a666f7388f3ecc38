//! Driving port for answer mutations: answering a question and purchasing
//! hints.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Request to answer a question about a friend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerToQuestionRequest {
    pub user_id: UserId,
    pub question_id: Uuid,
    pub picked_id: UserId,
}

/// Response from answering a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerToQuestionResponse {
    pub answer_id: Uuid,
}

/// Request to purchase the next hint on an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseHintRequest {
    pub user_id: UserId,
    pub answer_id: Uuid,
}

/// Response from a successful hint purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseHintResponse {
    pub answer_id: Uuid,
    pub hint_count: u8,
}

/// Driving port for answer write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerCommand: Send + Sync {
    /// Record an answer, credit the picker's balance, and notify the point
    /// ledger.
    async fn answer_to_question(
        &self,
        request: AnswerToQuestionRequest,
    ) -> Result<AnswerToQuestionResponse, Error>;

    /// Purchase the next hint on an answer for the picked user.
    async fn purchase_hint(
        &self,
        request: PurchaseHintRequest,
    ) -> Result<PurchaseHintResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnswerCommand;

#[async_trait]
impl AnswerCommand for FixtureAnswerCommand {
    async fn answer_to_question(
        &self,
        _request: AnswerToQuestionRequest,
    ) -> Result<AnswerToQuestionResponse, Error> {
        Ok(AnswerToQuestionResponse {
            answer_id: Uuid::new_v4(),
        })
    }

    async fn purchase_hint(
        &self,
        request: PurchaseHintRequest,
    ) -> Result<PurchaseHintResponse, Error> {
        Ok(PurchaseHintResponse {
            answer_id: request.answer_id,
            hint_count: 1,
        })
    }
}
