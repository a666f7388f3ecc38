//! Answer domain service.
//!
//! Implements the answer driving ports: validates preconditions against the
//! stores, delegates the paired answer/balance writes to the repository's
//! transactional methods, and notifies the point ledger after the primary
//! mutation has succeeded.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::PageEnvelope;
use uuid::Uuid;

use crate::domain::answer::{Answer, AnswerDraft};
use crate::domain::error::Error;
use crate::domain::point_record::{PointEarnEvent, PointRecordKind};
use crate::domain::ports::{
    AnswerCommand, AnswerQuery, AnswerRecordPayload, AnswerRepository, AnswerRepositoryError,
    AnswerToQuestionRequest, AnswerToQuestionResponse, FriendRepository, FriendRepositoryError,
    GetAnswerRecordRequest, GetHintsRequest, HintSlot, PointRecordQueue, PurchaseHintRequest,
    PurchaseHintResponse, QuestionRepository, QuestionRepositoryError, RefreshAnswerListRequest,
    RefreshAnswerListResponse, UserRepository, UserRepositoryError,
};
use crate::domain::question::Question;
use crate::domain::reward::RewardPolicy;
use crate::domain::user::{User, UserId};

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

fn map_question_repository_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("question store unavailable: {message}"))
        }
        QuestionRepositoryError::Query { message } => {
            Error::internal(format!("question store error: {message}"))
        }
    }
}

fn map_friend_repository_error(error: FriendRepositoryError) -> Error {
    match error {
        FriendRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("friend store unavailable: {message}"))
        }
        FriendRepositoryError::Query { message } => {
            Error::internal(format!("friend store error: {message}"))
        }
    }
}

fn map_answer_repository_error(error: AnswerRepositoryError) -> Error {
    match error {
        AnswerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("answer store unavailable: {message}"))
        }
        AnswerRepositoryError::Query { message } => {
            Error::internal(format!("answer store error: {message}"))
        }
        AnswerRepositoryError::InsufficientPoints { .. } => {
            Error::invalid_request("not enough points to purchase this hint")
        }
        AnswerRepositoryError::HintCountConflict { .. } => {
            Error::conflict("hint purchase raced with another request, retry")
        }
    }
}

/// Dependencies of the [`AnswerService`].
#[derive(Clone)]
pub struct AnswerServiceDeps {
    pub users: Arc<dyn UserRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub friends: Arc<dyn FriendRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub ledger_queue: Arc<dyn PointRecordQueue>,
}

/// Answer orchestrator implementing both driving ports.
#[derive(Clone)]
pub struct AnswerService {
    users: Arc<dyn UserRepository>,
    questions: Arc<dyn QuestionRepository>,
    friends: Arc<dyn FriendRepository>,
    answers: Arc<dyn AnswerRepository>,
    ledger_queue: Arc<dyn PointRecordQueue>,
    policy: RewardPolicy,
}

impl AnswerService {
    /// Create the service over its stores, ledger queue, and reward policy.
    pub fn new(deps: AnswerServiceDeps, policy: RewardPolicy) -> Self {
        let AnswerServiceDeps {
            users,
            questions,
            friends,
            answers,
            ledger_queue,
        } = deps;
        Self {
            users,
            questions,
            friends,
            answers,
            ledger_queue,
            policy,
        }
    }

    async fn load_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn load_question(&self, question_id: &Uuid) -> Result<Question, Error> {
        self.questions
            .find_by_id(question_id)
            .await
            .map_err(map_question_repository_error)?
            .ok_or_else(|| Error::not_found(format!("question {question_id} not found")))
    }

    async fn load_answer(&self, answer_id: &Uuid) -> Result<Answer, Error> {
        self.answers
            .find_by_id(answer_id)
            .await
            .map_err(map_answer_repository_error)?
            .ok_or_else(|| Error::not_found(format!("answer {answer_id} not found")))
    }

    fn require_picked_user(answer: &Answer, user_id: &UserId) -> Result<(), Error> {
        if answer.is_picked_user(user_id) {
            Ok(())
        } else {
            Err(Error::invalid_request(
                "only the picked user may access hints on this answer",
            ))
        }
    }
}

#[async_trait]
impl AnswerCommand for AnswerService {
    async fn answer_to_question(
        &self,
        request: AnswerToQuestionRequest,
    ) -> Result<AnswerToQuestionResponse, Error> {
        let user = self.load_user(&request.user_id).await?;
        let question = self.load_question(&request.question_id).await?;
        let picked = self.load_user(&request.picked_id).await?;

        let answer = Answer::new(
            AnswerDraft {
                id: Uuid::new_v4(),
                question_id: question.id(),
                picker_id: *user.id(),
                picked_id: *picked.id(),
                hint_count: self.policy.default_hint_count,
                created_at: Utc::now(),
            },
            self.policy.max_hint_count,
        )
        .map_err(|err| Error::invalid_request(format!("invalid answer: {err}")))?;

        self.answers
            .create_with_reward(&answer, self.policy.answer_point)
            .await
            .map_err(map_answer_repository_error)?;

        // The primary mutation has committed; the ledger notification must
        // not fail the response.
        let event = PointEarnEvent {
            user_id: *user.id(),
            point: self.policy.answer_point,
            amount: 0,
            kind: PointRecordKind::Charged,
            message: self.policy.earn_message.clone(),
        };
        if let Err(error) = self.ledger_queue.publish_earn(event) {
            tracing::warn!(%error, user_id = %user.id(), "point earn event dropped");
        }

        Ok(AnswerToQuestionResponse {
            answer_id: answer.id(),
        })
    }

    async fn purchase_hint(
        &self,
        request: PurchaseHintRequest,
    ) -> Result<PurchaseHintResponse, Error> {
        let user = self.load_user(&request.user_id).await?;
        let answer = self.load_answer(&request.answer_id).await?;

        Self::require_picked_user(&answer, &request.user_id)?;

        let purchased = answer.hint_count();
        let price = self.policy.hint_price(purchased).ok_or_else(|| {
            Error::invalid_request(format!(
                "all {} hints have already been purchased",
                self.policy.max_hint_count
            ))
        })?;

        if user.has_not_enough_points(price) {
            return Err(Error::invalid_request(
                "not enough points to purchase this hint",
            ));
        }

        self.answers
            .purchase_hint(&request.answer_id, &request.user_id, price, purchased)
            .await
            .map_err(map_answer_repository_error)?;

        Ok(PurchaseHintResponse {
            answer_id: request.answer_id,
            hint_count: purchased + 1,
        })
    }
}

#[async_trait]
impl AnswerQuery for AnswerService {
    async fn get_answer_record(
        &self,
        request: GetAnswerRecordRequest,
    ) -> Result<PageEnvelope<AnswerRecordPayload>, Error> {
        self.load_user(&request.user_id).await?;

        let page = self
            .answers
            .list_page_by_picker(&request.user_id, request.page)
            .await
            .map_err(map_answer_repository_error)?;

        let content = page
            .answers
            .into_iter()
            .map(AnswerRecordPayload::from)
            .collect();

        Ok(PageEnvelope::new(content, request.page, page.total_elements))
    }

    async fn refresh_answer_list(
        &self,
        request: RefreshAnswerListRequest,
    ) -> Result<RefreshAnswerListResponse, Error> {
        self.load_user(&request.user_id).await?;

        let users = self
            .friends
            .list_friends_of_host(&request.user_id)
            .await
            .map_err(map_friend_repository_error)?;

        Ok(RefreshAnswerListResponse { users })
    }

    async fn get_hints(&self, request: GetHintsRequest) -> Result<Vec<HintSlot>, Error> {
        self.load_user(&request.user_id).await?;
        let answer = self.load_answer(&request.answer_id).await?;

        Self::require_picked_user(&answer, &request.user_id)?;

        let slots = (1..=self.policy.max_hint_count)
            .map(|hint_num| HintSlot {
                picker_id: *answer.picker_id(),
                hint_num,
                valid: hint_num <= answer.hint_count(),
            })
            .collect();

        Ok(slots)
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
