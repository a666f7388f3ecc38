//! Driving port for answer reads: history paging, pickable friends, and
//! hint slots.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{PageEnvelope, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::answer::Answer;
use crate::domain::error::Error;
use crate::domain::friend::FriendSummary;
use crate::domain::user::UserId;

/// Serializable projection of an answer for the caller's history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecordPayload {
    #[schema(value_type = String, format = "uuid")]
    pub answer_id: Uuid,
    #[schema(value_type = String, format = "uuid")]
    pub question_id: Uuid,
    #[schema(value_type = String, format = "uuid")]
    pub picked_id: UserId,
    pub hint_count: u8,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl From<Answer> for AnswerRecordPayload {
    fn from(value: Answer) -> Self {
        Self {
            answer_id: value.id(),
            question_id: value.question_id(),
            picked_id: *value.picked_id(),
            hint_count: value.hint_count(),
            created_at: value.created_at(),
        }
    }
}

/// One hint slot. Slot `hint_num` is revealed once enough hints have been
/// purchased; which part of the picker's identity a slot exposes is a
/// presentation concern of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HintSlot {
    #[schema(value_type = String, format = "uuid")]
    pub picker_id: UserId,
    pub hint_num: u8,
    pub valid: bool,
}

/// Request for a page of the caller's answer history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAnswerRecordRequest {
    pub user_id: UserId,
    pub page: PageRequest,
}

/// Request for the caller's pickable friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshAnswerListRequest {
    pub user_id: UserId,
}

/// Response carrying pickable friend candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshAnswerListResponse {
    pub users: Vec<FriendSummary>,
}

/// Request for the hint slots of an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetHintsRequest {
    pub user_id: UserId,
    pub answer_id: Uuid,
}

/// Driving port for answer read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerQuery: Send + Sync {
    /// Page of answers where the caller is the picker, ordered by creation
    /// time ascending.
    async fn get_answer_record(
        &self,
        request: GetAnswerRecordRequest,
    ) -> Result<PageEnvelope<AnswerRecordPayload>, Error>;

    /// Friends of the caller, as pickable candidates. Pure read.
    async fn refresh_answer_list(
        &self,
        request: RefreshAnswerListRequest,
    ) -> Result<RefreshAnswerListResponse, Error>;

    /// All hint slots of an answer, for the picked user only.
    async fn get_hints(&self, request: GetHintsRequest) -> Result<Vec<HintSlot>, Error>;
}

/// Fixture query implementation returning empty results.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnswerQuery;

#[async_trait]
impl AnswerQuery for FixtureAnswerQuery {
    async fn get_answer_record(
        &self,
        request: GetAnswerRecordRequest,
    ) -> Result<PageEnvelope<AnswerRecordPayload>, Error> {
        Ok(PageEnvelope::new(Vec::new(), request.page, 0))
    }

    async fn refresh_answer_list(
        &self,
        _request: RefreshAnswerListRequest,
    ) -> Result<RefreshAnswerListResponse, Error> {
        Ok(RefreshAnswerListResponse { users: Vec::new() })
    }

    async fn get_hints(&self, _request: GetHintsRequest) -> Result<Vec<HintSlot>, Error> {
        Ok(Vec::new())
    }
}
