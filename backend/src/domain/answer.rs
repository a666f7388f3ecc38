//! Answer aggregate: who picked whom for which question, plus the hint
//! purchase counter.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Validation errors for answer construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerValidationError {
    #[error("picker and picked user must differ")]
    SelfPick,
    #[error("hint count {count} exceeds the maximum of {max}")]
    HintCountAboveCap { count: u8, max: u8 },
}

/// One answer to a question.
///
/// ## Invariants
/// - `picker` and `picked` are distinct users.
/// - `hint_count` is in `0..=max`. It only ever grows, one step per
///   purchase; the increment itself happens in the repository's guarded
///   update so racing purchases cannot skip a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id: Uuid,
    question_id: Uuid,
    picker_id: UserId,
    picked_id: UserId,
    hint_count: u8,
    created_at: DateTime<Utc>,
}

/// Parameter object for constructing an [`Answer`].
#[derive(Debug, Clone)]
pub struct AnswerDraft {
    pub id: Uuid,
    pub question_id: Uuid,
    pub picker_id: UserId,
    pub picked_id: UserId,
    pub hint_count: u8,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Build an answer, enforcing the hint counter bound `max`.
    pub fn new(draft: AnswerDraft, max: u8) -> Result<Self, AnswerValidationError> {
        if draft.picker_id == draft.picked_id {
            return Err(AnswerValidationError::SelfPick);
        }
        if draft.hint_count > max {
            return Err(AnswerValidationError::HintCountAboveCap {
                count: draft.hint_count,
                max,
            });
        }
        Ok(Self {
            id: draft.id,
            question_id: draft.question_id,
            picker_id: draft.picker_id,
            picked_id: draft.picked_id,
            hint_count: draft.hint_count,
            created_at: draft.created_at,
        })
    }

    /// Stable answer identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Question this answer responds to.
    pub fn question_id(&self) -> Uuid {
        self.question_id
    }

    /// The user who answered.
    pub fn picker_id(&self) -> &UserId {
        &self.picker_id
    }

    /// The user named as the answer.
    pub fn picked_id(&self) -> &UserId {
        &self.picked_id
    }

    /// Hints purchased so far.
    pub fn hint_count(&self) -> u8 {
        self.hint_count
    }

    /// Creation timestamp; answers are ordered by it for paging.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` is the picked user, the only one allowed to view or
    /// purchase hints.
    pub fn is_picked_user(&self, user: &UserId) -> bool {
        &self.picked_id == user
    }
}
