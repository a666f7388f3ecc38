//! Question catalogue entities. Read-only for the answer flow.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Approved and answerable.
    Ready,
    /// Awaiting review.
    Pending,
}

impl QuestionStatus {
    /// Stable string form used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Pending => "pending",
        }
    }
}

impl FromStr for QuestionStatus {
    type Err = QuestionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(Self::Ready),
            "pending" => Ok(Self::Pending),
            other => Err(QuestionValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validation errors for question construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    #[error("question content must not be empty")]
    EmptyContent,
    #[error("unknown question status: {value}")]
    UnknownStatus { value: String },
}

/// A question users answer about their friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: Uuid,
    content: String,
    status: QuestionStatus,
    group_id: Option<Uuid>,
}

impl Question {
    /// Build a question from validated parts.
    pub fn new(
        id: Uuid,
        content: impl Into<String>,
        status: QuestionStatus,
        group_id: Option<Uuid>,
    ) -> Result<Self, QuestionValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(QuestionValidationError::EmptyContent);
        }
        Ok(Self {
            id,
            content,
            status,
            group_id,
        })
    }

    /// Stable question identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Question text shown to answering users.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Lifecycle state.
    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    /// Owning group, when the question is group-scoped.
    pub fn group_id(&self) -> Option<Uuid> {
        self.group_id
    }
}
