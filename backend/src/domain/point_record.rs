//! Append-only point ledger entries.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Category tag describing why a balance changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRecordKind {
    /// Points credited to the user.
    Charged,
    /// Points spent by the user.
    Used,
}

impl PointRecordKind {
    /// Stable string form used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charged => "charged",
            Self::Used => "used",
        }
    }
}

/// Error for unrecognised persisted kind values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown point record kind: {value}")]
pub struct UnknownPointRecordKind {
    pub value: String,
}

impl FromStr for PointRecordKind {
    type Err = UnknownPointRecordKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "charged" => Ok(Self::Charged),
            "used" => Ok(Self::Used),
            other => Err(UnknownPointRecordKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// One ledger entry documenting a balance-affecting event.
///
/// Entries are append-only; nothing in the domain mutates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointRecord {
    id: Uuid,
    user_id: UserId,
    point: i64,
    amount: i64,
    kind: PointRecordKind,
    message: String,
    created_at: DateTime<Utc>,
}

impl PointRecord {
    /// Build a ledger entry.
    pub fn new(
        id: Uuid,
        user_id: UserId,
        point: i64,
        amount: i64,
        kind: PointRecordKind,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            point,
            amount,
            kind,
            message: message.into(),
            created_at,
        }
    }

    /// Ledger entry identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// User whose balance changed.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Point delta for the event.
    pub fn point(&self) -> i64 {
        self.point
    }

    /// Reference amount carried alongside the delta.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Earn/spend category.
    pub fn kind(&self) -> PointRecordKind {
        self.kind
    }

    /// Human-readable description of the event.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// When the event was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Point-earn event published after the triggering mutation commits.
///
/// Carries everything the ledger handler needs so it never reads back into
/// the triggering transaction's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointEarnEvent {
    pub user_id: UserId,
    pub point: i64,
    pub amount: i64,
    pub kind: PointRecordKind,
    pub message: String,
}
