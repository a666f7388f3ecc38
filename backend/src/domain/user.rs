//! User data model and the point balance rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by user constructors and balance mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    #[error("point amount must not be negative")]
    NegativeAmount,
    #[error("not enough points: balance {balance}, required {required}")]
    InsufficientPoints { balance: i64, required: i64 },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative point balance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema, Default,
)]
#[serde(transparent)]
pub struct Points(i64);

impl Points {
    /// Construct a balance, rejecting negative values.
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value < 0 {
            return Err(UserValidationError::NegativeAmount);
        }
        Ok(Self(value))
    }

    /// Zero balance.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Raw balance value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Application user.
///
/// ## Invariants
/// - `points` is never negative; [`User::decrease_point`] fails rather than
///   allowing the balance to go below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    display_name: DisplayName,
    points: Points,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, display_name: DisplayName, points: Points) -> Self {
        Self {
            id,
            display_name,
            points,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown to other users.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Current point balance.
    pub fn points(&self) -> Points {
        self.points
    }

    /// Credit the balance. No upper bound is enforced.
    pub fn increase_point(&mut self, amount: i64) -> Result<(), UserValidationError> {
        if amount < 0 {
            return Err(UserValidationError::NegativeAmount);
        }
        self.points = Points(self.points.0.saturating_add(amount));
        Ok(())
    }

    /// Debit the balance, failing instead of going negative.
    pub fn decrease_point(&mut self, amount: i64) -> Result<(), UserValidationError> {
        if amount < 0 {
            return Err(UserValidationError::NegativeAmount);
        }
        if self.has_not_enough_points(amount) {
            return Err(UserValidationError::InsufficientPoints {
                balance: self.points.0,
                required: amount,
            });
        }
        self.points = Points(self.points.0 - amount);
        Ok(())
    }

    /// Whether the balance is short of `amount`.
    pub fn has_not_enough_points(&self, amount: i64) -> bool {
        self.points.0 < amount
    }
}
