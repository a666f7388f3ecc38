//! Friend directory read model.
//!
//! The answer flow only ever reads friendships, so the domain carries a
//! summary of the friend user rather than the full relation row.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{DisplayName, UserId};

/// A friend of the host user, presented as a pickable answer candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendSummary {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub display_name: DisplayName,
}
