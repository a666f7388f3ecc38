//! Point reward policy: how many points an answer earns and what each hint
//! tier costs.
//!
//! The policy is an immutable value handed to the answer service at
//! construction; nothing reads these numbers from ambient state.

/// Hints available per answer under the default policy.
pub const MAX_HINT_COUNT: u8 = 3;

/// Immutable point and hint pricing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardPolicy {
    /// Points credited for answering a question.
    pub answer_point: i64,
    /// Hint counter a freshly created answer starts at.
    pub default_hint_count: u8,
    /// Upper bound on hints per answer.
    pub max_hint_count: u8,
    /// Price of each hint tier; index 0 is the first hint.
    pub hint_prices: [i64; 3],
    /// Ledger message attached to answer rewards.
    pub earn_message: String,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            answer_point: 10,
            default_hint_count: 0,
            max_hint_count: MAX_HINT_COUNT,
            hint_prices: [10, 30, 50],
            earn_message: "answered a common question".to_owned(),
        }
    }
}

impl RewardPolicy {
    /// Price of the next hint given how many have already been purchased.
    ///
    /// `None` means the counter is at the cap and no further hint can be
    /// bought. Every purchase is charged, including the first: the price
    /// tier is selected by the hint being bought, not by the pre-purchase
    /// counter matching a tier index.
    pub fn hint_price(&self, purchased: u8) -> Option<i64> {
        if purchased >= self.max_hint_count {
            return None;
        }
        self.hint_prices.get(usize::from(purchased)).copied()
    }
}
