//! Supporting types for outputs.

use serde::{Deserialize, Serialize};

use marquee_core::UserId;

/// Summary of a user as seen by the service layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User id
    pub id: UserId,
    /// Number of ratings in the user's history
    pub rating_count: usize,
    /// Mean of the user's ratings, 0.0 with no history
    pub average_score: f64,
    /// True if the active generation has a vector for this user
    pub has_embedding: bool,
}
