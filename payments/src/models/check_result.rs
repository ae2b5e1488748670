use serde::{Deserialize, Serialize};

use crate::consts;

/// Outcome of checking and loading a credit card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CardCheckResult {
    pub success: bool,
    pub message: String,
}

impl CardCheckResult {
    pub fn loaded() -> Self {
        Self {
            success: true,
            message: consts::CARD_LOADED_MSG.into(),
        }
    }

    pub fn check_failed() -> Self {
        Self {
            success: false,
            message: consts::CARD_CHECK_FAILED_MSG.into(),
        }
    }
}
