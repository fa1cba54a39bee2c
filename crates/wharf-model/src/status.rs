//! Lifecycle labels stamped onto the status-tracking side database.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusLabel {
    Pending,
    Transferred,
    Processing,
    Upserted,
    Failed,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Pending => "pending",
            StatusLabel::Transferred => "transferred",
            StatusLabel::Processing => "processing",
            StatusLabel::Upserted => "upserted",
            StatusLabel::Failed => "failed",
        }
    }
}
