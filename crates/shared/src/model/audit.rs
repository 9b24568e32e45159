use crate::model::movement::Movement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    EntryRecorded,
    ExitRecorded,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::EntryRecorded => write!(f, "ENTRY_RECORDED"),
            AuditAction::ExitRecorded => write!(f, "EXIT_RECORDED"),
        }
    }
}

/// Appended alongside every committed movement. Carries a snapshot of the
/// movement as it was recorded, independent of later document state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub user: String,
    pub movement: Movement,
}
