//! Item shapes for the per-contest detail blobs.
//!
//! Tasks, team members, and schedule items are not independent rows: each
//! collection is persisted as a single JSON array keyed by `(contest_id,
//! kind)`. Every mutation is a read-entire-blob, modify, write-entire-blob
//! cycle with no optimistic concurrency (last write wins).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Which blob a detail collection lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Tasks,
    TeamMembers,
    Schedules,
}

impl DetailKind {
    /// Database / storage-key representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::TeamMembers => "team_members",
            Self::Schedules => "schedules",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "tasks" => Ok(Self::Tasks),
            "team_members" => Ok(Self::TeamMembers),
            "schedules" => Ok(Self::Schedules),
            unknown => Err(CoreError::Validation(format!(
                "Unknown detail kind '{unknown}'. Must be one of: tasks, team_members, schedules"
            ))),
        }
    }
}

/// A checklist item on a contest. Completion drives the derived progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub completed: bool,
}

/// A member of the team working on a contest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A milestone on a contest's internal schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: DbId,
    pub title: String,
    pub date: Timestamp,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
}
