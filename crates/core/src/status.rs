//! Status and kind enumerations shared across the persistence layers.
//!
//! Database columns store these as plain text; the enums here validate
//! incoming values and centralize the known labels. Contest result status
//! is deliberately an open string (outcomes vary per organizer), so only
//! well-known labels are provided as constants.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a contest.
///
/// This is an unordered enumeration, not a state machine: any transition
/// is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestStatus {
    Preparing,
    InProgress,
    Submitted,
    Completed,
}

impl ContestStatus {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preparing => "preparing",
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Completed => "completed",
        }
    }

    /// Parse from the text column value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "preparing" => Ok(Self::Preparing),
            "in_progress" => Ok(Self::InProgress),
            "submitted" => Ok(Self::Submitted),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown contest status '{other}'. Must be one of: preparing, in_progress, submitted, completed"
            ))),
        }
    }
}

/// Media kind of a generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptType {
    Image,
    Document,
    Video,
    Audio,
    Other,
}

impl PromptType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "image" => Ok(Self::Image),
            "document" => Ok(Self::Document),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "other" => Ok(Self::Other),
            unknown => Err(CoreError::Validation(format!(
                "Unknown prompt type '{unknown}'. Must be one of: image, document, video, audio, other"
            ))),
        }
    }
}

/// Severity kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            unknown => Err(CoreError::Validation(format!(
                "Unknown notification kind '{unknown}'. Must be one of: info, success, warning, error"
            ))),
        }
    }
}

/// Well-known contest result outcomes. The column itself is open text.
pub const RESULT_WINNER: &str = "winner";
pub const RESULT_RUNNER_UP: &str = "runner_up";
pub const RESULT_SHORTLISTED: &str = "shortlisted";
pub const RESULT_NOT_SELECTED: &str = "not_selected";
pub const RESULT_PENDING: &str = "pending";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contest_status_round_trips_through_text() {
        for status in [
            ContestStatus::Preparing,
            ContestStatus::InProgress,
            ContestStatus::Submitted,
            ContestStatus::Completed,
        ] {
            assert_eq!(ContestStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = ContestStatus::parse("archived").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn prompt_type_parse_covers_all_kinds() {
        for kind in ["image", "document", "video", "audio", "other"] {
            assert_eq!(PromptType::parse(kind).unwrap().as_str(), kind);
        }
        assert!(PromptType::parse("3d").is_err());
    }

    #[test]
    fn notification_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&NotificationKind::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
