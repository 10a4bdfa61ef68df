//! Review statuses and the notification text built from them.

use std::fmt;

use serde_json::Value;

use crate::error::RelayError;

/// Review status of a submission as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    /// Reviewer accepted the work.
    Approved,
    /// Work is under review.
    Reviewing,
    /// Reviewer left remarks.
    Rejected,
}

impl HomeworkStatus {
    /// All known statuses.
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Parses an API status code. Returns `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The code the API uses for this status.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Verdict sentence sent to the chat.
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Builds the notification text for one homework record.
///
/// # Errors
///
/// Returns [`RelayError::MissingField`] when `homework_name` or `status` is
/// absent (or not a string), and [`RelayError::UnknownStatus`] when the
/// status code is not one of the known ones.
pub fn parse_status(homework: &Value) -> Result<String, RelayError> {
    let homework_name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(RelayError::MissingField("homework_name"))?;

    let code = homework
        .get("status")
        .and_then(Value::as_str)
        .ok_or(RelayError::MissingField("status"))?;

    let status = HomeworkStatus::from_code(code).ok_or_else(|| RelayError::UnknownStatus {
        status: code.to_owned(),
        homework_name: homework_name.to_owned(),
    })?;

    Ok(format!(
        "Изменился статус проверки работы \"{homework_name}\". {}",
        status.verdict()
    ))
}
