use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::services::notifier::NotifierError;

// =============================================================================
// STATUS
// =============================================================================

/// Review states reported by the homework API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Reviewing,
    Approved,
    Rejected,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Reviewing => "reviewing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Localized verdict shown to the student
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reviewing" => Ok(Self::Reviewing),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(NotifierError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// HOMEWORK
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Decode one record from the `homeworks` list.
    /// Both fields must be present strings and the status must be known.
    pub fn from_value(value: &Value) -> Result<Self, NotifierError> {
        if !value.is_object() {
            return Err(NotifierError::HomeworkNotObject);
        }

        let homework_name = string_field(value, "homework_name")?;
        let status = string_field(value, "status")?.parse::<HomeworkStatus>()?;

        Ok(Self {
            homework_name,
            status,
        })
    }

    pub fn notification(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

fn string_field(value: &Value, field: &'static str) -> Result<String, NotifierError> {
    match value.get(field) {
        None | Some(Value::Null) => Err(NotifierError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(NotifierError::InvalidField(field)),
    }
}
