use serde_json::Value;
use std::str::FromStr;

use super::model::Homework;
use crate::services::notifier::NotifierError;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

// Shape of GET /homework_statuses/ after validation.
// Records stay raw until picked, only the newest one is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkStatuses {
    pub homeworks: Vec<Value>,
    pub current_date: Option<i64>,
}

impl HomeworkStatuses {
    /// Validate the decoded body: an object holding a `homeworks` list and
    /// an optional integer `current_date`.
    pub fn from_response(response: &Value) -> Result<Self, NotifierError> {
        let object = response.as_object().ok_or(NotifierError::ResponseNotObject)?;

        let homeworks = object
            .get("homeworks")
            .ok_or(NotifierError::MissingHomeworks)?
            .as_array()
            .ok_or(NotifierError::HomeworksNotList)?
            .clone();

        let current_date = match object.get("current_date") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_i64()
                    .ok_or(NotifierError::InvalidField("current_date"))?,
            ),
        };

        Ok(Self {
            homeworks,
            current_date,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.homeworks.is_empty()
    }

    /// Decode the first record, which the API orders newest first
    pub fn latest(&self) -> Result<Option<Homework>, NotifierError> {
        self.homeworks.first().map(Homework::from_value).transpose()
    }
}

// =============================================================================
// EMPTY LIST POLICY
// =============================================================================

/// How a response with an empty `homeworks` list is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyHomeworksPolicy {
    /// Nothing to report, the cycle succeeds quietly
    #[default]
    Ignore,
    /// The cycle fails with `NoNewHomeworks`
    Fail,
}

impl EmptyHomeworksPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ignore => "ignore",
            Self::Fail => "fail",
        }
    }
}

impl FromStr for EmptyHomeworksPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown empty homeworks policy: {}", other)),
        }
    }
}
