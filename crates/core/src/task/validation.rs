//! Task field validation
//!
//! Turns raw client fields into a [`NewTask`], enforcing presence and type
//! of each field and rejecting due dates on past days.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::date::parse_date;
use super::model::NewTask;
use crate::{Error, Result};

/// Task fields exactly as a client sent them
///
/// Fields stay untyped so that a wrong type produces a validation message
/// instead of a deserialization failure. JSON `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub completed: Option<Value>,
    #[serde(default)]
    pub due_date: Option<Value>,
}

impl TaskFields {
    /// Validate against the current time
    pub fn validate(self) -> Result<NewTask> {
        self.validate_at(Utc::now())
    }

    /// Validate against a fixed point in time
    pub fn validate_at(self, now: DateTime<Utc>) -> Result<NewTask> {
        let name = match self.name {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            _ => return Err(Error::Validation("'name' is a required field".to_string())),
        };

        let completed = match self.completed {
            None => false,
            Some(Value::Bool(completed)) => completed,
            Some(_) => {
                return Err(Error::Validation(
                    "'completed' must be a boolean".to_string(),
                ))
            }
        };

        let due_date = match self.due_date {
            None => None,
            Some(Value::String(raw)) => Some(
                parse_date(&raw)
                    .ok_or_else(|| Error::Validation(format!("Invalid dueDate '{}'", raw)))?,
            ),
            Some(other) => {
                return Err(Error::Validation(format!("Invalid dueDate '{}'", other)))
            }
        };

        if let Some(due) = due_date {
            if due.date_naive() < now.date_naive() {
                return Err(Error::Validation(
                    "Can't create a task with a dueDate in the past".to_string(),
                ));
            }
        }

        Ok(NewTask {
            name,
            completed,
            // Stores keep millisecond precision
            due_date: due_date.map(|due| due.trunc_subsecs(3)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn fields(value: Value) -> TaskFields {
        serde_json::from_value(value).unwrap()
    }

    fn validation_message(result: Result<NewTask>) -> String {
        match result {
            Err(Error::Validation(msg)) => msg,
            other => panic!("Expected validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_defaults_for_completed_and_due_date() {
        let task = fields(json!({ "name": "task" })).validate().unwrap();
        assert_eq!(task, NewTask::new("task"));
    }

    #[test]
    fn test_null_fields_count_as_absent() {
        let task = fields(json!({ "name": "task", "completed": null, "dueDate": null }))
            .validate()
            .unwrap();
        assert!(!task.completed);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_name_is_required() {
        for body in [
            json!({}),
            json!({ "name": "" }),
            json!({ "name": "   " }),
            json!({ "name": 42 }),
        ] {
            let msg = validation_message(fields(body).validate());
            assert_eq!(msg, "'name' is a required field");
        }
    }

    #[test]
    fn test_completed_must_be_boolean() {
        let msg = validation_message(fields(json!({ "name": "t", "completed": "yes" })).validate());
        assert_eq!(msg, "'completed' must be a boolean");
    }

    #[test]
    fn test_invalid_due_date_formats() {
        let msg = validation_message(fields(json!({ "name": "t", "dueDate": "asdf" })).validate());
        assert_eq!(msg, "Invalid dueDate 'asdf'");

        let msg = validation_message(fields(json!({ "name": "t", "dueDate": 20 })).validate());
        assert_eq!(msg, "Invalid dueDate '20'");
    }

    #[test]
    fn test_due_date_in_the_past_is_rejected() {
        let msg = validation_message(
            fields(json!({ "name": "t", "dueDate": "05/10/1998" })).validate(),
        );
        assert_eq!(msg, "Can't create a task with a dueDate in the past");
    }

    #[test]
    fn test_due_date_earlier_today_is_accepted() {
        let now = Utc.with_ymd_and_hms(2025, 1, 29, 18, 30, 0).unwrap();
        let task = fields(json!({ "name": "t", "dueDate": "2025-01-29T00:00:01Z" }))
            .validate_at(now)
            .unwrap();
        assert_eq!(
            task.due_date,
            Some(Utc.with_ymd_and_hms(2025, 1, 29, 0, 0, 1).unwrap())
        );

        let msg = validation_message(
            fields(json!({ "name": "t", "dueDate": "2025-01-28T23:59:59Z" })).validate_at(now),
        );
        assert_eq!(msg, "Can't create a task with a dueDate in the past");
    }

    #[test]
    fn test_due_date_is_truncated_to_milliseconds() {
        let future = Utc::now() + Duration::days(5);
        let raw = future.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true);
        let task = fields(json!({ "name": "t", "completed": true, "dueDate": raw }))
            .validate()
            .unwrap();
        assert!(task.completed);
        assert_eq!(task.due_date, Some(future.trunc_subsecs(3)));
    }
}
