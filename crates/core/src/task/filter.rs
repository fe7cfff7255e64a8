//! List query parsing
//!
//! Grammar of the two query-string expressions:
//!
//! ```text
//! order     := item (';' item)*
//! item      := column [',' direction]      direction: ASC | DESC, any case
//! filter    := column '=' value            split at the first '='
//! column    := name | completed | dueDate
//! ```
//!
//! A `dueDate` filter value is a `start;end` date range, inclusive.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::date::parse_date;
use super::model::Task;
use crate::{Error, Result};

/// Task column that can be ordered or filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Completed,
    DueDate,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Completed => "completed",
            Self::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "name" => Ok(Self::Name),
            "completed" => Ok(Self::Completed),
            "dueDate" => Ok(Self::DueDate),
            _ => Err(invalid_column(value)),
        }
    }
}

/// One ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: Column,
    pub decreasing: bool,
}

impl OrderBy {
    pub fn asc(column: Column) -> Self {
        Self {
            column,
            decreasing: false,
        }
    }

    pub fn desc(column: Column) -> Self {
        Self {
            column,
            decreasing: true,
        }
    }
}

/// Single-column filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterBy {
    /// Case-insensitive substring match on the name
    Name(String),
    /// Exact match on the completed flag
    Completed(bool),
    /// Inclusive due date range; tasks without due date never match
    DueDate {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl FilterBy {
    pub fn column(&self) -> Column {
        match self {
            Self::Name(_) => Column::Name,
            Self::Completed(_) => Column::Completed,
            Self::DueDate { .. } => Column::DueDate,
        }
    }

    /// Whether a task passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Name(pattern) => task
                .name
                .to_ascii_lowercase()
                .contains(&pattern.to_ascii_lowercase()),
            Self::Completed(completed) => task.completed == *completed,
            Self::DueDate { from, to } => task
                .due_date
                .is_some_and(|due| *from <= due && due <= *to),
        }
    }
}

/// Structured ordering and filtering for task listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub order_by: Option<Vec<OrderBy>>,
    pub filter: Option<FilterBy>,
}

impl TaskQuery {
    /// Parse the `order` and `filter` expressions; empty strings count as absent
    pub fn parse(order: Option<&str>, filter: Option<&str>) -> Result<Self> {
        let order_by = match order.filter(|o| !o.is_empty()) {
            Some(order) => Some(parse_order(order)?),
            None => None,
        };
        let filter = match filter.filter(|f| !f.is_empty()) {
            Some(filter) => Some(parse_filter(filter)?),
            None => None,
        };

        Ok(Self { order_by, filter })
    }

    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order_by.get_or_insert_with(Vec::new).push(order);
        self
    }

    pub fn with_filter(mut self, filter: FilterBy) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.matches(task))
    }

    /// Compare two tasks by the ordering keys, ties broken by ID
    ///
    /// Missing due dates sort before any date and `false` before `true`,
    /// which is what SQLite does for the same columns.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        self.order_by
            .iter()
            .flatten()
            .map(|order| {
                let ordering = match order.column {
                    Column::Name => a.name.cmp(&b.name),
                    Column::Completed => a.completed.cmp(&b.completed),
                    Column::DueDate => a.due_date.cmp(&b.due_date),
                };
                if order.decreasing {
                    ordering.reverse()
                } else {
                    ordering
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

fn invalid_column(column: &str) -> Error {
    Error::Filter(format!("Invalid column '{}'", column))
}

fn parse_order(order: &str) -> Result<Vec<OrderBy>> {
    order
        .split(';')
        .map(|item| {
            let mut parts = item.split(',');
            let column: Column = parts.next().unwrap_or_default().parse()?;
            let decreasing = parts
                .next()
                .is_some_and(|direction| direction.eq_ignore_ascii_case("DESC"));
            Ok(OrderBy { column, decreasing })
        })
        .collect()
}

fn parse_filter(filter: &str) -> Result<FilterBy> {
    let (column, value) = filter
        .split_once('=')
        .ok_or_else(|| Error::Filter(format!("Invalid filter '{}'", filter)))?;

    match column.to_ascii_lowercase().as_str() {
        "name" => Ok(FilterBy::Name(value.to_string())),
        "completed" => match value {
            "true" => Ok(FilterBy::Completed(true)),
            "false" => Ok(FilterBy::Completed(false)),
            _ => Err(Error::Filter(
                "Completed column filter must be a boolean".to_string(),
            )),
        },
        "duedate" => {
            let invalid_range = || Error::Filter(format!("Invalid range '{}'", value));
            let (start, end) = value.split_once(';').ok_or_else(invalid_range)?;
            let from = parse_date(start).ok_or_else(invalid_range)?;
            let to = parse_date(end).ok_or_else(invalid_range)?;
            if to < from {
                return Err(Error::Filter("Start date can't be after end".to_string()));
            }
            Ok(FilterBy::DueDate { from, to })
        }
        _ => Err(invalid_column(column)),
    }
}
