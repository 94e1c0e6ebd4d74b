//! Internal team tasks tracked on the operations board.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::grid::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Overdue,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Overdue,
        TaskStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn cycle_filter(current: Option<TaskStatus>) -> Option<TaskStatus> {
        match current {
            None => Some(Self::ALL[0]),
            Some(status) => {
                let idx = Self::ALL.iter().position(|&s| s == status).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] =
        [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    pub fn cycle_filter(current: Option<TaskPriority>) -> Option<TaskPriority> {
        match current {
            None => Some(Self::ALL[0]),
            Some(priority) => {
                let idx = Self::ALL.iter().position(|&p| p == priority).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub assignee: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl TaskItem {
    pub fn create(
        title: String,
        assignee: String,
        due_date: NaiveDate,
        priority: TaskPriority,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            assignee,
            due_date,
            priority,
            status: TaskStatus::Pending,
        }
    }
}

impl Record for TaskItem {
    fn id(&self) -> &str {
        &self.id
    }
}
