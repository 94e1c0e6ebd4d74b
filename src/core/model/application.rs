//! Job applications submitted through the careers page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::grid::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    New,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::New,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Hired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "New",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
        }
    }

    pub fn cycle_filter(current: Option<ApplicationStatus>) -> Option<ApplicationStatus> {
        match current {
            None => Some(Self::ALL[0]),
            Some(status) => {
                let idx = Self::ALL.iter().position(|&s| s == status).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub applicant: String,
    pub email: String,
    pub phone: String,
    /// Title of the posting applied for.
    pub job_title: String,
    pub experience: String,
    pub applied_date: NaiveDate,
    pub status: ApplicationStatus,
    /// Uploaded resume file name.
    pub resume: String,
    pub notes: Option<String>,
}

impl Record for Application {
    fn id(&self) -> &str {
        &self.id
    }
}
