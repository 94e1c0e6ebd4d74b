//! Job postings — the careers section of the site.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::grid::Record;

/// Departments offered by the posting form and the department filter.
pub const DEPARTMENTS: [&str; 6] = [
    "Engineering",
    "Design",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Active,
    Closed,
    Draft,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Active, JobStatus::Closed, JobStatus::Draft];

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Active => "Active",
            JobStatus::Closed => "Closed",
            JobStatus::Draft => "Draft",
        }
    }

    /// Filter cycling: All → Active → Closed → Draft → All.
    pub fn cycle_filter(current: Option<JobStatus>) -> Option<JobStatus> {
        match current {
            None => Some(Self::ALL[0]),
            Some(status) => {
                let idx = Self::ALL.iter().position(|&s| s == status).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub job_type: JobType,
    /// Experience expectation, e.g. "3-5 years".
    pub experience: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub status: JobStatus,
    /// How many applications reference this posting.
    pub applicants: u32,
}

impl JobPosting {
    /// A posting created from the admin form: fresh id, posted today,
    /// zero applicants, published immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        title: String,
        department: String,
        location: String,
        job_type: JobType,
        experience: String,
        description: String,
        closing_date: NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            department,
            location,
            job_type,
            experience,
            description,
            requirements: Vec::new(),
            posted_date: Local::now().date_naive(),
            closing_date,
            status: JobStatus::Active,
            applicants: 0,
        }
    }
}

impl Record for JobPosting {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_defaults() {
        let job = JobPosting::create(
            "Backend Engineer".into(),
            "Engineering".into(),
            "Remote".into(),
            JobType::FullTime,
            "3-5 years".into(),
            "Build services.".into(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        );
        assert!(!job.id.is_empty());
        assert_eq!(job.applicants, 0);
        assert_eq!(job.status, JobStatus::Active);
        assert!(job.requirements.is_empty());
    }

    #[test]
    fn test_create_ids_are_unique() {
        let a = JobPosting::create(
            "A".into(),
            "Design".into(),
            "Berlin".into(),
            JobType::Contract,
            "1+ years".into(),
            "x".into(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        let b = JobPosting::create(
            "B".into(),
            "Design".into(),
            "Berlin".into(),
            JobType::Contract,
            "1+ years".into(),
            "y".into(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_status_filter_cycles_back_to_all() {
        let mut filter = None;
        for _ in 0..=JobStatus::ALL.len() {
            filter = JobStatus::cycle_filter(filter);
        }
        assert_eq!(filter, None);
    }
}
