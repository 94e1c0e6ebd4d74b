//! Site pages managed by the content team.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::grid::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStatus {
    Published,
    Draft,
}

impl PageStatus {
    pub const ALL: [PageStatus; 2] = [PageStatus::Published, PageStatus::Draft];

    pub fn label(self) -> &'static str {
        match self {
            PageStatus::Published => "Published",
            PageStatus::Draft => "Draft",
        }
    }

    /// The publish/unpublish quick toggle.
    pub fn toggled(self) -> Self {
        match self {
            PageStatus::Published => PageStatus::Draft,
            PageStatus::Draft => PageStatus::Published,
        }
    }

    pub fn cycle_filter(current: Option<PageStatus>) -> Option<PageStatus> {
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
pub struct SitePage {
    pub id: String,
    pub title: String,
    /// URL path segment, e.g. "about-us".
    pub slug: String,
    pub author: String,
    pub status: PageStatus,
    pub modified: NaiveDate,
}

impl SitePage {
    /// A page created from the editor form: fresh id, modified today,
    /// drafted until explicitly published.
    pub fn create(title: String, slug: String, author: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            slug,
            author,
            status: PageStatus::Draft,
            modified: Local::now().date_naive(),
        }
    }

    /// Record an edit: forms update content fields and bump the
    /// modification date in one step.
    pub fn touch(&mut self) {
        self.modified = Local::now().date_naive();
    }
}

impl Record for SitePage {
    fn id(&self) -> &str {
        &self.id
    }
}
