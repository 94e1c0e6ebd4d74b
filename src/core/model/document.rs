//! Company documents shared through the dashboard.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::grid::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocCategory {
    Policy,
    Form,
    Report,
    Guide,
}

impl DocCategory {
    pub const ALL: [DocCategory; 4] = [
        DocCategory::Policy,
        DocCategory::Form,
        DocCategory::Report,
        DocCategory::Guide,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocCategory::Policy => "Policy",
            DocCategory::Form => "Form",
            DocCategory::Report => "Report",
            DocCategory::Guide => "Guide",
        }
    }

    pub fn cycle_filter(current: Option<DocCategory>) -> Option<DocCategory> {
        match current {
            None => Some(Self::ALL[0]),
            Some(category) => {
                let idx = Self::ALL.iter().position(|&c| c == category).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub id: String,
    pub name: String,
    pub category: DocCategory,
    pub file_type: String,
    pub size_kb: u64,
    pub uploaded: NaiveDate,
    pub owner: String,
}

impl DocumentFile {
    /// A document registered through the upload form: fresh id, uploaded
    /// today, file type taken from the name's extension.
    pub fn upload(name: String, category: DocCategory, owner: String, size_kb: u64) -> Self {
        let file_type = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_else(|| "file".to_string());
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            category,
            file_type,
            size_kb,
            uploaded: Local::now().date_naive(),
            owner,
        }
    }

    /// Human-readable size, KB below one MB and one-decimal MB above.
    pub fn size_label(&self) -> String {
        if self.size_kb < 1024 {
            format!("{} KB", self.size_kb)
        } else {
            format!("{:.1} MB", self.size_kb as f64 / 1024.0)
        }
    }
}

impl Record for DocumentFile {
    fn id(&self) -> &str {
        &self.id
    }
}
