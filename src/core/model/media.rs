//! Images and videos in the site media library.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::grid::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Image, MediaKind::Video];

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }

    pub fn cycle_filter(current: Option<MediaKind>) -> Option<MediaKind> {
        match current {
            None => Some(Self::ALL[0]),
            Some(kind) => {
                let idx = Self::ALL.iter().position(|&k| k == kind).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: String,
    pub name: String,
    pub kind: MediaKind,
    pub size_kb: u64,
    pub uploaded: NaiveDate,
    /// `WxH` for images, duration text for videos.
    pub dimensions: Option<String>,
}

impl MediaAsset {
    pub fn size_label(&self) -> String {
        if self.size_kb < 1024 {
            format!("{} KB", self.size_kb)
        } else {
            format!("{:.1} MB", self.size_kb as f64 / 1024.0)
        }
    }
}

impl Record for MediaAsset {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_filter_cycles_back_to_none() {
        let mut current = None;
        current = MediaKind::cycle_filter(current);
        assert_eq!(current, Some(MediaKind::Image));
        current = MediaKind::cycle_filter(current);
        assert_eq!(current, Some(MediaKind::Video));
        current = MediaKind::cycle_filter(current);
        assert_eq!(current, None);
    }
}
