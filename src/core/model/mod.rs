//! Record types for the management screens.
//!
//! One module per screen entity. Status fields are open enumerations: any
//! status may be set from any other (the edit forms and quick actions do not
//! enforce a transition graph).

pub mod application;
pub mod document;
pub mod job;
pub mod media;
pub mod message;
pub mod page;
pub mod task;

pub use application::{Application, ApplicationStatus};
pub use document::{DocCategory, DocumentFile};
pub use job::{JobPosting, JobStatus, JobType};
pub use media::{MediaAsset, MediaKind};
pub use message::{InboxMessage, MessageStatus};
pub use page::{PageStatus, SitePage};
pub use task::{TaskItem, TaskPriority, TaskStatus};
