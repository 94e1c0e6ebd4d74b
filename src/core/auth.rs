//! Role-based access to dashboard sections.
//!
//! Roles are plain strings from the session config. The mapping to
//! permissions is total: any role not listed here gets no permissions,
//! so a typo in the config locks the session out instead of opening it up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    ViewDashboard,
    ManageJobs,
    ReviewApplications,
    ManagePages,
    ManageTasks,
    ManageDocuments,
    ManageMedia,
    ManageInbox,
    ManageSettings,
}

const ADMIN: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageJobs,
    Permission::ReviewApplications,
    Permission::ManagePages,
    Permission::ManageTasks,
    Permission::ManageDocuments,
    Permission::ManageMedia,
    Permission::ManageInbox,
    Permission::ManageSettings,
];

const EDITOR: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManagePages,
    Permission::ManageMedia,
    Permission::ManageDocuments,
    Permission::ManageTasks,
];

const HR: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageJobs,
    Permission::ReviewApplications,
    Permission::ManageTasks,
    Permission::ManageDocuments,
];

const SUPPORT: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageInbox,
    Permission::ManageTasks,
];

/// Unknown roles resolve to the empty slice.
pub fn permissions_for(role: &str) -> &'static [Permission] {
    match role {
        "admin" => ADMIN,
        "editor" => EDITOR,
        "hr" => HR,
        "support" => SUPPORT,
        _ => &[],
    }
}

/// The signed-in operator for this dashboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

impl SessionUser {
    pub fn permissions(&self) -> &'static [Permission] {
        permissions_for(&self.role)
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}
