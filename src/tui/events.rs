use crate::core::auth::Permission;
use crate::core::notify::Toast;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for spinners, toast TTLs, etc.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Toast to display in the overlay.
    Toast(Toast),
    /// A simulated reply send completed (Ok) or failed (error text).
    ReplyFinished {
        message_id: String,
        result: Result<(), String>,
    },
    /// A resolved action to execute.
    Action(Action),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Focus(Section),
    TabNext,
    TabPrev,
    ToggleSidebar,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Which top-level management screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Jobs,
    Applications,
    Pages,
    Media,
    Documents,
    Tasks,
    Inbox,
    Settings,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Dashboard,
        Section::Jobs,
        Section::Applications,
        Section::Pages,
        Section::Media,
        Section::Documents,
        Section::Tasks,
        Section::Inbox,
        Section::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Jobs => "Jobs",
            Section::Applications => "Applications",
            Section::Pages => "Pages",
            Section::Media => "Media",
            Section::Documents => "Documents",
            Section::Tasks => "Tasks",
            Section::Inbox => "Inbox",
            Section::Settings => "Settings",
        }
    }

    /// Single-character marker for the collapsed sidebar.
    pub fn icon(self) -> &'static str {
        match self {
            Section::Dashboard => "◆",
            Section::Jobs => "◎",
            Section::Applications => "✉",
            Section::Pages => "▤",
            Section::Media => "▶",
            Section::Documents => "≡",
            Section::Tasks => "✓",
            Section::Inbox => "@",
            Section::Settings => "⚙",
        }
    }

    /// The permission a session needs before this screen is reachable.
    pub fn required_permission(self) -> Permission {
        match self {
            Section::Dashboard => Permission::ViewDashboard,
            Section::Jobs => Permission::ManageJobs,
            Section::Applications => Permission::ReviewApplications,
            Section::Pages => Permission::ManagePages,
            Section::Media => Permission::ManageMedia,
            Section::Documents => Permission::ManageDocuments,
            Section::Tasks => Permission::ManageTasks,
            Section::Inbox => Permission::ManageInbox,
            Section::Settings => Permission::ManageSettings,
        }
    }

    pub fn to_action(self) -> Action {
        Action::Focus(self)
    }
}

/// Sidebar navigation groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarGroup {
    Overview,
    Recruitment,
    Content,
    Operations,
    System,
}

impl SidebarGroup {
    pub const ALL: [SidebarGroup; 5] = [
        SidebarGroup::Overview,
        SidebarGroup::Recruitment,
        SidebarGroup::Content,
        SidebarGroup::Operations,
        SidebarGroup::System,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SidebarGroup::Overview => "OVERVIEW",
            SidebarGroup::Recruitment => "RECRUITMENT",
            SidebarGroup::Content => "CONTENT",
            SidebarGroup::Operations => "OPERATIONS",
            SidebarGroup::System => "SYSTEM",
        }
    }

    pub fn sections(self) -> &'static [Section] {
        match self {
            SidebarGroup::Overview => &[Section::Dashboard],
            SidebarGroup::Recruitment => &[Section::Jobs, Section::Applications],
            SidebarGroup::Content => &[Section::Pages, Section::Media, Section::Documents],
            SidebarGroup::Operations => &[Section::Tasks, Section::Inbox],
            SidebarGroup::System => &[Section::Settings],
        }
    }
}

/// Whether the sidebar or main content has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaFocus {
    Sidebar,
    Main,
}
