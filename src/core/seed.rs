//! Built-in demo dataset.
//!
//! The dashboard runs against in-memory collections. These constructors
//! produce the fixture records every screen starts from.

use chrono::NaiveDate;

use crate::core::model::{
    Application, ApplicationStatus, DocCategory, DocumentFile, InboxMessage, JobPosting,
    JobStatus, JobType, MediaAsset, MediaKind, MessageStatus, PageStatus, SitePage, TaskItem,
    TaskPriority, TaskStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn id(prefix: &str, n: u32) -> String {
    format!("{prefix}-{n:03}")
}

pub fn jobs() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: id("job", 1),
            title: "Senior Backend Engineer".into(),
            department: "Engineering".into(),
            location: "Remote".into(),
            job_type: JobType::FullTime,
            experience: "5+ years".into(),
            description: "Own the services behind our public site and internal tooling.".into(),
            requirements: vec![
                "Production experience with distributed systems".into(),
                "Fluency in at least one systems language".into(),
                "Comfort owning services end to end".into(),
            ],
            posted_date: date(2024, 3, 1),
            closing_date: date(2024, 4, 15),
            status: JobStatus::Active,
            applicants: 24,
        },
        JobPosting {
            id: id("job", 2),
            title: "Product Designer".into(),
            department: "Design".into(),
            location: "Berlin".into(),
            job_type: JobType::FullTime,
            experience: "3+ years".into(),
            description: "Shape the visual language of the company across web and print.".into(),
            requirements: vec![
                "Strong portfolio of shipped product work".into(),
                "Experience running design critiques".into(),
            ],
            posted_date: date(2024, 3, 5),
            closing_date: date(2024, 4, 20),
            status: JobStatus::Active,
            applicants: 17,
        },
        JobPosting {
            id: id("job", 3),
            title: "Marketing Manager".into(),
            department: "Marketing".into(),
            location: "London".into(),
            job_type: JobType::FullTime,
            experience: "4+ years".into(),
            description: "Lead campaigns and own the content calendar.".into(),
            requirements: vec![
                "B2B campaign experience".into(),
                "Comfortable with analytics tooling".into(),
            ],
            posted_date: date(2024, 2, 20),
            closing_date: date(2024, 4, 1),
            status: JobStatus::Active,
            applicants: 31,
        },
        JobPosting {
            id: id("job", 4),
            title: "Sales Development Representative".into(),
            department: "Sales".into(),
            location: "New York".into(),
            job_type: JobType::FullTime,
            experience: "1+ years".into(),
            description: "Open doors with prospective customers and qualify inbound leads.".into(),
            requirements: vec!["Excellent written communication".into()],
            posted_date: date(2024, 3, 10),
            closing_date: date(2024, 4, 30),
            status: JobStatus::Active,
            applicants: 12,
        },
        JobPosting {
            id: id("job", 5),
            title: "Engineering Intern".into(),
            department: "Engineering".into(),
            location: "Remote".into(),
            job_type: JobType::Internship,
            experience: "None required".into(),
            description: "Summer internship on the platform team.".into(),
            requirements: vec!["Currently enrolled in a CS program".into()],
            posted_date: date(2024, 3, 12),
            closing_date: date(2024, 5, 1),
            status: JobStatus::Active,
            applicants: 45,
        },
        JobPosting {
            id: id("job", 6),
            title: "HR Generalist".into(),
            department: "Human Resources".into(),
            location: "Berlin".into(),
            job_type: JobType::PartTime,
            experience: "2+ years".into(),
            description: "Support hiring, onboarding, and people operations.".into(),
            requirements: vec!["Experience with an ATS".into()],
            posted_date: date(2024, 1, 15),
            closing_date: date(2024, 2, 28),
            status: JobStatus::Closed,
            applicants: 28,
        },
        JobPosting {
            id: id("job", 7),
            title: "Finance Analyst".into(),
            department: "Finance".into(),
            location: "London".into(),
            job_type: JobType::Contract,
            experience: "3+ years".into(),
            description: "Six-month contract covering quarterly reporting.".into(),
            requirements: vec!["Spreadsheet wizardry".into()],
            posted_date: date(2024, 1, 8),
            closing_date: date(2024, 2, 15),
            status: JobStatus::Closed,
            applicants: 9,
        },
        JobPosting {
            id: id("job", 8),
            title: "Staff Platform Engineer".into(),
            department: "Engineering".into(),
            location: "Remote".into(),
            job_type: JobType::FullTime,
            experience: "8+ years".into(),
            description: "Draft posting for the platform lead role.".into(),
            requirements: vec![],
            posted_date: date(2024, 3, 18),
            closing_date: date(2024, 5, 15),
            status: JobStatus::Draft,
            applicants: 0,
        },
    ]
}

pub fn applications() -> Vec<Application> {
    vec![
        Application {
            id: id("app", 1),
            applicant: "Sarah Chen".into(),
            email: "sarah.chen@example.com".into(),
            phone: "+1 555 0142".into(),
            job_title: "Senior Backend Engineer".into(),
            experience: "7 years".into(),
            applied_date: date(2024, 3, 20),
            status: ApplicationStatus::New,
            resume: "sarah-chen-cv.pdf".into(),
            notes: None,
        },
        Application {
            id: id("app", 2),
            applicant: "Miguel Alvarez".into(),
            email: "miguel.alvarez@example.com".into(),
            phone: "+34 612 880 301".into(),
            job_title: "Product Designer".into(),
            experience: "4 years".into(),
            applied_date: date(2024, 3, 18),
            status: ApplicationStatus::Shortlisted,
            resume: "miguel-alvarez-portfolio.pdf".into(),
            notes: Some("Strong portfolio, schedule a design exercise.".into()),
        },
        Application {
            id: id("app", 3),
            applicant: "Priya Nair".into(),
            email: "priya.nair@example.com".into(),
            phone: "+91 98450 22113".into(),
            job_title: "Senior Backend Engineer".into(),
            experience: "6 years".into(),
            applied_date: date(2024, 3, 12),
            status: ApplicationStatus::Reviewed,
            resume: "priya-nair-cv.pdf".into(),
            notes: Some("Solid distributed systems background.".into()),
        },
        Application {
            id: id("app", 4),
            applicant: "Tom Okafor".into(),
            email: "tom.okafor@example.com".into(),
            phone: "+44 7700 900415".into(),
            job_title: "Marketing Manager".into(),
            experience: "5 years".into(),
            applied_date: date(2024, 3, 15),
            status: ApplicationStatus::New,
            resume: "tom-okafor-cv.pdf".into(),
            notes: None,
        },
        Application {
            id: id("app", 5),
            applicant: "Lena Fischer".into(),
            email: "lena.fischer@example.com".into(),
            phone: "+49 151 2284 7730".into(),
            job_title: "Product Designer".into(),
            experience: "3 years".into(),
            applied_date: date(2024, 3, 10),
            status: ApplicationStatus::Rejected,
            resume: "lena-fischer-portfolio.pdf".into(),
            notes: Some("Good work but below the experience bar.".into()),
        },
        Application {
            id: id("app", 6),
            applicant: "David Kim".into(),
            email: "david.kim@example.com".into(),
            phone: "+1 555 0187".into(),
            job_title: "Sales Development Representative".into(),
            experience: "2 years".into(),
            applied_date: date(2024, 3, 16),
            status: ApplicationStatus::Shortlisted,
            resume: "david-kim-cv.pdf".into(),
            notes: None,
        },
        Application {
            id: id("app", 7),
            applicant: "Amara Diallo".into(),
            email: "amara.diallo@example.com".into(),
            phone: "+33 6 12 44 90 28".into(),
            job_title: "Engineering Intern".into(),
            experience: "Internships".into(),
            applied_date: date(2024, 3, 19),
            status: ApplicationStatus::New,
            resume: "amara-diallo-cv.pdf".into(),
            notes: None,
        },
        Application {
            id: id("app", 8),
            applicant: "Robert Hayes".into(),
            email: "robert.hayes@example.com".into(),
            phone: "+1 555 0109".into(),
            job_title: "Marketing Manager".into(),
            experience: "6 years".into(),
            applied_date: date(2024, 3, 8),
            status: ApplicationStatus::Hired,
            resume: "robert-hayes-cv.pdf".into(),
            notes: Some("Offer accepted, starts in May.".into()),
        },
    ]
}

pub fn pages() -> Vec<SitePage> {
    vec![
        SitePage {
            id: id("page", 1),
            title: "Home".into(),
            slug: "/".into(),
            author: "Marketing".into(),
            status: PageStatus::Published,
            modified: date(2024, 3, 14),
        },
        SitePage {
            id: id("page", 2),
            title: "About Us".into(),
            slug: "/about".into(),
            author: "Marketing".into(),
            status: PageStatus::Published,
            modified: date(2024, 2, 28),
        },
        SitePage {
            id: id("page", 3),
            title: "Careers".into(),
            slug: "/careers".into(),
            author: "HR Team".into(),
            status: PageStatus::Published,
            modified: date(2024, 3, 18),
        },
        SitePage {
            id: id("page", 4),
            title: "Contact".into(),
            slug: "/contact".into(),
            author: "Support".into(),
            status: PageStatus::Published,
            modified: date(2024, 1, 22),
        },
        SitePage {
            id: id("page", 5),
            title: "Spring Product Launch".into(),
            slug: "/launch-2024".into(),
            author: "Marketing".into(),
            status: PageStatus::Draft,
            modified: date(2024, 3, 21),
        },
        SitePage {
            id: id("page", 6),
            title: "Privacy Policy".into(),
            slug: "/privacy".into(),
            author: "Legal".into(),
            status: PageStatus::Draft,
            modified: date(2024, 3, 2),
        },
    ]
}

pub fn tasks() -> Vec<TaskItem> {
    vec![
        TaskItem {
            id: id("task", 1),
            title: "Refresh careers page copy".into(),
            assignee: "Priya".into(),
            due_date: date(2024, 3, 25),
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
        },
        TaskItem {
            id: id("task", 2),
            title: "Review Q1 hiring pipeline".into(),
            assignee: "Jordan".into(),
            due_date: date(2024, 3, 22),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
        },
        TaskItem {
            id: id("task", 3),
            title: "Archive closed job postings".into(),
            assignee: "Sam".into(),
            due_date: date(2024, 3, 15),
            priority: TaskPriority::Medium,
            status: TaskStatus::Overdue,
        },
        TaskItem {
            id: id("task", 4),
            title: "Draft launch announcement".into(),
            assignee: "Elena".into(),
            due_date: date(2024, 3, 28),
            priority: TaskPriority::Medium,
            status: TaskStatus::Pending,
        },
        TaskItem {
            id: id("task", 5),
            title: "Update office photos in media library".into(),
            assignee: "Sam".into(),
            due_date: date(2024, 3, 12),
            priority: TaskPriority::Low,
            status: TaskStatus::Completed,
        },
        TaskItem {
            id: id("task", 6),
            title: "Answer partnership enquiries".into(),
            assignee: "Jordan".into(),
            due_date: date(2024, 3, 24),
            priority: TaskPriority::Medium,
            status: TaskStatus::InProgress,
        },
        TaskItem {
            id: id("task", 7),
            title: "Rotate expired press kit links".into(),
            assignee: "Elena".into(),
            due_date: date(2024, 3, 10),
            priority: TaskPriority::Low,
            status: TaskStatus::Completed,
        },
    ]
}

pub fn documents() -> Vec<DocumentFile> {
    vec![
        DocumentFile {
            id: id("doc", 1),
            name: "Employee Handbook 2024.pdf".into(),
            category: DocCategory::Guide,
            file_type: "pdf".into(),
            size_kb: 2840,
            uploaded: date(2024, 1, 10),
            owner: "HR Team".into(),
        },
        DocumentFile {
            id: id("doc", 2),
            name: "Remote Work Policy.pdf".into(),
            category: DocCategory::Policy,
            file_type: "pdf".into(),
            size_kb: 412,
            uploaded: date(2024, 2, 5),
            owner: "HR Team".into(),
        },
        DocumentFile {
            id: id("doc", 3),
            name: "Expense Claim Form.xlsx".into(),
            category: DocCategory::Form,
            file_type: "xlsx".into(),
            size_kb: 88,
            uploaded: date(2024, 1, 18),
            owner: "Finance".into(),
        },
        DocumentFile {
            id: id("doc", 4),
            name: "Q4 2023 Hiring Report.pdf".into(),
            category: DocCategory::Report,
            file_type: "pdf".into(),
            size_kb: 1560,
            uploaded: date(2024, 1, 30),
            owner: "HR Team".into(),
        },
        DocumentFile {
            id: id("doc", 5),
            name: "Brand Guidelines.pdf".into(),
            category: DocCategory::Guide,
            file_type: "pdf".into(),
            size_kb: 9216,
            uploaded: date(2023, 11, 12),
            owner: "Design".into(),
        },
        DocumentFile {
            id: id("doc", 6),
            name: "Security Incident Policy.pdf".into(),
            category: DocCategory::Policy,
            file_type: "pdf".into(),
            size_kb: 356,
            uploaded: date(2024, 3, 4),
            owner: "Engineering".into(),
        },
        DocumentFile {
            id: id("doc", 7),
            name: "Interview Feedback Form.docx".into(),
            category: DocCategory::Form,
            file_type: "docx".into(),
            size_kb: 64,
            uploaded: date(2024, 2, 20),
            owner: "HR Team".into(),
        },
    ]
}

pub fn media() -> Vec<MediaAsset> {
    vec![
        MediaAsset {
            id: id("media", 1),
            name: "hero-banner.jpg".into(),
            kind: MediaKind::Image,
            size_kb: 840,
            uploaded: date(2024, 3, 1),
            dimensions: Some("2400x1200".into()),
        },
        MediaAsset {
            id: id("media", 2),
            name: "team-offsite.jpg".into(),
            kind: MediaKind::Image,
            size_kb: 1230,
            uploaded: date(2024, 2, 14),
            dimensions: Some("1920x1080".into()),
        },
        MediaAsset {
            id: id("media", 3),
            name: "office-tour.mp4".into(),
            kind: MediaKind::Video,
            size_kb: 48_600,
            uploaded: date(2024, 1, 25),
            dimensions: Some("2:34".into()),
        },
        MediaAsset {
            id: id("media", 4),
            name: "logo-dark.png".into(),
            kind: MediaKind::Image,
            size_kb: 42,
            uploaded: date(2023, 12, 1),
            dimensions: Some("512x512".into()),
        },
        MediaAsset {
            id: id("media", 5),
            name: "logo-light.png".into(),
            kind: MediaKind::Image,
            size_kb: 40,
            uploaded: date(2023, 12, 1),
            dimensions: Some("512x512".into()),
        },
        MediaAsset {
            id: id("media", 6),
            name: "ceo-keynote.mp4".into(),
            kind: MediaKind::Video,
            size_kb: 112_400,
            uploaded: date(2024, 3, 8),
            dimensions: Some("18:12".into()),
        },
        MediaAsset {
            id: id("media", 7),
            name: "careers-header.jpg".into(),
            kind: MediaKind::Image,
            size_kb: 760,
            uploaded: date(2024, 3, 17),
            dimensions: Some("2400x800".into()),
        },
        MediaAsset {
            id: id("media", 8),
            name: "product-demo.mp4".into(),
            kind: MediaKind::Video,
            size_kb: 68_900,
            uploaded: date(2024, 2, 28),
            dimensions: Some("4:05".into()),
        },
    ]
}

pub fn inbox() -> Vec<InboxMessage> {
    vec![
        InboxMessage {
            id: id("msg", 1),
            sender: "Dana Whitfield".into(),
            email: "dana@northbridge.example".into(),
            subject: "Partnership enquiry".into(),
            body: "Hi, we run a developer tooling company and would love to explore \
                   a co-marketing partnership. Who is the right person to talk to?"
                .into(),
            received: date(2024, 3, 21),
            status: MessageStatus::New,
            reply: None,
        },
        InboxMessage {
            id: id("msg", 2),
            sender: "Victor Ilyin".into(),
            email: "victor@example.com".into(),
            subject: "Broken link on careers page".into(),
            body: "The 'apply now' link for the designer role 404s on mobile.".into(),
            received: date(2024, 3, 20),
            status: MessageStatus::Read,
            reply: None,
        },
        InboxMessage {
            id: id("msg", 3),
            sender: "Hannah Osei".into(),
            email: "h.osei@citypress.example".into(),
            subject: "Press: comment on the spring launch?".into(),
            body: "Writing a piece on the upcoming launch, deadline Friday. \
                   Could someone give a short quote?"
                .into(),
            received: date(2024, 3, 19),
            status: MessageStatus::Replied,
            reply: Some("Thanks Hannah, our comms lead will email you a quote today.".into()),
        },
        InboxMessage {
            id: id("msg", 4),
            sender: "Luis Romero".into(),
            email: "luis.romero@example.com".into(),
            subject: "Invoice question".into(),
            body: "Invoice #2291 seems to double-count the February retainer.".into(),
            received: date(2024, 3, 18),
            status: MessageStatus::New,
            reply: None,
        },
        InboxMessage {
            id: id("msg", 5),
            sender: "Grace Tan".into(),
            email: "grace.tan@example.com".into(),
            subject: "Speaking opportunity".into(),
            body: "We'd love to have one of your engineers speak at our June meetup.".into(),
            received: date(2024, 3, 16),
            status: MessageStatus::Read,
            reply: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Record;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let mut seen = HashSet::new();
        for job in jobs() {
            assert!(seen.insert(job.id().to_string()));
        }
        for app in applications() {
            assert!(seen.insert(app.id().to_string()));
        }
        for page in pages() {
            assert!(seen.insert(page.id().to_string()));
        }
        for task in tasks() {
            assert!(seen.insert(task.id().to_string()));
        }
        for doc in documents() {
            assert!(seen.insert(doc.id().to_string()));
        }
        for asset in media() {
            assert!(seen.insert(asset.id().to_string()));
        }
        for msg in inbox() {
            assert!(seen.insert(msg.id().to_string()));
        }
    }

    #[test]
    fn test_job_status_mix() {
        let jobs = jobs();
        let active = jobs.iter().filter(|j| j.status == JobStatus::Active).count();
        let closed = jobs.iter().filter(|j| j.status == JobStatus::Closed).count();
        let draft = jobs.iter().filter(|j| j.status == JobStatus::Draft).count();
        assert_eq!((active, closed, draft), (5, 2, 1));
    }

    #[test]
    fn test_inbox_has_unread_messages() {
        assert!(inbox().iter().any(|m| m.status == MessageStatus::New));
    }
}
