//! Mock shipyard content and the typed detail view models shown in modals.

use crate::{
    metrics::{Department, DepartmentWorkload, Kpis},
    navigation::SectionId,
};

const STATUS_PROJECT_NAMES: [&str; 6] = [
    "Tanker Hull #001",
    "Fishing Vessel Electrical System #045",
    "Structural Welding #023",
    "Hull Painting #067",
    "Engine Installation #012",
    "Navigation System #089",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProjectState {
    OnTime,
    AtRisk,
    Delayed,
}

impl ProjectState {
    pub const ALL: [ProjectState; 3] = [
        ProjectState::OnTime,
        ProjectState::AtRisk,
        ProjectState::Delayed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectState::OnTime => "On Time",
            ProjectState::AtRisk => "At Risk",
            ProjectState::Delayed => "Delayed",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectCard {
    pub name: &'static str,
    pub code: &'static str,
    pub state: ProjectState,
    pub priority: Priority,
    pub progress: u32,
    pub responsible: &'static str,
    pub next_milestone: &'static str,
    pub time_remaining: &'static str,
}

static ENGINEERING_PROJECTS: [ProjectCard; 3] = [
    ProjectCard {
        name: "Structural Design Tanker TK-001",
        code: "ENG-2024-001",
        state: ProjectState::OnTime,
        priority: Priority::High,
        progress: 75,
        responsible: "Eng. María González",
        next_milestone: "Drawing review - 2 Aug 2025",
        time_remaining: "45 days",
    },
    ProjectCard {
        name: "Propulsion System Specs PQ-045",
        code: "ENG-2024-002",
        state: ProjectState::AtRisk,
        priority: Priority::Medium,
        progress: 60,
        responsible: "Eng. Roberto Silva",
        next_milestone: "Specification delivery - 5 Aug 2025",
        time_remaining: "6 days",
    },
    ProjectCard {
        name: "Structural Analysis Dry Dock #2",
        code: "ENG-2024-003",
        state: ProjectState::Delayed,
        priority: Priority::High,
        progress: 45,
        responsible: "Eng. Ana Torres",
        next_milestone: "Analysis report - 1 Aug 2025",
        time_remaining: "2 days (late)",
    },
];

static CIVIL_PROJECTS: [ProjectCard; 2] = [
    ProjectCard {
        name: "Sector B Foundations",
        code: "CIV-2024-011",
        state: ProjectState::Delayed,
        priority: Priority::High,
        progress: 38,
        responsible: "Eng. Luis Pardo",
        next_milestone: "Concrete pour - 9 Aug 2025",
        time_remaining: "12 days (2 late)",
    },
    ProjectCard {
        name: "Slipway Reinforcement",
        code: "CIV-2024-014",
        state: ProjectState::OnTime,
        priority: Priority::Low,
        progress: 82,
        responsible: "Eng. Carla Ruiz",
        next_milestone: "Load test - 20 Aug 2025",
        time_remaining: "30 days",
    },
];

static NAVAL_PROJECTS: [ProjectCard; 2] = [
    ProjectCard {
        name: "Naval-2024-03 Hull Assembly",
        code: "NAV-2024-003",
        state: ProjectState::OnTime,
        priority: Priority::High,
        progress: 68,
        responsible: "Eng. Diego Marín",
        next_milestone: "Sea trials - 17 Aug 2025",
        time_remaining: "28 days",
    },
    ProjectCard {
        name: "Trawler Refit #112",
        code: "NAV-2024-007",
        state: ProjectState::AtRisk,
        priority: Priority::Medium,
        progress: 51,
        responsible: "Eng. Sofía Reyes",
        next_milestone: "Deck handover - 8 Aug 2025",
        time_remaining: "9 days",
    },
];

static ELECTRICAL_PROJECTS: [ProjectCard; 1] = [ProjectCard {
    name: "Switchboard Retrofit PQ-045",
    code: "ELE-2024-004",
    state: ProjectState::OnTime,
    priority: Priority::Medium,
    progress: 90,
    responsible: "Eng. Pablo Vega",
    next_milestone: "Commissioning - 4 Aug 2025",
    time_remaining: "5 days",
}];

/// Project cards listed under a department's projects tab.
pub fn department_projects(section: SectionId) -> &'static [ProjectCard] {
    match section {
        SectionId::Engineering => &ENGINEERING_PROJECTS,
        SectionId::CivilWorks => &CIVIL_PROJECTS,
        SectionId::Naval => &NAVAL_PROJECTS,
        SectionId::Electrical => &ELECTRICAL_PROJECTS,
        _ => &[],
    }
}

pub fn section_department(section: SectionId) -> Option<Department> {
    match section {
        SectionId::Engineering => Some(Department::Engineering),
        SectionId::CivilWorks => Some(Department::CivilWorks),
        SectionId::Naval => Some(Department::Naval),
        SectionId::Electrical => Some(Department::Electrical),
        _ => None,
    }
}

pub fn department_section(department: Department) -> SectionId {
    match department {
        Department::Engineering => SectionId::Engineering,
        Department::CivilWorks => SectionId::CivilWorks,
        Department::Naval => SectionId::Naval,
        Department::Electrical => SectionId::Electrical,
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectState),
}

impl StatusFilter {
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(ProjectState::OnTime),
            StatusFilter::Only(ProjectState::OnTime) => StatusFilter::Only(ProjectState::AtRisk),
            StatusFilter::Only(ProjectState::AtRisk) => StatusFilter::Only(ProjectState::Delayed),
            StatusFilter::Only(ProjectState::Delayed) => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(state) => state.label(),
        }
    }

    fn matches(self, card: &ProjectCard) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(state) => card.state == state,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn next(self) -> Self {
        match self {
            PriorityFilter::All => PriorityFilter::Only(Priority::High),
            PriorityFilter::Only(Priority::High) => PriorityFilter::Only(Priority::Medium),
            PriorityFilter::Only(Priority::Medium) => PriorityFilter::Only(Priority::Low),
            PriorityFilter::Only(Priority::Low) => PriorityFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityFilter::All => "All",
            PriorityFilter::Only(priority) => priority.label(),
        }
    }

    fn matches(self, card: &ProjectCard) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => card.priority == priority,
        }
    }
}

pub fn filter_projects(
    cards: &'static [ProjectCard],
    status: StatusFilter,
    priority: PriorityFilter,
) -> Vec<&'static ProjectCard> {
    cards
        .iter()
        .filter(|card| status.matches(card) && priority.matches(card))
        .collect()
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MilestoneStatus {
    Urgent,
    Important,
    Normal,
}

impl MilestoneStatus {
    pub fn label(self) -> &'static str {
        match self {
            MilestoneStatus::Urgent => "urgent",
            MilestoneStatus::Important => "important",
            MilestoneStatus::Normal => "normal",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Milestone {
    pub title: &'static str,
    pub date: &'static str,
    pub status: MilestoneStatus,
}

pub static MILESTONES: [Milestone; 5] = [
    Milestone {
        title: "Hull Delivery Vessel #001",
        date: "15 Dec",
        status: MilestoneStatus::Urgent,
    },
    Milestone {
        title: "Electrical System Review",
        date: "16 Dec",
        status: MilestoneStatus::Normal,
    },
    Milestone {
        title: "Navigation Trials",
        date: "17 Dec",
        status: MilestoneStatus::Normal,
    },
    Milestone {
        title: "Final Inspection #045",
        date: "18 Dec",
        status: MilestoneStatus::Important,
    },
    Milestone {
        title: "Marine Client Handover",
        date: "20 Dec",
        status: MilestoneStatus::Urgent,
    },
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NotificationKind {
    Warning,
    Maintenance,
    Info,
    Success,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: &'static str,
    pub age: &'static str,
}

pub static NOTIFICATIONS: [Notification; 4] = [
    Notification {
        kind: NotificationKind::Warning,
        title: "Civil Works Delay",
        message: "Sector B foundations are 2 days behind the planned schedule.",
        age: "3 hours ago",
    },
    Notification {
        kind: NotificationKind::Maintenance,
        title: "Scheduled Maintenance",
        message: "Preventive maintenance of electrical equipment has started. Estimated duration: 4 hours.",
        age: "1 hour ago",
    },
    Notification {
        kind: NotificationKind::Info,
        title: "Drawing Review Completed",
        message: "Technical review of structural drawings for Naval-2024-03 completed successfully.",
        age: "30 minutes ago",
    },
    Notification {
        kind: NotificationKind::Success,
        title: "Structural Welding Finished",
        message: "Main hull structural welding is complete. Moving on to testing.",
        age: "2 hours ago",
    },
];

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub title: &'static str,
    pub detail: &'static str,
}

pub static ALERTS: [Alert; 3] = [
    Alert {
        title: "Crane #3 hydraulic pressure low",
        detail: "Dry dock 2, inspection required",
    },
    Alert {
        title: "Steel plate shipment late",
        detail: "Supplier ETA slipped 48h",
    },
    Alert {
        title: "Welding certification expiring",
        detail: "4 welders, Naval area",
    },
];

pub const PERSONNEL_BY_DEPARTMENT: [(Department, u32); 4] = [
    (Department::Engineering, 23),
    (Department::CivilWorks, 19),
    (Department::Naval, 21),
    (Department::Electrical, 12),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Attendance {
    pub present: u32,
    pub late: u32,
    pub absent: u32,
}

pub const ATTENDANCE: Attendance = Attendance {
    present: 89,
    late: 4,
    absent: 2,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KpiKind {
    Productivity,
    Quality,
    Safety,
    Efficiency,
}

impl KpiKind {
    pub const ALL: [KpiKind; 4] = [
        KpiKind::Productivity,
        KpiKind::Quality,
        KpiKind::Safety,
        KpiKind::Efficiency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KpiKind::Productivity => "Productivity",
            KpiKind::Quality => "Quality",
            KpiKind::Safety => "Safety",
            KpiKind::Efficiency => "Efficiency",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            KpiKind::Productivity => "Overall production output",
            KpiKind::Quality => "Compliance with quality standards",
            KpiKind::Safety => "Workplace safety record",
            KpiKind::Efficiency => "Optimal use of resources",
        }
    }

    pub fn format_value(self, kpis: &Kpis) -> String {
        match self {
            KpiKind::Productivity => format!("{}%", kpis.productivity),
            KpiKind::Quality => format!("{}%", kpis.quality),
            KpiKind::Safety => match kpis.safety_incidents {
                1 => "1 incident".to_string(),
                count => format!("{count} incidents"),
            },
            KpiKind::Efficiency => format!("{}%", kpis.efficiency),
        }
    }
}

/// Typed content of the detail modal.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailContent {
    ProjectsByStatus {
        state: ProjectState,
        count: u32,
        projects: Vec<&'static str>,
    },
    Kpi {
        kind: KpiKind,
        value: String,
    },
    Department {
        department: Department,
        current: u32,
        max: u32,
        efficiency: u32,
    },
    Milestone(Milestone),
    Personnel {
        by_department: Vec<(Department, u32)>,
        attendance: Attendance,
    },
    Notifications(Vec<Notification>),
    Project {
        card: ProjectCard,
        department: Department,
    },
}

/// Follow-up a modal can offer besides closing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ModalAction {
    GoToSection(SectionId),
}

impl DetailContent {
    pub fn projects_by_status(state: ProjectState, count: u32) -> (String, Self) {
        let projects = STATUS_PROJECT_NAMES
            .iter()
            .take(count.min(STATUS_PROJECT_NAMES.len() as u32) as usize)
            .copied()
            .collect();
        (
            format!("Projects {}", state.label()),
            DetailContent::ProjectsByStatus {
                state,
                count,
                projects,
            },
        )
    }

    pub fn kpi(kind: KpiKind, kpis: &Kpis) -> (String, Self) {
        (
            format!("Metric: {}", kind.label()),
            DetailContent::Kpi {
                kind,
                value: kind.format_value(kpis),
            },
        )
    }

    pub fn department(workload: &DepartmentWorkload) -> (String, Self) {
        (
            format!("Department: {}", workload.department.label()),
            DetailContent::Department {
                department: workload.department,
                current: workload.current,
                max: workload.max,
                efficiency: (workload.ratio() * 100.0).round() as u32,
            },
        )
    }

    /// Out-of-range indexes yield nothing.
    pub fn milestone(index: usize) -> Option<(String, Self)> {
        let milestone = MILESTONES.get(index)?;
        Some((
            format!("Milestone: {}", milestone.title),
            DetailContent::Milestone(milestone.clone()),
        ))
    }

    pub fn personnel() -> (String, Self) {
        (
            "Active Personnel".to_string(),
            DetailContent::Personnel {
                by_department: PERSONNEL_BY_DEPARTMENT.to_vec(),
                attendance: ATTENDANCE,
            },
        )
    }

    pub fn notifications() -> (String, Self) {
        (
            "System Notifications".to_string(),
            DetailContent::Notifications(NOTIFICATIONS.to_vec()),
        )
    }

    pub fn project(section: SectionId, card: &ProjectCard) -> Option<(String, Self)> {
        let department = section_department(section)?;
        Some((
            format!("Project: {}", card.name),
            DetailContent::Project {
                card: card.clone(),
                department,
            },
        ))
    }

    pub fn action(&self) -> Option<ModalAction> {
        match self {
            DetailContent::ProjectsByStatus { .. } => {
                Some(ModalAction::GoToSection(SectionId::Projects))
            }
            DetailContent::Department { department, .. } => {
                Some(ModalAction::GoToSection(department_section(*department)))
            }
            _ => None,
        }
    }

    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            DetailContent::ProjectsByStatus { .. } => Some("view all projects"),
            DetailContent::Department { .. } => Some("view department"),
            _ => None,
        }
    }
}
