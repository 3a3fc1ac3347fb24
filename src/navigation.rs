use std::collections::HashMap;

/// Viewport width (in viewport units) at or below which the layout is compact.
pub const COMPACT_WIDTH_THRESHOLD: u32 = 1024;

const APP_TITLE: &str = "Production Control Center";
const FALLBACK_SECTION_LABEL: &str = "Dashboard";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SectionId {
    Dashboard,
    Projects,
    Engineering,
    CivilWorks,
    Naval,
    Electrical,
    Documents,
    Settings,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::Dashboard,
        SectionId::Projects,
        SectionId::Engineering,
        SectionId::CivilWorks,
        SectionId::Naval,
        SectionId::Electrical,
        SectionId::Documents,
        SectionId::Settings,
    ];

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "dashboard" => Some(SectionId::Dashboard),
            "projects" => Some(SectionId::Projects),
            "engineering" => Some(SectionId::Engineering),
            "civil-works" => Some(SectionId::CivilWorks),
            "naval" => Some(SectionId::Naval),
            "electrical" => Some(SectionId::Electrical),
            "documents" => Some(SectionId::Documents),
            "settings" => Some(SectionId::Settings),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Dashboard => "dashboard",
            SectionId::Projects => "projects",
            SectionId::Engineering => "engineering",
            SectionId::CivilWorks => "civil-works",
            SectionId::Naval => "naval",
            SectionId::Electrical => "electrical",
            SectionId::Documents => "documents",
            SectionId::Settings => "settings",
        }
    }

    /// Short name used in the sidebar.
    pub fn short_label(self) -> &'static str {
        match self {
            SectionId::Dashboard => "Dashboard",
            SectionId::Projects => "Projects",
            SectionId::Engineering => "Engineering",
            SectionId::CivilWorks => "Civil Works",
            SectionId::Naval => "Naval",
            SectionId::Electrical => "Electrical",
            SectionId::Documents => "Documents",
            SectionId::Settings => "Settings",
        }
    }

    pub fn from_digit(ch: char) -> Option<Self> {
        let idx = ch.to_digit(10)? as usize;
        idx.checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tabs available inside the section; empty when the section has no tab region.
    pub fn tabs(self) -> &'static [TabId] {
        if self.is_department() {
            &TabId::DEPARTMENT
        } else {
            &[]
        }
    }

    pub fn is_department(self) -> bool {
        matches!(
            self,
            SectionId::Engineering | SectionId::CivilWorks | SectionId::Naval | SectionId::Electrical
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TabId {
    Projects,
    Gantt,
    Documentation,
    Team,
}

impl TabId {
    pub const DEPARTMENT: [TabId; 4] = [
        TabId::Projects,
        TabId::Gantt,
        TabId::Documentation,
        TabId::Team,
    ];

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "projects" => Some(TabId::Projects),
            "gantt" => Some(TabId::Gantt),
            "documentation" => Some(TabId::Documentation),
            "team" => Some(TabId::Team),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Projects => "projects",
            TabId::Gantt => "gantt",
            TabId::Documentation => "documentation",
            TabId::Team => "team",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TabId::Projects => "Projects",
            TabId::Gantt => "Gantt",
            TabId::Documentation => "Documentation",
            TabId::Team => "Team",
        }
    }
}

/// Window title for a raw section id. Unmapped ids get the generic label.
pub fn window_title(section_id: &str) -> String {
    let label = match section_id {
        "dashboard" => "Main Dashboard",
        "projects" => "Project Management",
        "engineering" => "Engineering Area",
        "civil-works" => "Civil Works Area",
        "naval" => "Naval Area",
        "electrical" => "Electrical Area",
        "documents" => "Document Repository",
        "settings" => "Settings",
        _ => FALLBACK_SECTION_LABEL,
    };
    format!("{label} - {APP_TITLE}")
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LayoutMode {
    Compact,
    Expanded,
}

impl LayoutMode {
    pub fn for_width(width: u32) -> Self {
        if width <= COMPACT_WIDTH_THRESHOLD {
            LayoutMode::Compact
        } else {
            LayoutMode::Expanded
        }
    }
}

/// Sidebar flags. `open` only means something in compact mode (overlay),
/// `collapsed` only in expanded mode (reflow).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SidebarState {
    open: bool,
    collapsed: bool,
    layout: LayoutMode,
}

impl SidebarState {
    pub fn new(width: u32) -> Self {
        Self {
            open: false,
            collapsed: false,
            layout: LayoutMode::for_width(width),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn toggle(&mut self) {
        match self.layout {
            LayoutMode::Compact => self.open = !self.open,
            LayoutMode::Expanded => self.collapsed = !self.collapsed,
        }
    }

    pub fn close(&mut self) {
        if self.layout == LayoutMode::Compact {
            self.open = false;
        }
    }

    /// Returns true when the layout mode changed.
    pub fn on_viewport_change(&mut self, width: u32) -> bool {
        let layout = LayoutMode::for_width(width);
        if layout == self.layout {
            return false;
        }
        self.layout = layout;
        self.open = false;
        self.collapsed = false;
        true
    }
}

/// Which section is visible, which tab each section remembers, and the sidebar.
#[derive(Clone, Debug)]
pub struct NavigationState {
    active_section: SectionId,
    active_tab_by_section: HashMap<SectionId, TabId>,
    sidebar: SidebarState,
    title: String,
}

impl NavigationState {
    pub fn new(initial: SectionId, viewport_width: u32) -> Self {
        let active_tab_by_section = SectionId::ALL
            .iter()
            .filter_map(|section| section.tabs().first().map(|tab| (*section, *tab)))
            .collect();
        Self {
            active_section: initial,
            active_tab_by_section,
            sidebar: SidebarState::new(viewport_width),
            title: window_title(initial.as_str()),
        }
    }

    pub fn active_section(&self) -> SectionId {
        self.active_section
    }

    pub fn is_visible(&self, section: SectionId) -> bool {
        self.active_section == section
    }

    #[cfg(test)]
    pub fn visible_sections(&self) -> Vec<SectionId> {
        SectionId::ALL
            .iter()
            .copied()
            .filter(|section| self.is_visible(*section))
            .collect()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sidebar(&self) -> &SidebarState {
        &self.sidebar
    }

    pub fn active_tab(&self, section: SectionId) -> Option<TabId> {
        self.active_tab_by_section.get(&section).copied()
    }

    /// Activates a section by raw id. Unknown ids leave the state untouched.
    pub fn activate_section(&mut self, id: &str) -> bool {
        match SectionId::parse(id) {
            Some(section) => {
                self.activate(section);
                true
            }
            None => {
                tracing::debug!(section = id, "ignoring unknown section");
                false
            }
        }
    }

    pub fn activate(&mut self, section: SectionId) {
        if self.active_section != section {
            tracing::debug!(from = self.active_section.as_str(), to = section.as_str(), "section activated");
        }
        self.active_section = section;
        self.title = window_title(section.as_str());
    }

    /// Activates a tab inside a section by raw ids. The section must have a
    /// tab region containing the tab; anything else is skipped.
    pub fn activate_tab(&mut self, section_id: &str, tab_id: &str) -> bool {
        let (Some(section), Some(tab)) = (SectionId::parse(section_id), TabId::parse(tab_id))
        else {
            tracing::debug!(section = section_id, tab = tab_id, "ignoring unknown tab target");
            return false;
        };
        self.select_tab(section, tab)
    }

    pub fn select_tab(&mut self, section: SectionId, tab: TabId) -> bool {
        if !section.tabs().contains(&tab) {
            return false;
        }
        self.active_tab_by_section.insert(section, tab);
        tracing::debug!(section = section.as_str(), tab = tab.as_str(), "tab activated");
        true
    }

    /// Moves the active section's tab by `step`, wrapping around.
    pub fn cycle_tab(&mut self, step: isize) -> bool {
        let section = self.active_section;
        let tabs = section.tabs();
        if tabs.is_empty() {
            return false;
        }
        let current = self
            .active_tab(section)
            .and_then(|tab| tabs.iter().position(|candidate| *candidate == tab))
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.select_tab(section, tabs[next])
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar.toggle();
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar.close();
    }

    pub fn on_viewport_change(&mut self, width: u32) -> bool {
        let changed = self.sidebar.on_viewport_change(width);
        if changed {
            tracing::debug!(width, layout = ?self.sidebar.layout(), "layout mode changed");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: u32 = 1600;
    const NARROW: u32 = 800;

    #[test]
    fn activating_known_section_leaves_exactly_one_visible() {
        for target in SectionId::ALL {
            let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
            assert!(nav.activate_section(target.as_str()));
            assert_eq!(nav.visible_sections(), vec![target]);
        }
    }

    #[test]
    fn unknown_section_is_a_no_op() {
        let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
        assert!(nav.activate_section("engineering"));
        let title = nav.title().to_string();

        assert!(!nav.activate_section("bogus"));
        assert_eq!(nav.active_section(), SectionId::Engineering);
        assert_eq!(nav.title(), title);
    }

    #[test]
    fn dashboard_to_engineering_scenario() {
        let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
        assert!(nav.is_visible(SectionId::Dashboard));

        nav.activate_section("engineering");
        assert!(!nav.is_visible(SectionId::Dashboard));
        assert!(nav.is_visible(SectionId::Engineering));
        assert_eq!(nav.title(), "Engineering Area - Production Control Center");

        nav.activate_section("bogus");
        assert_eq!(nav.active_section(), SectionId::Engineering);
    }

    #[test]
    fn window_title_falls_back_for_unmapped_ids() {
        assert_eq!(window_title("nowhere"), "Dashboard - Production Control Center");
        assert_eq!(window_title("naval"), "Naval Area - Production Control Center");
    }

    #[test]
    fn tabs_default_to_first_and_are_remembered_per_section() {
        let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
        assert_eq!(nav.active_tab(SectionId::Engineering), Some(TabId::Projects));
        assert_eq!(nav.active_tab(SectionId::Naval), Some(TabId::Projects));

        assert!(nav.activate_tab("engineering", "gantt"));
        assert_eq!(nav.active_tab(SectionId::Engineering), Some(TabId::Gantt));
        assert_eq!(nav.active_tab(SectionId::Naval), Some(TabId::Projects));
        assert_eq!(nav.active_section(), SectionId::Dashboard);
    }

    #[test]
    fn tab_activation_requires_a_tab_region() {
        let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
        assert!(!nav.activate_tab("dashboard", "projects"));
        assert!(!nav.activate_tab("engineering", "bogus"));
        assert!(!nav.activate_tab("bogus", "team"));
        assert_eq!(nav.active_tab(SectionId::Dashboard), None);
        assert_eq!(nav.active_tab(SectionId::Engineering), Some(TabId::Projects));
    }

    #[test]
    fn cycle_tab_wraps_within_active_section() {
        let mut nav = NavigationState::new(SectionId::Electrical, WIDE);
        assert!(nav.cycle_tab(-1));
        assert_eq!(nav.active_tab(SectionId::Electrical), Some(TabId::Team));
        assert!(nav.cycle_tab(1));
        assert_eq!(nav.active_tab(SectionId::Electrical), Some(TabId::Projects));

        nav.activate(SectionId::Settings);
        assert!(!nav.cycle_tab(1));
    }

    #[test]
    fn compact_toggle_only_flips_open() {
        let mut nav = NavigationState::new(SectionId::Dashboard, NARROW);
        assert_eq!(nav.sidebar().layout(), LayoutMode::Compact);
        nav.toggle_sidebar();
        assert!(nav.sidebar().is_open());
        assert!(!nav.sidebar().is_collapsed());
        nav.toggle_sidebar();
        assert!(!nav.sidebar().is_open());
        assert!(!nav.sidebar().is_collapsed());
    }

    #[test]
    fn expanded_toggle_only_flips_collapsed() {
        let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
        assert_eq!(nav.sidebar().layout(), LayoutMode::Expanded);
        nav.toggle_sidebar();
        assert!(nav.sidebar().is_collapsed());
        assert!(!nav.sidebar().is_open());
        nav.close_sidebar();
        assert!(nav.sidebar().is_collapsed());
    }

    #[test]
    fn mode_transition_resets_both_flags() {
        let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
        nav.toggle_sidebar();
        assert!(nav.on_viewport_change(NARROW));
        assert!(!nav.sidebar().is_open());
        assert!(!nav.sidebar().is_collapsed());

        nav.toggle_sidebar();
        assert!(nav.sidebar().is_open());
        assert!(nav.on_viewport_change(WIDE));
        assert!(!nav.sidebar().is_open());
        assert!(!nav.sidebar().is_collapsed());
    }

    #[test]
    fn resize_within_same_mode_keeps_flags() {
        let mut nav = NavigationState::new(SectionId::Dashboard, WIDE);
        nav.toggle_sidebar();
        assert!(!nav.on_viewport_change(WIDE + 200));
        assert!(nav.sidebar().is_collapsed());
    }

    #[test]
    fn threshold_is_inclusive_for_compact() {
        assert_eq!(LayoutMode::for_width(COMPACT_WIDTH_THRESHOLD), LayoutMode::Compact);
        assert_eq!(LayoutMode::for_width(COMPACT_WIDTH_THRESHOLD + 1), LayoutMode::Expanded);
    }

    #[test]
    fn digits_map_to_sidebar_order() {
        assert_eq!(SectionId::from_digit('1'), Some(SectionId::Dashboard));
        assert_eq!(SectionId::from_digit('8'), Some(SectionId::Settings));
        assert_eq!(SectionId::from_digit('0'), None);
        assert_eq!(SectionId::from_digit('9'), None);
        assert_eq!(SectionId::Settings.next(), SectionId::Dashboard);
        assert_eq!(SectionId::Dashboard.prev(), SectionId::Settings);
    }
}
