use crate::{
    catalog::{ALERTS, DetailContent, KpiKind, MILESTONES, ProjectState},
    metrics::{Department, DashboardMetrics},
};
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate};
use std::time::{Duration, Instant};

/// How long the manual refresh spinner runs before data is regenerated.
pub const MANUAL_REFRESH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Widget {
    ProjectStatus,
    Kpis,
    Workload,
    Milestones,
    Personnel,
    Alerts,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::ProjectStatus,
        Widget::Kpis,
        Widget::Workload,
        Widget::Milestones,
        Widget::Personnel,
        Widget::Alerts,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Widget::ProjectStatus => "Project Status",
            Widget::Kpis => "Key Metrics",
            Widget::Workload => "Department Workload",
            Widget::Milestones => "Upcoming Milestones",
            Widget::Personnel => "Personnel",
            Widget::Alerts => "Critical Alerts",
        }
    }
}

/// Something on the dashboard that can be focused and opened.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DashboardTarget {
    ProjectSegment(ProjectState),
    Kpi(KpiKind),
    Workload(Department),
    Milestone(usize),
    Personnel,
    Alert(usize),
}

impl DashboardTarget {
    pub fn widget(self) -> Widget {
        match self {
            DashboardTarget::ProjectSegment(_) => Widget::ProjectStatus,
            DashboardTarget::Kpi(_) => Widget::Kpis,
            DashboardTarget::Workload(_) => Widget::Workload,
            DashboardTarget::Milestone(_) => Widget::Milestones,
            DashboardTarget::Personnel => Widget::Personnel,
            DashboardTarget::Alert(_) => Widget::Alerts,
        }
    }

    /// Detail modal for the target. Alerts have none.
    pub fn detail(self, metrics: &DashboardMetrics) -> Option<(String, DetailContent)> {
        match self {
            DashboardTarget::ProjectSegment(state) => {
                let status = metrics.project_status;
                let count = match state {
                    ProjectState::OnTime => status.on_time,
                    ProjectState::AtRisk => status.at_risk,
                    ProjectState::Delayed => status.delayed,
                };
                Some(DetailContent::projects_by_status(state, count))
            }
            DashboardTarget::Kpi(kind) => Some(DetailContent::kpi(kind, &metrics.kpis)),
            DashboardTarget::Workload(department) => metrics
                .workload(department)
                .map(DetailContent::department),
            DashboardTarget::Milestone(index) => DetailContent::milestone(index),
            DashboardTarget::Personnel => Some(DetailContent::personnel()),
            DashboardTarget::Alert(_) => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ChartPeriod {
    #[default]
    Week,
    Month,
    Quarter,
}

impl ChartPeriod {
    pub fn next(self) -> Self {
        match self {
            ChartPeriod::Week => ChartPeriod::Month,
            ChartPeriod::Month => ChartPeriod::Quarter,
            ChartPeriod::Quarter => ChartPeriod::Week,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartPeriod::Week => "This week",
            ChartPeriod::Month => "This month",
            ChartPeriod::Quarter => "This quarter",
        }
    }
}

/// Dashboard-only UI state: focus, minimized widgets, week window, pending refresh.
#[derive(Debug)]
pub struct DashboardViewState {
    focus: usize,
    minimized: Vec<Widget>,
    dismissed_alerts: Vec<usize>,
    week_offset: i64,
    period: ChartPeriod,
    refresh_started: Option<Instant>,
}

impl Default for DashboardViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardViewState {
    pub fn new() -> Self {
        Self {
            focus: 0,
            minimized: Vec::new(),
            dismissed_alerts: Vec::new(),
            week_offset: 0,
            period: ChartPeriod::default(),
            refresh_started: None,
        }
    }

    /// Focusable targets in reading order. A minimized widget still offers
    /// its header as a target so it can be restored.
    pub fn targets(&self) -> Vec<DashboardTarget> {
        let mut targets = Vec::new();
        for widget in Widget::ALL {
            let items = self.widget_targets(widget);
            if self.is_minimized(widget) {
                if let Some(first) = items.first() {
                    targets.push(*first);
                }
            } else {
                targets.extend(items);
            }
        }
        targets
    }

    fn widget_targets(&self, widget: Widget) -> Vec<DashboardTarget> {
        match widget {
            Widget::ProjectStatus => ProjectState::ALL
                .iter()
                .map(|state| DashboardTarget::ProjectSegment(*state))
                .collect(),
            Widget::Kpis => KpiKind::ALL
                .iter()
                .map(|kind| DashboardTarget::Kpi(*kind))
                .collect(),
            Widget::Workload => Department::ALL
                .iter()
                .map(|department| DashboardTarget::Workload(*department))
                .collect(),
            Widget::Milestones => (0..MILESTONES.len()).map(DashboardTarget::Milestone).collect(),
            Widget::Personnel => vec![DashboardTarget::Personnel],
            Widget::Alerts => self
                .active_alerts()
                .into_iter()
                .map(DashboardTarget::Alert)
                .collect(),
        }
    }

    pub fn focused(&self) -> Option<DashboardTarget> {
        let targets = self.targets();
        targets.get(self.focus.min(targets.len().saturating_sub(1))).copied()
    }

    pub fn move_focus(&mut self, step: isize) {
        let total = self.targets().len();
        if total == 0 {
            self.focus = 0;
            return;
        }
        let current = self.focus.min(total - 1) as isize;
        self.focus = (current + step).rem_euclid(total as isize) as usize;
    }

    pub fn is_minimized(&self, widget: Widget) -> bool {
        self.minimized.contains(&widget)
    }

    pub fn toggle_focused_widget(&mut self) {
        let Some(target) = self.focused() else {
            return;
        };
        let widget = target.widget();
        if let Some(pos) = self.minimized.iter().position(|w| *w == widget) {
            self.minimized.remove(pos);
        } else {
            self.minimized.push(widget);
        }
        self.refocus(target.widget());
    }

    fn refocus(&mut self, widget: Widget) {
        if let Some(pos) = self.targets().iter().position(|t| t.widget() == widget) {
            self.focus = pos;
        }
    }

    pub fn active_alerts(&self) -> Vec<usize> {
        (0..ALERTS.len())
            .filter(|idx| !self.dismissed_alerts.contains(idx))
            .collect()
    }

    /// Acknowledges the focused alert. Returns true when an alert was dismissed.
    pub fn dismiss_focused_alert(&mut self) -> bool {
        match self.focused() {
            Some(DashboardTarget::Alert(idx)) if !self.is_minimized(Widget::Alerts) => {
                self.dismissed_alerts.push(idx);
                let total = self.targets().len();
                if total > 0 && self.focus >= total {
                    self.focus = total - 1;
                }
                true
            }
            _ => false,
        }
    }

    pub fn week_offset(&self) -> i64 {
        self.week_offset
    }

    pub fn navigate_week(&mut self, direction: i64) {
        self.week_offset += direction;
    }

    pub fn period(&self) -> ChartPeriod {
        self.period
    }

    pub fn cycle_period(&mut self) -> ChartPeriod {
        self.period = self.period.next();
        self.period
    }

    pub fn start_refresh(&mut self, now: Instant) -> bool {
        if self.refresh_started.is_some() {
            return false;
        }
        self.refresh_started = Some(now);
        true
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_started.is_some()
    }

    /// Returns true once the spinner has run its course; clears the pending refresh.
    pub fn take_due_refresh(&mut self, now: Instant) -> bool {
        match self.refresh_started {
            Some(started) if now.duration_since(started) >= MANUAL_REFRESH_DELAY => {
                self.refresh_started = None;
                true
            }
            _ => false,
        }
    }
}

/// Monday to Sunday label of the week `offset` weeks away from `today`.
pub fn week_label(today: NaiveDate, offset: i64) -> String {
    let base = today
        .checked_add_signed(ChronoDuration::weeks(offset))
        .unwrap_or(today);
    let monday = base
        .checked_sub_signed(ChronoDuration::days(
            base.weekday().num_days_from_monday() as i64,
        ))
        .unwrap_or(base);
    let sunday = monday
        .checked_add_signed(ChronoDuration::days(6))
        .unwrap_or(monday);
    format!("{} - {}", monday.format("%-d %b"), sunday.format("%-d %b"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut view = DashboardViewState::new();
        let total = view.targets().len();
        assert_eq!(
            view.focused(),
            Some(DashboardTarget::ProjectSegment(ProjectState::OnTime))
        );
        view.move_focus(-1);
        assert_eq!(view.focused(), view.targets().last().copied());
        view.move_focus(1);
        assert_eq!(
            view.focused(),
            Some(DashboardTarget::ProjectSegment(ProjectState::OnTime))
        );
        assert_eq!(total, 3 + 4 + 4 + MILESTONES.len() + 1 + ALERTS.len());
    }

    #[test]
    fn minimizing_collapses_widget_targets() {
        let mut view = DashboardViewState::new();
        let before = view.targets().len();
        view.toggle_focused_widget();
        assert!(view.is_minimized(Widget::ProjectStatus));
        assert_eq!(view.targets().len(), before - 2);
        assert_eq!(view.focused().map(|t| t.widget()), Some(Widget::ProjectStatus));

        view.toggle_focused_widget();
        assert!(!view.is_minimized(Widget::ProjectStatus));
        assert_eq!(view.targets().len(), before);
    }

    #[test]
    fn dismissing_alert_removes_it() {
        let mut view = DashboardViewState::new();
        let first_alert = view
            .targets()
            .iter()
            .position(|t| matches!(t, DashboardTarget::Alert(_)))
            .unwrap();
        view.move_focus(first_alert as isize);
        assert!(view.dismiss_focused_alert());
        assert_eq!(view.active_alerts(), vec![1, 2]);

        view.move_focus(-(first_alert as isize));
        assert!(!view.dismiss_focused_alert());
    }

    #[test]
    fn alerts_have_no_detail_modal() {
        let metrics = DashboardMetrics::new(Local::now());
        assert!(DashboardTarget::Alert(0).detail(&metrics).is_none());
        let (title, _) = DashboardTarget::Personnel.detail(&metrics).unwrap();
        assert_eq!(title, "Active Personnel");
        let (title, _) = DashboardTarget::Workload(Department::Naval)
            .detail(&metrics)
            .unwrap();
        assert_eq!(title, "Department: Naval");
    }

    #[test]
    fn manual_refresh_fires_once_after_delay() {
        let mut view = DashboardViewState::new();
        let start = Instant::now();
        assert!(view.start_refresh(start));
        assert!(!view.start_refresh(start));
        assert!(!view.take_due_refresh(start));
        assert!(view.take_due_refresh(start + MANUAL_REFRESH_DELAY));
        assert!(!view.is_refreshing());
        assert!(!view.take_due_refresh(start + MANUAL_REFRESH_DELAY * 2));
    }

    #[test]
    fn week_label_runs_monday_to_sunday() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();
        assert_eq!(week_label(wednesday, 0), "28 Jul - 3 Aug");
        assert_eq!(week_label(wednesday, 1), "4 Aug - 10 Aug");
        assert_eq!(week_label(wednesday, -1), "21 Jul - 27 Jul");

        let sunday = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        assert_eq!(week_label(sunday, 0), "28 Jul - 3 Aug");
    }

    #[test]
    fn period_cycles() {
        let mut view = DashboardViewState::new();
        assert_eq!(view.cycle_period(), ChartPeriod::Month);
        assert_eq!(view.cycle_period(), ChartPeriod::Quarter);
        assert_eq!(view.cycle_period(), ChartPeriod::Week);
    }
}
