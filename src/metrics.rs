use chrono::{DateTime, Local};
use rand::Rng;
use std::ops::RangeInclusive;

pub const TOTAL_PROJECTS: u32 = 24;

const PRODUCTIVITY_RANGE: RangeInclusive<u32> = 90..=97;
const QUALITY_RANGE: RangeInclusive<u32> = 96..=99;
const SAFETY_RANGE: RangeInclusive<u32> = 0..=2;
const EFFICIENCY_RANGE: RangeInclusive<u32> = 85..=94;
const ON_TIME_RANGE: RangeInclusive<u32> = 13..=17;
const AT_RISK_RANGE: RangeInclusive<u32> = 5..=7;
const COUNTER_UP_PROBABILITY: f64 = 0.3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Department {
    Engineering,
    CivilWorks,
    Naval,
    Electrical,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Engineering,
        Department::CivilWorks,
        Department::Naval,
        Department::Electrical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::CivilWorks => "Civil Works",
            Department::Naval => "Naval",
            Department::Electrical => "Electrical",
        }
    }

    fn workload_range(self) -> (RangeInclusive<u32>, u32) {
        match self {
            Department::Engineering => (21..=25, 27),
            Department::CivilWorks => (18..=20, 20),
            Department::Naval => (20..=27, 30),
            Department::Electrical => (10..=15, 20),
        }
    }

    fn initial_workload(self) -> DepartmentWorkload {
        let (current, max) = match self {
            Department::Engineering => (23, 27),
            Department::CivilWorks => (19, 20),
            Department::Naval => (21, 30),
            Department::Electrical => (12, 20),
        };
        DepartmentWorkload {
            department: self,
            current,
            max,
        }
    }
}

/// Which periodic task produced a refresh.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RefreshTier {
    Clock,
    MetricJitter,
    FullRefresh,
    Notifications,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Kpis {
    pub productivity: u32,
    pub quality: u32,
    pub safety_incidents: u32,
    pub efficiency: u32,
}

impl Default for Kpis {
    fn default() -> Self {
        Self {
            productivity: 94,
            quality: 98,
            safety_incidents: 0,
            efficiency: 89,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DepartmentWorkload {
    pub department: Department,
    pub current: u32,
    pub max: u32,
}

impl DepartmentWorkload {
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WorkloadSummary {
    pub total_current: u32,
    pub total_max: u32,
    pub utilization: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ProjectStatus {
    pub on_time: u32,
    pub at_risk: u32,
    pub delayed: u32,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self {
            on_time: 15,
            at_risk: 6,
            delayed: 3,
        }
    }
}

/// Values produced by one refresh. `None` fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsUpdate {
    pub kpis: Option<Kpis>,
    pub workloads: Option<[DepartmentWorkload; 4]>,
    pub project_status: Option<ProjectStatus>,
    pub alert_step: Option<CounterStep>,
    pub notification_step: Option<CounterStep>,
    pub touch_clock: bool,
    pub touch_last_update: bool,
}

impl MetricsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == MetricsUpdate::default()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CounterStep {
    Up,
    Down,
}

impl CounterStep {
    pub fn apply(self, value: u32) -> u32 {
        match self {
            CounterStep::Up => value.saturating_add(1),
            CounterStep::Down => value.saturating_sub(1),
        }
    }
}

/// Probabilities for the lightweight jitter tier.
#[derive(Copy, Clone, Debug)]
pub struct JitterOdds {
    pub metrics: f64,
    pub alerts: f64,
}

impl Default for JitterOdds {
    fn default() -> Self {
        Self {
            metrics: 0.3,
            alerts: 0.2,
        }
    }
}

/// Computes the values a refresh tier produces. Visibility gates the tiers
/// that only touch the dashboard: when it is hidden those tiers are skipped.
pub fn run_scheduled_refresh<R: Rng + ?Sized>(
    tier: RefreshTier,
    rng: &mut R,
    dashboard_visible: bool,
    odds: JitterOdds,
) -> MetricsUpdate {
    match tier {
        RefreshTier::Clock => MetricsUpdate {
            touch_clock: true,
            ..MetricsUpdate::default()
        },
        RefreshTier::MetricJitter => {
            let mut update = MetricsUpdate {
                touch_clock: true,
                touch_last_update: true,
                ..MetricsUpdate::default()
            };
            if dashboard_visible {
                if rng.gen_bool(odds.metrics.clamp(0.0, 1.0)) {
                    update.kpis = Some(random_kpis(rng));
                }
                if rng.gen_bool(odds.alerts.clamp(0.0, 1.0)) {
                    update.alert_step = Some(counter_step(rng));
                }
            }
            update
        }
        RefreshTier::FullRefresh => {
            if dashboard_visible {
                full_refresh(rng)
            } else {
                MetricsUpdate::default()
            }
        }
        RefreshTier::Notifications => MetricsUpdate {
            notification_step: Some(counter_step(rng)),
            ..MetricsUpdate::default()
        },
    }
}

/// Everything the dashboard shows, regenerated in one go.
pub fn full_refresh<R: Rng + ?Sized>(rng: &mut R) -> MetricsUpdate {
    MetricsUpdate {
        kpis: Some(random_kpis(rng)),
        workloads: Some(random_workloads(rng)),
        project_status: Some(random_project_status(rng)),
        alert_step: Some(counter_step(rng)),
        ..MetricsUpdate::default()
    }
}

pub fn random_kpis<R: Rng + ?Sized>(rng: &mut R) -> Kpis {
    Kpis {
        productivity: rng.gen_range(PRODUCTIVITY_RANGE),
        quality: rng.gen_range(QUALITY_RANGE),
        safety_incidents: rng.gen_range(SAFETY_RANGE),
        efficiency: rng.gen_range(EFFICIENCY_RANGE),
    }
}

pub fn random_workloads<R: Rng + ?Sized>(rng: &mut R) -> [DepartmentWorkload; 4] {
    Department::ALL.map(|department| {
        let (range, max) = department.workload_range();
        DepartmentWorkload {
            department,
            current: rng.gen_range(range).min(max),
            max,
        }
    })
}

pub fn random_project_status<R: Rng + ?Sized>(rng: &mut R) -> ProjectStatus {
    let on_time = rng.gen_range(ON_TIME_RANGE);
    let at_risk = rng.gen_range(AT_RISK_RANGE);
    ProjectStatus {
        on_time,
        at_risk,
        delayed: TOTAL_PROJECTS - on_time - at_risk,
    }
}

fn counter_step<R: Rng + ?Sized>(rng: &mut R) -> CounterStep {
    if rng.gen_bool(COUNTER_UP_PROBABILITY) {
        CounterStep::Up
    } else {
        CounterStep::Down
    }
}

pub fn summarize_workloads(workloads: &[DepartmentWorkload]) -> WorkloadSummary {
    let total_current = workloads.iter().map(|w| w.current).sum::<u32>();
    let total_max = workloads.iter().map(|w| w.max).sum::<u32>();
    let utilization = if total_max == 0 {
        0
    } else {
        (total_current as f64 / total_max as f64 * 100.0).round() as u32
    };
    WorkloadSummary {
        total_current,
        total_max,
        utilization,
    }
}

/// Current dashboard values. Lives on the UI thread only.
#[derive(Clone, Debug)]
pub struct DashboardMetrics {
    pub kpis: Kpis,
    pub workloads: [DepartmentWorkload; 4],
    pub project_status: ProjectStatus,
    pub critical_alerts: u32,
    pub notifications: u32,
    pub clock: DateTime<Local>,
    pub last_update: DateTime<Local>,
}

impl DashboardMetrics {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            kpis: Kpis::default(),
            workloads: Department::ALL.map(Department::initial_workload),
            project_status: ProjectStatus::default(),
            critical_alerts: 3,
            notifications: 4,
            clock: now,
            last_update: now,
        }
    }

    pub fn apply(&mut self, update: &MetricsUpdate, now: DateTime<Local>) {
        if let Some(kpis) = update.kpis {
            self.kpis = kpis;
        }
        if let Some(workloads) = update.workloads {
            self.workloads = workloads;
        }
        if let Some(status) = update.project_status {
            self.project_status = status;
        }
        if let Some(step) = update.alert_step {
            self.critical_alerts = step.apply(self.critical_alerts);
        }
        if let Some(step) = update.notification_step {
            self.notifications = step.apply(self.notifications);
        }
        if update.touch_clock {
            self.clock = now;
        }
        if update.touch_last_update {
            self.last_update = now;
        }
    }

    pub fn workload_summary(&self) -> WorkloadSummary {
        summarize_workloads(&self.workloads)
    }

    pub fn notification_badge_visible(&self) -> bool {
        self.notifications > 0
    }

    pub fn workload(&self, department: Department) -> Option<&DepartmentWorkload> {
        self.workloads.iter().find(|w| w.department == department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn kpis_stay_within_bounds() {
        let mut rng = rng();
        for _ in 0..500 {
            let kpis = random_kpis(&mut rng);
            assert!((90..=97).contains(&kpis.productivity));
            assert!((96..=99).contains(&kpis.quality));
            assert!(kpis.safety_incidents <= 2);
            assert!((85..=94).contains(&kpis.efficiency));
        }
    }

    #[test]
    fn workloads_never_exceed_capacity() {
        let mut rng = rng();
        for _ in 0..500 {
            for workload in random_workloads(&mut rng) {
                assert!(workload.current <= workload.max, "{workload:?}");
            }
        }
    }

    #[test]
    fn project_status_always_sums_to_total() {
        let mut rng = rng();
        for _ in 0..200 {
            let status = random_project_status(&mut rng);
            assert_eq!(status.on_time + status.at_risk + status.delayed, TOTAL_PROJECTS);
            assert!((13..=17).contains(&status.on_time));
            assert!((5..=7).contains(&status.at_risk));
        }
    }

    #[test]
    fn full_refresh_is_skipped_when_dashboard_hidden() {
        let mut rng = rng();
        let update =
            run_scheduled_refresh(RefreshTier::FullRefresh, &mut rng, false, JitterOdds::default());
        assert!(update.is_empty());

        let update =
            run_scheduled_refresh(RefreshTier::FullRefresh, &mut rng, true, JitterOdds::default());
        assert!(update.kpis.is_some());
        assert!(update.workloads.is_some());
        assert!(update.project_status.is_some());
        assert!(!update.touch_last_update);
    }

    #[test]
    fn notifications_tier_ignores_visibility() {
        let mut rng = rng();
        for visible in [false, true] {
            let update = run_scheduled_refresh(
                RefreshTier::Notifications,
                &mut rng,
                visible,
                JitterOdds::default(),
            );
            assert!(update.notification_step.is_some());
            assert!(update.kpis.is_none());
            assert!(!update.touch_clock && !update.touch_last_update);
        }

        let now = Local::now();
        let mut metrics = DashboardMetrics::new(now);
        metrics.apply(
            &MetricsUpdate {
                notification_step: Some(CounterStep::Up),
                ..MetricsUpdate::default()
            },
            now,
        );
        assert_eq!(metrics.notifications, 5);
    }

    #[test]
    fn zero_odds_jitter_leaves_kpis_and_alerts() {
        let mut rng = rng();
        let odds = JitterOdds {
            metrics: 0.0,
            alerts: 0.0,
        };
        for _ in 0..50 {
            let update = run_scheduled_refresh(RefreshTier::MetricJitter, &mut rng, true, odds);
            assert_eq!(
                update,
                MetricsUpdate {
                    touch_clock: true,
                    touch_last_update: true,
                    ..MetricsUpdate::default()
                }
            );
        }
    }

    #[test]
    fn jitter_touches_clock_but_not_metrics_when_hidden() {
        let mut rng = rng();
        let odds = JitterOdds {
            metrics: 1.0,
            alerts: 1.0,
        };
        let hidden = run_scheduled_refresh(RefreshTier::MetricJitter, &mut rng, false, odds);
        assert!(hidden.touch_clock && hidden.touch_last_update);
        assert!(hidden.kpis.is_none());
        assert!(hidden.alert_step.is_none());

        let visible = run_scheduled_refresh(RefreshTier::MetricJitter, &mut rng, true, odds);
        assert!(visible.kpis.is_some());
        assert!(visible.alert_step.is_some());
    }

    #[test]
    fn clock_tier_only_moves_the_clock() {
        let mut rng = rng();
        let update =
            run_scheduled_refresh(RefreshTier::Clock, &mut rng, true, JitterOdds::default());
        assert_eq!(
            update,
            MetricsUpdate {
                touch_clock: true,
                ..MetricsUpdate::default()
            }
        );
    }

    #[test]
    fn counters_never_drop_below_zero() {
        let now = Local::now();
        let mut metrics = DashboardMetrics::new(now);
        metrics.notifications = 0;
        metrics.apply(
            &MetricsUpdate {
                notification_step: Some(CounterStep::Down),
                alert_step: Some(CounterStep::Down),
                ..MetricsUpdate::default()
            },
            now,
        );
        assert_eq!(metrics.notifications, 0);
        assert!(!metrics.notification_badge_visible());
        assert_eq!(metrics.critical_alerts, 2);
    }

    #[test]
    fn summary_rounds_utilization() {
        let now = Local::now();
        let metrics = DashboardMetrics::new(now);
        let summary = metrics.workload_summary();
        assert_eq!(summary.total_current, 75);
        assert_eq!(summary.total_max, 97);
        assert_eq!(summary.utilization, 77);
    }
}
