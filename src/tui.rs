use crate::{
    catalog::{
        ALERTS, ATTENDANCE, DetailContent, KpiKind, MILESTONES, ModalAction, MilestoneStatus,
        NotificationKind, PERSONNEL_BY_DEPARTMENT, Priority, PriorityFilter, ProjectCard,
        ProjectState, StatusFilter, department_projects, filter_projects, section_department,
    },
    config::AppConfig,
    dashboard::{DashboardTarget, DashboardViewState, Widget, week_label},
    metrics::{
        CounterStep, DashboardMetrics, JitterOdds, MetricsUpdate, RefreshTier, TOTAL_PROJECTS,
        full_refresh, random_workloads, run_scheduled_refresh,
    },
    modal::{Modal, ModalSlot},
    navigation::{LayoutMode, NavigationState, SectionId, TabId},
    schedule::{ScheduledTask, tasks_from_config},
};
use anyhow::Result;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use std::{
    collections::HashMap,
    io::{self, Stdout, Write},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;
const BAR_WIDTH: usize = 12;
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const DOCUMENTS: [&str; 5] = [
    "Hull Drawings TK-001 rev C",
    "Welding Procedure Specification WPS-12",
    "Electrical Single-Line Diagram PQ-045",
    "Dry Dock #2 Load Study",
    "Quality Manual 2025",
];

/// Everything the UI loop mutates. Built once at startup and owned by the loop.
pub struct UiState {
    pub nav: NavigationState,
    pub metrics: DashboardMetrics,
    pub dashboard: DashboardViewState,
    pub departments: DepartmentViewState,
    pub modal: ModalSlot<DetailContent>,
    pub help: HelpModalState,
    rng: StdRng,
    odds: JitterOdds,
    cell_width: u32,
    schedule: Vec<ScheduledTask>,
    frame: u64,
}

impl UiState {
    pub fn new(config: &AppConfig, rng: StdRng, columns: u16, now: DateTime<Local>) -> Self {
        Self {
            nav: NavigationState::new(
                config.display.initial_section(),
                config.display.viewport_width(columns),
            ),
            metrics: DashboardMetrics::new(now),
            dashboard: DashboardViewState::new(),
            departments: DepartmentViewState::new(),
            modal: ModalSlot::new(),
            help: HelpModalState::new(),
            rng,
            odds: config.schedule.jitter_odds(),
            cell_width: config.display.cell_width.max(1),
            schedule: tasks_from_config(&config.schedule),
            frame: 0,
        }
    }

    pub fn on_resize(&mut self, columns: u16) {
        let width = u32::from(columns).saturating_mul(self.cell_width);
        self.nav.on_viewport_change(width);
    }

    pub fn apply_tick(&mut self, tier: RefreshTier, now: DateTime<Local>) {
        let visible = self.nav.is_visible(SectionId::Dashboard);
        let update = run_scheduled_refresh(tier, &mut self.rng, visible, self.odds);
        if update.is_empty() {
            tracing::debug!(tier = ?tier, "refresh skipped; dashboard hidden");
            return;
        }
        if !matches!(tier, RefreshTier::Clock) {
            tracing::debug!(tier = ?tier, "applying scheduled refresh");
        }
        self.metrics.apply(&update, now);
    }

    /// Runs the manual refresh once its spinner delay has elapsed.
    pub fn poll_manual_refresh(&mut self, now: Instant, now_local: DateTime<Local>) {
        if self.dashboard.take_due_refresh(now) {
            let update = MetricsUpdate {
                touch_last_update: true,
                ..full_refresh(&mut self.rng)
            };
            self.metrics.apply(&update, now_local);
            tracing::info!("manual dashboard refresh completed");
        }
    }

    pub fn select_section(&mut self, section: SectionId) {
        self.nav.activate(section);
        self.nav.close_sidebar();
    }

    fn show_detail(&mut self, detail: Option<(String, DetailContent)>) {
        if let Some((title, content)) = detail {
            self.modal.show(title, content);
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DepartmentView {
    selected: usize,
    status: StatusFilter,
    priority: PriorityFilter,
}

/// Per-department selection and filters of the projects tab.
pub struct DepartmentViewState {
    views: HashMap<SectionId, DepartmentView>,
}

impl DepartmentViewState {
    fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    fn view(&self, section: SectionId) -> DepartmentView {
        self.views.get(&section).copied().unwrap_or_default()
    }

    fn view_mut(&mut self, section: SectionId) -> &mut DepartmentView {
        self.views.entry(section).or_default()
    }

    pub fn visible_cards(&self, section: SectionId) -> Vec<&'static ProjectCard> {
        let view = self.view(section);
        filter_projects(department_projects(section), view.status, view.priority)
    }

    fn selected_index(&self, section: SectionId) -> Option<usize> {
        let total = self.visible_cards(section).len();
        if total == 0 {
            None
        } else {
            Some(self.view(section).selected.min(total - 1))
        }
    }

    pub fn selected_card(&self, section: SectionId) -> Option<&'static ProjectCard> {
        let idx = self.selected_index(section)?;
        self.visible_cards(section).get(idx).copied()
    }

    fn move_selection(&mut self, section: SectionId, step: isize) {
        let total = self.visible_cards(section).len();
        let view = self.view_mut(section);
        if total == 0 {
            view.selected = 0;
            return;
        }
        let current = view.selected.min(total - 1) as isize;
        view.selected = (current + step).clamp(0, total as isize - 1) as usize;
    }

    fn cycle_status(&mut self, section: SectionId) {
        let view = self.view_mut(section);
        view.status = view.status.next();
        view.selected = 0;
    }

    fn cycle_priority(&mut self, section: SectionId) {
        let view = self.view_mut(section);
        view.priority = view.priority.next();
        view.selected = 0;
    }
}

pub struct HelpModalState {
    open: bool,
}

impl HelpModalState {
    fn new() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn toggle(&mut self) {
        self.open = !self.open;
    }
}

/// Terminal width in columns, falling back to 80 when it cannot be queried.
pub fn terminal_columns() -> u16 {
    crossterm::terminal::size()
        .map(|(columns, _)| columns)
        .unwrap_or(80)
}

pub async fn run(
    config: Arc<AppConfig>,
    state: UiState,
    ticks: mpsc::UnboundedReceiver<RefreshTier>,
) -> Result<()> {
    let refresh_hz = config.display.refresh_hz.clamp(1, 1000);
    let tick_rate = Duration::from_millis(1000 / refresh_hz);

    tokio::task::spawn_blocking(move || run_blocking(state, ticks, tick_rate)).await?
}

fn run_blocking(
    mut state: UiState,
    mut ticks: mpsc::UnboundedReceiver<RefreshTier>,
    tick_rate: Duration,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut applied_title = String::new();

    let loop_result: Result<()> = (|| -> Result<()> {
        loop {
            let size = terminal.size()?;
            state.on_resize(size.width);

            if state.nav.title() != applied_title {
                applied_title = state.nav.title().to_string();
                execute!(terminal.backend_mut(), SetTitle(applied_title.as_str()))?;
            }

            state.frame = state.frame.wrapping_add(1);
            terminal.draw(|frame| draw_ui(frame, &state))?;

            let mut should_quit = false;
            if event::poll(tick_rate)? {
                should_quit = handle_event(event::read()?, &mut state);
            }
            while !should_quit && event::poll(Duration::from_millis(0))? {
                should_quit = handle_event(event::read()?, &mut state);
            }

            if should_quit {
                break Ok(());
            }

            let now_local = Local::now();
            while let Ok(tier) = ticks.try_recv() {
                state.apply_tick(tier, now_local);
            }
            state.poll_manual_refresh(Instant::now(), now_local);
        }
    })();

    let restore_result = restore_terminal(terminal);

    match (loop_result, restore_result) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(loop_err), Ok(())) => Err(loop_err),
        (Ok(()), Err(restore_err)) => Err(restore_err),
        (Err(loop_err), Err(restore_err)) => Err(loop_err.context(restore_err.to_string())),
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

fn handle_event(event: Event, state: &mut UiState) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key_event(key, state, Instant::now())
        }
        Event::Resize(columns, _) => {
            state.on_resize(columns);
            false
        }
        _ => false,
    }
}

fn handle_key_event(key: KeyEvent, state: &mut UiState, now: Instant) -> bool {
    if key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    if state.help.is_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => state.help.toggle(),
            _ => {}
        }
        return false;
    }

    if state.modal.is_open() {
        handle_modal_input(state, key);
        return false;
    }

    let overlay_open =
        state.nav.sidebar().layout() == LayoutMode::Compact && state.nav.sidebar().is_open();
    if overlay_open && key.code == KeyCode::Esc {
        state.nav.close_sidebar();
        return false;
    }

    match key.code {
        KeyCode::Char('?') => state.help.toggle(),
        KeyCode::Char('n') => state.show_detail(Some(DetailContent::notifications())),
        KeyCode::Char('b') => state.nav.toggle_sidebar(),
        KeyCode::Tab => state.select_section(state.nav.active_section().next()),
        KeyCode::BackTab => state.select_section(state.nav.active_section().prev()),
        KeyCode::Char('[') => {
            state.nav.cycle_tab(-1);
        }
        KeyCode::Char(']') => {
            state.nav.cycle_tab(1);
        }
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            if let Some(section) = SectionId::from_digit(ch) {
                state.select_section(section);
            }
        }
        _ => {
            // Content keys act outside the overlay, so they dismiss it.
            if overlay_open {
                state.nav.close_sidebar();
            }
            match state.nav.active_section() {
                SectionId::Dashboard => handle_dashboard_keys(state, key, now),
                section if section.is_department() => {
                    handle_department_keys(state, section, key)
                }
                _ => {}
            }
        }
    }

    false
}

fn handle_modal_input(state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.modal.close();
        }
        KeyCode::Char('g') => {
            let action = state.modal.current().and_then(|modal| modal.body.action());
            if let Some(ModalAction::GoToSection(section)) = action {
                state.modal.close();
                state.select_section(section);
            }
        }
        KeyCode::Char('y') | KeyCode::Char('Y')
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            if let Some(modal) = state.modal.current()
                && let Err(err) = copy_modal_osc52(modal)
            {
                tracing::warn!(error = %err, "failed to copy modal contents");
            }
        }
        _ => {}
    }
}

fn handle_dashboard_keys(state: &mut UiState, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.dashboard.move_focus(-1),
        KeyCode::Down | KeyCode::Char('j') => state.dashboard.move_focus(1),
        KeyCode::Enter => {
            let detail = state
                .dashboard
                .focused()
                .and_then(|target| target.detail(&state.metrics));
            state.show_detail(detail);
        }
        KeyCode::Char('m') => state.dashboard.toggle_focused_widget(),
        KeyCode::Char('r') => {
            if state.dashboard.start_refresh(now) {
                tracing::info!("manual dashboard refresh requested");
            }
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('<') => {
            state.dashboard.navigate_week(-1)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('>') => {
            state.dashboard.navigate_week(1)
        }
        KeyCode::Char('p') => {
            let period = state.dashboard.cycle_period();
            tracing::debug!(period = period.label(), "workload chart period changed");
            let update = MetricsUpdate {
                workloads: Some(random_workloads(&mut state.rng)),
                ..MetricsUpdate::default()
            };
            state.metrics.apply(&update, Local::now());
        }
        KeyCode::Char('x') => {
            if state.dashboard.dismiss_focused_alert() {
                state.metrics.critical_alerts = CounterStep::Down.apply(state.metrics.critical_alerts);
            }
        }
        _ => {}
    }
}

fn handle_department_keys(state: &mut UiState, section: SectionId, key: KeyEvent) {
    if state.nav.active_tab(section) != Some(TabId::Projects) {
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.departments.move_selection(section, -1),
        KeyCode::Down | KeyCode::Char('j') => state.departments.move_selection(section, 1),
        KeyCode::Char('s') => state.departments.cycle_status(section),
        KeyCode::Char('f') => state.departments.cycle_priority(section),
        KeyCode::Enter => {
            let detail = state
                .departments
                .selected_card(section)
                .and_then(|card| DetailContent::project(section, card));
            state.show_detail(detail);
        }
        _ => {}
    }
}

fn copy_modal_osc52(modal: &Modal<DetailContent>) -> io::Result<()> {
    let text = modal_share_text(modal);
    let encoded = general_purpose::STANDARD.encode(text.as_bytes());
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]52;c;{}\x07", encoded)?;
    stdout.flush()
}

fn modal_share_text(modal: &Modal<DetailContent>) -> String {
    let theme = ui_theme(false);
    let mut lines = vec![modal.title.clone()];
    lines.extend(detail_lines(&modal.body, &theme).iter().map(|line| {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<String>()
    }));
    lines.join("\n")
}

fn draw_ui(frame: &mut Frame, state: &UiState) {
    let dim_background = state.modal.is_open() || state.help.is_open();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, layout[0], state, dim_background);

    let sidebar = state.nav.sidebar();
    let content_area = match sidebar.layout() {
        LayoutMode::Expanded => {
            let width = if sidebar.is_collapsed() {
                SIDEBAR_COLLAPSED_WIDTH
            } else {
                SIDEBAR_WIDTH
            };
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(width), Constraint::Min(0)])
                .split(layout[1]);
            render_sidebar(
                frame,
                columns[0],
                state.nav.active_section(),
                sidebar.is_collapsed(),
                dim_background,
            );
            columns[1]
        }
        LayoutMode::Compact => layout[1],
    };

    match state.nav.active_section() {
        SectionId::Dashboard => draw_dashboard(frame, content_area, state, dim_background),
        SectionId::Projects => draw_projects_overview(frame, content_area, dim_background),
        SectionId::Documents => draw_documents(frame, content_area, dim_background),
        SectionId::Settings => draw_settings(frame, content_area, state, dim_background),
        section => draw_department(frame, content_area, state, section, dim_background),
    }

    if sidebar.layout() == LayoutMode::Compact && sidebar.is_open() {
        let overlay = Rect {
            width: SIDEBAR_WIDTH.min(layout[1].width),
            ..layout[1]
        };
        frame.render_widget(Clear, overlay);
        render_sidebar(
            frame,
            overlay,
            state.nav.active_section(),
            false,
            dim_background,
        );
    }

    render_status_bar(frame, layout[2], state, dim_background);

    if let Some(modal) = state.modal.current() {
        render_detail_modal(frame, modal);
    }

    if state.help.is_open() {
        render_help_modal(frame, state.nav.active_section());
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &UiState, dim: bool) {
    let theme = ui_theme(dim);
    let clock = state
        .metrics
        .clock
        .format("%A, %d %B %Y %H:%M:%S")
        .to_string();
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            state.nav.active_section().short_label().to_ascii_uppercase(),
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", Style::default().fg(theme.border_fg)),
        Span::styled(clock, Style::default().fg(theme.label_fg)),
    ];
    if state.metrics.notification_badge_visible() {
        spans.push(Span::styled("  |  ", Style::default().fg(theme.border_fg)));
        spans.push(Span::styled(
            format!("notifications: {}", state.metrics.notifications),
            Style::default().fg(Color::Yellow),
        ));
    }
    let block = Block::default()
        .title(" Production Control Center ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));
    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .style(Style::default().fg(theme.text_fg));
    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame, area: Rect, active: SectionId, collapsed: bool, dim: bool) {
    let theme = ui_theme(dim);
    let lines: Vec<Line<'static>> = SectionId::ALL
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let label = if collapsed {
                format!(" {} ", idx + 1)
            } else {
                format!(" {} {} ", idx + 1, section.short_label())
            };
            let style = if *section == active {
                Style::default()
                    .fg(theme.highlight_fg)
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_fg)
            };
            Line::from(Span::styled(label, style))
        })
        .collect();
    let title = if collapsed { "" } else { "Sections" };
    let paragraph = Paragraph::new(lines).block(gray_block(title, &theme));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState, dim: bool) {
    let theme = ui_theme(dim);
    let muted = Style::default().fg(Color::DarkGray);
    let last_update = state.metrics.last_update.format("%H:%M:%S").to_string();
    let mut spans = vec![Span::raw(" ")];
    if state.dashboard.is_refreshing() {
        let spinner = SPINNER_FRAMES[(state.frame % SPINNER_FRAMES.len() as u64) as usize];
        spans.push(Span::styled(
            format!("{spinner} refreshing"),
            Style::default().fg(Color::Green),
        ));
    } else {
        spans.push(Span::styled("●", muted));
        spans.push(Span::styled(format!(" last update: {last_update}"), muted));
    }
    for hint in ["? for help", "q to quit", "Tab to cycle sections", "b sidebar"] {
        spans.push(Span::styled("  |  ", muted));
        spans.push(Span::styled(hint, muted));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(theme.text_fg));
    frame.render_widget(paragraph, area);
}

fn draw_dashboard(frame: &mut Frame, area: Rect, state: &UiState, dim: bool) {
    let theme = ui_theme(dim);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .split(area);

    let today = state.metrics.clock.date_naive();
    let week = week_label(today, state.dashboard.week_offset());
    let week_line = Line::from(vec![
        Span::raw(" "),
        Span::styled("◀ ", Style::default().fg(theme.label_fg)),
        Span::styled(week, Style::default().fg(theme.text_fg)),
        Span::styled(" ▶", Style::default().fg(theme.label_fg)),
        Span::styled(
            format!("   workload: {}", state.dashboard.period().label()),
            Style::default().fg(theme.label_fg),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(week_line).block(gray_block("Week", &theme)),
        layout[0],
    );

    let rows = [
        [Widget::ProjectStatus, Widget::Kpis, Widget::Workload],
        [Widget::Milestones, Widget::Personnel, Widget::Alerts],
    ];
    let focused = state.dashboard.focused();
    for (row_area, widgets) in [layout[1], layout[2]].into_iter().zip(rows) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(row_area);
        for (widget_area, widget) in columns.iter().zip(widgets) {
            render_widget_panel(frame, *widget_area, widget, state, focused, &theme);
        }
    }
}

fn render_widget_panel(
    frame: &mut Frame,
    area: Rect,
    widget: Widget,
    state: &UiState,
    focused: Option<DashboardTarget>,
    theme: &UiTheme,
) {
    let focused_here = focused.is_some_and(|target| target.widget() == widget);
    let mut block = gray_block(widget.title(), theme);
    if focused_here {
        block = block.border_style(Style::default().fg(theme.header_fg));
    }

    if state.dashboard.is_minimized(widget) {
        let line = Line::from(Span::styled(
            " [+] minimized, m to restore",
            Style::default().fg(theme.label_fg),
        ));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let items = widget_lines(widget, state, theme);
    let lines: Vec<Line<'static>> = items
        .into_iter()
        .map(|(target, line)| match target {
            Some(target) if Some(target) == focused => line.style(
                Style::default()
                    .fg(theme.highlight_fg)
                    .bg(theme.highlight_bg),
            ),
            _ => line,
        })
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(theme.text_fg));
    frame.render_widget(paragraph, area);
}

/// Lines of a dashboard widget, each tagged with the target it represents.
fn widget_lines(
    widget: Widget,
    state: &UiState,
    theme: &UiTheme,
) -> Vec<(Option<DashboardTarget>, Line<'static>)> {
    let metrics = &state.metrics;
    let label = Style::default().fg(theme.label_fg);
    match widget {
        Widget::ProjectStatus => {
            let status = metrics.project_status;
            let mut lines = vec![(
                None,
                Line::from(Span::styled(format!(" {TOTAL_PROJECTS} active projects"), label)),
            )];
            for (state_kind, count) in [
                (ProjectState::OnTime, status.on_time),
                (ProjectState::AtRisk, status.at_risk),
                (ProjectState::Delayed, status.delayed),
            ] {
                let ratio = count as f64 / TOTAL_PROJECTS as f64;
                lines.push((
                    Some(DashboardTarget::ProjectSegment(state_kind)),
                    Line::from(vec![
                        Span::styled(" ● ", Style::default().fg(project_state_color(state_kind))),
                        Span::raw(format!("{:<8} {:>3}  ", state_kind.label(), count)),
                        Span::styled(
                            ratio_bar(ratio, BAR_WIDTH),
                            Style::default().fg(project_state_color(state_kind)),
                        ),
                    ]),
                ));
            }
            lines
        }
        Widget::Kpis => KpiKind::ALL
            .iter()
            .map(|kind| {
                (
                    Some(DashboardTarget::Kpi(*kind)),
                    Line::from(vec![
                        Span::styled(format!(" {:<13}", kind.label()), label),
                        Span::styled(
                            kind.format_value(&metrics.kpis),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                )
            })
            .collect(),
        Widget::Workload => {
            let mut lines: Vec<(Option<DashboardTarget>, Line<'static>)> = metrics
                .workloads
                .iter()
                .map(|workload| {
                    (
                        Some(DashboardTarget::Workload(workload.department)),
                        Line::from(vec![
                            Span::styled(format!(" {:<12}", workload.department.label()), label),
                            Span::raw(format!("{:>2}/{:<2} ", workload.current, workload.max)),
                            Span::styled(
                                ratio_bar(workload.ratio(), BAR_WIDTH),
                                Style::default().fg(load_color(workload.ratio())),
                            ),
                        ]),
                    )
                })
                .collect();
            let summary = metrics.workload_summary();
            lines.push((
                None,
                Line::from(Span::styled(
                    format!(
                        " total {}/{} ({}%)",
                        summary.total_current, summary.total_max, summary.utilization
                    ),
                    label,
                )),
            ));
            lines
        }
        Widget::Milestones => MILESTONES
            .iter()
            .enumerate()
            .map(|(idx, milestone)| {
                (
                    Some(DashboardTarget::Milestone(idx)),
                    Line::from(vec![
                        Span::styled(format!(" {:<7}", milestone.date), label),
                        Span::raw(milestone.title.to_string()),
                        Span::styled(
                            format!(" [{}]", milestone.status.label()),
                            Style::default().fg(milestone_color(milestone.status)),
                        ),
                    ]),
                )
            })
            .collect(),
        Widget::Personnel => {
            let total: u32 = PERSONNEL_BY_DEPARTMENT.iter().map(|(_, count)| count).sum();
            vec![
                (
                    Some(DashboardTarget::Personnel),
                    Line::from(vec![
                        Span::styled(" active staff ", label),
                        Span::styled(
                            total.to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                ),
                (
                    None,
                    Line::from(vec![
                        Span::styled(format!(" {} present", ATTENDANCE.present), Style::default().fg(Color::Green)),
                        Span::styled(format!("  {} late", ATTENDANCE.late), Style::default().fg(Color::Yellow)),
                        Span::styled(format!("  {} absent", ATTENDANCE.absent), Style::default().fg(Color::Red)),
                    ]),
                ),
            ]
        }
        Widget::Alerts => {
            let mut lines = vec![(
                None,
                Line::from(vec![
                    Span::styled(" critical alerts: ", label),
                    Span::styled(
                        metrics.critical_alerts.to_string(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                ]),
            )];
            for idx in state.dashboard.active_alerts() {
                let alert = &ALERTS[idx];
                lines.push((
                    Some(DashboardTarget::Alert(idx)),
                    Line::from(vec![
                        Span::styled(" ! ", Style::default().fg(Color::Red)),
                        Span::raw(alert.title.to_string()),
                        Span::styled(format!(" ({})", alert.detail), label),
                    ]),
                ));
            }
            lines
        }
    }
}

fn draw_department(frame: &mut Frame, area: Rect, state: &UiState, section: SectionId, dim: bool) {
    let theme = ui_theme(dim);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let active_tab = state.nav.active_tab(section).unwrap_or(TabId::Projects);
    let mut spans = vec![Span::raw(" ")];
    for (idx, tab) in section.tabs().iter().enumerate() {
        spans.extend(tab_spans(tab.label(), *tab == active_tab, &theme));
        if idx + 1 < section.tabs().len() {
            spans.push(Span::raw(" "));
        }
    }
    spans.push(Span::styled("   [ / ] switch tab", Style::default().fg(Color::DarkGray)));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(gray_block(section.short_label(), &theme)),
        layout[0],
    );

    match active_tab {
        TabId::Projects => render_department_projects(frame, layout[1], state, section, &theme),
        TabId::Gantt => render_department_gantt(frame, layout[1], section, &theme),
        TabId::Documentation => render_department_documents(frame, layout[1], section, &theme),
        TabId::Team => render_department_team(frame, layout[1], state, section, &theme),
    }
}

fn render_department_projects(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    section: SectionId,
    theme: &UiTheme,
) {
    let view = state.departments.view(section);
    let cards = state.departments.visible_cards(section);
    let selected = state.departments.selected_index(section);
    let title = format!(
        "Projects | status: {} (s) | priority: {} (f)",
        view.status.label(),
        view.priority.label()
    );
    let block = gray_block(title, theme);

    if cards.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            " No projects match the current filters.",
            Style::default().fg(theme.label_fg),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<Row<'static>> = cards
        .iter()
        .enumerate()
        .map(|(idx, card)| {
            let row = Row::new(vec![
                Cell::from(card.code),
                Cell::from(card.name),
                Cell::from(Span::styled(
                    card.state.label(),
                    Style::default().fg(project_state_color(card.state)),
                )),
                Cell::from(Span::styled(
                    card.priority.label(),
                    Style::default().fg(priority_color(card.priority)),
                )),
                Cell::from(format!(
                    "{} {:>3}%",
                    ratio_bar(card.progress as f64 / 100.0, 10),
                    card.progress
                )),
                Cell::from(card.responsible),
            ]);
            if Some(idx) == selected {
                row.style(
                    Style::default()
                        .fg(theme.highlight_fg)
                        .bg(theme.highlight_bg),
                )
            } else {
                row
            }
        })
        .collect();
    let widths = [
        Constraint::Length(13),
        Constraint::Min(24),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Length(22),
    ];
    let table = Table::new(rows, widths)
        .header(light_blue_header(
            vec!["CODE", "PROJECT", "STATUS", "PRIORITY", "PROGRESS", "OWNER"],
            theme,
        ))
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}

fn render_department_gantt(frame: &mut Frame, area: Rect, section: SectionId, theme: &UiTheme) {
    let width = area.width.saturating_sub(40).max(10) as usize;
    let lines: Vec<Line<'static>> = department_projects(section)
        .iter()
        .map(|card| {
            Line::from(vec![
                Span::styled(format!(" {:<14}", card.code), Style::default().fg(theme.label_fg)),
                Span::styled(
                    ratio_bar(card.progress as f64 / 100.0, width),
                    Style::default().fg(project_state_color(card.state)),
                ),
                Span::raw(format!("  {}", card.time_remaining)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(gray_block("Gantt", theme)), area);
}

fn render_department_documents(frame: &mut Frame, area: Rect, section: SectionId, theme: &UiTheme) {
    let lines: Vec<Line<'static>> = department_projects(section)
        .iter()
        .flat_map(|card| {
            [
                Line::from(format!(" {} specification.pdf", card.code)),
                Line::from(format!(" {} schedule.xlsx", card.code)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(gray_block("Documentation", theme)),
        area,
    );
}

fn render_department_team(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    section: SectionId,
    theme: &UiTheme,
) {
    let label = Style::default().fg(theme.label_fg);
    let mut lines = Vec::new();
    if let Some(department) = section_department(section) {
        if let Some((_, headcount)) = PERSONNEL_BY_DEPARTMENT
            .iter()
            .find(|(candidate, _)| *candidate == department)
        {
            lines.push(Line::from(vec![
                Span::styled(" headcount ", label),
                Span::raw(headcount.to_string()),
            ]));
        }
        if let Some(workload) = state.metrics.workload(department) {
            lines.push(Line::from(vec![
                Span::styled(" active projects ", label),
                Span::raw(format!("{}/{}", workload.current, workload.max)),
            ]));
        }
    }
    let mut owners: Vec<&str> = department_projects(section)
        .iter()
        .map(|card| card.responsible)
        .collect();
    owners.dedup();
    lines.push(Line::from(""));
    lines.extend(owners.into_iter().map(|owner| Line::from(format!(" • {owner}"))));
    frame.render_widget(Paragraph::new(lines).block(gray_block("Team", theme)), area);
}

fn draw_projects_overview(frame: &mut Frame, area: Rect, dim: bool) {
    let theme = ui_theme(dim);
    let rows: Vec<Row<'static>> = SectionId::ALL
        .iter()
        .filter(|section| section.is_department())
        .flat_map(|section| {
            department_projects(*section).iter().map(move |card| {
                Row::new(vec![
                    Cell::from(section.short_label()),
                    Cell::from(card.code),
                    Cell::from(card.name),
                    Cell::from(Span::styled(
                        card.state.label(),
                        Style::default().fg(project_state_color(card.state)),
                    )),
                    Cell::from(format!("{:>3}%", card.progress)),
                    Cell::from(card.next_milestone),
                ])
            })
        })
        .collect();
    let widths = [
        Constraint::Length(12),
        Constraint::Length(13),
        Constraint::Min(24),
        Constraint::Length(9),
        Constraint::Length(5),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths)
        .header(light_blue_header(
            vec!["AREA", "CODE", "PROJECT", "STATUS", "DONE", "NEXT MILESTONE"],
            &theme,
        ))
        .block(gray_block("All Projects", &theme))
        .column_spacing(1);
    frame.render_widget(table, area);
}

fn draw_documents(frame: &mut Frame, area: Rect, dim: bool) {
    let theme = ui_theme(dim);
    let lines: Vec<Line<'static>> = DOCUMENTS
        .iter()
        .map(|doc| Line::from(format!(" • {doc}")))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(gray_block("Document Repository", &theme)),
        area,
    );
}

fn draw_settings(frame: &mut Frame, area: Rect, state: &UiState, dim: bool) {
    let theme = ui_theme(dim);
    let sidebar = state.nav.sidebar();
    let layout = match sidebar.layout() {
        LayoutMode::Compact => "compact",
        LayoutMode::Expanded => "expanded",
    };
    let mut rows = vec![
        detail_row("Layout", layout.to_string(), &theme),
        detail_row("Sidebar collapsed", sidebar.is_collapsed().to_string(), &theme),
        detail_row("Sidebar open", sidebar.is_open().to_string(), &theme),
    ];
    for task in &state.schedule {
        let label = match task.tier {
            RefreshTier::Clock => "Clock tick",
            RefreshTier::MetricJitter => "Metric jitter",
            RefreshTier::FullRefresh => "Full refresh",
            RefreshTier::Notifications => "Notifications",
        };
        rows.push(detail_row(label, format!("every {}s", task.interval.as_secs()), &theme));
    }
    let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(0)])
        .block(gray_block("Settings", &theme));
    frame.render_widget(table, area);
}

fn render_detail_modal(frame: &mut Frame, modal: &Modal<DetailContent>) {
    let theme = ui_theme(false);
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Black))
        .title(Span::styled(
            format!(" {} ", modal.title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let paragraph = Paragraph::new(detail_lines(&modal.body, &theme))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, layout[0]);

    let mut hints = vec!["Esc close".to_string(), "y copy".to_string()];
    if let Some(label) = modal.body.action_label() {
        hints.insert(1, format!("g {label}"));
    }
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {}", hints.join("  |  ")),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, layout[1]);
}

fn detail_lines(content: &DetailContent, theme: &UiTheme) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme.header_fg).add_modifier(Modifier::BOLD);
    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {name:<16}"), label),
            Span::raw(value),
        ])
    };
    match content {
        DetailContent::ProjectsByStatus {
            state,
            count,
            projects,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!(" {count} projects {}", state.label().to_ascii_lowercase()),
                    label,
                )),
                Line::from(""),
            ];
            lines.extend(projects.iter().map(|name| {
                Line::from(vec![
                    Span::styled(" ● ", Style::default().fg(project_state_color(*state))),
                    Span::raw(name.to_string()),
                ])
            }));
            lines
        }
        DetailContent::Kpi { kind, value } => vec![
            Line::from(Span::styled(
                format!(" {value}"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(" {}", kind.description())),
        ],
        DetailContent::Department {
            department,
            current,
            max,
            efficiency,
        } => vec![
            Line::from(Span::styled(
                format!(" {} workload", department.label()),
                label,
            )),
            Line::from(""),
            field("Active projects", current.to_string()),
            field("Max capacity", max.to_string()),
            field("Efficiency", format!("{efficiency}%")),
        ],
        DetailContent::Milestone(milestone) => vec![
            Line::from(Span::styled(format!(" {}", milestone.title), label)),
            Line::from(""),
            field("Date", milestone.date.to_string()),
            Line::from(vec![
                Span::styled(format!(" {:<16}", "Status"), label),
                Span::styled(
                    milestone.status.label().to_string(),
                    Style::default().fg(milestone_color(milestone.status)),
                ),
            ]),
        ],
        DetailContent::Personnel {
            by_department,
            attendance,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(" Personnel by department", label)),
                Line::from(""),
            ];
            lines.extend(
                by_department
                    .iter()
                    .map(|(department, count)| field(department.label(), count.to_string())),
            );
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" Attendance", label)));
            lines.push(Line::from(vec![
                Span::styled(format!(" {} present", attendance.present), Style::default().fg(Color::Green)),
                Span::styled(format!("  {} late", attendance.late), Style::default().fg(Color::Yellow)),
                Span::styled(format!("  {} absent", attendance.absent), Style::default().fg(Color::Red)),
            ]));
            lines
        }
        DetailContent::Notifications(items) => items
            .iter()
            .flat_map(|item| {
                [
                    Line::from(vec![
                        Span::styled(" ▌", Style::default().fg(notification_color(item.kind))),
                        Span::styled(item.title.to_string(), label),
                        Span::styled(format!("  {}", item.age), Style::default().fg(Color::DarkGray)),
                    ]),
                    Line::from(format!("  {}", item.message)),
                    Line::from(""),
                ]
            })
            .collect(),
        DetailContent::Project { card, department } => vec![
            Line::from(vec![
                Span::styled(format!(" {}", card.name), label),
                Span::styled(format!("  {}", card.code), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!(" {:<16}", "Status"), label),
                Span::styled(
                    card.state.label().to_string(),
                    Style::default().fg(project_state_color(card.state)),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!(" {:<16}", "Priority"), label),
                Span::styled(
                    card.priority.label().to_string(),
                    Style::default().fg(priority_color(card.priority)),
                ),
            ]),
            field(
                "Progress",
                format!("{} {}%", ratio_bar(card.progress as f64 / 100.0, 20), card.progress),
            ),
            field("Owner", card.responsible.to_string()),
            field("Next milestone", card.next_milestone.to_string()),
            field("Time remaining", card.time_remaining.to_string()),
            field("Department", department.label().to_string()),
        ],
    }
}

fn render_help_modal(frame: &mut Frame, section: SectionId) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Black))
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from("Navigation"),
        Line::from("  1–8          switch sections"),
        Line::from("  Tab/S-Tab    next/previous section"),
        Line::from("  b            toggle sidebar"),
        Line::from("  n            notifications"),
        Line::from("  q            quit"),
        Line::from("  ?            toggle help"),
    ];

    if section == SectionId::Dashboard {
        lines.push(Line::from(""));
        lines.push(Line::from("Dashboard"));
        lines.push(Line::from("  j/k or ↑/↓   move focus"));
        lines.push(Line::from("  Enter        open details"));
        lines.push(Line::from("  m            minimize/restore widget"));
        lines.push(Line::from("  r            refresh data"));
        lines.push(Line::from("  h/l or ←/→   previous/next week"));
        lines.push(Line::from("  p            cycle workload period"));
        lines.push(Line::from("  x            acknowledge alert"));
    }

    if section.is_department() {
        lines.push(Line::from(""));
        lines.push(Line::from("Department"));
        lines.push(Line::from("  [ / ]        previous/next tab"));
        lines.push(Line::from("  j/k or ↑/↓   select project"));
        lines.push(Line::from("  Enter        project details"));
        lines.push(Line::from("  s / f        status / priority filter"));
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

struct UiTheme {
    header_fg: Color,
    border_fg: Color,
    label_fg: Color,
    text_fg: Color,
    highlight_fg: Color,
    highlight_bg: Color,
}

fn ui_theme(dim: bool) -> UiTheme {
    if dim {
        UiTheme {
            header_fg: Color::DarkGray,
            border_fg: Color::DarkGray,
            label_fg: Color::DarkGray,
            text_fg: Color::DarkGray,
            highlight_fg: Color::Gray,
            highlight_bg: Color::DarkGray,
        }
    } else {
        UiTheme {
            header_fg: Color::Cyan,
            border_fg: Color::DarkGray,
            label_fg: Color::Gray,
            text_fg: Color::Reset,
            highlight_fg: Color::White,
            highlight_bg: Color::Rgb(20, 70, 120),
        }
    }
}

fn project_state_color(state: ProjectState) -> Color {
    match state {
        ProjectState::OnTime => Color::Green,
        ProjectState::AtRisk => Color::Yellow,
        ProjectState::Delayed => Color::Red,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Gray,
    }
}

fn milestone_color(status: MilestoneStatus) -> Color {
    match status {
        MilestoneStatus::Urgent => Color::Red,
        MilestoneStatus::Important => Color::Yellow,
        MilestoneStatus::Normal => Color::Gray,
    }
}

fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Maintenance => Color::Magenta,
        NotificationKind::Info => Color::Blue,
        NotificationKind::Success => Color::Green,
    }
}

fn load_color(ratio: f64) -> Color {
    if ratio >= 0.9 {
        Color::Red
    } else if ratio >= 0.75 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn ratio_bar(ratio: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn tab_spans(label: &str, active: bool, theme: &UiTheme) -> Vec<Span<'static>> {
    let style = if active {
        Style::default()
            .fg(theme.highlight_fg)
            .bg(theme.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_fg)
    };
    vec![Span::styled(format!(" {} ", label.to_ascii_uppercase()), style)]
}

fn detail_row(label: &'static str, value: String, theme: &UiTheme) -> Row<'static> {
    Row::new(vec![
        Cell::from(label).style(
            Style::default()
                .fg(theme.header_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::from(value),
    ])
}

fn light_blue_header(labels: Vec<&'static str>, theme: &UiTheme) -> Row<'static> {
    Row::new(labels).style(
        Style::default()
            .fg(theme.header_fg)
            .add_modifier(Modifier::BOLD),
    )
}

fn gray_block(title: impl Into<String>, theme: &UiTheme) -> Block<'static> {
    Block::default()
        .title(title.into())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProjectState;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, buffer::Buffer};

    fn state_with_columns(columns: u16) -> UiState {
        UiState::new(
            &AppConfig::default(),
            StdRng::seed_from_u64(11),
            columns,
            Local::now(),
        )
    }

    fn press(state: &mut UiState, code: KeyCode) -> bool {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), state, Instant::now())
    }

    fn render(state: &UiState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw_ui(frame, state)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut result = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }

    #[test]
    fn digits_switch_sections_and_title() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Char('3'));
        assert_eq!(state.nav.active_section(), SectionId::Engineering);
        assert_eq!(state.nav.title(), "Engineering Area - Production Control Center");

        press(&mut state, KeyCode::Char('9'));
        assert_eq!(state.nav.active_section(), SectionId::Engineering);
    }

    #[test]
    fn quit_keys_end_the_loop() {
        let mut state = state_with_columns(200);
        assert!(press(&mut state, KeyCode::Char('q')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(ctrl_c, &mut state, Instant::now()));
    }

    #[test]
    fn modal_swallows_navigation_and_closes_on_esc() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Enter);
        assert!(state.modal.is_open());

        press(&mut state, KeyCode::Char('4'));
        assert_eq!(state.nav.active_section(), SectionId::Dashboard);

        press(&mut state, KeyCode::Esc);
        assert!(!state.modal.is_open());
        press(&mut state, KeyCode::Esc);
        assert!(!state.modal.is_open());
    }

    #[test]
    fn modal_action_navigates_to_linked_section() {
        let mut state = state_with_columns(200);
        let workload_idx = state
            .dashboard
            .targets()
            .iter()
            .position(|t| matches!(t, DashboardTarget::Workload(_)))
            .unwrap();
        state.dashboard.move_focus(workload_idx as isize);
        press(&mut state, KeyCode::Enter);
        assert_eq!(
            state.modal.current().map(|m| m.title.as_str()),
            Some("Department: Engineering")
        );

        press(&mut state, KeyCode::Char('g'));
        assert!(!state.modal.is_open());
        assert_eq!(state.nav.active_section(), SectionId::Engineering);
    }

    #[test]
    fn project_status_modal_links_to_projects() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Enter);
        assert!(matches!(
            state.modal.current().map(|m| &m.body),
            Some(DetailContent::ProjectsByStatus {
                state: ProjectState::OnTime,
                ..
            })
        ));
        press(&mut state, KeyCode::Char('g'));
        assert_eq!(state.nav.active_section(), SectionId::Projects);
    }

    #[test]
    fn compact_sidebar_closes_after_section_pick() {
        let mut state = state_with_columns(100);
        assert_eq!(state.nav.sidebar().layout(), LayoutMode::Compact);
        press(&mut state, KeyCode::Char('b'));
        assert!(state.nav.sidebar().is_open());
        press(&mut state, KeyCode::Char('5'));
        assert_eq!(state.nav.active_section(), SectionId::Naval);
        assert!(!state.nav.sidebar().is_open());

        press(&mut state, KeyCode::Char('b'));
        press(&mut state, KeyCode::Esc);
        assert!(!state.nav.sidebar().is_open());
    }

    #[test]
    fn content_keys_dismiss_compact_overlay() {
        let mut state = state_with_columns(100);
        press(&mut state, KeyCode::Char('b'));
        assert!(state.nav.sidebar().is_open());
        press(&mut state, KeyCode::Enter);
        assert!(!state.nav.sidebar().is_open());
        assert!(state.modal.is_open());

        press(&mut state, KeyCode::Esc);
        press(&mut state, KeyCode::Char('b'));
        press(&mut state, KeyCode::Char('j'));
        assert!(!state.nav.sidebar().is_open());
        assert_eq!(state.nav.active_section(), SectionId::Dashboard);
    }

    #[test]
    fn resize_across_threshold_resets_sidebar() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Char('b'));
        assert!(state.nav.sidebar().is_collapsed());
        state.on_resize(100);
        assert_eq!(state.nav.sidebar().layout(), LayoutMode::Compact);
        assert!(!state.nav.sidebar().is_collapsed());
        assert!(!state.nav.sidebar().is_open());
    }

    #[test]
    fn full_refresh_tick_is_dropped_off_dashboard() {
        let mut state = state_with_columns(200);
        let before = state.metrics.clone();
        press(&mut state, KeyCode::Char('2'));
        state.apply_tick(RefreshTier::FullRefresh, Local::now());
        assert_eq!(state.metrics.kpis, before.kpis);
        assert_eq!(state.metrics.workloads, before.workloads);
        assert_eq!(state.metrics.last_update, before.last_update);
    }

    #[test]
    fn periodic_full_refresh_keeps_last_update() {
        let mut state = state_with_columns(200);
        let before = state.metrics.last_update;
        state.apply_tick(
            RefreshTier::FullRefresh,
            before + chrono::Duration::seconds(300),
        );
        assert_eq!(state.metrics.last_update, before);
    }

    #[test]
    fn full_refresh_tick_keeps_bounds_on_dashboard() {
        let mut state = state_with_columns(200);
        for _ in 0..50 {
            state.apply_tick(RefreshTier::FullRefresh, Local::now());
            for workload in state.metrics.workloads {
                assert!(workload.current <= workload.max);
            }
            assert!((90..=97).contains(&state.metrics.kpis.productivity));
        }
    }

    #[test]
    fn department_filters_and_detail() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Char('3'));
        assert_eq!(state.departments.visible_cards(SectionId::Engineering).len(), 3);

        press(&mut state, KeyCode::Char('s'));
        let cards = state.departments.visible_cards(SectionId::Engineering);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].state, ProjectState::OnTime);

        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(
            state.modal.current().map(|m| m.title.as_str()),
            Some("Project: Propulsion System Specs PQ-045")
        );
        assert_eq!(state.departments.visible_cards(SectionId::Naval).len(), 2);
    }

    #[test]
    fn department_keys_only_apply_on_projects_tab() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Char('3'));
        press(&mut state, KeyCode::Char(']'));
        assert_eq!(state.nav.active_tab(SectionId::Engineering), Some(TabId::Gantt));
        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Enter);
        assert!(!state.modal.is_open());
        assert_eq!(state.departments.visible_cards(SectionId::Engineering).len(), 3);
    }

    #[test]
    fn acknowledging_alert_decrements_count() {
        let mut state = state_with_columns(200);
        let alert_idx = state
            .dashboard
            .targets()
            .iter()
            .position(|t| matches!(t, DashboardTarget::Alert(_)))
            .unwrap();
        state.dashboard.move_focus(alert_idx as isize);
        let before = state.metrics.critical_alerts;
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.metrics.critical_alerts, before - 1);
        assert_eq!(state.dashboard.active_alerts().len(), ALERTS.len() - 1);
    }

    #[test]
    fn manual_refresh_runs_after_delay() {
        let mut state = state_with_columns(200);
        let start = Instant::now();
        handle_key_event(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            &mut state,
            start,
        );
        assert!(state.dashboard.is_refreshing());
        state.poll_manual_refresh(start, Local::now());
        assert!(state.dashboard.is_refreshing());
        let refreshed_at = state.metrics.last_update + chrono::Duration::seconds(5);
        state.poll_manual_refresh(start + Duration::from_secs(2), refreshed_at);
        assert!(!state.dashboard.is_refreshing());
        assert_eq!(state.metrics.last_update, refreshed_at);
    }

    #[test]
    fn dashboard_renders_widgets_and_sidebar() {
        let state = state_with_columns(200);
        let screen = render(&state, 200, 40);
        assert!(screen.contains("Production Control Center"));
        assert!(screen.contains("Project Status"));
        assert!(screen.contains("Department Workload"));
        assert!(screen.contains("Critical Alerts"));
        assert!(screen.contains("Sections"));
    }

    #[test]
    fn compact_layout_hides_sidebar_until_opened() {
        let mut state = state_with_columns(100);
        let screen = render(&state, 100, 40);
        assert!(!screen.contains("Sections"));

        press(&mut state, KeyCode::Char('b'));
        let screen = render(&state, 100, 40);
        assert!(screen.contains("Sections"));
    }

    #[test]
    fn modal_renders_title_and_action_hint() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Enter);
        let screen = render(&state, 200, 40);
        assert!(screen.contains("Projects On Time"));
        assert!(screen.contains("g view all projects"));
    }

    #[test]
    fn department_view_renders_tabs_and_projects() {
        let mut state = state_with_columns(200);
        press(&mut state, KeyCode::Char('3'));
        let screen = render(&state, 200, 40);
        assert!(screen.contains("GANTT"));
        assert!(screen.contains("ENG-2024-001"));
    }

    #[test]
    fn share_text_flattens_modal() {
        let mut slot = ModalSlot::new();
        let (title, content) = DetailContent::personnel();
        slot.show(title, content);
        let text = modal_share_text(slot.current().unwrap());
        assert!(text.starts_with("Active Personnel"));
        assert!(text.contains("89 present"));
    }

    #[test]
    fn ratio_bar_clamps() {
        assert_eq!(ratio_bar(2.0, 4), "████");
        assert_eq!(ratio_bar(-1.0, 4), "░░░░");
        assert_eq!(ratio_bar(0.5, 0), "");
    }
}
