use crate::{
    config::AppConfig,
    schedule::{Schedule, tasks_from_config},
    tui::{self, UiState},
};
use anyhow::Result;
use chrono::Local;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Startup choices taken from the command line.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub section: Option<String>,
    pub tab: Option<String>,
    pub seed: Option<u64>,
}

/// High-level application orchestrator.
pub struct App {
    config: Arc<AppConfig>,
}

impl App {
    pub async fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub async fn run(self, options: RunOptions) -> Result<()> {
        let state = self.initial_state(&options);

        let (tx, rx) = mpsc::unbounded_channel();
        let schedule = Schedule::spawn(&tasks_from_config(&self.config.schedule), tx);
        tracing::debug!(tasks = schedule.task_count(), "refresh tasks running");

        tracing::info!("Launching interactive TUI (requires an attached terminal)");
        let ui_result = tui::run(self.config.clone(), state, rx).await;

        schedule.shutdown().await?;
        ui_result
    }

    fn initial_state(&self, options: &RunOptions) -> UiState {
        let rng = match options.seed {
            Some(seed) => {
                tracing::info!(seed, "using seeded mock data");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let mut state = UiState::new(&self.config, rng, tui::terminal_columns(), Local::now());
        if let Some(section) = options.section.as_deref()
            && !state.nav.activate_section(section)
        {
            tracing::warn!(section, "unknown section requested on the command line");
        }
        if let Some(tab) = options.tab.as_deref() {
            let section = state.nav.active_section();
            if !state.nav.activate_tab(section.as_str(), tab) {
                tracing::warn!(section = section.as_str(), tab, "tab does not belong to section");
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{SectionId, TabId};

    fn app() -> App {
        App {
            config: Arc::new(AppConfig::default()),
        }
    }

    #[test]
    fn command_line_section_and_tab_are_applied() {
        let state = app().initial_state(&RunOptions {
            section: Some("naval".to_string()),
            tab: Some("team".to_string()),
            seed: Some(3),
        });
        assert_eq!(state.nav.active_section(), SectionId::Naval);
        assert_eq!(state.nav.active_tab(SectionId::Naval), Some(TabId::Team));
        assert_eq!(state.nav.title(), "Naval Area - Production Control Center");
    }

    #[test]
    fn unknown_section_keeps_configured_start() {
        let state = app().initial_state(&RunOptions {
            section: Some("shipyard-bar".to_string()),
            tab: Some("team".to_string()),
            seed: None,
        });
        assert_eq!(state.nav.active_section(), SectionId::Dashboard);
        assert_eq!(state.nav.active_tab(SectionId::Dashboard), None);
    }
}
