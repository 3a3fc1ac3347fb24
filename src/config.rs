use crate::{metrics::JitterOdds, navigation::SectionId};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else {
            let default_path = PathBuf::from("control-center.toml");
            if default_path.exists() {
                Self::from_file(&default_path)?
            } else {
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| "failed to parse configuration TOML")?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(log_file) = env::var("CONTROL_CENTER_LOG_FILE") {
            self.logging.file = PathBuf::from(log_file);
        }
        if let Ok(section) = env::var("CONTROL_CENTER_INITIAL_SECTION") {
            self.display.initial_section = section;
        }
        if let Ok(full_refresh) = env::var("CONTROL_CENTER_FULL_REFRESH_SECS")
            && let Ok(value) = full_refresh.parse::<u64>()
        {
            self.schedule.full_refresh_secs = value;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_refresh_hz")]
    pub refresh_hz: u64,
    /// Viewport units per terminal column.
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    #[serde(default = "default_initial_section")]
    pub initial_section: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_hz: default_refresh_hz(),
            cell_width: default_cell_width(),
            initial_section: default_initial_section(),
        }
    }
}

impl DisplayConfig {
    /// Unknown ids fall back to the dashboard.
    pub fn initial_section(&self) -> SectionId {
        SectionId::parse(&self.initial_section).unwrap_or(SectionId::Dashboard)
    }

    pub fn viewport_width(&self, columns: u16) -> u32 {
        u32::from(columns).saturating_mul(self.cell_width.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_clock_secs")]
    pub clock_secs: u64,
    #[serde(default = "default_metric_jitter_secs")]
    pub metric_jitter_secs: u64,
    #[serde(default = "default_full_refresh_secs")]
    pub full_refresh_secs: u64,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    #[serde(default = "default_metric_jitter_probability")]
    pub metric_jitter_probability: f64,
    #[serde(default = "default_alert_jitter_probability")]
    pub alert_jitter_probability: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            clock_secs: default_clock_secs(),
            metric_jitter_secs: default_metric_jitter_secs(),
            full_refresh_secs: default_full_refresh_secs(),
            notification_secs: default_notification_secs(),
            metric_jitter_probability: default_metric_jitter_probability(),
            alert_jitter_probability: default_alert_jitter_probability(),
        }
    }
}

impl ScheduleConfig {
    pub fn clock_interval(&self) -> Duration {
        Duration::from_secs(self.clock_secs.max(1))
    }

    pub fn metric_jitter_interval(&self) -> Duration {
        Duration::from_secs(self.metric_jitter_secs.max(1))
    }

    pub fn full_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.full_refresh_secs.max(1))
    }

    pub fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notification_secs.max(1))
    }

    pub fn jitter_odds(&self) -> JitterOdds {
        JitterOdds {
            metrics: self.metric_jitter_probability.clamp(0.0, 1.0),
            alerts: self.alert_jitter_probability.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

fn default_refresh_hz() -> u64 {
    10
}

fn default_cell_width() -> u32 {
    8
}

fn default_initial_section() -> String {
    SectionId::Dashboard.as_str().to_string()
}

fn default_clock_secs() -> u64 {
    1
}

fn default_metric_jitter_secs() -> u64 {
    30
}

fn default_full_refresh_secs() -> u64 {
    300
}

fn default_notification_secs() -> u64 {
    120
}

fn default_metric_jitter_probability() -> f64 {
    0.3
}

fn default_alert_jitter_probability() -> f64 {
    0.2
}

fn default_log_file() -> PathBuf {
    PathBuf::from("control-center.log")
}
