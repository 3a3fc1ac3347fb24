use crate::{config::ScheduleConfig, metrics::RefreshTier};
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScheduledTask {
    pub tier: RefreshTier,
    pub interval: Duration,
}

pub fn tasks_from_config(config: &ScheduleConfig) -> Vec<ScheduledTask> {
    vec![
        ScheduledTask {
            tier: RefreshTier::Clock,
            interval: config.clock_interval(),
        },
        ScheduledTask {
            tier: RefreshTier::MetricJitter,
            interval: config.metric_jitter_interval(),
        },
        ScheduledTask {
            tier: RefreshTier::FullRefresh,
            interval: config.full_refresh_interval(),
        },
        ScheduledTask {
            tier: RefreshTier::Notifications,
            interval: config.notification_interval(),
        },
    ]
}

/// Handles of the periodic refresh tasks. Tasks only emit ticks; the UI loop
/// owns the state and applies them.
pub struct Schedule {
    shutdown: watch::Sender<bool>,
    handles: Vec<(RefreshTier, JoinHandle<()>)>,
}

impl Schedule {
    pub fn spawn(tasks: &[ScheduledTask], ticks: mpsc::UnboundedSender<RefreshTier>) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handles = tasks
            .iter()
            .map(|task| {
                let handle = tokio::spawn(run_task(*task, ticks.clone(), shutdown_rx.clone()));
                (task.tier, handle)
            })
            .collect();
        tracing::info!(tasks = tasks.len(), "refresh schedule started");
        Self { shutdown, handles }
    }

    pub fn task_count(&self) -> usize {
        self.handles.len()
    }

    /// Signals every task to stop and waits for all of them.
    pub async fn shutdown(self) -> Result<()> {
        // Send only fails once every task has already exited.
        let _ = self.shutdown.send(true);
        for (tier, handle) in self.handles {
            handle
                .await
                .with_context(|| format!("refresh task {tier:?} panicked"))?;
        }
        tracing::info!("refresh schedule stopped");
        Ok(())
    }
}

async fn run_task(
    task: ScheduledTask,
    ticks: mpsc::UnboundedSender<RefreshTier>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = time::interval_at(Instant::now() + task.interval, task.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if ticks.send(task.tier).is_err() {
                    tracing::debug!(tier = ?task.tier, "tick receiver dropped; stopping task");
                    break;
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
