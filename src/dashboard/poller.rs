//! fetch-and-render loop for the dashboard.
//!
//! on a fixed timer (immediate first tick) the poller fetches the
//! latest batch from the hub and folds the outcome into the
//! [`DashboardState`]:
//!
//!   - failure (network error or non-2xx) -> Offline
//!   - success with >=1 reading           -> Online; panel, alerts and
//!     charts update from the single newest reading
//!   - success with 0 readings            -> ignored entirely; status,
//!     panel, alerts and charts stay as they were
//!
//! the transition itself is the pure function [`apply`], so tests can
//! drive it without timers or sockets. ticks are serialized by the
//! loop; a slow fetch delays the next tick's effect rather than
//! overlapping it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::PollError;

use super::{alerts, ConnectionStatus, DashboardState, ReadingSnapshot};

/// what one poll produced, before folding it into the state
pub type FetchResult = Result<Vec<ReadingSnapshot>, PollError>;

pub struct Poller {
    client: reqwest::Client,
    endpoint: String,
}

impl Poller {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/get-sensor-data", base_url.trim_end_matches('/')),
        }
    }

    async fn fetch(&self) -> FetchResult {
        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            return Err(PollError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// one fetch folded into the state, stamped with the current
    /// wall-clock label
    pub async fn poll_once(&self, state: &mut DashboardState) {
        let fetched = self.fetch().await;
        let label = now_label();
        apply(state, fetched, &label);
    }

    /// start the repeating task. `on_update` runs after every poll with
    /// the state locked; stop via the returned handle.
    pub fn start<F>(
        self,
        state: Arc<Mutex<DashboardState>>,
        period: Duration,
        mut on_update: F,
    ) -> PollerHandle
    where
        F: FnMut(&DashboardState) + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let fetched = self.fetch().await;
                        let label = now_label();
                        let mut state = state.lock().expect("dashboard state lock poisoned");
                        apply(&mut state, fetched, &label);
                        on_update(&state);
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        PollerHandle { shutdown, task }
    }
}

/// explicit stop for the repeating task
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// fold one fetch outcome into the dashboard state.
///
/// `label` is the formatted wall-clock time used both for the "as of"
/// display and as the chart point label (which drives same-second
/// dedup); injecting it keeps the transition deterministic under test.
pub fn apply(state: &mut DashboardState, fetched: FetchResult, label: &str) {
    match fetched {
        Err(err) => {
            tracing::warn!("poll failed: {err}");
            state.status = ConnectionStatus::Offline;
        }
        Ok(batch) => {
            let Some(latest) = batch.first() else {
                // a reachable hub with no readings yet: nothing to show,
                // nothing to change
                return;
            };
            state.status = ConnectionStatus::Online;
            state.panel.update(latest, label);
            state.alerts = alerts::evaluate(latest);
            state.charts.record(label, latest);
        }
    }
}

fn now_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
