// ── Data coordinator ──
//
// Periodically pulls systems, devices, and points from the cloud and
// republishes them as an immutable snapshot. One refresh is in flight
// at a time; overlapping callers queue on the internal gate and the
// held snapshot is only ever replaced wholesale.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use myuplink_api::MyUplinkClient;
use myuplink_api::types::SystemDevice;

use crate::convert;
use crate::error::CoreError;
use crate::model::{DevicePoint, Snapshot, SystemId};

/// Default polling interval, matching the cloud's rate-limit guidance.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

// ── CoordinatorState ─────────────────────────────────────────────────

/// Coordinator lifecycle state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CoordinatorState {
    /// No successful refresh yet.
    Idle,
    /// At least one refresh succeeded; the snapshot is live.
    Ready,
    /// Credentials were rejected. Terminal until the owner
    /// re-authenticates; the periodic task has stopped.
    AuthExpired,
}

// ── Coordinator ──────────────────────────────────────────────────────

/// Polling coordinator for one myUplink account.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`. Entity adapters and
/// other consumers hold a clone and read the current snapshot through
/// it -- there is no ambient global registry.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    client: MyUplinkClient,
    refresh_interval: Duration,
    snapshot: watch::Sender<Arc<Snapshot>>,
    state: watch::Sender<CoordinatorState>,
    /// Serializes refreshes: overlapping requests queue, never overlap.
    refresh_gate: Mutex<()>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Coordinator {
    /// Create a coordinator. Does NOT fetch anything -- call
    /// [`refresh()`](Self::refresh) for a one-shot pull or
    /// [`start()`](Self::start) to begin periodic polling.
    pub fn new(client: MyUplinkClient, refresh_interval: Duration) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::default()));
        let (state, _) = watch::channel(CoordinatorState::Idle);

        Self {
            inner: Arc::new(CoordinatorInner {
                client,
                refresh_interval,
                snapshot,
                state,
                refresh_gate: Mutex::new(()),
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    // ── Snapshot access ──────────────────────────────────────────────

    /// The current snapshot (cheap `Arc` clone). Readers observe either
    /// the previous or the next snapshot, never a partial update.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CoordinatorState {
        *self.inner.state.borrow()
    }

    /// Subscribe to lifecycle state changes.
    pub fn state_changes(&self) -> watch::Receiver<CoordinatorState> {
        self.inner.state.subscribe()
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Pull a fresh snapshot from the cloud and publish it.
    ///
    /// Failure classification is a pass-through of the transport error:
    /// rejected credentials surface as
    /// [`CoreError::AuthenticationFailed`] (terminal -- no automatic
    /// retry happens here), anything else as [`CoreError::NotReady`]
    /// (the caller retries on its own schedule). No backoff logic.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, CoreError> {
        let _gate = self.inner.refresh_gate.lock().await;

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.inner.snapshot.send_replace(Arc::clone(&snapshot));
                self.inner.state.send_replace(CoordinatorState::Ready);
                info!(
                    systems = snapshot.systems.len(),
                    devices = snapshot.device_count(),
                    points = snapshot.point_count(),
                    "snapshot refreshed"
                );
                Ok(snapshot)
            }
            Err(err) if err.is_auth() => {
                self.inner.state.send_replace(CoordinatorState::AuthExpired);
                Err(CoreError::AuthenticationFailed {
                    message: err.to_string(),
                })
            }
            Err(err) => Err(CoreError::NotReady {
                reason: err.to_string(),
            }),
        }
    }

    /// Fetch all systems, then every member device's detail and points
    /// concurrently, and assemble the snapshot.
    async fn fetch_snapshot(&self) -> Result<Snapshot, myuplink_api::Error> {
        let client = &self.inner.client;

        let summaries = client.list_all_systems().await?;
        let systems: Vec<_> = summaries.iter().map(convert::system_from_api).collect();

        let pairs: Vec<(SystemId, &SystemDevice)> = summaries
            .iter()
            .flat_map(|s| {
                let system_id = SystemId::new(s.system_id.clone());
                s.devices.iter().map(move |d| (system_id.clone(), d))
            })
            .collect();

        debug!(device_count = pairs.len(), "fetching device details and points");
        let fetches = pairs.iter().map(|(system_id, summary)| async move {
            let details = client.get_device(&summary.id).await?;
            let points = client.list_device_points(&summary.id).await?;
            Ok::<_, myuplink_api::Error>((system_id, *summary, details, points))
        });
        let results = futures_util::future::join_all(fetches).await;

        let mut devices = HashMap::new();
        let mut points = HashMap::new();
        for result in results {
            let (system_id, summary, details, raw_points) = result?;
            let device = convert::device_from_api(system_id, summary, &details);
            let device_id = device.id.clone();

            let device_points: HashMap<String, DevicePoint> = raw_points
                .iter()
                .map(|p| (p.parameter_id.clone(), convert::point_from_api(&device_id, p)))
                .collect();

            points.insert(device_id.clone(), device_points);
            devices.insert(device_id, device);
        }

        Ok(Snapshot {
            systems,
            devices,
            points,
        })
    }

    // ── Periodic polling ─────────────────────────────────────────────

    /// Perform one synchronous refresh, then start the periodic task.
    ///
    /// The initial refresh propagates its error so setup can
    /// distinguish "re-authenticate" from "try again shortly".
    /// A zero interval disables periodic polling.
    pub async fn start(&self) -> Result<(), CoreError> {
        self.refresh().await?;

        let mut task = self.inner.task.lock().await;
        if task.is_some() || self.inner.refresh_interval.is_zero() {
            return Ok(());
        }

        let coordinator = self.clone();
        let cancel = self.inner.cancel.child_token();
        let interval = self.inner.refresh_interval;
        *task = Some(tokio::spawn(refresh_task(coordinator, interval, cancel)));
        Ok(())
    }

    /// Cancel the periodic task and wait for it to finish.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.task.lock().await.take() {
            let _ = handle.await;
        }
        debug!("coordinator stopped");
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Write a writable point, then refresh so consumers observe the
    /// new value.
    ///
    /// Validates against the current snapshot first: unknown points and
    /// read-only points are rejected without touching the cloud.
    pub async fn set_point(
        &self,
        device_id: &crate::model::DeviceId,
        parameter_id: &str,
        value: serde_json::Value,
    ) -> Result<(), CoreError> {
        let snapshot = self.snapshot();
        if !snapshot.devices.contains_key(device_id) {
            return Err(CoreError::DeviceNotFound {
                identifier: device_id.to_string(),
            });
        }
        let point =
            snapshot
                .point(device_id, parameter_id)
                .ok_or_else(|| CoreError::PointNotFound {
                    device_id: device_id.to_string(),
                    parameter_id: parameter_id.to_owned(),
                })?;
        if !point.writable {
            return Err(CoreError::NotWritable {
                parameter_id: parameter_id.to_owned(),
            });
        }

        let mut values = HashMap::new();
        values.insert(parameter_id.to_owned(), value);
        self.inner
            .client
            .patch_points(device_id.as_str(), &values)
            .await
            .map_err(CoreError::from)?;

        self.refresh().await?;
        Ok(())
    }
}

// ── Background task ──────────────────────────────────────────────────

async fn refresh_task(coordinator: Coordinator, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately; start() already refreshed.
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                match coordinator.refresh().await {
                    Ok(_) => {}
                    Err(CoreError::AuthenticationFailed { message }) => {
                        error!(%message, "authentication expired; stopping periodic refresh");
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "refresh failed; retrying on next tick");
                    }
                }
            }
        }
    }
}
