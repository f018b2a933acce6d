//! Load test state machine

use chrono::{DateTime, Utc};
use pixelpress_config::LoadTestSettings;
use pixelpress_metrics::{MetricsAggregator, SystemSampler};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::LoadTestConfig;
use crate::error::{LoadTestError, LoadTestResult};
use crate::signal::CancellationSignal;
use crate::worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadTestPhase {
    Idle,
    Running,
    Completed,
    Stopped,
}

/// Result of a stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// A running test was cancelled and its threads joined
    Stopped,
    /// Nothing was running
    Idle,
}

impl StopOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopOutcome::Stopped => "stopped",
            StopOutcome::Idle => "idle",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestStatus {
    pub phase: LoadTestPhase,
    pub run_id: Option<Uuid>,
    pub config: Option<LoadTestConfig>,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_secs: f64,
    pub active_workers: usize,
}

/// Bookkeeping for the most recent run, kept after it ends
#[derive(Debug, Clone)]
struct RunRecord {
    id: Uuid,
    config: LoadTestConfig,
    started_at: DateTime<Utc>,
    started: Instant,
    finished_after: Option<Duration>,
}

struct ActiveRun {
    signal: Arc<CancellationSignal>,
    workers: Vec<JoinHandle<u64>>,
    supervisor: Option<tokio::task::JoinHandle<()>>,
}

struct ControllerState {
    phase: LoadTestPhase,
    last_run: Option<RunRecord>,
    active: Option<ActiveRun>,
}

impl ControllerState {
    fn status(&self, active_workers: usize) -> LoadTestStatus {
        let record = self.last_run.as_ref();
        LoadTestStatus {
            phase: self.phase,
            run_id: record.map(|r| r.id),
            config: record.map(|r| r.config),
            started_at: record.map(|r| r.started_at),
            elapsed_secs: record
                .map(|r| r.finished_after.unwrap_or_else(|| r.started.elapsed()))
                .map(|d| (d.as_secs_f64() * 10.0).round() / 10.0)
                .unwrap_or(0.0),
            active_workers,
        }
    }

    fn is_current(&self, run_id: Uuid) -> bool {
        self.phase == LoadTestPhase::Running
            && self.last_run.as_ref().map(|r| r.id) == Some(run_id)
    }

    fn finish(&mut self, phase: LoadTestPhase) -> Option<ActiveRun> {
        self.phase = phase;
        if let Some(record) = self.last_run.as_mut() {
            record.finished_after = Some(record.started.elapsed());
        }
        self.active.take()
    }
}

/// Runs at most one load test at a time
pub struct LoadTestController {
    state: Arc<Mutex<ControllerState>>,
    aggregator: Arc<MetricsAggregator>,
    settings: LoadTestSettings,
    live_workers: Arc<AtomicUsize>,
}

impl LoadTestController {
    pub fn new(aggregator: Arc<MetricsAggregator>, settings: LoadTestSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                phase: LoadTestPhase::Idle,
                last_run: None,
                active: None,
            })),
            aggregator,
            settings,
            live_workers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of load threads that have not yet exited
    pub fn live_workers(&self) -> usize {
        self.live_workers.load(Ordering::SeqCst)
    }

    pub async fn status(&self) -> LoadTestStatus {
        self.state.lock().await.status(self.live_workers())
    }

    /// Start a run. Fails if one is already running or `config` is out of range.
    pub async fn start(&self, config: LoadTestConfig) -> LoadTestResult<LoadTestStatus> {
        config.validate()?;

        let mut state = self.state.lock().await;
        if state.phase == LoadTestPhase::Running {
            let running = state.last_run.as_ref().map(|r| r.id).unwrap_or_default();
            return Err(LoadTestError::AlreadyRunning(running));
        }

        let run_id = Uuid::new_v4();
        let signal = Arc::new(CancellationSignal::new());
        let workers = match self.spawn_workers(run_id, &config, &signal).await {
            Ok(workers) => workers,
            Err(e) => {
                warn!("Load test {} failed to start: {}", run_id, e);
                return Err(e);
            }
        };

        self.aggregator.set_load_test_active(true);
        state.phase = LoadTestPhase::Running;
        state.last_run = Some(RunRecord {
            id: run_id,
            config,
            started_at: Utc::now(),
            started: Instant::now(),
            finished_after: None,
        });

        let deadline =
            tokio::time::Instant::now() + Duration::from_secs(config.duration_secs);
        let supervisor = tokio::spawn(supervise(
            Arc::clone(&self.state),
            Arc::clone(&self.aggregator),
            Arc::clone(&signal),
            run_id,
            deadline,
            self.settings.sample_interval,
        ));

        state.active = Some(ActiveRun {
            signal,
            workers,
            supervisor: Some(supervisor),
        });

        info!(
            run_id = %run_id,
            "Load test started: intensity={}, duration={}s, threads={}",
            config.intensity, config.duration_secs, config.threads
        );

        Ok(state.status(self.live_workers()))
    }

    /// Cancel the running test and wait for every load thread to exit.
    ///
    /// Calling this when nothing is running is a no-op.
    pub async fn stop(&self) -> StopOutcome {
        let mut state = self.state.lock().await;
        if state.phase != LoadTestPhase::Running {
            debug!("Stop requested with no load test running");
            return StopOutcome::Idle;
        }

        let run_id = state.last_run.as_ref().map(|r| r.id);
        if let Some(mut active) = state.finish(LoadTestPhase::Stopped) {
            if let Some(supervisor) = active.supervisor.take() {
                supervisor.abort();
            }
            let ops = join_workers(active).await;
            debug!("Load test workers performed {} operations", ops);
        }
        self.aggregator.set_load_test_active(false);

        if let Some(id) = run_id {
            info!(run_id = %id, "Load test stopped");
        }
        StopOutcome::Stopped
    }

    /// Stop any active run, giving up after `shutdown_grace`
    pub async fn shutdown(&self) {
        let grace = self.settings.shutdown_grace;
        if tokio::time::timeout(grace, self.stop()).await.is_err() {
            warn!("Load test did not stop within {:?}", grace);
        }
    }

    async fn spawn_workers(
        &self,
        run_id: Uuid,
        config: &LoadTestConfig,
        signal: &Arc<CancellationSignal>,
    ) -> LoadTestResult<Vec<JoinHandle<u64>>> {
        let mut workers = Vec::with_capacity(config.threads);

        for index in 0..config.threads {
            let signal_for_thread = Arc::clone(signal);
            let live = Arc::clone(&self.live_workers);
            let intensity = config.intensity;

            live.fetch_add(1, Ordering::SeqCst);
            let spawned = std::thread::Builder::new()
                .name(format!("pixelpress-load-{}", index))
                .spawn(move || {
                    let _live = LiveGuard(live);
                    worker::run(intensity, &signal_for_thread)
                });

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    self.live_workers.fetch_sub(1, Ordering::SeqCst);
                    let error =
                        LoadTestError::WorkerSpawn(format!("run {} thread {}: {}", run_id, index, e));
                    join_threads(signal, workers).await;
                    return Err(error);
                }
            }
        }

        Ok(workers)
    }
}

impl std::fmt::Debug for LoadTestController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadTestController")
            .field("settings", &self.settings)
            .field("live_workers", &self.live_workers())
            .finish()
    }
}

/// Decrements the live worker count when a load thread exits
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Cancel a run and join its threads off the async runtime
async fn join_workers(active: ActiveRun) -> u64 {
    join_threads(&active.signal, active.workers).await
}

/// Cancel `signal` and join `workers` on the blocking pool, returning their op count
async fn join_threads(signal: &CancellationSignal, workers: Vec<JoinHandle<u64>>) -> u64 {
    signal.cancel();
    match tokio::task::spawn_blocking(move || {
        workers
            .into_iter()
            .map(|handle| handle.join().unwrap_or(0))
            .sum::<u64>()
    })
    .await
    {
        Ok(ops) => ops,
        Err(e) => {
            warn!("Failed to join load workers: {}", e);
            0
        }
    }
}

/// Publish CPU samples until the deadline, then complete the run
async fn supervise(
    state: Arc<Mutex<ControllerState>>,
    aggregator: Arc<MetricsAggregator>,
    signal: Arc<CancellationSignal>,
    run_id: Uuid,
    deadline: tokio::time::Instant,
    interval: Duration,
) {
    let mut sampler = SystemSampler::new();

    loop {
        let next = (tokio::time::Instant::now() + interval).min(deadline);
        tokio::time::sleep_until(next).await;

        if signal.is_cancelled() {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            break;
        }

        let sample = sampler.sample();
        aggregator.publish_cpu(sample.cpu_percent);
    }

    let mut guard = state.lock().await;
    if !guard.is_current(run_id) {
        return;
    }

    if let Some(mut active) = guard.finish(LoadTestPhase::Completed) {
        // Dropping our own handle only detaches it
        active.supervisor.take();
        let ops = join_workers(active).await;
        debug!("Load test workers performed {} operations", ops);
    }
    aggregator.set_load_test_active(false);
    info!(run_id = %run_id, "Load test completed");
}
