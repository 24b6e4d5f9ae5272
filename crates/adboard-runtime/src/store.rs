//! Remote report data with per-family fetch status.
//!
//! A `load` issues the report fetch and the app-directory fetch concurrently
//! on the tokio runtime. Each finished fetch comes back as a `FetchOutcome`
//! on an mpsc channel, tagged with the call that issued it, and the owner of
//! the store feeds it to `apply` on its own thread. Readers only ever see a
//! complete `RemoteSnapshot` behind an `Arc`; `apply` builds the next one and
//! swaps it in.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use adboard_types::{AppDirectoryEntry, DateRange, ReportRow};
use serde::Serialize;
use tokio::runtime::Handle;

use crate::client::ReportApi;
use crate::config::StalePolicy;

/// Monotonic identifier of a `load` call
pub type CallId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Succeeded => "succeeded",
            FetchStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFamily {
    Report,
    Apps,
}

/// Result of one finished fetch, as delivered by the background task
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Report {
        call_id: CallId,
        result: Result<Vec<ReportRow>, String>,
    },
    Apps {
        call_id: CallId,
        result: Result<Vec<AppDirectoryEntry>, String>,
    },
}

impl FetchOutcome {
    pub fn call_id(&self) -> CallId {
        match self {
            FetchOutcome::Report { call_id, .. } | FetchOutcome::Apps { call_id, .. } => *call_id,
        }
    }

    pub fn family(&self) -> FetchFamily {
        match self {
            FetchOutcome::Report { .. } => FetchFamily::Report,
            FetchOutcome::Apps { .. } => FetchFamily::Apps,
        }
    }
}

/// Data, status and last error of one fetch family.
///
/// `data` always holds the last successful payload. A failed fetch records
/// the error and leaves it in place.
#[derive(Debug, Clone)]
pub struct FamilyState<T> {
    pub data: Arc<[T]>,
    pub status: FetchStatus,
    pub error: Option<String>,
}

impl<T> Default for FamilyState<T> {
    fn default() -> Self {
        Self {
            data: Arc::from(Vec::new()),
            status: FetchStatus::Idle,
            error: None,
        }
    }
}

impl<T> FamilyState<T> {
    fn loading(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            status: FetchStatus::Loading,
            error: self.error.clone(),
        }
    }

    fn settle(&self, result: Result<Vec<T>, String>) -> Self {
        match result {
            Ok(data) => Self {
                data: Arc::from(data),
                status: FetchStatus::Succeeded,
                error: None,
            },
            Err(error) => Self {
                data: Arc::clone(&self.data),
                status: FetchStatus::Failed,
                error: Some(error),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemoteSnapshot {
    pub report: FamilyState<ReportRow>,
    pub apps: FamilyState<AppDirectoryEntry>,
    /// Range of the most recent `load`
    pub range: Option<DateRange>,
    /// Most recently issued call
    pub latest_call: Option<CallId>,
}

impl RemoteSnapshot {
    pub fn rows(&self) -> &[ReportRow] {
        &self.report.data
    }

    pub fn apps(&self) -> &[AppDirectoryEntry] {
        &self.apps.data
    }

    /// Neither family has a fetch in flight
    pub fn is_settled(&self) -> bool {
        self.report.status != FetchStatus::Loading && self.apps.status != FetchStatus::Loading
    }

    /// First recorded error, report before apps
    pub fn error(&self) -> Option<&str> {
        self.report
            .error
            .as_deref()
            .or(self.apps.error.as_deref())
    }

    fn begin(&self, call_id: CallId, range: DateRange) -> Self {
        Self {
            report: self.report.loading(),
            apps: self.apps.loading(),
            range: Some(range),
            latest_call: Some(call_id),
        }
    }

    fn is_stale(&self, call_id: CallId) -> bool {
        self.latest_call.is_some_and(|latest| call_id < latest)
    }

    fn reduce(&self, outcome: FetchOutcome) -> Self {
        let mut next = self.clone();
        match outcome {
            FetchOutcome::Report { result, .. } => next.report = self.report.settle(result),
            FetchOutcome::Apps { result, .. } => next.apps = self.apps.settle(result),
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    Discarded,
}

/// Holds the current `RemoteSnapshot` and issues fetches against `A`.
pub struct RemoteDataStore<A: ReportApi> {
    api: Arc<A>,
    runtime: Handle,
    outcomes: Sender<FetchOutcome>,
    snapshot: Arc<RemoteSnapshot>,
    next_call: CallId,
    policy: StalePolicy,
}

impl<A: ReportApi> RemoteDataStore<A> {
    /// Create an idle store. Outcomes of every `load` arrive on the returned
    /// receiver and must be handed back to `apply`.
    pub fn new(api: A, runtime: Handle, policy: StalePolicy) -> (Self, Receiver<FetchOutcome>) {
        let (outcomes, receiver) = mpsc::channel();
        let store = Self {
            api: Arc::new(api),
            runtime,
            outcomes,
            snapshot: Arc::new(RemoteSnapshot::default()),
            next_call: 1,
            policy,
        };
        (store, receiver)
    }

    pub fn snapshot(&self) -> Arc<RemoteSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Mark both families loading and fetch them for `range`. Never blocks.
    pub fn load(&mut self, range: DateRange) -> CallId {
        let call_id = self.next_call;
        self.next_call += 1;
        self.snapshot = Arc::new(self.snapshot.begin(call_id, range));

        tracing::info!(call_id, range = %range, "loading report data");

        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();
        self.runtime.spawn(async move {
            let result = api.fetch_report(range).await.map_err(|err| {
                tracing::warn!(call_id, error = %err, "report fetch failed");
                err.to_string()
            });
            deliver(&outcomes, FetchOutcome::Report { call_id, result });
        });

        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();
        self.runtime.spawn(async move {
            let result = api.fetch_apps().await.map_err(|err| {
                tracing::warn!(call_id, error = %err, "app directory fetch failed");
                err.to_string()
            });
            deliver(&outcomes, FetchOutcome::Apps { call_id, result });
        });

        call_id
    }

    /// Fold one finished fetch into the snapshot
    pub fn apply(&mut self, outcome: FetchOutcome) -> ApplyResult {
        let call_id = outcome.call_id();
        if self.policy == StalePolicy::Discard && self.snapshot.is_stale(call_id) {
            tracing::debug!(
                call_id,
                family = ?outcome.family(),
                latest = ?self.snapshot.latest_call,
                "discarding stale fetch result"
            );
            return ApplyResult::Discarded;
        }

        self.snapshot = Arc::new(self.snapshot.reduce(outcome));
        ApplyResult::Applied
    }

    /// Apply every outcome already waiting on `receiver` without blocking.
    /// Returns how many were applied.
    pub fn drain(&mut self, receiver: &Receiver<FetchOutcome>) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = receiver.try_recv() {
            if self.apply(outcome) == ApplyResult::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Block until neither family is loading
    pub fn wait_settled(&mut self, receiver: &Receiver<FetchOutcome>) -> Arc<RemoteSnapshot> {
        while !self.snapshot.is_settled() {
            match receiver.recv() {
                Ok(outcome) => {
                    self.apply(outcome);
                }
                Err(_) => break,
            }
        }
        self.snapshot()
    }
}

fn deliver(outcomes: &Sender<FetchOutcome>, outcome: FetchOutcome) {
    if outcomes.send(outcome).is_err() {
        tracing::debug!("store dropped before fetch result was delivered");
    }
}
