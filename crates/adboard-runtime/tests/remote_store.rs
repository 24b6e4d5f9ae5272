use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;

use adboard_runtime::{
    ApplyResult, Error, FetchOutcome, FetchStatus, RemoteDataStore, ReportApi, Result,
    StalePolicy,
};
use adboard_types::{AppDirectoryEntry, AppId, DateRange, ReportRow};
use chrono::Datelike;
use tokio::runtime::Runtime;

/// Answers with as many rows as the day-of-month of `range.start()`, so
/// each range yields a distinguishable row count.
#[derive(Default)]
struct FakeApi {
    fail: AtomicBool,
}

impl FakeApi {
    fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
        }
    }
}

impl ReportApi for FakeApi {
    async fn fetch_report(&self, range: DateRange) -> Result<Vec<ReportRow>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Status {
                url: "http://fake/report".to_string(),
                status: 503,
            });
        }
        Ok((0..range.start().day())
            .map(|i| ReportRow {
                app_id: Some(AppId::from(u64::from(i))),
                ..Default::default()
            })
            .collect())
    }

    async fn fetch_apps(&self) -> Result<Vec<AppDirectoryEntry>> {
        Ok(vec![AppDirectoryEntry::new(1u64, "Alpha")])
    }
}

fn range(start_day: u32) -> DateRange {
    DateRange::parse(&format!("2021-06-{:02}", start_day), "2021-06-20").unwrap()
}

/// Receive `n` outcomes in whatever order the tasks finished
fn collect(receiver: &Receiver<FetchOutcome>, n: usize) -> Vec<FetchOutcome> {
    (0..n).map(|_| receiver.recv().unwrap()).collect()
}

#[test]
fn test_store_starts_idle() {
    let runtime = Runtime::new().unwrap();
    let (store, _rx) = RemoteDataStore::new(
        FakeApi::default(),
        runtime.handle().clone(),
        StalePolicy::Discard,
    );

    let snap = store.snapshot();
    assert_eq!(snap.report.status, FetchStatus::Idle);
    assert_eq!(snap.apps.status, FetchStatus::Idle);
    assert!(snap.rows().is_empty());
    assert!(snap.is_settled());
}

#[test]
fn test_load_fetches_both_families() {
    let runtime = Runtime::new().unwrap();
    let (mut store, rx) = RemoteDataStore::new(
        FakeApi::default(),
        runtime.handle().clone(),
        StalePolicy::Discard,
    );

    let call = store.load(range(3));
    assert_eq!(store.snapshot().report.status, FetchStatus::Loading);
    assert_eq!(store.snapshot().apps.status, FetchStatus::Loading);

    let snap = store.wait_settled(&rx);

    assert_eq!(snap.latest_call, Some(call));
    assert_eq!(snap.range, Some(range(3)));
    assert_eq!(snap.report.status, FetchStatus::Succeeded);
    assert_eq!(snap.apps.status, FetchStatus::Succeeded);
    assert_eq!(snap.rows().len(), 3);
    assert_eq!(snap.apps()[0].app_name, "Alpha");
}

#[test]
fn test_superseded_results_are_discarded() {
    let runtime = Runtime::new().unwrap();
    let (mut store, rx) = RemoteDataStore::new(
        FakeApi::default(),
        runtime.handle().clone(),
        StalePolicy::Discard,
    );

    let first = store.load(range(2));
    let second = store.load(range(5));
    let (old, new): (Vec<_>, Vec<_>) = collect(&rx, 4)
        .into_iter()
        .partition(|outcome| outcome.call_id() == first);

    // newer call resolves first, then the older one arrives late
    for outcome in new {
        assert_eq!(outcome.call_id(), second);
        assert_eq!(store.apply(outcome), ApplyResult::Applied);
    }
    for outcome in old {
        assert_eq!(store.apply(outcome), ApplyResult::Discarded);
    }

    let snap = store.snapshot();
    assert_eq!(snap.rows().len(), 5);
    assert!(snap.is_settled());
}

#[test]
fn test_apply_policy_lets_last_completion_win() {
    let runtime = Runtime::new().unwrap();
    let (mut store, rx) = RemoteDataStore::new(
        FakeApi::default(),
        runtime.handle().clone(),
        StalePolicy::Apply,
    );

    let first = store.load(range(2));
    store.load(range(5));
    let (old, new): (Vec<_>, Vec<_>) = collect(&rx, 4)
        .into_iter()
        .partition(|outcome| outcome.call_id() == first);

    for outcome in new.into_iter().chain(old) {
        assert_eq!(store.apply(outcome), ApplyResult::Applied);
    }

    assert_eq!(store.snapshot().rows().len(), 2);
}

#[test]
fn test_failed_report_keeps_previous_rows() {
    let runtime = Runtime::new().unwrap();
    let (mut store, rx) = RemoteDataStore::new(
        FakeApi::default(),
        runtime.handle().clone(),
        StalePolicy::Discard,
    );
    store.load(range(4));
    store.wait_settled(&rx);

    // a fresh store against a failing backend
    let (mut failing, failing_rx) = RemoteDataStore::new(
        FakeApi::failing(),
        runtime.handle().clone(),
        StalePolicy::Discard,
    );
    failing.load(range(4));
    let snap = failing.wait_settled(&failing_rx);
    assert_eq!(snap.report.status, FetchStatus::Failed);
    assert!(snap.rows().is_empty());
    assert_eq!(snap.apps.status, FetchStatus::Succeeded);
    assert!(snap.error().unwrap().contains("HTTP 503"));

    // a failed outcome applied to a store that already has data
    let latest = store.snapshot().latest_call.unwrap();
    let applied = store.apply(FetchOutcome::Report {
        call_id: latest,
        result: Err("http://fake/report returned HTTP 503".to_string()),
    });
    assert_eq!(applied, ApplyResult::Applied);

    let snap = store.snapshot();
    assert_eq!(snap.report.status, FetchStatus::Failed);
    assert_eq!(snap.rows().len(), 4);
}

#[test]
fn test_drain_applies_pending_without_blocking() {
    let runtime = Runtime::new().unwrap();
    let (mut store, rx) = RemoteDataStore::new(
        FakeApi::default(),
        runtime.handle().clone(),
        StalePolicy::Discard,
    );

    assert_eq!(store.drain(&rx), 0);

    store.load(range(1));
    let mut applied = 0;
    while !store.snapshot().is_settled() {
        applied += store.drain(&rx);
        std::thread::yield_now();
    }

    assert_eq!(applied, 2);
}
