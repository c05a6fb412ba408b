use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::{ErrorKind, NthMinError};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuerySeverity {
    /// The request itself was unanswerable (empty column, bad rank).
    Warning,
    /// The source could not be opened or decoded.
    Error,
    /// Failure of the serving process.
    Critical,
}

impl QuerySeverity {
    /// Severity assigned to a failed query.
    pub fn for_error(e: &NthMinError) -> Self {
        match e.kind() {
            ErrorKind::EmptyInput | ErrorKind::InvalidRank | ErrorKind::RankOutOfRange => {
                QuerySeverity::Warning
            }
            ErrorKind::NotFound | ErrorKind::ReadError => QuerySeverity::Error,
            ErrorKind::Unexpected => QuerySeverity::Critical,
        }
    }
}

/// Context about a query attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryContext {
    /// The spreadsheet path.
    pub path: PathBuf,
    /// Requested 1-based rank.
    pub rank: i64,
}

/// Stats reported on a successful query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    /// Number of numeric values extracted from the first column.
    pub values: usize,
    /// The selected value.
    pub result: i64,
}

/// Observer interface for query outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait QueryObserver: Send + Sync {
    /// Called when a query succeeds.
    fn on_success(&self, _ctx: &QueryContext, _stats: QueryStats) {}

    /// Called when a query fails.
    fn on_failure(&self, _ctx: &QueryContext, _severity: QuerySeverity, _error: &NthMinError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &NthMinError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn QueryObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn QueryObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl QueryObserver for CompositeObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &NthMinError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &NthMinError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs query events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl QueryObserver for StdErrObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        eprintln!(
            "[nth-min][ok] path={} rank={} values={} result={}",
            ctx.path.display(),
            ctx.rank,
            stats.values,
            stats.result
        );
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &NthMinError) {
        eprintln!(
            "[nth-min][{:?}] path={} rank={} kind={:?} err={}",
            severity,
            ctx.path.display(),
            ctx.rank,
            error.kind(),
            error
        );
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &NthMinError) {
        eprintln!(
            "[ALERT][nth-min][{:?}] path={} rank={} kind={:?} err={}",
            severity,
            ctx.path.display(),
            ctx.rank,
            error.kind(),
            error
        );
    }
}

/// Appends query events to a local log file, one JSON object per line.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize)]
struct LogLine<'a> {
    ts: u64,
    event: &'static str,
    #[serde(flatten)]
    ctx: &'a QueryContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<QuerySeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> LogLine<'a> {
    fn new(event: &'static str, ctx: &'a QueryContext) -> Self {
        Self {
            ts: unix_ts(),
            event,
            ctx,
            severity: None,
            values: None,
            result: None,
            kind: None,
            error: None,
        }
    }

    fn with_error(mut self, severity: QuerySeverity, error: &NthMinError) -> Self {
        self.severity = Some(severity);
        self.kind = Some(error.kind());
        self.error = Some(error.to_string());
        self
    }
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, line: &LogLine<'_>) {
        let Ok(json) = serde_json::to_string(line) else {
            return;
        };
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{json}");
        }
    }
}

impl QueryObserver for FileObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        let mut line = LogLine::new("ok", ctx);
        line.values = Some(stats.values);
        line.result = Some(stats.result);
        self.append(&line);
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &NthMinError) {
        self.append(&LogLine::new("fail", ctx).with_error(severity, error));
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &NthMinError) {
        self.append(&LogLine::new("alert", ctx).with_error(severity, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
