//! Query entrypoint.
//!
//! Most callers should use [`nth_min_from_path`], which:
//!
//! - extracts the first column of the first sheet ([`crate::extraction::extract_first_column`])
//! - selects the requested rank ([`crate::selection::select_nth_smallest`])
//! - optionally reports success/failure/alerts to a [`QueryObserver`]
//!
//! [`NthMinRequest`] and [`QueryReport`] are the owned, serde-friendly shapes a transport layer can
//! decode a request into and render a response from.

pub mod observability;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorClass, ErrorKind, NthMinError, NthMinResult};
use crate::extraction::extract_first_column;
use crate::selection::select_nth_smallest;

pub use observability::{
    CompositeObserver, FileObserver, QueryContext, QueryObserver, QuerySeverity, QueryStats,
    StdErrObserver,
};

/// Options controlling query reporting.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct QueryOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn QueryObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: QuerySeverity,
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: QuerySeverity::Critical,
        }
    }
}

/// Find the `rank`-th smallest integer (1-based) in the first column of the first sheet at `path`.
///
/// A panic while extracting or selecting is returned as [`NthMinError::Unexpected`] instead of
/// unwinding into the caller.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with the number of extracted values and the result
/// - `on_failure` on failure, with a severity from [`QuerySeverity::for_error`]
/// - `on_alert` on failure when that severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use nth_min::query::{nth_min_from_path, QueryOptions, QuerySeverity, StdErrObserver};
///
/// # fn main() -> Result<(), nth_min::NthMinError> {
/// let opts = QueryOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     alert_at_or_above: QuerySeverity::Error,
/// };
///
/// let third = nth_min_from_path("numbers.xlsx", 3, &opts)?;
/// println!("third smallest = {third}");
/// # Ok(())
/// # }
/// ```
pub fn nth_min_from_path(
    path: impl AsRef<Path>,
    rank: i64,
    options: &QueryOptions,
) -> NthMinResult<i64> {
    let path = path.as_ref();

    let mut extracted = 0usize;
    let result = catch_unexpected(path, rank, || {
        extract_first_column(path).and_then(|values| {
            extracted = values.len();
            select_nth_smallest(values, rank)
        })
    });

    if let Some(obs) = options.observer.as_ref() {
        let ctx = QueryContext {
            path: path.to_path_buf(),
            rank,
        };
        match &result {
            Ok(value) => obs.on_success(
                &ctx,
                QueryStats {
                    values: extracted,
                    result: *value,
                },
            ),
            Err(e) => {
                let sev = QuerySeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn catch_unexpected<F>(path: &Path, rank: i64, f: F) -> NthMinResult<i64>
where
    F: FnOnce() -> NthMinResult<i64>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(NthMinError::Unexpected {
            message: format!(
                "panic while serving {} (rank {rank}): {}",
                path.display(),
                panic_message(payload.as_ref())
            ),
        })
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Owned query request, e.g. decoded from a transport's query string or JSON body.
///
/// ```rust
/// use nth_min::query::NthMinRequest;
///
/// let req: NthMinRequest = serde_json::from_str(r#"{"path":"/data/file.xlsx","rank":3}"#).unwrap();
/// assert_eq!(req.rank, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NthMinRequest {
    /// Path to the spreadsheet.
    pub path: PathBuf,
    /// 1-based rank.
    pub rank: i64,
}

impl NthMinRequest {
    /// Create a request.
    pub fn new(path: impl Into<PathBuf>, rank: i64) -> Self {
        Self {
            path: path.into(),
            rank,
        }
    }

    /// Execute the request by calling [`nth_min_from_path`].
    pub fn run(&self, options: &QueryOptions) -> NthMinResult<i64> {
        nth_min_from_path(&self.path, self.rank, options)
    }
}

/// Failure half of a [`QueryReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub class: ErrorClass,
    /// Human-readable message (the error's `Display`).
    pub message: String,
}

impl From<&NthMinError> for ErrorReport {
    fn from(e: &NthMinError) -> Self {
        Self {
            kind: e.kind(),
            class: e.class(),
            message: e.to_string(),
        }
    }
}

/// Serializable outcome of one query; exactly one of `value` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub path: PathBuf,
    pub rank: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl QueryReport {
    /// Build a report for `request` from the result of running it.
    pub fn from_outcome(request: &NthMinRequest, outcome: &NthMinResult<i64>) -> Self {
        let (value, error) = match outcome {
            Ok(v) => (Some(*v), None),
            Err(e) => (None, Some(ErrorReport::from(e))),
        };
        Self {
            path: request.path.clone(),
            rank: request.rank,
            value,
            error,
        }
    }

    /// Whether the query produced a value.
    pub fn is_ok(&self) -> bool {
        self.value.is_some()
    }
}
