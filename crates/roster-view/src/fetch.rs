//! Fetch/render state machine shared by every view
//!
//! A view owns one [`Loader`]. Mounting starts exactly one read on the tokio
//! runtime and moves the view to [`Phase::Loading`]. When the read completes
//! its result is committed only if:
//!
//! - the view is still mounted, and
//! - no later mount or identifier change superseded it (generation check).
//!
//! Otherwise the response is dropped without touching state. Unmounting does
//! not abort the in-flight read; the guard makes its completion a no-op.

use parking_lot::Mutex;
use roster_client::FetchError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use ulid::Ulid;

/// Counter incremented once per completed read
pub const FETCH_COUNTER: &str = "roster_fetch_total";

/// Unique view instance identifier (ULID-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub Ulid);

impl ViewId {
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Loading,
    Error,
    Loaded,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Loaded => "loaded",
        }
    }
}

/// What a view currently shows
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// Request in flight (also the state before the first mount)
    Pending,
    /// Request failed; `message` is presentable to the user
    Failed { message: String },
    /// Request succeeded; the value is never mutated after commit
    Succeeded(Arc<T>),
}

impl<T> Clone for FetchOutcome<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Pending => Self::Pending,
            Self::Failed { message } => Self::Failed {
                message: message.clone(),
            },
            Self::Succeeded(value) => Self::Succeeded(Arc::clone(value)),
        }
    }
}

impl<T> FetchOutcome<T> {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Pending => Phase::Loading,
            Self::Failed { .. } => Phase::Error,
            Self::Succeeded(_) => Phase::Loaded,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value.as_ref()),
            _ => None,
        }
    }
}

/// How an individual read ended, from the view's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Result committed; the view is now in this phase
    Committed(Phase),
    /// Result dropped (view unmounted or read superseded)
    Discarded,
    /// Task aborted or panicked before settling
    Aborted,
}

/// Handle to the read started by a mount
#[derive(Debug)]
pub struct FetchHandle {
    generation: u64,
    task: JoinHandle<Settlement>,
}

impl FetchHandle {
    /// Generation this read was started for
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the read to complete and report whether it was committed
    pub async fn settled(self) -> Settlement {
        self.task.await.unwrap_or(Settlement::Aborted)
    }

    /// Cancel the read; the view stays in whatever phase it was in
    pub fn abort(&self) {
        self.task.abort();
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    mounted: bool,
    outcome: FetchOutcome<T>,
}

/// Guarded state for one view instance
#[derive(Debug)]
pub struct Loader<T> {
    view_id: ViewId,
    kind: &'static str,
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T: Send + Sync + 'static> Loader<T> {
    /// `kind` labels logs and metrics (`company`, `employee`, `search`)
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            view_id: ViewId::new(),
            kind,
            slot: Arc::new(Mutex::new(Slot {
                generation: 0,
                mounted: false,
                outcome: FetchOutcome::Pending,
            })),
        }
    }

    #[must_use]
    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    /// Enter Loading and run `fetch`, superseding any read still in flight
    ///
    /// A failure commits `error_message` rather than the error itself. Must be
    /// called from within a tokio runtime.
    pub fn start<F>(&self, fetch: F, error_message: String) -> FetchHandle
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let generation = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.mounted = true;
            slot.outcome = FetchOutcome::Pending;
            slot.generation
        };
        tracing::debug!(view = %self.view_id, kind = self.kind, generation, "fetch started");

        let slot = Arc::clone(&self.slot);
        let view_id = self.view_id;
        let kind = self.kind;
        let task = tokio::spawn(async move {
            let result = fetch.await;
            commit(&slot, view_id, kind, generation, result, error_message)
        });
        FetchHandle { generation, task }
    }

    /// Stop accepting results; the current outcome is frozen
    pub fn unmount(&self) {
        let mut slot = self.slot.lock();
        if slot.mounted {
            slot.mounted = false;
            tracing::debug!(view = %self.view_id, kind = self.kind, "view unmounted");
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.slot.lock().mounted
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    #[must_use]
    pub fn outcome(&self) -> FetchOutcome<T> {
        self.slot.lock().outcome.clone()
    }
}

fn commit<T>(
    slot: &Mutex<Slot<T>>,
    view_id: ViewId,
    kind: &'static str,
    generation: u64,
    result: Result<T, FetchError>,
    error_message: String,
) -> Settlement {
    let mut slot = slot.lock();
    if !slot.mounted || slot.generation != generation {
        tracing::debug!(
            view = %view_id,
            kind,
            generation,
            current = slot.generation,
            mounted = slot.mounted,
            "stale response discarded"
        );
        metrics::counter!(FETCH_COUNTER, "kind" => kind, "outcome" => "discarded").increment(1);
        return Settlement::Discarded;
    }

    let phase = match result {
        Ok(value) => {
            slot.outcome = FetchOutcome::Succeeded(Arc::new(value));
            tracing::info!(view = %view_id, kind, generation, "{} loaded", kind);
            Phase::Loaded
        }
        Err(err) => {
            tracing::warn!(
                view = %view_id,
                kind,
                cause = err.cause(),
                "Failed to load {}: {}",
                kind,
                err
            );
            slot.outcome = FetchOutcome::Failed {
                message: error_message,
            };
            Phase::Error
        }
    };
    metrics::counter!(FETCH_COUNTER, "kind" => kind, "outcome" => phase.as_str()).increment(1);
    Settlement::Committed(phase)
}
