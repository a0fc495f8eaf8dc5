//! In-flight request tracking.
//!
//! Every remote call takes a [`RequestKey`] from the [`RequestTracker`]
//! before it is issued. A second call with the same key is refused while the
//! first is still running, which closes the double-submission gap. Each
//! in-flight request can be cancelled through its [`CancelHandle`];
//! cancellation only stops waiting, the ledger may still execute the
//! transaction.

use collabsplit_builder::SplitRequest;
use collabsplit_types::{Address, ObjectId};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use crate::error::AppError;

/// Identity of a remote call for duplicate detection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestKey {
    CreateSplit {
        signer: Address,
        request: SplitRequest,
    },
    Deposit {
        split_id: ObjectId,
    },
    Distribute {
        split_id: ObjectId,
    },
    Fetch {
        split_id: ObjectId,
    },
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateSplit { signer, request } => write!(
                f,
                "create_split of {} members by {signer}",
                request.len()
            ),
            Self::Deposit { split_id } => write!(f, "deposit into {split_id}"),
            Self::Distribute { split_id } => write!(f, "distribute of {split_id}"),
            Self::Fetch { split_id } => write!(f, "fetch of {split_id}"),
        }
    }
}

/// Monotonic id of one tracked request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Entry {
    id: RequestId,
    cancel: Arc<watch::Sender<bool>>,
}

#[derive(Default)]
struct TrackerState {
    next_id: u64,
    in_flight: HashMap<RequestKey, Entry>,
}

/// Hands out one token per [`RequestKey`] at a time.
#[derive(Clone, Default)]
pub struct RequestTracker {
    state: Arc<Mutex<TrackerState>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request, or refuse it if the same key is already in flight.
    pub fn begin(&self, key: RequestKey) -> Result<InFlightRequest, AppError> {
        let mut state = self.lock();
        if state.in_flight.contains_key(&key) {
            return Err(AppError::AlreadyInFlight { key });
        }

        state.next_id += 1;
        let id = RequestId(state.next_id);
        let (tx, rx) = watch::channel(false);
        let cancel = Arc::new(tx);
        state.in_flight.insert(
            key.clone(),
            Entry {
                id,
                cancel: cancel.clone(),
            },
        );
        tracing::debug!(%id, %key, "request started");

        Ok(InFlightRequest {
            id,
            key,
            cancel,
            cancelled: rx,
            tracker: self.clone(),
        })
    }

    pub fn is_in_flight(&self, key: &RequestKey) -> bool {
        self.lock().in_flight.contains_key(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// Cancel the in-flight request for `key`. Returns false if there is none.
    pub fn cancel(&self, key: &RequestKey) -> bool {
        match self.lock().in_flight.get(key) {
            Some(entry) => {
                entry.cancel.send_replace(true);
                true
            }
            None => false,
        }
    }

    /// Cancel every in-flight request.
    pub fn cancel_all(&self) {
        for entry in self.lock().in_flight.values() {
            entry.cancel.send_replace(true);
        }
    }

    fn finish(&self, key: &RequestKey, id: RequestId) {
        let mut state = self.lock();
        if state.in_flight.get(key).is_some_and(|e| e.id == id) {
            state.in_flight.remove(key);
            tracing::debug!(%id, %key, "request finished");
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cancels one in-flight request.
#[derive(Clone)]
pub struct CancelHandle {
    id: RequestId,
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

/// Token for a registered request. Dropping it releases the key.
pub struct InFlightRequest {
    id: RequestId,
    key: RequestKey,
    cancel: Arc<watch::Sender<bool>>,
    cancelled: watch::Receiver<bool>,
    tracker: RequestTracker,
}

impl InFlightRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn key(&self) -> &RequestKey {
        &self.key
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            id: self.id,
            sender: self.cancel.clone(),
        }
    }

    /// Drive `fut` to completion unless the request is cancelled first.
    ///
    /// The token is consumed, so the key is released as soon as this returns.
    pub async fn run<F, T, E>(mut self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, E>>,
        AppError: From<E>,
    {
        let outcome = tokio::select! {
            biased;
            _ = wait_cancelled(&mut self.cancelled) => None,
            result = fut => Some(result),
        };

        match outcome {
            Some(result) => result.map_err(AppError::from),
            None => {
                tracing::info!(id = %self.id, key = %self.key, "request cancelled");
                Err(AppError::Cancelled {
                    key: self.key.clone(),
                })
            }
        }
    }
}

impl Drop for InFlightRequest {
    fn drop(&mut self) {
        self.tracker.finish(&self.key, self.id);
    }
}

async fn wait_cancelled(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
