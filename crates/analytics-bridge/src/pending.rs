//! Request-keyed table of pending completions.

use crate::error::{Error, Result};
use crate::types::UserProfiles;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Single-use handler receiving the outcome of an attribute fetch.
pub type Completion = Box<dyn FnOnce(Result<UserProfiles>) + Send + 'static>;

/// Identifier of a pending request. Opaque; only meaningful to the table
/// that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pending completions keyed by request id.
///
/// Every registered handler fires at most once, and overlapping requests
/// never displace each other.
pub struct CompletionTable {
    next_id: AtomicU64,
    slots: Mutex<HashMap<RequestId, Completion>>,
}

impl CompletionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> RequestId {
        RequestId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Store a handler under a fresh id, to be resolved later with
    /// [`complete`](Self::complete) or [`cancel`](Self::cancel).
    pub async fn register(&self, completion: Completion) -> RequestId {
        let id = self.next_id();
        self.slots.lock().await.insert(id, completion);
        id
    }

    /// Register a handler and resolve it with an already-known result.
    ///
    /// Acquiring the lock is the only suspension point and happens before
    /// anything is stored, so dropping this future never strands a handler.
    /// If it is dropped, the handler is dropped unfired along with it.
    pub async fn deliver(
        &self,
        completion: Completion,
        result: Result<UserProfiles>,
    ) -> RequestId {
        let id = self.next_id();
        let completion = {
            let mut slots = self.slots.lock().await;
            slots.insert(id, completion);
            slots.remove(&id)
        };
        if let Some(completion) = completion {
            completion(result);
        }
        id
    }

    /// Deliver a result to the handler registered under `id`.
    ///
    /// Returns `false` if nothing is pending under that id.
    pub async fn complete(&self, id: RequestId, result: Result<UserProfiles>) -> bool {
        // Release the lock before running the handler so it may re-enter.
        let completion = self.slots.lock().await.remove(&id);
        match completion {
            Some(completion) => {
                completion(result);
                true
            }
            None => false,
        }
    }

    /// Resolve the handler registered under `id` with [`Error::Cancelled`].
    ///
    /// Returns `false` if nothing is pending under that id.
    ///
    /// [`Error::Cancelled`]: crate::Error::Cancelled
    pub async fn cancel(&self, id: RequestId) -> bool {
        self.complete(id, Err(Error::Cancelled)).await
    }

    /// Number of outstanding handlers.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    /// Whether no handler is outstanding.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for CompletionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompletionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionTable")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
