//! Per-call bookkeeping: identifiers and time budgets.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Global atomic counter for call IDs. The only process-wide mutable state
/// in the gateway. Relaxed ordering is sufficient since we only need
/// uniqueness, not synchronization.
static CALL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique, monotonically assigned identifier for one runtime call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallId(u64);

impl CallId {
    /// Take the next ID from the process-wide counter.
    pub fn next() -> Self {
        Self(CALL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "call-{}", self.0)
    }
}

/// Per-call record: ID, start timestamp, and remaining-time budget.
///
/// Exclusively owned by the call that created it and discarded once the call
/// completes. The deadline bounds only the caller's wait; it travels to the
/// runtime as advisory metadata.
#[derive(Debug)]
pub struct CallContext {
    id: CallId,
    started_at: Instant,
    deadline: Duration,
}

impl CallContext {
    pub fn new(deadline: Duration) -> Self {
        Self {
            id: CallId::next(),
            started_at: Instant::now(),
            deadline,
        }
    }

    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Time budget left, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_sub(self.started_at.elapsed())
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// The advisory deadline carried in the call envelope. `None` when the
    /// caller imposed no bound.
    pub fn deadline_ms(&self) -> Option<u64> {
        if self.deadline == Duration::MAX {
            None
        } else {
            Some(self.deadline.as_millis().min(u64::MAX as u128) as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_ids_are_unique_and_increasing() {
        let a = CallId::next();
        let b = CallId::next();
        assert!(b > a);
        assert_ne!(a.as_u64(), b.as_u64());
    }

    #[test]
    fn unbounded_deadline_has_no_advisory_ms() {
        let ctx = CallContext::new(Duration::MAX);
        assert_eq!(ctx.deadline_ms(), None);
        assert!(ctx.remaining() > Duration::from_secs(3600));
    }

    #[test]
    fn bounded_deadline_reports_millis() {
        let ctx = CallContext::new(Duration::from_millis(1500));
        assert_eq!(ctx.deadline(), Duration::from_millis(1500));
        assert_eq!(ctx.deadline_ms(), Some(1500));
        assert!(ctx.remaining() <= Duration::from_millis(1500));
    }

    #[test]
    fn display_format() {
        let id = CallId::next();
        assert_eq!(format!("{id}"), format!("call-{}", id.as_u64()));
    }
}
