use std::time::Duration;

/// Gap between two revealed roast lines.
pub const REVEAL_INTERVAL_MS: u64 = 800;

pub fn reveal_interval() -> Duration {
    Duration::from_millis(REVEAL_INTERVAL_MS)
}

/// Identity of one submission cycle. The result it produces carries the same id,
/// so anything tagged with an older id is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId {
    pub seq: u64,
}

impl RequestId {
    pub fn first() -> Self {
        RequestId { seq: 1 }
    }

    pub fn next(&self) -> Self {
        RequestId { seq: self.seq + 1 }
    }
}
