use super::form::SubmissionRecord;
use super::time::RequestId;

/// What a provider hands back: the roast text plus the record it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoastResult {
    /// Newline-delimited roast lines.
    pub roast: String,
    pub user_data: SubmissionRecord,
}

impl RoastResult {
    pub fn new(roast: impl Into<String>, user_data: SubmissionRecord) -> Self {
        Self {
            roast: roast.into(),
            user_data,
        }
    }

    /// Lines to reveal, blank lines dropped.
    pub fn lines(&self) -> Vec<&str> {
        self.roast
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

/// The single result the session currently shows, tagged with the request that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRoast {
    pub id: RequestId,
    pub result: RoastResult,
}
