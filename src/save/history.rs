//! Match history
//!
//! Append-only list of finished matches, read back newest first in pages.

use serde::{Deserialize, Serialize};

use crate::combat::MatchResult;

/// Rows per history page
pub const HISTORY_PAGE_SIZE: usize = 10;

/// One stored match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Position in the user's history, starting at 1
    pub seq: u64,
    /// Opponent display name ("Exam Ghost", another player's name, ...)
    pub opponent: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    /// 0-based page index
    pub page: usize,
    pub records: Vec<MatchRecord>,
    pub has_more: bool,
}

/// Slice page `page` out of an oldest-first history
pub fn paginate(history: &[MatchRecord], page: usize) -> HistoryPage {
    let skip = page.saturating_mul(HISTORY_PAGE_SIZE);
    let records: Vec<MatchRecord> = history
        .iter()
        .rev()
        .skip(skip)
        .take(HISTORY_PAGE_SIZE)
        .cloned()
        .collect();
    let has_more = history.len() > skip.saturating_add(records.len());

    HistoryPage { page, records, has_more }
}
