//! Terminal states of a single crawl task
//!
//! A task moves `Scheduled -> (DepthExhausted | AlreadyVisited | Fetching)`
//! and a fetching task ends in either `FetchFailed` or `ChildrenScheduled`.

use std::fmt;

/// How a crawl task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    // ===== Skipped Without Side Effects =====
    /// The task had no depth left
    DepthExhausted,

    /// Another task had already claimed the address
    AlreadyVisited,

    // ===== Fetched =====
    /// The fetch failed; no children were scheduled
    FetchFailed,

    /// The fetch succeeded and this many children were scheduled
    ChildrenScheduled(usize),
}

impl TaskOutcome {
    /// Returns true if the task invoked the fetcher
    pub fn fetched(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::ChildrenScheduled(_))
    }

    /// Number of children this task scheduled
    pub fn children(&self) -> usize {
        match self {
            Self::ChildrenScheduled(n) => *n,
            _ => 0,
        }
    }

    /// Short label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::DepthExhausted => "depth_exhausted",
            Self::AlreadyVisited => "already_visited",
            Self::FetchFailed => "fetch_failed",
            Self::ChildrenScheduled(_) => "children_scheduled",
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildrenScheduled(n) => write!(f, "{}({})", self.label(), n),
            _ => write!(f, "{}", self.label()),
        }
    }
}
