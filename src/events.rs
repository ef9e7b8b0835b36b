// Events that flow from fetch tasks back to the UI loop
//
// Fetches run on their own tokio tasks. When one finishes it reports back
// over an mpsc channel; the loop that owns the FeedController decides
// whether the result is still wanted.

use crate::feed::PageRequest;
use crate::model::Page;
use crate::query::QueryError;
use std::time::Duration;

/// Outcome of a page fetch
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A page arrived
    PageLoaded {
        request: PageRequest,
        page: Page,
        duration: Duration,
    },

    /// The fetch failed or timed out
    PageFailed {
        request: PageRequest,
        error: QueryError,
        duration: Duration,
    },
}

impl FeedEvent {
    pub fn request(&self) -> &PageRequest {
        match self {
            FeedEvent::PageLoaded { request, .. } | FeedEvent::PageFailed { request, .. } => {
                request
            }
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            FeedEvent::PageLoaded { duration, .. } | FeedEvent::PageFailed { duration, .. } => {
                *duration
            }
        }
    }
}

/// Summary statistics for the status bar
#[derive(Debug, Clone, Default)]
pub struct FetchStats {
    pub total_requests: usize,
    pub successful: usize,
    pub failed: usize,
    /// Responses dropped because the filter changed meanwhile
    pub stale_dropped: usize,
    pub duplicates_dropped: usize,
    pub total_duration: Duration,
}

impl FetchStats {
    /// Record a completed fetch (stale or not)
    pub fn record(&mut self, event: &FeedEvent) {
        self.total_duration += event.duration();
        match event {
            FeedEvent::PageLoaded { .. } => self.successful += 1,
            FeedEvent::PageFailed { .. } => self.failed += 1,
        }
    }

    pub fn avg_duration(&self) -> Duration {
        let completed = self.successful + self.failed;
        if completed == 0 {
            Duration::default()
        } else {
            self.total_duration / completed as u32
        }
    }
}
