// Fetch executor - runs PageRequests against the query service
//
// Each request runs on its own task and reports a FeedEvent. The timeout is
// applied here so every service implementation gets the same behavior.

use super::controller::PageRequest;
use crate::events::FeedEvent;
use crate::model::Page;
use crate::query::{PageQuery, QueryError, SharedQueryService};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Run one request to completion, bounded by `timeout`
pub async fn fetch(
    service: &SharedQueryService,
    request: &PageRequest,
    timeout: Duration,
) -> Result<Page, QueryError> {
    let query = PageQuery {
        filters: request.filters.clone(),
        page: request.page,
    };

    match tokio::time::timeout(timeout, service.fetch_page(&query)).await {
        Ok(result) => result,
        Err(_) => Err(QueryError::Timeout {
            secs: timeout.as_secs(),
        }),
    }
}

/// Spawn a fetch task that reports back on `tx`
pub fn spawn_fetch(
    service: SharedQueryService,
    request: PageRequest,
    timeout: Duration,
    tx: mpsc::Sender<FeedEvent>,
) -> JoinHandle<()> {
    tracing::debug!(
        "Fetching page {} (generation {}) via {}",
        request.page,
        request.generation,
        service.name()
    );

    tokio::spawn(async move {
        let started = Instant::now();
        let result = fetch(&service, &request, timeout).await;
        let duration = started.elapsed();

        let event = match result {
            Ok(page) => {
                tracing::debug!(
                    "Page {} returned {} result(s) in {:?}",
                    request.page,
                    page.results.len(),
                    duration
                );
                FeedEvent::PageLoaded {
                    request,
                    page,
                    duration,
                }
            }
            Err(error) => FeedEvent::PageFailed {
                request,
                error,
                duration,
            },
        };

        // Receiver gone means the UI is shutting down
        if tx.send(event).await.is_err() {
            tracing::trace!("Feed event dropped: receiver closed");
        }
    })
}
