//! Query service abstraction for paginated character lookups
//!
//! The feed controller never talks to the network itself. It produces page
//! requests, and something implementing [`QueryService`] answers them.
//!
//! # Architecture
//!
//! ```text
//! QueryService trait
//! ├── GraphqlService (HTTP POST to the public GraphQL endpoint)
//! └── DemoService    (built-in dataset, no network)
//! ```

pub mod demo;
pub mod graphql;

use crate::config::Config;
use crate::model::{FilterState, Page};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub use demo::DemoService;
pub use graphql::GraphqlService;

/// Parameters for a single page lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub filters: FilterState,
    /// 1-based page number
    pub page: u32,
}

/// Errors that can occur while fetching a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Transport-level failure (DNS, connection refused, TLS, ...)
    Network(String),
    /// Non-success HTTP status
    Http { status: u16, body: String },
    /// Response body was not JSON, or carried neither data nor errors
    Decode(String),
    /// The API answered with errors and no data
    Api(String),
    /// The fetch did not complete within the configured timeout
    Timeout { secs: u64 },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Http { status, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {}", status)
                } else {
                    write!(f, "HTTP {}: {}", status, body)
                }
            }
            Self::Decode(msg) => write!(f, "Malformed response: {}", msg),
            Self::Api(msg) => write!(f, "API error: {}", msg),
            Self::Timeout { secs } => write!(f, "Request timed out after {}s", secs),
        }
    }
}

impl std::error::Error for QueryError {}

/// A paginated character source
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Fetch one page of characters matching the filters
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, QueryError>;

    /// Short name for logs and the status bar
    fn name(&self) -> &str;
}

/// Shared handle used by the fetch executor
pub type SharedQueryService = Arc<dyn QueryService>;

/// Build the service selected by configuration
pub fn create_service(config: &Config) -> anyhow::Result<SharedQueryService> {
    if config.demo_mode {
        tracing::info!("Running in DEMO MODE - serving the built-in dataset");
        let service = DemoService::new(config.fetch.page_size)
            .with_latency(std::time::Duration::from_millis(config.fetch.demo_latency_ms));
        Ok(Arc::new(service))
    } else {
        let service = GraphqlService::new(&config.api_url, config.fetch.timeout_secs)?;
        Ok(Arc::new(service))
    }
}
