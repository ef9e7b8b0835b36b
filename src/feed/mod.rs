// Feed module - the character feed pipeline
//
// - controller: filter sessions, pagination cursor, accumulator, fetch guard
// - view: pure sorted view plus a memoizing wrapper
// - sentinel: edge-triggered load-more signal
// - fetcher: runs page requests on tokio tasks with a timeout

pub mod controller;
pub mod fetcher;
pub mod sentinel;
pub mod view;

pub use controller::{ApplyOutcome, FeedController, FeedState, PageRequest};
pub use fetcher::spawn_fetch;
pub use sentinel::LoadMoreTrigger;
pub use view::{derive_view, DerivedView};
