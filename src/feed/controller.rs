//! Feed controller - pagination, filter sessions and result accumulation
//!
//! The controller is a plain state machine. It performs no I/O: operations
//! that need data return a [`PageRequest`], the caller runs it against a
//! query service, and hands the outcome back through [`FeedController::apply_page`]
//! or [`FeedController::apply_failure`].
//!
//! # State machine
//!
//! ```text
//!            mount / set_filters / load_more
//!   Idle ─────────────────────────────────────▶ Loading
//!    ▲                                            │
//!    │ apply_page                 apply_failure   │
//!    └────────────────────── Loading ───────────▶ Error
//!                                                 │
//!              set_filters / load_more (retry)    │
//!   Loading ◀─────────────────────────────────────┘
//! ```
//!
//! Every filter change starts a new *generation*. A request remembers the
//! generation and page it was issued for; a response whose request no longer
//! matches what the controller is waiting on is stale and gets dropped.

use crate::model::{Character, FilterState, Page, Status};
use std::collections::HashSet;

/// Current fetch state of the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    /// No fetch in flight
    Idle,
    /// Awaiting the page described by the pending request
    Loading,
    /// Last fetch failed; message is shown to the user
    Error(String),
}

/// A page fetch the caller must execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Filter session this request belongs to
    pub generation: u64,
    /// 1-based page number
    pub page: u32,
    pub filters: FilterState,
}

/// What happened when a response was handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Response merged into the accumulator
    Applied { added: usize, duplicates: usize },
    /// Failure recorded, feed is now in the error state
    Failed,
    /// Response belongs to an old filter session or an unexpected page
    Stale,
}

/// Holds filter state, pagination cursor and the accumulated results
#[derive(Debug)]
pub struct FeedController {
    filters: FilterState,
    state: FeedState,
    /// Next page number to request
    cursor: u32,
    has_next: bool,
    generation: u64,
    pending: Option<PageRequest>,
    characters: Vec<Character>,
    seen_ids: HashSet<String>,
    /// Bumped on every accumulator mutation
    revision: u64,
}

impl FeedController {
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            state: FeedState::Idle,
            cursor: 1,
            has_next: true,
            generation: 0,
            pending: None,
            characters: Vec::new(),
            seen_ids: HashSet::new(),
            revision: 0,
        }
    }

    /// Start the first filter session (page 1 with the initial filters)
    pub fn mount(&mut self) -> PageRequest {
        self.start_session()
    }

    /// Change the status filter; returns the page-1 request if anything changed
    pub fn set_status_filter(&mut self, status: Option<Status>) -> Option<PageRequest> {
        let filters = self.filters.with_status(status);
        self.set_filters(filters)
    }

    /// Change the species filter; returns the page-1 request if anything changed
    pub fn set_species_filter(&mut self, species: Option<String>) -> Option<PageRequest> {
        let filters = self.filters.with_species(species);
        self.set_filters(filters)
    }

    /// Replace the whole filter state
    ///
    /// Resets cursor and accumulator and abandons any in-flight request.
    pub fn set_filters(&mut self, filters: FilterState) -> Option<PageRequest> {
        if filters == self.filters {
            return None;
        }
        tracing::debug!(
            "Filter change: status={:?} species={:?}",
            filters.status,
            filters.species
        );
        self.filters = filters;
        Some(self.start_session())
    }

    /// Request the next page, unless one is in flight or there is none left
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.state == FeedState::Loading {
            tracing::trace!("load_more ignored: fetch already in flight");
            return None;
        }
        if !self.has_next {
            tracing::trace!("load_more ignored: no further pages");
            return None;
        }

        let request = PageRequest {
            generation: self.generation,
            page: self.cursor,
            filters: self.filters.clone(),
        };
        self.state = FeedState::Loading;
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Merge a successful response
    pub fn apply_page(&mut self, request: &PageRequest, page: Page) -> ApplyOutcome {
        if !self.is_awaiting(request) {
            tracing::debug!(
                "Dropping stale page {} (generation {}, current {})",
                request.page,
                request.generation,
                self.generation
            );
            return ApplyOutcome::Stale;
        }

        if request.page == 1 {
            self.characters.clear();
            self.seen_ids.clear();
        }

        let mut added = 0;
        let mut duplicates = 0;
        for character in page.results {
            if self.seen_ids.insert(character.id.clone()) {
                self.characters.push(character);
                added += 1;
            } else {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            tracing::debug!(
                "Page {} contained {} duplicate id(s), kept first occurrence",
                request.page,
                duplicates
            );
        }

        self.has_next = page.has_next;
        self.cursor = request.page + 1;
        self.pending = None;
        self.state = FeedState::Idle;
        self.revision += 1;

        ApplyOutcome::Applied { added, duplicates }
    }

    /// Record a failed fetch; accumulated results are kept
    pub fn apply_failure(&mut self, request: &PageRequest, message: impl Into<String>) -> ApplyOutcome {
        if !self.is_awaiting(request) {
            tracing::debug!(
                "Dropping stale failure for page {} (generation {})",
                request.page,
                request.generation
            );
            return ApplyOutcome::Stale;
        }

        let message = message.into();
        tracing::warn!("Page {} failed: {}", request.page, message);
        self.pending = None;
        self.state = FeedState::Error(message);
        ApplyOutcome::Failed
    }

    fn start_session(&mut self) -> PageRequest {
        self.generation += 1;
        self.cursor = 1;
        self.has_next = true;
        self.characters.clear();
        self.seen_ids.clear();
        self.revision += 1;

        let request = PageRequest {
            generation: self.generation,
            page: 1,
            filters: self.filters.clone(),
        };
        self.state = FeedState::Loading;
        self.pending = Some(request.clone());
        request
    }

    fn is_awaiting(&self, request: &PageRequest) -> bool {
        self.pending.as_ref() == Some(request)
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FeedState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FeedState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::view::derive_view;
    use crate::model::{character, Origin, SortKey};

    fn page(ids: &[&str], has_next: bool) -> Page {
        Page {
            results: ids.iter().map(|id| character(id, id, "Earth")).collect(),
            has_next,
        }
    }

    fn ids(controller: &FeedController) -> Vec<&str> {
        controller.characters().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_mount_starts_loading_page_one() {
        let mut feed = FeedController::new(FilterState::default());
        let req = feed.mount();
        assert_eq!(req.page, 1);
        assert_eq!(feed.state(), &FeedState::Loading);
        assert!(feed.characters().is_empty());
    }

    #[test]
    fn test_pages_concatenate_in_request_order() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_page(&r1, page(&["1", "2"], true));
        let r2 = feed.load_more().unwrap();
        assert_eq!(r2.page, 2);
        feed.apply_page(&r2, page(&["3"], true));
        let r3 = feed.load_more().unwrap();
        feed.apply_page(&r3, page(&["4", "5"], false));

        assert_eq!(ids(&feed), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(feed.state(), &FeedState::Idle);
        assert!(!feed.has_next());
    }

    #[test]
    fn test_replayed_response_is_stale() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_page(&r1, page(&["1"], true));
        // Same response delivered twice must not duplicate or reorder
        assert_eq!(feed.apply_page(&r1, page(&["1"], true)), ApplyOutcome::Stale);
        assert_eq!(ids(&feed), vec!["1"]);
    }

    #[test]
    fn test_filter_change_discards_in_flight_response() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_page(&r1, page(&["1", "2"], true));
        let old = feed.load_more().unwrap();

        let fresh = feed.set_status_filter(Some(Status::Dead)).unwrap();
        assert_eq!(fresh.page, 1);
        assert!(feed.characters().is_empty());
        assert_eq!(feed.cursor(), 1);

        // Old page 2 arrives late and is dropped
        assert_eq!(feed.apply_page(&old, page(&["3"], true)), ApplyOutcome::Stale);
        assert!(feed.is_loading());

        feed.apply_page(&fresh, page(&["10", "11"], false));
        assert_eq!(ids(&feed), vec!["10", "11"]);
    }

    #[test]
    fn test_stale_page_one_cannot_clobber_new_session() {
        let mut feed = FeedController::new(FilterState::default());
        let first = feed.mount();
        let second = feed.set_species_filter(Some("Alien".into())).unwrap();
        assert_eq!(first.page, second.page);
        assert_ne!(first.generation, second.generation);

        feed.apply_page(&second, page(&["a1"], false));
        assert_eq!(feed.apply_page(&first, page(&["h1"], true)), ApplyOutcome::Stale);
        assert_eq!(ids(&feed), vec!["a1"]);
        assert!(!feed.has_next());
    }

    #[test]
    fn test_unchanged_filter_is_noop() {
        let mut feed = FeedController::new(FilterState::new(Some(Status::Alive), None));
        let r = feed.mount();
        feed.apply_page(&r, page(&["1"], true));
        assert!(feed.set_status_filter(Some(Status::Alive)).is_none());
        assert!(feed.set_species_filter(Some("  ".into())).is_none());
        assert_eq!(ids(&feed), vec!["1"]);
    }

    #[test]
    fn test_at_most_one_fetch_in_flight() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        assert!(feed.load_more().is_none());
        feed.apply_page(&r1, page(&["1"], true));

        assert!(feed.load_more().is_some());
        assert!(feed.load_more().is_none());
    }

    #[test]
    fn test_failure_keeps_results_and_retries_same_page() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_page(&r1, page(&["1", "2"], true));

        let r2 = feed.load_more().unwrap();
        assert_eq!(feed.apply_failure(&r2, "boom"), ApplyOutcome::Failed);
        assert_eq!(feed.error(), Some("boom"));
        assert_eq!(ids(&feed), vec!["1", "2"]);

        let retry = feed.load_more().unwrap();
        assert_eq!(retry.page, 2);
        feed.apply_page(&retry, page(&["3"], false));
        assert_eq!(ids(&feed), vec!["1", "2", "3"]);
        assert_eq!(feed.state(), &FeedState::Idle);
    }

    #[test]
    fn test_first_page_failure_retries_page_one() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_failure(&r1, "offline");
        let retry = feed.load_more().unwrap();
        assert_eq!(retry.page, 1);
        assert_eq!(retry.generation, r1.generation);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut feed = FeedController::new(FilterState::default());
        let old = feed.mount();
        let fresh = feed.set_status_filter(Some(Status::Alive)).unwrap();
        assert_eq!(feed.apply_failure(&old, "late"), ApplyOutcome::Stale);
        assert!(feed.is_loading());
        feed.apply_page(&fresh, page(&["1"], false));
        assert_eq!(feed.state(), &FeedState::Idle);
    }

    #[test]
    fn test_duplicate_ids_keep_first_occurrence() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_page(&r1, page(&["1", "2"], true));
        let r2 = feed.load_more().unwrap();
        let outcome = feed.apply_page(&r2, page(&["2", "3"], false));
        assert_eq!(
            outcome,
            ApplyOutcome::Applied {
                added: 1,
                duplicates: 1
            }
        );
        assert_eq!(ids(&feed), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_page_ends_pagination() {
        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_page(&r1, Page::default());
        assert!(feed.characters().is_empty());
        assert!(!feed.has_next());
        assert!(feed.load_more().is_none());
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut feed = FeedController::new(FilterState::default());
        let before = feed.revision();
        let r1 = feed.mount();
        let after_mount = feed.revision();
        assert!(after_mount > before);
        feed.apply_page(&r1, page(&["1"], true));
        assert!(feed.revision() > after_mount);
        let stale_rev = feed.revision();
        feed.apply_page(&r1, page(&["9"], true));
        assert_eq!(feed.revision(), stale_rev);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let beth = Character {
            id: "1".into(),
            name: "Beth".into(),
            status: Status::Alive,
            species: "Human".into(),
            gender: "Female".into(),
            origin: Origin {
                name: "Earth".into(),
            },
        };
        let princess = Character {
            id: "2".into(),
            name: "Abadango Cluster Princess".into(),
            status: Status::Alive,
            species: "Alien".into(),
            gender: "Female".into(),
            origin: Origin {
                name: "Abadango".into(),
            },
        };
        let rick = Character {
            id: "3".into(),
            name: "Rick".into(),
            status: Status::Alive,
            species: "Human".into(),
            gender: "Male".into(),
            origin: Origin {
                name: "Earth (C-137)".into(),
            },
        };

        let mut feed = FeedController::new(FilterState::default());
        let r1 = feed.mount();
        feed.apply_page(
            &r1,
            Page {
                results: vec![beth, princess],
                has_next: true,
            },
        );
        let names: Vec<_> = derive_view(feed.characters(), SortKey::Name)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Abadango Cluster Princess", "Beth"]);

        let r2 = feed.load_more().unwrap();
        assert_eq!(r2.page, 2);
        feed.apply_page(
            &r2,
            Page {
                results: vec![rick],
                has_next: false,
            },
        );
        assert_eq!(feed.characters().len(), 3);
        let names: Vec<_> = derive_view(feed.characters(), SortKey::Name)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Abadango Cluster Princess", "Beth", "Rick"]);

        assert!(!feed.has_next());
        assert!(feed.load_more().is_none());
        assert!(feed.load_more().is_none());
    }
}
