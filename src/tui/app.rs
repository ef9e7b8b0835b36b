// TUI application state
//
// App owns the feed controller and everything the screen shows. It runs on
// the event-loop task only, so nothing here needs a lock. Fetches go out
// through spawn_fetch and come back as FeedEvents via handle_feed_event.

use super::clipboard;
use super::components::Toast;
use super::input::InputHandler;
use super::modal::Modal;
use super::scroll::ScrollState;
use super::theme::Theme;
use crate::config::Config;
use crate::events::{FeedEvent, FetchStats};
use crate::feed::{spawn_fetch, ApplyOutcome, DerivedView, FeedController, LoadMoreTrigger, PageRequest};
use crate::i18n::Translator;
use crate::logging::LogBuffer;
use crate::model::{Character, SortKey, Status};
use crate::query::SharedQueryService;
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Species shortcuts cycled with `p` (None = all species)
pub const SPECIES_PRESETS: &[Option<&str>] = &[None, Some("Human"), Some("Alien"), Some("Robot")];

/// Spinner frames for the loading indicator
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Height of the logs panel when shown
pub const LOGS_PANEL_HEIGHT: u16 = 8;

/// Everything the character list needs for one frame
pub struct ListFrame<'a> {
    pub items: &'a [Character],
    pub feed: &'a FeedController,
    pub translator: &'a Translator,
    pub theme: &'a Theme,
    pub scroll: &'a mut ScrollState,
    pub selected: usize,
    pub spinner: char,
}

/// Main application state for the TUI
pub struct App {
    pub feed: FeedController,
    view: DerivedView,
    pub sort: SortKey,
    pub translator: Translator,
    pub theme: Theme,

    /// Edge detector for the end-of-list row
    trigger: LoadMoreTrigger,
    /// Whether the end-of-list row was on screen in the last frame
    pub sentinel_visible: bool,

    /// Index into the sorted view
    pub selected: usize,
    pub list_scroll: ScrollState,

    /// Species text being typed after `/`; None when not editing
    pub species_input: Option<String>,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub show_logs: bool,
    pub log_buffer: LogBuffer,

    pub stats: FetchStats,
    pub should_quit: bool,
    start_time: Instant,
    animation_frame: usize,
    input_handler: InputHandler,

    service: SharedQueryService,
    feed_tx: mpsc::Sender<FeedEvent>,
    timeout: Duration,
}

impl App {
    pub fn new(
        config: &Config,
        service: SharedQueryService,
        log_buffer: LogBuffer,
        feed_tx: mpsc::Sender<FeedEvent>,
    ) -> Self {
        Self {
            feed: FeedController::new(config.filters.clone()),
            view: DerivedView::new(),
            sort: config.sort,
            translator: Translator::new(config.locale),
            theme: Theme::default(),
            trigger: LoadMoreTrigger::new(),
            sentinel_visible: false,
            selected: 0,
            list_scroll: ScrollState::new(),
            species_input: None,
            modal: None,
            toast: None,
            show_logs: false,
            log_buffer,
            stats: FetchStats::default(),
            should_quit: false,
            start_time: Instant::now(),
            animation_frame: 0,
            input_handler: InputHandler::default(),
            service,
            feed_tx,
            timeout: config.fetch.timeout(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Feed plumbing
    // ─────────────────────────────────────────────────────────────

    /// Issue the first page request
    pub fn start(&mut self) {
        let request = self.feed.mount();
        self.dispatch(Some(request));
    }

    fn dispatch(&mut self, request: Option<PageRequest>) {
        if let Some(request) = request {
            self.stats.total_requests += 1;
            spawn_fetch(
                self.service.clone(),
                request,
                self.timeout,
                self.feed_tx.clone(),
            );
        }
    }

    /// Merge a finished fetch into the feed
    pub fn handle_feed_event(&mut self, event: FeedEvent) {
        self.stats.record(&event);
        tracing::debug!(
            page = event.request().page,
            ms = event.duration().as_millis() as u64,
            "Fetch finished"
        );

        match event {
            FeedEvent::PageLoaded { request, page, .. } => {
                match self.feed.apply_page(&request, page) {
                    ApplyOutcome::Applied { duplicates, .. } => {
                        self.stats.duplicates_dropped += duplicates;
                        // A sentinel still on screen should ask for the next page
                        self.trigger.reset();
                    }
                    ApplyOutcome::Stale => self.stats.stale_dropped += 1,
                    ApplyOutcome::Failed => {}
                }
            }
            FeedEvent::PageFailed { request, error, .. } => {
                match self.feed.apply_failure(&request, error.to_string()) {
                    ApplyOutcome::Failed => {
                        let message = format!("{}: {}", self.translator.translate("error"), error);
                        self.toast = Some(Toast::error(message));
                    }
                    ApplyOutcome::Stale => self.stats.stale_dropped += 1,
                    ApplyOutcome::Applied { .. } => {}
                }
            }
        }

        self.clamp_selection();
    }

    /// Called after every frame with the sentinel visibility the renderer saw
    pub fn check_sentinel(&mut self) {
        if self.trigger.observe(self.sentinel_visible) {
            tracing::trace!("End of list visible, requesting more");
            let request = self.feed.load_more();
            self.dispatch(request);
        }
    }

    /// Retry after an error (same page as the failed request)
    pub fn retry(&mut self) {
        if self.feed.error().is_some() {
            tracing::info!("Retrying page {}", self.feed.cursor());
            let request = self.feed.load_more();
            self.dispatch(request);
        }
    }

    fn on_filter_change(&mut self, request: Option<PageRequest>) {
        if request.is_some() {
            self.trigger.reset();
            self.selected = 0;
            self.list_scroll.scroll_to_top();
            self.dispatch(request);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Filters, sort, language
    // ─────────────────────────────────────────────────────────────

    /// All → Alive → Dead → Unknown → All
    pub fn cycle_status(&mut self) {
        let next = match self.feed.filters().status {
            None => Some(Status::Alive),
            Some(Status::Alive) => Some(Status::Dead),
            Some(Status::Dead) => Some(Status::Unknown),
            Some(Status::Unknown) => None,
        };
        let request = self.feed.set_status_filter(next);
        self.on_filter_change(request);
    }

    /// Step through the species presets; free text falls back to the first
    pub fn cycle_species_preset(&mut self) {
        let current = self.feed.filters().species.as_deref();
        let position = SPECIES_PRESETS
            .iter()
            .position(|preset| match (preset, current) {
                (None, None) => true,
                (Some(p), Some(c)) => p.eq_ignore_ascii_case(c),
                _ => false,
            })
            .unwrap_or(0);
        let next = SPECIES_PRESETS[(position + 1) % SPECIES_PRESETS.len()];
        let request = self.feed.set_species_filter(next.map(str::to_string));
        self.on_filter_change(request);
    }

    pub fn begin_species_edit(&mut self) {
        let current = self.feed.filters().species.clone().unwrap_or_default();
        self.species_input = Some(current);
    }

    /// Feed a key to the species editor
    pub fn species_edit_key(&mut self, key: KeyCode) {
        let Some(input) = self.species_input.as_mut() else {
            return;
        };
        match key {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.species_input = None,
            KeyCode::Enter => {
                let text = self.species_input.take();
                let request = self.feed.set_species_filter(text);
                self.on_filter_change(request);
            }
            _ => {}
        }
    }

    pub fn toggle_sort(&mut self) {
        self.set_sort(self.sort.toggle());
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            tracing::debug!("Sort changed to {}", sort.as_str());
            self.sort = sort;
            self.selected = 0;
            self.list_scroll.scroll_to_top();
        }
    }

    pub fn cycle_locale(&mut self) {
        let next = self.translator.locale().next();
        self.translator.set_locale(next);
    }

    // ─────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────

    /// Sorted characters, recomputed only when the feed or sort changed
    pub fn visible_characters(&mut self) -> &[Character] {
        self.view.get(&self.feed, self.sort)
    }

    /// Disjoint borrows for rendering the list in one pass
    pub fn list_frame(&mut self) -> ListFrame<'_> {
        ListFrame {
            items: self.view.get(&self.feed, self.sort),
            feed: &self.feed,
            translator: &self.translator,
            theme: &self.theme,
            scroll: &mut self.list_scroll,
            selected: self.selected,
            spinner: SPINNER[self.animation_frame % SPINNER.len()],
        }
    }

    pub fn selected_character(&mut self) -> Option<&Character> {
        let index = self.selected;
        self.visible_characters().get(index)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_characters().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        let len = self.visible_characters().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_characters().len().saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let len = self.visible_characters().len();
        let step = self.list_scroll.viewport().max(1);
        self.selected = (self.selected + step).min(len.saturating_sub(1));
    }

    pub fn page_up(&mut self) {
        let step = self.list_scroll.viewport().max(1);
        self.selected = self.selected.saturating_sub(step);
    }

    // ─────────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────────

    pub fn open_detail(&mut self) {
        if let Some(character) = self.selected_character().cloned() {
            self.modal = Some(Modal::detail(character));
        }
    }

    pub fn open_help(&mut self) {
        self.modal = Some(Modal::Help);
    }

    /// Copy a character to the clipboard as pretty JSON
    pub fn copy_character(&mut self, character: &Character) {
        let result = serde_json::to_string_pretty(character)
            .map_err(anyhow::Error::from)
            .and_then(|json| clipboard::copy_to_clipboard(&json));

        let key = match result {
            Ok(()) => "copied",
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                "copy_failed"
            }
        };
        self.show_toast(self.translator.translate(key).to_string());
    }

    pub fn copy_selected(&mut self) {
        if let Some(character) = self.selected_character().cloned() {
            self.copy_character(&character);
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Input and housekeeping
    // ─────────────────────────────────────────────────────────────

    /// Handle a key press - returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedState;
    use crate::i18n::Locale;
    use crate::query::DemoService;
    use crate::tui::components::characters_panel;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app_with(service: DemoService) -> (App, mpsc::Receiver<FeedEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let config = Config::default();
        let app = App::new(&config, Arc::new(service), LogBuffer::new(), tx);
        (app, rx)
    }

    async fn pump(app: &mut App, rx: &mut mpsc::Receiver<FeedEvent>) {
        let event = rx.recv().await.expect("fetch task reports back");
        app.handle_feed_event(event);
    }

    #[tokio::test]
    async fn test_start_loads_first_page() {
        let (mut app, mut rx) = app_with(DemoService::new(5));
        app.start();
        assert!(app.feed.is_loading());

        pump(&mut app, &mut rx).await;
        assert_eq!(app.feed.state(), &FeedState::Idle);
        assert_eq!(app.visible_characters().len(), 5);
        assert_eq!(app.stats.successful, 1);
    }

    #[tokio::test]
    async fn test_sentinel_edge_requests_next_page() {
        let (mut app, mut rx) = app_with(DemoService::new(5));
        app.start();
        pump(&mut app, &mut rx).await;

        app.sentinel_visible = true;
        app.check_sentinel();
        assert!(app.feed.is_loading());
        // Holding the sentinel on screen does not queue another request
        app.check_sentinel();
        assert_eq!(app.stats.total_requests, 2);

        pump(&mut app, &mut rx).await;
        assert_eq!(app.visible_characters().len(), 10);

        // Trigger re-arms after a page lands
        app.check_sentinel();
        assert_eq!(app.stats.total_requests, 3);
    }

    #[tokio::test]
    async fn test_filter_change_drops_in_flight_page() {
        let (mut app, mut rx) = app_with(
            DemoService::new(5).with_latency(Duration::from_millis(20)),
        );
        app.start();
        app.cycle_status();
        assert_eq!(app.feed.filters().status, Some(Status::Alive));

        pump(&mut app, &mut rx).await;
        pump(&mut app, &mut rx).await;

        assert_eq!(app.stats.stale_dropped, 1);
        assert!(app
            .visible_characters()
            .iter()
            .all(|c| c.status == Status::Alive));
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let (mut app, mut rx) = app_with(DemoService::new(5).with_failing_page(1));
        app.start();
        pump(&mut app, &mut rx).await;

        assert!(app.feed.error().is_some());
        assert!(app.toast.as_ref().is_some_and(|t| t.is_error));

        app.retry();
        assert_eq!(app.feed.cursor(), 1);
        assert_eq!(app.stats.total_requests, 2);
    }

    #[tokio::test]
    async fn test_species_editing() {
        let (mut app, mut rx) = app_with(DemoService::new(50));
        app.start();
        pump(&mut app, &mut rx).await;

        app.begin_species_edit();
        for c in "robot".chars() {
            app.species_edit_key(KeyCode::Char(c));
        }
        app.species_edit_key(KeyCode::Backspace);
        app.species_edit_key(KeyCode::Char('t'));
        app.species_edit_key(KeyCode::Enter);

        assert!(app.species_input.is_none());
        assert_eq!(app.feed.filters().species.as_deref(), Some("robot"));
        pump(&mut app, &mut rx).await;
        assert!(app
            .visible_characters()
            .iter()
            .all(|c| c.species.to_lowercase().contains("robot")));

        // Esc leaves the filter alone
        app.begin_species_edit();
        app.species_edit_key(KeyCode::Char('x'));
        app.species_edit_key(KeyCode::Esc);
        assert_eq!(app.feed.filters().species.as_deref(), Some("robot"));
    }

    #[tokio::test]
    async fn test_species_presets_cycle() {
        let (mut app, _rx) = app_with(DemoService::new(5));
        app.start();

        app.cycle_species_preset();
        assert_eq!(app.feed.filters().species.as_deref(), Some("Human"));
        app.cycle_species_preset();
        app.cycle_species_preset();
        assert_eq!(app.feed.filters().species.as_deref(), Some("Robot"));
        app.cycle_species_preset();
        assert_eq!(app.feed.filters().species, None);
    }

    #[tokio::test]
    async fn test_sort_and_locale_do_not_refetch() {
        let (mut app, mut rx) = app_with(DemoService::new(5));
        app.start();
        pump(&mut app, &mut rx).await;

        app.toggle_sort();
        app.cycle_locale();
        assert_eq!(app.sort, SortKey::OriginName);
        assert_eq!(app.translator.locale(), Locale::De);
        assert_eq!(app.stats.total_requests, 1);
        assert!(!app.feed.is_loading());
    }

    fn draw_list(terminal: &mut Terminal<TestBackend>, app: &mut App) {
        terminal
            .draw(|f| {
                let area = f.area();
                characters_panel::render(f, area, app);
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_rendered_footer_drives_sentinel() {
        let (mut app, mut rx) = app_with(DemoService::new(20));
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        app.start();
        pump(&mut app, &mut rx).await;

        draw_list(&mut terminal, &mut app);
        assert!(!app.sentinel_visible);
        app.check_sentinel();
        assert_eq!(app.stats.total_requests, 1);

        app.select_last();
        draw_list(&mut terminal, &mut app);
        assert!(app.sentinel_visible);
        app.check_sentinel();
        assert!(app.feed.is_loading());
        assert_eq!(app.stats.total_requests, 2);

        // Still on screen on the next frame: no second request
        draw_list(&mut terminal, &mut app);
        app.check_sentinel();
        assert_eq!(app.stats.total_requests, 2);
    }

    #[tokio::test]
    async fn test_filter_change_rearms_sentinel() {
        let (mut app, mut rx) = app_with(DemoService::new(5));
        app.start();
        pump(&mut app, &mut rx).await;

        app.sentinel_visible = true;
        app.check_sentinel();
        assert_eq!(app.stats.total_requests, 2);

        // New filter session while page 2 is in flight
        app.cycle_status();
        assert_eq!(app.stats.total_requests, 3);
        app.check_sentinel();
        assert_eq!(app.stats.total_requests, 3);

        pump(&mut app, &mut rx).await;
        pump(&mut app, &mut rx).await;
        assert_eq!(app.stats.stale_dropped, 1);
        assert_eq!(app.feed.cursor(), 2);

        // Sentinel never left the screen, yet page 2 of the new session follows
        app.check_sentinel();
        assert_eq!(app.stats.total_requests, 4);
        assert!(app.feed.is_loading());
        assert!(app
            .visible_characters()
            .iter()
            .all(|c| c.status == Status::Alive));
    }
}
