/// Search controller
///
/// The single owner of UI-facing state: raw and committed query text, current
/// page, request state, trending list, and the detail modal. It runs as one
/// tokio task; user intents arrive as commands over an mpsc channel, gateway
/// outcomes re-enter as events from spawned fetch tasks, and every state
/// change is published through a watch channel for the presentation layer.
///
/// Overlapping fetches are serialized by a request generation: every issued
/// list fetch bumps the generation and a response is applied only when its
/// generation is still the latest. The original design let the last response
/// win regardless of order; the divergence is pinned by the stale-response
/// test in tests/controller_tests.rs.
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Duration, Instant};

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, RequestState, ResultPage, TrendingEntry},
    services::analytics::SearchAnalytics,
    services::providers::MovieProvider,
    Config,
};

/// Shown for any list-fetch failure that carries no embedded message
pub const GENERIC_FETCH_ERROR: &str = "Error fetching movies. Please try again.";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// How long the query text must stay unchanged before a fetch is issued
    pub quiet_period: Duration,
    /// How many trending entries to load at mount
    pub trending_limit: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(800),
            trending_limit: 5,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            quiet_period: Duration::from_millis(config.debounce_ms),
            trending_limit: config.trending_limit,
        }
    }
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Raw query text, updated on every keystroke
    pub query_text: String,
    /// Current 1-based page of the committed query
    pub page: u32,
    pub request: RequestState,
    /// Total pages reported by the last loaded result page
    pub total_pages: Option<u32>,
    pub trending: Vec<TrendingEntry>,
    pub detail: Option<MovieDetail>,
    pub show_detail: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            page: 1,
            request: RequestState::Idle,
            total_pages: None,
            trending: Vec::new(),
            detail: None,
            show_detail: false,
        }
    }
}

enum Command {
    SetQueryText(String),
    SetPage(u32),
    SelectMovie(u64),
    CloseDetail,
}

enum Event {
    PageResolved {
        generation: u64,
        outcome: AppResult<ResultPage>,
    },
    DetailResolved {
        movie_id: u64,
        outcome: AppResult<MovieDetail>,
    },
    TrendingResolved(AppResult<Vec<TrendingEntry>>),
}

/// Handle to the controller task. Dropping every handle stops the task.
#[derive(Clone)]
pub struct SearchController {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ViewState>,
}

impl SearchController {
    /// Starts the controller task and issues the mount-time fetches:
    /// one discover for ("", page 1) and one trending load
    pub fn spawn(
        provider: Arc<dyn MovieProvider>,
        analytics: Arc<dyn SearchAnalytics>,
        options: ControllerOptions,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ViewState::default());

        let task = ControllerTask {
            provider,
            analytics,
            options,
            events: event_tx,
            state_tx,
            view: ViewState::default(),
            raw_query: String::new(),
            committed_query: String::new(),
            debounce_deadline: None,
            generation: 0,
        };
        tokio::spawn(task.run(command_rx, event_rx));

        Self {
            commands: command_tx,
            state: state_rx,
        }
    }

    /// Updates the raw query text immediately; the fetch follows only after
    /// the quiet period elapses without further keystrokes
    pub fn set_query_text(&self, text: impl Into<String>) {
        self.send(Command::SetQueryText(text.into()));
    }

    /// Navigates to a page of the committed query; out-of-range pages are
    /// ignored
    pub fn set_page(&self, page: u32) {
        self.send(Command::SetPage(page));
    }

    /// Fetches full detail for a movie and opens the modal on success
    pub fn select_movie(&self, movie_id: u64) {
        self.send(Command::SelectMovie(movie_id));
    }

    /// Hides the modal; the loaded detail is kept but never reused
    pub fn close_detail(&self) {
        self.send(Command::CloseDetail);
    }

    /// Snapshot of the current view state
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Watch handle for observing state transitions
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Search controller task is no longer running");
        }
    }
}

struct ControllerTask {
    provider: Arc<dyn MovieProvider>,
    analytics: Arc<dyn SearchAnalytics>,
    options: ControllerOptions,
    events: mpsc::UnboundedSender<Event>,
    state_tx: watch::Sender<ViewState>,
    view: ViewState,
    raw_query: String,
    committed_query: String,
    debounce_deadline: Option<Instant>,
    generation: u64,
}

impl ControllerTask {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<Event>,
    ) {
        self.load_trending();
        self.issue_fetch();

        loop {
            let deadline = self.debounce_deadline;
            let debounce = async move {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    // Every controller handle dropped
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
                _ = debounce => self.commit_query(),
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetQueryText(text) => {
                if text == self.raw_query {
                    return;
                }
                self.raw_query = text.clone();
                self.view.query_text = text;
                self.debounce_deadline = Some(Instant::now() + self.options.quiet_period);
                self.publish();
            }
            Command::SetPage(page) => {
                let Some(total_pages) = self.view.total_pages else {
                    tracing::debug!(page, "Ignoring page change before any page loaded");
                    return;
                };
                if page < 1 || page > total_pages || page == self.view.page {
                    tracing::debug!(page, total_pages, "Ignoring out-of-range page change");
                    return;
                }
                self.view.page = page;
                self.issue_fetch();
            }
            Command::SelectMovie(movie_id) => self.fetch_detail(movie_id),
            Command::CloseDetail => {
                if self.view.show_detail {
                    self.view.show_detail = false;
                    self.publish();
                }
            }
        }
    }

    /// Debounce expiry: adopt the settled text. A changed query always
    /// restarts at page 1, and exactly one fetch goes out for the settled
    /// (query, page) pair.
    fn commit_query(&mut self) {
        self.debounce_deadline = None;
        if self.raw_query == self.committed_query {
            return;
        }
        self.committed_query = self.raw_query.clone();
        self.view.page = 1;
        self.issue_fetch();
    }

    fn issue_fetch(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let query = self.committed_query.clone();
        let page = self.view.page;

        tracing::debug!(query = %query, page, generation, "Issuing list fetch");
        self.view.request = RequestState::Loading;
        self.publish();

        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = if query.is_empty() {
                provider.discover(page).await
            } else {
                provider.search(&query, page).await
            };
            let _ = events.send(Event::PageResolved {
                generation,
                outcome,
            });
        });
    }

    fn fetch_detail(&self, movie_id: u64) {
        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = provider.fetch_detail(movie_id).await;
            let _ = events.send(Event::DetailResolved { movie_id, outcome });
        });
    }

    fn load_trending(&self) {
        let analytics = Arc::clone(&self.analytics);
        let limit = self.options.trending_limit;
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = analytics.trending(limit).await;
            let _ = events.send(Event::TrendingResolved(outcome));
        });
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::PageResolved {
                generation,
                outcome,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        generation,
                        latest = self.generation,
                        "Discarding stale page response"
                    );
                    return;
                }
                self.apply_page_outcome(outcome);
            }
            Event::DetailResolved { movie_id, outcome } => match outcome {
                Ok(detail) => {
                    self.view.detail = Some(detail);
                    self.view.show_detail = true;
                    self.publish();
                }
                // Intentional asymmetry with the list path: the modal simply
                // does not open and no error is surfaced
                Err(e) => {
                    tracing::error!(movie_id, error = %e, "Detail fetch failed");
                }
            },
            Event::TrendingResolved(outcome) => match outcome {
                Ok(entries) => {
                    self.view.trending = entries;
                    self.publish();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Trending load failed");
                }
            },
        }
    }

    fn apply_page_outcome(&mut self, outcome: AppResult<ResultPage>) {
        match outcome {
            Ok(page) => {
                self.view.total_pages = Some(page.total_pages);
                if !self.committed_query.is_empty() {
                    if let Some(first) = page.movies.first() {
                        self.record_search(first.clone());
                    }
                }
                self.view.request = RequestState::Loaded(page);
            }
            Err(AppError::ApiRejected(message)) => {
                tracing::error!(error = %message, "List fetch rejected by upstream");
                self.view.request = RequestState::Failed(message);
            }
            Err(e) => {
                tracing::error!(error = %e, "List fetch failed");
                self.view.request = RequestState::Failed(GENERIC_FETCH_ERROR.to_string());
            }
        }
        self.publish();
    }

    /// Best-effort analytics write; never blocks or fails the UI transition
    fn record_search(&self, movie: crate::models::MovieSummary) {
        let analytics = Arc::clone(&self.analytics);
        let term = self.committed_query.clone();
        tokio::spawn(async move {
            if let Err(e) = analytics.record_search(&term, &movie).await {
                tracing::warn!(term = %term, error = %e, "Failed to record search");
            }
        });
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.view.clone());
    }
}
