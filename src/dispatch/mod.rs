// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query dispatcher: search-as-you-type without flicker.
//!
//! Every keystroke, sort toggle, search-type change or dataset toggle becomes a
//! new *generation*. Generations run on their own worker threads, so a slow
//! correction pass never blocks the caller. Only one of them may ever reach
//! the screen.
//!
//! ## The rules
//!
//! 1. Submitting a request bumps the shared generation counter. Every older
//!    generation is superseded at that instant.
//! 2. Workers check their token after filtering, after correction, and once
//!    more right before publishing. A stale worker drops its rows silently.
//! 3. The last check and the publication happen under the view's write lock.
//!    A generation that loses the race between "still current?" and "publish"
//!    cannot exist.
//! 4. A view is never replaced by an older generation's output.
//!
//! The consequence: the last request submitted is the last one committed.
//! Intermediate requests may never commit at all, which is the point.
//!
//! ## Corpus consistency
//!
//! A dataset toggle rebuilds the corpus on the caller's thread *before* the
//! toggle's generation is dispatched. Generations already in flight keep the
//! snapshot they started with and are superseded by the toggle's own
//! generation, so a stale corpus can run to completion but never commit.
//!
//! ## Events
//!
//! Each generation reports exactly one terminal [`DispatchEvent`] on the
//! channel returned by [`QueryDispatcher::new`]. Dropping the receiver is fine;
//! events are then discarded.

mod generation;

pub use generation::{GenerationCounter, GenerationState, GenerationToken};

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{RwLock, RwLockReadGuard};

use crate::corpus::{Catalog, Corpus};
use crate::error::{ConfigError, EngineError};
use crate::search::Searcher;
use crate::types::{GenerationId, ResultRecord, SearchRequest, SearchType, SortKey};
use crate::view::{next_characters, ResultView};

/// Terminal outcome of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    /// Rows published to the view.
    Committed { generation: GenerationId, total: usize },
    /// A newer generation took over. Nothing was published.
    Superseded { generation: GenerationId },
    /// The distance engine failed while this generation was still current.
    Failed {
        generation: GenerationId,
        error: EngineError,
    },
}

impl DispatchEvent {
    pub fn generation(&self) -> GenerationId {
        match self {
            DispatchEvent::Committed { generation, .. }
            | DispatchEvent::Superseded { generation }
            | DispatchEvent::Failed { generation, .. } => *generation,
        }
    }

    pub fn state(&self) -> GenerationState {
        match self {
            DispatchEvent::Committed { .. } => GenerationState::Committed,
            DispatchEvent::Superseded { .. } => GenerationState::Superseded,
            DispatchEvent::Failed { .. } => GenerationState::Failed,
        }
    }
}

/// Drain `events` until the outcome of `generation` arrives.
///
/// Events for other generations are skipped. Returns `None` on timeout or if
/// every sender is gone.
pub fn wait_for(
    events: &Receiver<DispatchEvent>,
    generation: GenerationId,
    timeout: Duration,
) -> Option<DispatchEvent> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.checked_duration_since(Instant::now())?;
        match events.recv_timeout(remaining) {
            Ok(event) if event.generation() == generation => return Some(event),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// Owns the session: catalog, current corpus, last request and the view.
pub struct QueryDispatcher {
    searcher: Arc<Searcher>,
    catalog: Catalog,
    corpus: Arc<Corpus>,
    request: SearchRequest,
    counter: GenerationCounter,
    view: Arc<RwLock<ResultView>>,
    events: Sender<DispatchEvent>,
    workers: Vec<JoinHandle<()>>,
}

impl QueryDispatcher {
    /// Set up a session. Nothing runs until the first submission.
    pub fn new(
        searcher: Searcher,
        catalog: Catalog,
        page_size: usize,
    ) -> Result<(Self, Receiver<DispatchEvent>), ConfigError> {
        let view = ResultView::new(page_size)?;
        let corpus = catalog.snapshot();
        let (events, receiver) = channel();

        let dispatcher = Self {
            searcher: Arc::new(searcher),
            catalog,
            corpus,
            request: SearchRequest::default(),
            counter: GenerationCounter::new(),
            view: Arc::new(RwLock::new(view)),
            events,
            workers: Vec::new(),
        };
        Ok((dispatcher, receiver))
    }

    /// Parameters of the most recent submission.
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Newest generation issued.
    pub fn current_generation(&self) -> GenerationId {
        self.counter.current()
    }

    /// Open a new generation for `request` and start its worker.
    ///
    /// Supersedes whatever is still running.
    pub fn submit(&mut self, request: SearchRequest) -> GenerationId {
        let token = self.counter.advance();
        let generation = token.id();

        let mut request = request;
        request.generation_id = generation;
        self.request = request.clone();

        tracing::debug!(
            %generation,
            query = %request.query,
            search_type = %request.search_type,
            sort = %request.sort_key,
            ascending = request.sort_ascending,
            correction = request.correction_enabled,
            "{}",
            GenerationState::Pending
        );

        self.workers.retain(|worker| !worker.is_finished());

        let worker = Worker {
            searcher: Arc::clone(&self.searcher),
            corpus: Arc::clone(&self.corpus),
            request,
            token,
            view: Arc::clone(&self.view),
            events: self.events.clone(),
        };

        match thread::Builder::new()
            .name(format!("toponym-{}", generation))
            .spawn(move || worker.run())
        {
            Ok(handle) => self.workers.push(handle),
            Err(e) => {
                let _ = self.events.send(spawn_failed(generation, &e));
            }
        }

        generation
    }

    /// Rerun the last request against the current corpus.
    pub fn refresh(&mut self) -> GenerationId {
        self.submit(self.request.clone())
    }

    /// New query text. Returns `None` when the trimmed text is unchanged and a
    /// generation has already been issued for it.
    pub fn set_query(&mut self, query: &str) -> Option<GenerationId> {
        let query = query.trim();
        if query == self.request.query && self.counter.current() != GenerationId::default() {
            return None;
        }
        let request = SearchRequest {
            query: query.to_string(),
            ..self.request.clone()
        };
        Some(self.submit(request))
    }

    pub fn set_search_type(&mut self, search_type: SearchType) -> GenerationId {
        let request = self.request.clone().with_search_type(search_type);
        self.submit(request)
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) -> GenerationId {
        let ascending = self.request.sort_ascending;
        let request = self.request.clone().with_sort(sort_key, ascending);
        self.submit(request)
    }

    pub fn toggle_sort_direction(&mut self) -> GenerationId {
        let request = self
            .request
            .clone()
            .with_sort(self.request.sort_key, !self.request.sort_ascending);
        self.submit(request)
    }

    pub fn set_correction(&mut self, enabled: bool) -> GenerationId {
        let request = self.request.clone().with_correction(enabled);
        self.submit(request)
    }

    /// Enable or disable a dataset and search again.
    ///
    /// The new corpus is built here, before the generation that reads it is
    /// dispatched.
    pub fn set_dataset_enabled(
        &mut self,
        name: &str,
        enabled: bool,
    ) -> Result<GenerationId, ConfigError> {
        if self.catalog.set_enabled(name, enabled)? {
            self.corpus = self.catalog.snapshot();
        }
        Ok(self.refresh())
    }

    /// Read access to the committed view.
    pub fn view(&self) -> RwLockReadGuard<'_, ResultView> {
        self.view.read()
    }

    /// Owned copy of the committed view.
    pub fn snapshot(&self) -> ResultView {
        self.view.read().clone()
    }

    /// Rows of the committed view's current page.
    pub fn page_rows(&self) -> Vec<ResultRecord> {
        self.view.read().page_rows().to_vec()
    }

    pub fn next_page(&self) -> bool {
        self.view.write().next_page()
    }

    pub fn prev_page(&self) -> bool {
        self.view.write().prev_page()
    }

    pub fn grow_page(&self) {
        self.view.write().grow_page();
    }

    pub fn shrink_page(&self) -> bool {
        self.view.write().shrink_page()
    }

    /// Join every worker started so far.
    ///
    /// Blocks for as long as the slowest engine call. Superseded workers still
    /// finish their current stage before they notice.
    pub fn wait_idle(&mut self) {
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::error!("search worker panicked");
            }
        }
    }
}

impl Drop for QueryDispatcher {
    fn drop(&mut self) {
        // Outstanding workers finish their stage and discard the result
        self.counter.invalidate();
    }
}

impl std::fmt::Debug for QueryDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryDispatcher")
            .field("searcher", &self.searcher)
            .field("corpus_records", &self.corpus.len())
            .field("request", &self.request)
            .field("generation", &self.counter.current())
            .field("workers", &self.workers.len())
            .finish()
    }
}

// =============================================================================
// WORKER
// =============================================================================

/// Terminal event for a generation whose worker thread could not start.
fn spawn_failed(generation: GenerationId, cause: &std::io::Error) -> DispatchEvent {
    let error = EngineError::Worker {
        reason: cause.to_string(),
    };
    tracing::error!(%generation, %error, "generation failed");
    DispatchEvent::Failed { generation, error }
}

/// Everything one generation needs, moved onto its thread.
struct Worker {
    searcher: Arc<Searcher>,
    corpus: Arc<Corpus>,
    request: SearchRequest,
    token: GenerationToken,
    view: Arc<RwLock<ResultView>>,
    events: Sender<DispatchEvent>,
}

impl Worker {
    fn run(self) {
        let generation = self.token.id();
        tracing::debug!(%generation, "{}", GenerationState::Running);

        let outcome = self
            .searcher
            .run(&self.corpus, &self.request, &|| self.token.is_current());

        let event = match outcome {
            Ok(Some(results)) => self.commit(results),
            Ok(None) => DispatchEvent::Superseded { generation },
            Err(error) if self.token.is_current() => {
                tracing::error!(%generation, %error, "generation failed");
                DispatchEvent::Failed { generation, error }
            }
            Err(error) => {
                tracing::debug!(%generation, %error, "superseded generation hit an engine error");
                DispatchEvent::Superseded { generation }
            }
        };

        tracing::debug!(%generation, "{}", event.state());
        let _ = self.events.send(event);
    }

    fn commit(&self, results: Vec<ResultRecord>) -> DispatchEvent {
        let generation = self.token.id();
        let hints = next_characters(&self.corpus, &self.request.query);

        let mut view = self.view.write();
        if !self.token.is_current() || view.generation() >= generation {
            return DispatchEvent::Superseded { generation };
        }

        let total = results.len();
        view.publish(self.request.clone(), self.corpus.epoch(), results, hints);
        DispatchEvent::Committed { generation, total }
    }
}
