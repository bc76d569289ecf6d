//! Incremental, typo-tolerant place-name search.
//!
//! Search-as-you-type over national commune datasets. Each keystroke runs an
//! exact filter over three precomputed name forms, optionally widened by an
//! edit-distance correction pass, and the newest completed search wins the
//! screen.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  corpus/    │────▶│  search/     │────▶│  scoring/    │
//! │ (Catalog,   │     │ (filter,     │     │  (rank)      │
//! │  Corpus)    │     │  correct,    │     │              │
//! └─────────────┘     │  merge)      │     └──────────────┘
//!        │            └──────────────┘             │
//!        │                   │                     │
//!        ▼                   ▼                     ▼
//! ┌──────────────┐   ┌──────────────────────────────────────┐
//! │  fuzzy/      │◀──│  dispatch/                           │
//! │ (Distance-   │   │  (generations, workers, commit gate) │
//! │  Engine)     │   └──────────────────────────────────────┘
//! └──────────────┘                   │
//!                                    ▼
//!                            ┌──────────────┐
//!                            │  view/       │
//!                            │ (ResultView, │
//!                            │  pages,hints)│
//!                            └──────────────┘
//! ```
//!
//! | Module     | Role                                                      |
//! |------------|-----------------------------------------------------------|
//! | `corpus`   | CSV datasets, enable flags, immutable snapshots           |
//! | `fuzzy`    | Levenshtein and the pluggable distance engine             |
//! | `search`   | Filter matcher, correction suggester, merge, annotation   |
//! | `scoring`  | Four sort keys, stable in both directions                 |
//! | `dispatch` | Generation counter, worker threads, commit gating         |
//! | `view`     | Committed results, pagination, next-letter hints          |
//!
//! # Usage
//!
//! ```ignore
//! use toponym::{load_catalog, QueryDispatcher, Searcher, Settings};
//!
//! let settings = Settings::default();
//! let catalog = load_catalog(&settings.datasets, data_dir)?;
//! let searcher = Searcher::from_config(&settings.engine)?;
//! let (mut dispatcher, events) = QueryDispatcher::new(searcher, catalog, 10)?;
//!
//! for prefix in ["M", "Ma", "Mar", "Mars"] {
//!     dispatcher.set_query(prefix);
//! }
//! ```

pub mod config;
pub mod corpus;
pub mod dispatch;
pub mod error;
pub mod fuzzy;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
pub mod util;
pub mod view;

pub use config::{DatasetSource, EngineConfig, EngineKind, Settings};
pub use corpus::{load_catalog, load_dataset, Catalog, Corpus, Dataset, DatasetStatus};
pub use dispatch::{wait_for, DispatchEvent, GenerationState, QueryDispatcher};
pub use error::{ConfigError, DatasetError, EngineError};
pub use fuzzy::{
    build_engine, distance_batch, levenshtein, DistanceEngine, QueryChars, SequentialEngine,
};
#[cfg(feature = "parallel")]
pub use fuzzy::ParallelEngine;
pub use scoring::{compare_by, rank};
pub use search::{
    annotate, correct, filter, merge, merge_and_rank, CorrectionCache, CorrectionSettings,
    ResultMerger, Searcher, Suggestion,
};
pub use types::{GenerationId, Record, ResultRecord, SearchRequest, SearchType, SortKey};
pub use view::{next_characters, Pagination, ResultView, MIN_PAGE_SIZE, PAGE_SIZE_STEP};
