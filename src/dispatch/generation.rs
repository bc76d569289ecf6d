// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Generation counter and tokens.
//!
//! One shared `AtomicU64` holds the newest generation id. Issuing a new id
//! *is* the cancellation: every older token compares unequal from then on.
//! No per-generation flags, no list of live workers to notify.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::types::GenerationId;

/// Lifecycle of one generation.
///
/// ```text
/// Pending ──► Running ──► Committed
///                    ├──► Superseded
///                    └──► Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationState {
    Pending,
    Running,
    Committed,
    Superseded,
    Failed,
}

impl GenerationState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GenerationState::Committed | GenerationState::Superseded | GenerationState::Failed
        )
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationState::Pending => "pending",
            GenerationState::Running => "running",
            GenerationState::Committed => "committed",
            GenerationState::Superseded => "superseded",
            GenerationState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Issues generation ids. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Arc<AtomicU64>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new generation, superseding every earlier one.
    pub fn advance(&self) -> GenerationToken {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationToken {
            id: GenerationId(id),
            current: Arc::clone(&self.current),
        }
    }

    /// Newest id issued, `g0` if none.
    pub fn current(&self) -> GenerationId {
        GenerationId(self.current.load(Ordering::SeqCst))
    }

    /// Supersede everything without opening a generation anyone will run.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// A worker's view of whether it is still wanted.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    id: GenerationId,
    current: Arc<AtomicU64>,
}

impl GenerationToken {
    pub fn id(&self) -> GenerationId {
        self.id
    }

    /// True until a newer generation is opened.
    #[inline]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id.get()
    }
}
