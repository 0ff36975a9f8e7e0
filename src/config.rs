//! Search configuration.

use std::time::Duration;

use crate::heuristic::Heuristic;

/// Limits that abort a search before it finishes.
///
/// Both are optional; an empty budget lets the search run until it finds the
/// goal or exhausts the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    /// Maximum number of states expanded
    pub max_expansions: Option<usize>,

    /// Wall-clock limit for one search
    pub time_limit: Option<Duration>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_expansions.is_none() && self.time_limit.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Distance estimate used to order the frontier
    pub heuristic: Heuristic,

    /// Re-queue a frontier state at its lower priority when a cheaper path
    /// to it turns up. With this off, only the cost map is corrected and the
    /// state keeps the priority it was queued with.
    pub refresh_frontier: bool,

    pub budget: Budget,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            refresh_frontier: true,
            budget: Budget::unlimited(),
        }
    }
}

impl SearchConfig {
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_refresh(mut self, refresh_frontier: bool) -> Self {
        self.refresh_frontier = refresh_frontier;
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.budget.max_expansions = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.budget.time_limit = Some(limit);
        self
    }
}
