//! A* search over puzzle states.
//!
//! The driver seeds the cost map with the start state and expands it
//! directly; every other state reaches expansion through the [`Frontier`].
//! A successor is queued the first time it is seen. When a cheaper path to a
//! state that is still queued turns up, the cost map and parent link are
//! corrected and, if [`SearchConfig::refresh_frontier`] is set, the queued
//! entry is replaced at its lower priority.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use crate::action::{apply, available_actions, Action};
use crate::config::SearchConfig;
use crate::error::{PuzzleError, SearchError};
use crate::frontier::Frontier;
use crate::heuristic::{is_goal, Heuristic, Memo};
use crate::solvability::is_solvable;
use crate::state::State;

const PROGRESS_INTERVAL: usize = 100_000;
const CLOCK_INTERVAL: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initialized,
    Expanding,
    GoalFound,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// States taken off the frontier (plus the start) and expanded
    pub expanded: usize,
    /// Successor states constructed
    pub generated: usize,
    /// Cheaper paths found to states already queued
    pub improved: usize,
    /// Frontier entries re-queued at a lower priority
    pub refreshed: usize,
    pub peak_frontier: usize,
    pub elapsed: Duration,
    /// Priority of every state popped, in pop order
    pub history: Vec<u32>,
}

impl SearchStats {
    /// Running minimum of [`SearchStats::history`].
    pub fn best_history(&self) -> Vec<u32> {
        self.history
            .iter()
            .scan(u32::MAX, |min, &f| {
                *min = (*min).min(f);
                Some(*min)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Solution {
    /// The goal state that ended the search
    pub state: State,
    /// Path cost recorded for `state`
    pub cost: u32,
    /// Moves from the start to `state`
    pub path: Vec<Action>,
    pub heuristic: Heuristic,
    pub stats: SearchStats,
}

/// Closest state to the goal seen so far, by estimate then path cost.
struct Best {
    estimate: u32,
    cost: u32,
    state: State,
}

impl Best {
    fn offer(&mut self, estimate: u32, cost: u32, state: &State) {
        if (estimate, cost) < (self.estimate, self.cost) {
            self.estimate = estimate;
            self.cost = cost;
            self.state = state.clone();
        }
    }
}

/// One A* run. Owns its cost map and frontier; borrows a memo that may be
/// shared with other runs.
pub struct Search<'m> {
    config: SearchConfig,
    memo: &'m mut Memo,
    cost: FxHashMap<State, u32>,
    parents: FxHashMap<State, (State, Action)>,
    frontier: Frontier,
    stats: SearchStats,
    phase: Phase,
}

impl<'m> Search<'m> {
    pub fn new(config: SearchConfig, memo: &'m mut Memo) -> Self {
        Self {
            config,
            memo,
            cost: FxHashMap::default(),
            parents: FxHashMap::default(),
            frontier: Frontier::new(),
            stats: SearchStats::default(),
            phase: Phase::Initialized,
        }
    }

    pub fn run(mut self, start: &State) -> Result<Solution, SearchError> {
        let started = Instant::now();
        let outcome = self.search(start, started);
        self.stats.elapsed = started.elapsed();

        info!(
            heuristic = %self.config.heuristic,
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            "Finished a_star in {:.4} secs",
            self.stats.elapsed.as_secs_f64()
        );

        let state = outcome?;
        let cost = self.cost.get(&state).copied().unwrap_or_default();
        let path = self.path_to(&state);
        debug_assert_eq!(path.len(), cost as usize);

        Ok(Solution {
            state,
            cost,
            path,
            heuristic: self.config.heuristic,
            stats: self.stats,
        })
    }

    fn search(&mut self, start: &State, started: Instant) -> Result<State, SearchError> {
        debug!(
            heuristic = %self.config.heuristic,
            refresh = self.config.refresh_frontier,
            size = start.size(),
            "search starting"
        );

        let mut state = start.clone();
        self.cost.insert(state.clone(), 0);
        let mut best = Best {
            estimate: self.memo.estimate(self.config.heuristic, &state),
            cost: 0,
            state: state.clone(),
        };

        while !is_goal(&state) {
            self.check_budget(started, &best)?;
            self.expand(&state)?;

            let Some((priority, next)) = self.frontier.pop() else {
                warn!(expanded = self.stats.expanded, "frontier exhausted");
                return Err(SearchError::Exhausted {
                    expanded: self.stats.expanded,
                });
            };
            if self.phase == Phase::Initialized {
                self.set_phase(Phase::Expanding);
            }
            self.stats.history.push(priority);

            let g = self.cost[&next];
            best.offer(self.memo.estimate(self.config.heuristic, &next), g, &next);
            state = next;

            if self.stats.expanded % PROGRESS_INTERVAL == 0 {
                debug!(
                    expanded = self.stats.expanded,
                    frontier = self.frontier.len(),
                    f = priority,
                    g,
                    "search progress"
                );
            }
        }

        self.set_phase(Phase::GoalFound);
        Ok(state)
    }

    fn expand(&mut self, state: &State) -> Result<(), PuzzleError> {
        self.stats.expanded += 1;
        let new_cost = self.cost[state] + 1;
        trace!(g = new_cost - 1, frontier = self.frontier.len(), "expanding");

        for action in available_actions(state) {
            let next = apply(state, action);
            self.stats.generated += 1;

            let queued = self.frontier.contains(&next);
            match self.cost.get(&next).copied() {
                None if !queued => {
                    let h = self.memo.estimate(self.config.heuristic, &next);
                    self.cost.insert(next.clone(), new_cost);
                    self.parents.insert(next.clone(), (state.clone(), action));
                    self.frontier.push(new_cost + h, next)?;
                }
                Some(old) if queued && old > new_cost => {
                    self.cost.insert(next.clone(), new_cost);
                    self.parents.insert(next.clone(), (state.clone(), action));
                    self.stats.improved += 1;
                    if self.config.refresh_frontier {
                        let h = self.memo.estimate(self.config.heuristic, &next);
                        self.frontier.replace(&next, new_cost + h)?;
                        self.stats.refreshed += 1;
                    }
                }
                _ => {}
            }
        }

        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        Ok(())
    }

    fn check_budget(&self, started: Instant, best: &Best) -> Result<(), SearchError> {
        let budget = &self.config.budget;
        let over_count = budget
            .max_expansions
            .is_some_and(|max| self.stats.expanded >= max);
        let over_time = budget.time_limit.is_some_and(|limit| {
            self.stats.expanded % CLOCK_INTERVAL == 0 && started.elapsed() >= limit
        });

        if over_count || over_time {
            warn!(
                expanded = self.stats.expanded,
                best_estimate = best.estimate,
                "search budget exceeded"
            );
            return Err(SearchError::BudgetExceeded {
                expanded: self.stats.expanded,
                elapsed: started.elapsed(),
                best: best.state.clone(),
                best_estimate: best.estimate,
            });
        }
        Ok(())
    }

    fn set_phase(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "search phase");
        self.phase = next;
    }

    fn path_to(&self, goal: &State) -> Vec<Action> {
        let mut path = Vec::new();
        let mut current = goal;
        while let Some((parent, action)) = self.parents.get(current) {
            path.push(*action);
            current = parent;
        }
        path.reverse();
        path
    }
}

/// Runs A* from `start` with a fresh cost map and frontier.
pub fn a_star(
    start: &State,
    config: &SearchConfig,
    memo: &mut Memo,
) -> Result<Solution, SearchError> {
    Search::new(*config, memo).run(start)
}

/// Rejects unsolvable starts, then runs A* with a private memo.
pub fn solve(start: &State, config: &SearchConfig) -> Result<Solution, SearchError> {
    if !is_solvable(start.cells(), start.size())? {
        return Err(SearchError::Unsolvable);
    }
    let mut memo = Memo::new();
    a_star(start, config, &mut memo)
}

/// Runs one search per heuristic, one after another. Each run gets its own
/// cost map and frontier; the memo is shared.
pub fn compare(
    start: &State,
    heuristics: &[Heuristic],
    config: &SearchConfig,
    memo: &mut Memo,
) -> Vec<(Heuristic, Result<Solution, SearchError>)> {
    heuristics
        .iter()
        .map(|&heuristic| {
            info!(%heuristic, "Solver starting");
            let config = config.with_heuristic(heuristic);
            (heuristic, a_star(start, &config, memo))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Grid;

    fn state(text: &str) -> State {
        text.parse::<Grid>().unwrap().lock()
    }

    #[test]
    fn goal_start_needs_no_moves() {
        let goal = State::goal(3);
        let solution = solve(&goal, &SearchConfig::default()).unwrap();

        assert_eq!(solution.cost, 0);
        assert!(solution.path.is_empty());
        assert_eq!(solution.stats.expanded, 0);
        assert!(solution.stats.history.is_empty());
    }

    #[test]
    fn one_move_away() {
        let start = state("1,2,3;4,5,6;7,0,8");
        let solution = solve(&start, &SearchConfig::default()).unwrap();

        assert_eq!(solution.cost, 1);
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.path[0].apply(&start), State::goal(3));
        assert!(is_goal(&solution.state));
    }

    #[test]
    fn path_replays_to_goal() {
        let start = state("8,6,7;2,5,4;3,0,1");
        let solution = solve(&start, &SearchConfig::default()).unwrap();

        // a known 31-move position, the hardest the 8-puzzle has
        assert_eq!(solution.cost, 31);
        let end = solution
            .path
            .iter()
            .fold(start, |s, action| action.apply(&s));
        assert_eq!(end, solution.state);
    }

    #[test]
    fn every_heuristic_agrees_on_cost() {
        let start = state("4,1,2;0,5,3;7,8,6");
        let mut memo = Memo::new();
        let results = compare(&start, &Heuristic::ALL, &SearchConfig::default(), &mut memo);

        let costs: Vec<u32> = results
            .into_iter()
            .map(|(_, r)| r.unwrap().cost)
            .collect();
        assert_eq!(costs, vec![costs[0]; 3]);
        assert!(memo.hits() > 0);
    }

    #[test]
    fn unsolvable_is_rejected_up_front() {
        let start = state("1,2,3;4,5,6;8,7,0");
        assert!(matches!(
            solve(&start, &SearchConfig::default()),
            Err(SearchError::Unsolvable)
        ));
    }

    #[test]
    fn unsolvable_exhausts_without_precheck() {
        // 2x2 boards have 12 reachable states per parity class
        let start = state("2,1;3,0");
        let mut memo = Memo::new();
        match a_star(&start, &SearchConfig::default(), &mut memo) {
            Err(SearchError::Exhausted { expanded }) => assert_eq!(expanded, 12),
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn expansion_budget_stops_search() {
        let start = state("8,6,7;2,5,4;3,0,1");
        let config = SearchConfig::default().with_max_expansions(10);
        match solve(&start, &config) {
            Err(SearchError::BudgetExceeded {
                expanded,
                best,
                best_estimate,
                ..
            }) => {
                assert_eq!(expanded, 10);
                assert_eq!(best_estimate, Heuristic::Manhattan.estimate(&best));
                assert!(best_estimate <= Heuristic::Manhattan.estimate(&start));
            }
            other => panic!("expected budget error, got {other:?}"),
        }
    }

    /// Queues the goal at cost 5, then expands its one-move neighbour at
    /// cost 1, which reaches the goal at cost 2.
    fn improve_queued_goal(refresh: bool) -> (u32, Option<u32>, usize, usize) {
        let parent = state("1,2,3;4,5,0;7,8,6");
        let goal = State::goal(3);
        let mut memo = Memo::new();
        let mut search = Search::new(SearchConfig::default().with_refresh(refresh), &mut memo);

        search.cost.insert(parent.clone(), 1);
        search.cost.insert(goal.clone(), 5);
        search.frontier.push(5, goal.clone()).unwrap();
        search.expand(&parent).unwrap();

        let (via, action) = &search.parents[&goal];
        assert_eq!(via, &parent);
        assert_eq!(action.apply(&parent), goal);

        (
            search.cost[&goal],
            search.frontier.priority_of(&goal),
            search.stats.improved,
            search.stats.refreshed,
        )
    }

    #[test]
    fn cheaper_path_lowers_queued_priority() {
        let (cost, priority, improved, refreshed) = improve_queued_goal(true);
        assert_eq!(cost, 2);
        assert_eq!(priority, Some(2));
        assert_eq!((improved, refreshed), (1, 1));
    }

    #[test]
    fn cheaper_path_without_refresh_keeps_stale_priority() {
        let (cost, priority, improved, refreshed) = improve_queued_goal(false);
        assert_eq!(cost, 2);
        assert_eq!(priority, Some(5));
        assert_eq!((improved, refreshed), (1, 0));
    }

    #[test]
    fn best_history_is_running_min() {
        let stats = SearchStats {
            history: vec![7, 5, 6, 3, 4],
            ..SearchStats::default()
        };
        assert_eq!(stats.best_history(), vec![7, 5, 5, 3, 3]);
    }
}
