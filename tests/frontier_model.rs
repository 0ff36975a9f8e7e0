//! Drives the frontier with random operations and checks it against a plain
//! vector that is scanned on every query.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use slider_puzzle::{Frontier, GeneratorConfig, PuzzleGenerator, ScrambleMode, State};

struct Model {
    entries: Vec<(u32, u64, State)>,
    seq: u64,
}

impl Model {
    fn contains(&self, state: &State) -> bool {
        self.entries.iter().any(|(_, _, s)| s == state)
    }

    fn push(&mut self, priority: u32, state: State) {
        self.entries.push((priority, self.seq, state));
        self.seq += 1;
    }

    fn pop(&mut self) -> Option<(u32, State)> {
        let (i, _) = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, (p, seq, _))| (*p, *seq))?;
        let (p, _, s) = self.entries.remove(i);
        Some((p, s))
    }

    fn replace(&mut self, state: &State, priority: u32) {
        let seq = self.seq;
        self.seq += 1;
        if let Some(entry) = self.entries.iter_mut().find(|(_, _, s)| s == state) {
            entry.0 = priority;
            entry.1 = seq;
        }
    }
}

fn pool(count: usize) -> Vec<State> {
    let mut generator = PuzzleGenerator::new(GeneratorConfig {
        size: 3,
        steps: 0,
        seed: Some(99),
        mode: ScrambleMode::Shuffle,
    })
    .unwrap();
    let mut states: Vec<State> = Vec::new();
    while states.len() < count {
        let state = generator.generate().unwrap();
        if !states.contains(&state) {
            states.push(state);
        }
    }
    states
}

#[test]
fn agrees_with_brute_force_model() {
    let states = pool(40);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut frontier = Frontier::new();
    let mut model = Model {
        entries: Vec::new(),
        seq: 0,
    };

    for _ in 0..5_000 {
        let state = &states[rng.gen_range(0..states.len())];
        let priority = rng.gen_range(0..20);

        match rng.gen_range(0..3) {
            0 => {
                let pushed = frontier.push(priority, state.clone());
                assert_eq!(pushed.is_ok(), !model.contains(state));
                if pushed.is_ok() {
                    model.push(priority, state.clone());
                }
            }
            1 => assert_eq!(frontier.pop(), model.pop()),
            _ => {
                let replaced = frontier.replace(state, priority);
                assert_eq!(replaced.is_ok(), model.contains(state));
                model.replace(state, priority);
            }
        }

        assert_eq!(frontier.len(), model.entries.len());
        for s in &states {
            assert_eq!(frontier.contains(s), model.contains(s));
        }
        let distinct: HashSet<&State> = frontier.iter().map(|(_, s)| s).collect();
        assert_eq!(distinct.len(), frontier.len());
    }

    while let Some(entry) = frontier.pop() {
        assert_eq!(Some(entry), model.pop());
    }
    assert!(model.entries.is_empty());
}
