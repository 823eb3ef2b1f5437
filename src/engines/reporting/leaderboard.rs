use crate::types::{Individual, WORST_FITNESS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub passes: Vec<String>,
    pub fitness: f64,              // Seconds, lower is better
    pub canonical_key: String,     // For deduplication
}

/// The best distinct individuals seen in a run, fastest first
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    max_size: usize,
    seen_keys: HashSet<String>,
}

impl Leaderboard {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
            seen_keys: HashSet::new(),
        }
    }

    /// Attempt to add an individual; duplicates and failed evaluations are rejected
    pub fn try_add(&mut self, individual: &Individual, fitness: f64) -> bool {
        if !fitness.is_finite() || fitness >= WORST_FITNESS {
            return false;
        }

        let canonical_key = individual.canonical_key();
        if self.seen_keys.contains(&canonical_key) {
            return false;
        }

        self.seen_keys.insert(canonical_key.clone());
        self.entries.push(LeaderboardEntry {
            passes: individual.names().map(str::to_string).collect(),
            fitness,
            canonical_key,
        });

        self.entries.sort_by(|a, b| {
            a.fitness.partial_cmp(&b.fitness).unwrap_or(std::cmp::Ordering::Equal)
        });

        while self.entries.len() > self.max_size {
            if let Some(removed) = self.entries.pop() {
                self.seen_keys.remove(&removed.canonical_key);
            }
        }

        true
    }

    pub fn get_all(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
