//! Stable ordering of candidates: prefix matches first, then by score.

use super::matcher::{full_match, score};
use crate::config::FinderConfig;
use crate::note::Note;
use chrono::{DateTime, Local};
use std::cmp::Ordering;

/// Composite ordering key. Higher sorts first on both fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankKey {
    pub full_match: bool,
    pub score: f64,
}

impl RankKey {
    fn cmp_best_first(&self, other: &Self) -> Ordering {
        other
            .full_match
            .cmp(&self.full_match)
            .then_with(|| other.score.total_cmp(&self.score))
    }
}

/// Stable sort by `key`; equal keys keep their incoming order so the list
/// does not jitter between keystrokes.
pub fn rank_by<T>(items: &mut Vec<T>, key: impl Fn(&T) -> RankKey) {
    let mut keyed: Vec<(RankKey, T)> =
        items.drain(..).map(|item| (key(&item), item)).collect();
    keyed.sort_by(|a, b| a.0.cmp_best_first(&b.0));
    items.extend(keyed.into_iter().map(|(_, item)| item));
}

pub fn note_key(
    note: &Note,
    query: &str,
    now: DateTime<Local>,
    cfg: &FinderConfig,
) -> RankKey {
    RankKey {
        full_match: full_match(&note.title, query),
        score: score(&note.title, note.modified, query, now, cfg),
    }
}

/// Order notes for `query`. `now` is fixed per pass so every note is aged
/// against the same instant.
pub fn rank_notes(
    notes: &mut Vec<Note>,
    query: &str,
    now: DateTime<Local>,
    cfg: &FinderConfig,
) {
    rank_by(notes, |n| note_key(n, query, now, cfg));
}
